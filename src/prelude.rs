//! Common imports for consumers of this crate.

pub use crate::backend::{Backend, CpuBackend};
pub use crate::cell::Cell;
pub use crate::cluster::Cluster;
pub use crate::constants::Constants;
pub use crate::context::PrimaryVertexContext;
pub use crate::error::TrackerError;
pub use crate::event::{Event, Label};
pub use crate::index_table::IndexTable;
pub use crate::layer::Layer;
pub use crate::road::Road;
pub use crate::tracker::Tracker;
pub use crate::tracklet::Tracklet;
