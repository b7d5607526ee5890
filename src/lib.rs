//! Cellular-automaton charged-particle track reconstruction.
//!
//! Given an [`Event`](event::Event) — clusters spread over seven detector
//! layers plus one or more primary-vertex candidates — a [`Tracker`] builds,
//! for each vertex, a list of [`Road`](road::Road)s: chains of compatible
//! cluster triplets spanning consecutive layers that plausibly trace one
//! charged particle back to that vertex.

mod cell;
mod cluster;
mod context;
mod layer;
mod road;
mod tracklet;

pub mod backend;
pub mod constants;
pub mod error;
pub mod event;
pub mod geometry;
pub mod index_table;
pub mod label;
pub mod prelude;
pub mod tracker;

pub use backend::{Backend, CpuBackend};
pub use cell::Cell;
pub use cluster::Cluster;
pub use constants::Constants;
pub use context::PrimaryVertexContext;
pub use error::TrackerError;
pub use event::{Event, Label};
pub use index_table::IndexTable;
pub use layer::Layer;
pub use road::Road;
pub use tracker::Tracker;
pub use tracklet::Tracklet;
