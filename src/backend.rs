//! Backend trait (C11): a seam over the five CA stage operations so an
//! alternative execution backend could be substituted without touching the
//! driver (C9). Only a CPU backend is implemented here.

use crate::cell;
use crate::context::PrimaryVertexContext;
use crate::label;
use crate::road;
use crate::tracklet;

/// Executes the five CA stages over a [`PrimaryVertexContext`].
///
/// `CpuBackend` is the only implementation in this crate. A GPU backend is
/// out of scope, but would implement this same trait, leaving
/// [`crate::tracker::Tracker`] unchanged.
pub trait Backend {
    /// Builds (or re-validates) the per-layer index tables this vertex's
    /// stages will query.
    fn build_index_tables(&self, ctx: &mut PrimaryVertexContext);
    /// Runs the tracklet stage (C5).
    fn form_tracklets(&self, ctx: &mut PrimaryVertexContext);
    /// Runs the cell stage (C6).
    fn form_cells(&self, ctx: &mut PrimaryVertexContext);
    /// Runs the neighbour-linking half of C7.
    fn link_neighbours(&self, ctx: &mut PrimaryVertexContext);
    /// Runs the road-extraction half of C7.
    fn extract_roads(&self, ctx: &mut PrimaryVertexContext);
    /// Runs the MC labelling stage (C8).
    fn label_roads(&self, ctx: &mut PrimaryVertexContext);
}

/// The default, single-threaded CPU backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuBackend;

impl Backend for CpuBackend {
    fn build_index_tables(&self, _ctx: &mut PrimaryVertexContext) {
        // Index tables are built once per event, in `Event::build`, and
        // shared read-only across every vertex's context; there is nothing
        // left for a per-vertex stage to do here on the CPU path.
    }

    fn form_tracklets(&self, ctx: &mut PrimaryVertexContext) {
        tracklet::form_tracklets(ctx);
    }

    fn form_cells(&self, ctx: &mut PrimaryVertexContext) {
        cell::form_cells(ctx);
    }

    fn link_neighbours(&self, ctx: &mut PrimaryVertexContext) {
        road::link_neighbours(ctx);
    }

    fn extract_roads(&self, ctx: &mut PrimaryVertexContext) {
        road::extract_roads(ctx);
    }

    fn label_roads(&self, ctx: &mut PrimaryVertexContext) {
        label::apply_labels(ctx);
    }
}
