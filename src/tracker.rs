//! Tracker driver (C9): orchestrates C5-C8 per primary vertex, fanning out
//! across vertices with `rayon` since each vertex's context is independent.

use rayon::prelude::*;

use crate::backend::{Backend, CpuBackend};
use crate::constants::Constants;
use crate::context::PrimaryVertexContext;
use crate::event::Event;
use crate::road::Road;

/// Runs the CA pipeline over an event's primary vertices, producing one
/// road list per vertex, in the same order as `event.vertices()`.
pub struct Tracker<B: Backend = CpuBackend> {
    constants: Constants,
    backend: B,
}

impl Tracker<CpuBackend> {
    /// Builds a tracker using the default CPU backend.
    pub fn new(constants: Constants) -> Self {
        Self {
            constants,
            backend: CpuBackend,
        }
    }
}

impl<B: Backend + Sync> Tracker<B> {
    /// Builds a tracker using a given backend.
    pub fn with_backend(constants: Constants, backend: B) -> Self {
        Self { constants, backend }
    }

    /// The constants this tracker was built with.
    pub fn constants(&self) -> &Constants {
        &self.constants
    }

    /// Processes every primary vertex of `event`, in parallel.
    ///
    /// Each vertex gets its own [`PrimaryVertexContext`]; contexts share no
    /// mutable state, so this is embarrassingly parallel (§5).
    pub fn process(&self, event: &Event) -> Vec<Vec<Road>> {
        log::debug!("tracker: processing {} vertices", event.vertices().len());
        event.vertices().par_iter().map(|&vertex| self.process_vertex(event, vertex)).collect()
    }

    /// Processes a single vertex on the calling thread. Useful for tests and
    /// benchmarks that want deterministic, single-threaded execution.
    pub fn process_vertex_sequential(&self, event: &Event, vertex: [f64; 3]) -> Vec<Road> {
        self.process_vertex(event, vertex)
    }

    fn process_vertex(&self, event: &Event, vertex: [f64; 3]) -> Vec<Road> {
        let mut ctx = PrimaryVertexContext::new(event, &self.constants, vertex);

        self.backend.build_index_tables(&mut ctx);
        self.backend.form_tracklets(&mut ctx);
        self.backend.form_cells(&mut ctx);
        self.backend.link_neighbours(&mut ctx);
        self.backend.extract_roads(&mut ctx);
        self.backend.label_roads(&mut ctx);

        log::trace!("tracker: vertex {vertex:?} produced {} roads", ctx.roads().len());
        ctx.into_roads()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// An exact circle of curvature radius `rho` through the origin, sampled
    /// at every layer radius; `rho = 1000` keeps every per-layer phi step
    /// under the default gates, so a full road is produced at every vertex.
    fn curved_event(constants: &Constants, vertices: usize) -> Event {
        let rho = 1000.0;
        let mut raw_layers = Vec::new();
        for (l, &r) in constants.layer_radii.iter().enumerate() {
            let alpha = 2.0 * (r / (2.0 * rho)).asin();
            let x = rho * alpha.sin();
            let y = rho * (1.0 - alpha.cos());
            let z = l as f64 * 0.01;
            raw_layers.push(vec![(l as i32, x, y, z, 0.0, 1)]);
        }
        Event::build(raw_layers, constants, vec![[0.0, 0.0, 0.0]; vertices]).unwrap()
    }

    #[test]
    fn process_returns_one_road_list_per_vertex() {
        let constants = Constants::default();
        let event = curved_event(&constants, 3);
        let tracker = Tracker::new(constants);

        let roads = tracker.process(&event);
        assert_eq!(roads.len(), 3);
        for per_vertex in &roads {
            assert_eq!(per_vertex.len(), 1, "each vertex sees the same single track and must produce exactly one road");
            assert_eq!(per_vertex[0].layers().count(), crate::constants::CELLS_PER_ROAD);
        }
    }

    #[test]
    fn sequential_and_parallel_paths_agree() {
        let mut constants = Constants::default();
        constants.cells_min_level = 1;
        let event = curved_event(&constants, 2);
        let tracker = Tracker::new(constants);

        let parallel = tracker.process(&event);
        let sequential: Vec<_> = event
            .vertices()
            .iter()
            .map(|&v| tracker.process_vertex_sequential(&event, v))
            .collect();

        assert_eq!(parallel, sequential);
    }
}
