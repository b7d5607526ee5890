//! The per-vertex working set: cluster/index-table views borrowed from the
//! event, plus the tracklet/cell/road scratch state built fresh for each
//! primary vertex and discarded once its roads are extracted.

use crate::cell::Cell;
use crate::constants::{Constants, CELLS_PER_ROAD, TRACKLETS_PER_ROAD, UNUSED};
use crate::event::Event;
use crate::road::Road;
use crate::tracklet::Tracklet;

/// Per-vertex state for the CA pipeline (C4).
///
/// Built once per primary vertex, driven through stages C5–C8, and then
/// dropped: only its `roads` survive into the driver's output.
pub struct PrimaryVertexContext<'a> {
    event: &'a Event,
    constants: &'a Constants,
    vertex: [f64; 3],

    /// `tracklets[L]`, `L` in `[0, TRACKLETS_PER_ROAD)`.
    pub(crate) tracklets: Vec<Vec<Tracklet>>,
    /// `tracklets_lut[L]`, `L` in `[0, TRACKLETS_PER_ROAD - 1)`, sized to
    /// `clusters[L+1]` and filled with [`UNUSED`].
    pub(crate) tracklets_lut: Vec<Vec<i32>>,

    /// `cells[L]`, `L` in `[0, CELLS_PER_ROAD)`.
    pub(crate) cells: Vec<Vec<Cell>>,
    /// `cells_lut[L]`, `L` in `[0, CELLS_PER_ROAD - 1)`; sized to
    /// `tracklets[L+1]` lazily, once C5 has fully populated that layer.
    pub(crate) cells_lut: Vec<Vec<i32>>,

    /// `cells_neighbours[L]`, keyed by a cell index on layer `L+1`, holding
    /// the compatible predecessor cell indices on layer `L`. Sized to
    /// `cells[L+1]` lazily, once C6 has fully populated that layer.
    pub(crate) cells_neighbours: Vec<Vec<Vec<i32>>>,

    /// Extracted roads, in the order C7 produced them.
    pub(crate) roads: Vec<Road>,
}

impl<'a> PrimaryVertexContext<'a> {
    /// Builds an empty context for the given vertex, pre-sizing the tracklet
    /// lookup tables (the only ones whose size is known up front, from
    /// cluster counts alone).
    pub fn new(event: &'a Event, constants: &'a Constants, vertex: [f64; 3]) -> Self {
        let tracklets_lut = (0..TRACKLETS_PER_ROAD - 1)
            .map(|l| vec![UNUSED; event.layers()[l + 1].len()])
            .collect();

        Self {
            event,
            constants,
            vertex,
            tracklets: vec![Vec::new(); TRACKLETS_PER_ROAD],
            tracklets_lut,
            cells: vec![Vec::new(); CELLS_PER_ROAD],
            cells_lut: vec![Vec::new(); CELLS_PER_ROAD - 1],
            cells_neighbours: vec![Vec::new(); CELLS_PER_ROAD - 1],
            roads: Vec::new(),
        }
    }

    /// The event this context was built against.
    pub fn event(&self) -> &'a Event {
        self.event
    }

    /// The gating/geometry constants this context was built against.
    pub fn constants(&self) -> &'a Constants {
        self.constants
    }

    /// The primary vertex's 3-vector.
    pub fn vertex(&self) -> [f64; 3] {
        self.vertex
    }

    /// Tracklets formed so far, by inner layer.
    pub fn tracklets(&self) -> &[Vec<Tracklet>] {
        &self.tracklets
    }

    /// Cells formed so far, by inner layer.
    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    /// Compatible-predecessor lists, by inner layer.
    pub fn cells_neighbours(&self) -> &[Vec<Vec<i32>>] {
        &self.cells_neighbours
    }

    /// Roads extracted so far.
    pub fn roads(&self) -> &[Road] {
        &self.roads
    }

    /// Consumes the context, returning the roads extracted from it.
    pub fn into_roads(self) -> Vec<Road> {
        self.roads
    }
}
