//! Hard-coded geometry and gating constants, and the config layer that
//! bundles them.
//!
//! The distilled spec pins these to "fixed at build" values without naming
//! them; the layer radii/extents below are representative of a seven-layer
//! silicon vertex tracker and are not meant to match any specific detector.

/// Number of concentric detector layers.
pub const NUM_LAYERS: usize = 7;

/// Number of adjacent-layer pairs a tracklet can span (`L -> L+1` for
/// `L` in `[0, TRACKLETS_PER_ROAD)`).
pub const TRACKLETS_PER_ROAD: usize = 6;

/// Number of inner layers a cell can be rooted at (`L, L+1, L+2` for `L`
/// in `[0, CELLS_PER_ROAD)`).
pub const CELLS_PER_ROAD: usize = 5;

/// Index-table bins along z.
pub const Z_BINS: usize = 20;

/// Index-table bins along phi.
pub const PHI_BINS: usize = 20;

/// Sentinel for "no such lookup entry".
pub const UNUSED: i32 = -1;

/// Any divisor with magnitude below this is treated as zero.
pub const FLOAT_MIN_THRESHOLD: f64 = 1e-20;

/// `2 * pi`, spelled out once so call sites don't repeat the multiplication.
pub const TWO_PI: f64 = std::f64::consts::PI * 2.0;

/// Bundled geometry and gating constants for one tracker configuration.
///
/// A [`PrimaryVertexContext`](crate::context::PrimaryVertexContext) is built
/// against one of these rather than reading the `const` table directly, so a
/// test fixture can loosen a gate without touching any stage code.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Constants {
    /// Layer radii `R_L`, innermost first.
    pub layer_radii: [f64; NUM_LAYERS],
    /// Layer z half-extents `Z_L`.
    pub layer_z_half_extent: [f64; NUM_LAYERS],
    /// Per-inner-layer tracklet z-gate.
    pub tracklet_max_delta_z: [f64; TRACKLETS_PER_ROAD],
    /// Tracklet phi gate, shared across layers.
    pub phi_coordinate_cut: f64,
    /// Cell tan-lambda continuity gate, shared across layers.
    pub cell_max_delta_tan_lambda: f64,
    /// Cell phi continuity gate, shared across layers.
    pub cell_max_delta_phi: f64,
    /// Per-inner-layer cell vertex-pointing z-gate.
    pub cell_max_delta_z: [f64; CELLS_PER_ROAD],
    /// Per-inner-layer cell DCA gate.
    pub cell_max_dca: [f64; CELLS_PER_ROAD],
    /// Per-layer-pair neighbour plane-normal gate, squared.
    pub neighbour_max_delta_n2: [f64; CELLS_PER_ROAD - 1],
    /// Per-layer-pair neighbour curvature gate.
    pub neighbour_max_delta_k: [f64; CELLS_PER_ROAD - 1],
    /// Lowest cell level a road may be seeded from.
    pub cells_min_level: usize,
}

impl Default for Constants {
    fn default() -> Self {
        Self {
            layer_radii: [23.0, 31.0, 39.0, 194.0, 247.0, 353.0, 405.0],
            layer_z_half_extent: [270.0, 270.0, 270.0, 843.0, 843.0, 1030.0, 1030.0],
            tracklet_max_delta_z: [0.1, 0.1, 0.3, 3.0, 3.0, 3.0],
            phi_coordinate_cut: 0.3,
            cell_max_delta_tan_lambda: 0.025,
            cell_max_delta_phi: 0.14,
            cell_max_delta_z: [0.2, 0.4, 0.5, 0.6, 3.0],
            cell_max_dca: [0.05, 0.04, 0.05, 0.2, 0.4],
            neighbour_max_delta_n2: [0.002, 0.002, 0.002, 0.002],
            neighbour_max_delta_k: [0.0025, 0.0025, 0.0025, 0.0025],
            cells_min_level: 2,
        }
    }
}
