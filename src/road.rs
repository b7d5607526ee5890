//! Neighbour & road stage (C7): links cells across layer pairs into a CA
//! graph, assigns levels, and extracts roads by descending-level traversal.

use crate::constants::{CELLS_PER_ROAD, UNUSED};
use crate::context::PrimaryVertexContext;

/// A chain of cells extracted from the CA graph: one candidate track.
///
/// `cells[L]` holds the owning cell index on layer `L`, or [`UNUSED`] if the
/// road has no cell there.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Road {
    /// Per-layer owning cell index, or `UNUSED`.
    pub cells: [i32; CELLS_PER_ROAD],
    /// Monte-Carlo label assigned by the majority vote of C8. `UNUSED` until
    /// that stage runs.
    pub mc_label: i32,
    /// Whether the road's clusters disagreed on their MC id.
    pub is_fake: bool,
}

impl Road {
    fn empty() -> Self {
        Self {
            cells: [UNUSED; CELLS_PER_ROAD],
            mc_label: UNUSED,
            is_fake: false,
        }
    }

    /// The layer indices this road has a cell at, ascending.
    pub fn layers(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells.iter().enumerate().filter(|(_, &c)| c != UNUSED).map(|(l, _)| l)
    }
}

/// Links cells on adjacent layers and raises successor levels, for every
/// layer pair `L, L+1` in `[0, CellsPerRoad - 1)`.
///
/// Must run after [`crate::cell::form_cells`] and before
/// [`extract_roads`].
pub fn link_neighbours(ctx: &mut PrimaryVertexContext) {
    log::debug!("neighbour stage: start");

    for l in 0..CELLS_PER_ROAD - 1 {
        let next_len = ctx.cells()[l + 1].len();
        ctx.cells_neighbours[l] = vec![Vec::new(); next_len];

        let delta_n2_gate = ctx.constants().neighbour_max_delta_n2[l];
        let delta_k_gate = ctx.constants().neighbour_max_delta_k[l];

        let (left, right) = ctx.cells.split_at_mut(l + 1);
        let this_layer = &left[l];
        let next_layer = &mut right[0];

        for (c_idx, c) in this_layer.iter().enumerate() {
            let t2 = c.second_tracklet_index;
            let start = ctx.cells_lut[l][t2];
            if start == UNUSED {
                continue;
            }
            let start = start as usize;
            if start >= next_layer.len() || next_layer[start].first_tracklet_index != t2 {
                continue;
            }

            let mut idx = start;
            while idx < next_layer.len() && next_layer[idx].first_tracklet_index == t2 {
                let delta_n2: f64 = (0..3).map(|k| (c.normal[k] - next_layer[idx].normal[k]).powi(2)).sum();
                let delta_k = (c.curvature - next_layer[idx].curvature).abs();

                if delta_n2 < delta_n2_gate && delta_k < delta_k_gate {
                    ctx.cells_neighbours[l][idx].push(c_idx as i32);
                    if c.level >= next_layer[idx].level {
                        next_layer[idx].level = c.level + 1;
                    }
                }
                idx += 1;
            }
        }
    }

    log::debug!("neighbour stage: done");
}

/// Recursively extends `road` backwards from `(layer, cell_idx)`, whose
/// level is `level`, branching once per additional valid predecessor.
///
/// Recursion depth is bounded by [`CELLS_PER_ROAD`], so this never
/// overflows the stack.
fn extend_road(ctx: &PrimaryVertexContext, road: [i32; CELLS_PER_ROAD], layer: usize, cell_idx: usize, level: usize, out: &mut Vec<[i32; CELLS_PER_ROAD]>) {
    if level <= 1 || layer == 0 {
        out.push(road);
        return;
    }

    let predecessors = &ctx.cells_neighbours()[layer - 1][cell_idx];
    let mut branched = false;
    for &p in predecessors {
        if ctx.cells()[layer - 1][p as usize].level != level - 1 {
            continue;
        }
        branched = true;
        let mut branch = road;
        branch[layer - 1] = p;
        extend_road(ctx, branch, layer - 1, p as usize, level - 1, out);
    }

    if !branched {
        out.push(road);
    }
}

/// Extracts roads by scanning cell levels from [`Constants::cells_min_level`]
/// up to [`CELLS_PER_ROAD`], descending, seeding one road per cell at each
/// level and tracing compatible predecessors back through the layers.
///
/// [`Constants::cells_min_level`]: crate::constants::Constants::cells_min_level
pub fn extract_roads(ctx: &mut PrimaryVertexContext) {
    log::debug!("road stage: start");

    let min_level = ctx.constants().cells_min_level.max(1);

    for i_level in (min_level..=CELLS_PER_ROAD).rev() {
        for l in (i_level.saturating_sub(1)..CELLS_PER_ROAD).rev() {
            let seeds: Vec<usize> = ctx.cells()[l]
                .iter()
                .enumerate()
                .filter(|(_, c)| c.level == i_level)
                .map(|(idx, _)| idx)
                .collect();

            for c_idx in seeds {
                let mut seed = Road::empty().cells;
                seed[l] = c_idx as i32;

                let mut branches = Vec::new();
                extend_road(ctx, seed, l, c_idx, i_level, &mut branches);

                for cells in branches {
                    ctx.roads.push(Road { cells, ..Road::empty() });
                }

                ctx.cells[l][c_idx].level = 0;
            }
        }
    }

    log::debug!("road stage: done, {} roads", ctx.roads.len());
}
