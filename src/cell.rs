//! Cell stage (C6): triplets of clusters on three consecutive layers, with a
//! planar/circular fit giving a plane normal and curvature.

use crate::constants::{CELLS_PER_ROAD, FLOAT_MIN_THRESHOLD, UNUSED};
use crate::context::PrimaryVertexContext;
use crate::geometry;

/// A triplet `(A on L, B on L+1, C on L+2)`, built from two tracklets sharing
/// cluster `B`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Cell {
    /// Index of cluster `A`, on layer `L`.
    pub first_cluster_index: usize,
    /// Index of cluster `B`, on layer `L+1`.
    pub second_cluster_index: usize,
    /// Index of cluster `C`, on layer `L+2`.
    pub third_cluster_index: usize,
    /// Index of the `(A, B)` tracklet, within `tracklets[L]`.
    pub first_tracklet_index: usize,
    /// Index of the `(B, C)` tracklet, within `tracklets[L+1]`.
    pub second_tracklet_index: usize,
    /// Normalized plane normal `n_hat` of the lifted triplet.
    pub normal: [f64; 3],
    /// `1 / radius` of the fitted circle.
    pub curvature: f64,
    /// Length of the longest tail-path of compatible cells rooted here.
    /// Starts at 1 and is only ever raised by the neighbour stage.
    pub level: usize,
}

/// Lifts a cluster's `(x, y, r^2)` for the planar fit.
fn lift(x: f64, y: f64, r: f64) -> [f64; 3] {
    [x, y, r * r]
}

/// Fits a plane normal and circle radius through three lifted points, with
/// `vertex` as the primary vertex used in the plane-offset term.
///
/// Returns `None` if the triplet is degenerate (collinear, or the plane is
/// nearly parallel to the beam axis), matching the §7 no-op path.
fn fit(a: [f64; 3], a_r: f64, b: [f64; 3], b_r: f64, c: [f64; 3], c_r: f64, vertex: [f64; 3]) -> Option<([f64; 3], f64)> {
    let a = lift(a[0], a[1], a_r);
    let b = lift(b[0], b[1], b_r);
    let c = lift(c[0], c[1], c_r);

    let d1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let d2 = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];

    let n = geometry::cross(d1, d2);
    let n_norm = geometry::norm3(n);
    if n_norm < FLOAT_MIN_THRESHOLD || n[2].abs() < FLOAT_MIN_THRESHOLD {
        return None;
    }
    let n_hat = [n[0] / n_norm, n[1] / n_norm, n[2] / n_norm];

    // Preserved exactly as specified: the y term subtracts the vertex's y
    // coordinate from the *unscaled* plane offset rather than from `B.y`
    // before scaling by `n_hat_y`. This asymmetry is a known quirk, not a
    // typo introduced here.
    let d = -n_hat[0] * (b[0] - vertex[0]) - (n_hat[1] * b[1] - vertex[1]) - n_hat[2] * b[2];

    let nz2 = n_hat[2] * n_hat[2];
    let r2 = (1.0 - nz2 - 4.0 * d * n_hat[2]) / (4.0 * nz2);
    if r2 < 0.0 {
        return None;
    }
    let radius = r2.sqrt();

    Some((n_hat, 1.0 / radius))
}

/// Forms cells on every inner layer `L` in `[0, CellsPerRoad)`, filling
/// `ctx.cells` and, for `L >= 1`, `ctx.cells_lut[L-1]`.
pub fn form_cells(ctx: &mut PrimaryVertexContext) {
    log::debug!("cell stage: start");

    for l in 0..CELLS_PER_ROAD {
        if l >= 1 {
            let size = ctx.tracklets()[l].len();
            ctx.cells_lut[l - 1] = vec![UNUSED; size];
        }

        let delta_tan_lambda_gate = ctx.constants().cell_max_delta_tan_lambda;
        let delta_phi_gate = ctx.constants().cell_max_delta_phi;
        let delta_z_gate = ctx.constants().cell_max_delta_z[l];
        let dca_gate = ctx.constants().cell_max_dca[l];
        let vertex = ctx.vertex();

        let layer_a = &ctx.event().layers()[l];
        let layer_b = &ctx.event().layers()[l + 1];
        let layer_c = &ctx.event().layers()[l + 2];

        let next_tracklets = ctx.tracklets()[l + 1].clone();
        let tracklets_here = ctx.tracklets()[l].clone();

        let mut found = Vec::new();

        for (i_tracklet, t) in tracklets_here.iter().enumerate() {
            let m = t.second_cluster_index;
            let start = ctx.tracklets_lut[l][m];
            if start == UNUSED {
                continue;
            }

            let cluster_a = layer_a.clusters()[t.first_cluster_index];
            let cluster_b = layer_b.clusters()[m];

            let mut first_accepted = None;

            let mut idx = start as usize;
            while idx < next_tracklets.len() && next_tracklets[idx].first_cluster_index == m {
                let t_next = &next_tracklets[idx];
                let k = t_next.second_cluster_index;
                let cluster_c = layer_c.clusters()[k];

                let delta_tan_lambda = (t.tan_lambda - t_next.tan_lambda).abs();
                let delta_phi = geometry::phi_delta(t.phi, t_next.phi);
                if delta_tan_lambda >= delta_tan_lambda_gate || delta_phi >= delta_phi_gate {
                    idx += 1;
                    continue;
                }

                let avg_tan_lambda = (t.tan_lambda + t_next.tan_lambda) / 2.0;
                let z_ext = -avg_tan_lambda * cluster_a.r + cluster_a.z;
                if (z_ext - vertex[2]).abs() >= delta_z_gate {
                    idx += 1;
                    continue;
                }

                let fit_result = fit(
                    [cluster_a.x, cluster_a.y, 0.0],
                    cluster_a.r,
                    [cluster_b.x, cluster_b.y, 0.0],
                    cluster_b.r,
                    [cluster_c.x, cluster_c.y, 0.0],
                    cluster_c.r,
                    vertex,
                );
                let Some((n_hat, curvature)) = fit_result else {
                    idx += 1;
                    continue;
                };

                let radius = 1.0 / curvature;
                let cx = -n_hat[0] / (2.0 * n_hat[2]);
                let cy = -n_hat[1] / (2.0 * n_hat[2]);
                let dca = (radius - (cx * cx + cy * cy).sqrt()).abs();
                if dca >= dca_gate {
                    idx += 1;
                    continue;
                }

                if first_accepted.is_none() {
                    first_accepted = Some(found.len());
                }
                found.push(Cell {
                    first_cluster_index: t.first_cluster_index,
                    second_cluster_index: m,
                    third_cluster_index: k,
                    first_tracklet_index: i_tracklet,
                    second_tracklet_index: idx,
                    normal: n_hat,
                    curvature,
                    level: 1,
                });

                idx += 1;
            }

            if l >= 1 {
                if let Some(offset) = first_accepted {
                    ctx.cells_lut[l - 1][i_tracklet] = offset as i32;
                }
            }
        }

        log::trace!("cell stage: layer {l} produced {} cells", found.len());
        ctx.cells[l] = found;
    }

    log::debug!("cell stage: done");
}
