//! Tracklet stage (C5): ordered cluster pairs across adjacent layer pairs.

use crate::constants::TRACKLETS_PER_ROAD;
use crate::context::PrimaryVertexContext;
use crate::geometry;

/// A directed segment from an inner cluster `(L, first_cluster_index)` to an
/// outer cluster `(L+1, second_cluster_index)`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tracklet {
    /// Index of the inner cluster, on layer `L`.
    pub first_cluster_index: usize,
    /// Index of the outer cluster, on layer `L+1`.
    pub second_cluster_index: usize,
    /// `(z_j - z_i) / (r_j - r_i)`, cached for the cell stage's continuity
    /// gate.
    pub tan_lambda: f64,
    /// The segment's azimuthal angle, taken from the inner cluster.
    pub phi: f64,
}

/// Forms tracklets on every inner layer `L` in `[0, TracletsPerRoad)`,
/// filling `ctx.tracklets` and, for `L >= 1`, the preceding layer's
/// `tracklets_lut`.
///
/// Candidates for a fixed inner cluster are produced in increasing outer
/// cluster index, and only ever appended while that cluster is the current
/// one being processed, so the run of tracklets sharing a `first_cluster_index`
/// is always contiguous within `tracklets[L]` (§8 property 5).
pub fn form_tracklets(ctx: &mut PrimaryVertexContext) {
    log::debug!("tracklet stage: start");

    for l in 0..TRACKLETS_PER_ROAD {
        let inner = &ctx.event().layers()[l];
        let outer = &ctx.event().layers()[l + 1];
        let outer_table = &ctx.event().index_tables()[l + 1];
        let vertex = ctx.vertex();
        let z_gate = ctx.constants().tracklet_max_delta_z[l];
        let phi_gate = ctx.constants().phi_coordinate_cut;

        let mut found = Vec::new();

        for (i, c_i) in inner.clusters().iter().enumerate() {
            let tan_lambda = (c_i.z - vertex[2]) / c_i.r;
            let z_ext = tan_lambda * (outer.radius() - c_i.r) + c_i.z;

            if geometry::bins_rect(outer.z_half_extent(), z_ext, c_i.phi, z_gate, phi_gate).is_none() {
                continue;
            }

            let candidates = outer_table.select_clusters(z_ext - z_gate, z_ext + z_gate, c_i.phi - phi_gate, c_i.phi + phi_gate);

            let mut first_for_this_cluster = None;
            for j in candidates {
                let c_j = &outer.clusters()[j];
                let delta_z = (tan_lambda * (c_j.r - c_i.r) + c_i.z - c_j.z).abs();
                let delta_phi = geometry::phi_delta(c_i.phi, c_j.phi);
                if delta_z < z_gate && delta_phi < phi_gate {
                    if first_for_this_cluster.is_none() {
                        first_for_this_cluster = Some(found.len());
                    }
                    found.push(Tracklet {
                        first_cluster_index: i,
                        second_cluster_index: j,
                        tan_lambda,
                        phi: c_i.phi,
                    });
                }
            }

            if l >= 1 {
                if let Some(offset) = first_for_this_cluster {
                    ctx.tracklets_lut[l - 1][i] = offset as i32;
                }
            }
        }

        log::trace!("tracklet stage: layer {l} produced {} tracklets", found.len());
        ctx.tracklets[l] = found;
    }

    log::debug!("tracklet stage: done");
}
