//! Shared fixture builders for the integration test suite.

use ca_tracking::constants::NUM_LAYERS;
use ca_tracking::event::RawCluster;
use ca_tracking::prelude::*;

/// Curvature radius of the fixture track built by [`track_point`]: a true
/// circle through the origin, not merely an approximation of one.
pub const TRACK_CURVATURE_RADIUS: f64 = 1000.0;

/// A point on a circular trajectory of radius [`TRACK_CURVATURE_RADIUS`]
/// passing exactly through `(0,0,0)`, sampled at layer `l`'s radius.
///
/// For a circle of radius `rho` centered at `(0, rho)`, a point at transverse
/// radius `r` sits at central angle `alpha = 2*asin(r / (2*rho))`, giving
/// `x = rho*sin(alpha)`, `y = rho*(1 - cos(alpha))`; this reproduces `r`
/// exactly (to floating precision) and keeps the DCA-from-origin at every
/// fitted triplet at machine-epsilon, well inside every `cell_max_dca` gate.
/// With `rho = 1000`, the largest per-layer phi step (layers 2->3, spanning
/// the 39->194 radius gap) is about 0.078 rad, comfortably under both
/// `phi_coordinate_cut` (0.3) and `cell_max_delta_phi` (0.14) — so a track
/// built from these points across all seven layers forms a complete 5-level
/// road chain under the default [`Constants`].
pub fn track_point(constants: &Constants, l: usize) -> (f64, f64, f64) {
    let r = constants.layer_radii[l];
    let rho = TRACK_CURVATURE_RADIUS;
    let alpha = 2.0 * (r / (2.0 * rho)).asin();
    let x = rho * alpha.sin();
    let y = rho * (1.0 - alpha.cos());
    let z = l as f64 * 0.01;
    (x, y, z)
}

/// Builds an event from one raw cluster list per layer, assigning
/// sequential per-layer cluster ids.
pub fn build_event(constants: &Constants, mut clusters_per_layer: Vec<Vec<(f64, f64, f64, i32)>>, vertices: Vec<[f64; 3]>) -> Event {
    assert_eq!(clusters_per_layer.len(), NUM_LAYERS);
    let raw_layers: Vec<Vec<RawCluster>> = clusters_per_layer
        .drain(..)
        .map(|layer| {
            layer
                .into_iter()
                .enumerate()
                .map(|(id, (x, y, z, mc_id))| (id as i32, x, y, z, 0.0, mc_id))
                .collect()
        })
        .collect();
    Event::build(raw_layers, constants, vertices).unwrap()
}

/// One straight, single-MC-id track occupying every layer, optionally with
/// one extra noise cluster inserted on a given layer.
pub fn single_track_event(constants: &Constants, mc_id: i32, phi_offset: f64, noise: Option<(usize, f64, f64, f64, i32)>) -> Event {
    let mut clusters_per_layer: Vec<Vec<(f64, f64, f64, i32)>> = (0..NUM_LAYERS)
        .map(|l| {
            let (x, y, z) = track_point(constants, l);
            let r = (x * x + y * y).sqrt();
            let phi = y.atan2(x) + phi_offset;
            vec![(r * phi.cos(), r * phi.sin(), z, mc_id)]
        })
        .collect();

    if let Some((layer, x, y, z, id)) = noise {
        clusters_per_layer[layer].push((x, y, z, id));
    }

    build_event(constants, clusters_per_layer, vec![[0.0, 0.0, 0.0]])
}

/// Two straight, non-overlapping single-MC-id tracks occupying every layer,
/// separated by `phi_separation` radians (well outside every phi gate), so
/// neither track's clusters ever fall in the other's search window.
pub fn two_track_event(constants: &Constants, mc_id_a: i32, mc_id_b: i32, phi_separation: f64) -> Event {
    let clusters_per_layer: Vec<Vec<(f64, f64, f64, i32)>> = (0..NUM_LAYERS)
        .map(|l| {
            let (x, y, z) = track_point(constants, l);
            let r = (x * x + y * y).sqrt();
            let phi_a = y.atan2(x);
            let phi_b = phi_a + phi_separation;
            vec![(r * phi_a.cos(), r * phi_a.sin(), z, mc_id_a), (r * phi_b.cos(), r * phi_b.sin(), z, mc_id_b)]
        })
        .collect();

    build_event(constants, clusters_per_layer, vec![[0.0, 0.0, 0.0]])
}
