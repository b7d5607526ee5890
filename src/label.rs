//! MC labelling stage (C8): Boyer-Moore majority vote over a road's
//! referenced clusters' Monte-Carlo truth ids.

use crate::constants::UNUSED;
use crate::context::PrimaryVertexContext;
use crate::road::Road;

/// Runs the majority vote for one road, without mutating it.
///
/// Each cell contributes its third cluster's `mc_id`; the road's first cell
/// (lowest layer index present) additionally contributes its first and
/// second clusters.
fn compute_label(ctx: &PrimaryVertexContext, road: &Road) -> (i32, bool) {
    let layers: Vec<usize> = road.layers().collect();
    let Some(&first_l) = layers.first() else {
        return (UNUSED, false);
    };

    let cluster_mc_id = |layer: usize, cluster_idx: usize| ctx.event().layers()[layer].clusters()[cluster_idx].mc_id;

    let first_cell = &ctx.cells()[first_l][road.cells[first_l] as usize];
    let mut candidate = cluster_mc_id(first_l, first_cell.first_cluster_index);
    let mut count = 1i32;
    let mut is_fake = false;

    let second_id = cluster_mc_id(first_l + 1, first_cell.second_cluster_index);
    if second_id == candidate {
        count += 1;
    } else {
        candidate = second_id;
        count = 1;
        is_fake = true;
    }

    for &l in &layers {
        let cell = &ctx.cells()[l][road.cells[l] as usize];
        let third_id = cluster_mc_id(l + 2, cell.third_cluster_index);
        if third_id == candidate {
            count += 1;
        } else {
            is_fake = true;
            count -= 1;
            if count <= 0 {
                candidate = third_id;
                count = 1;
            }
        }
    }

    (candidate, is_fake)
}

/// Labels every road extracted so far with its MC id and fake flag.
///
/// Must run after [`crate::road::extract_roads`].
pub fn apply_labels(ctx: &mut PrimaryVertexContext) {
    log::debug!("label stage: start, {} roads", ctx.roads.len());

    for i in 0..ctx.roads.len() {
        let road = ctx.roads[i];
        let (label, is_fake) = compute_label(ctx, &road);
        ctx.roads[i].mc_label = label;
        ctx.roads[i].is_fake = is_fake;
    }

    log::debug!("label stage: done");
}
