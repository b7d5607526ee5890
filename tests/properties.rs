//! Property tests for the invariants every run of the pipeline must hold,
//! built over in-memory `Event` fixtures (no file I/O).

mod common;

use ca_tracking::prelude::*;

#[test]
fn cell_triplet_coherence() {
    let constants = Constants::default();
    let event = common::single_track_event(&constants, 11, 0.0, None);
    let mut ctx = PrimaryVertexContext::new(&event, &constants, [0.0, 0.0, 0.0]);

    let backend = CpuBackend;
    backend.form_tracklets(&mut ctx);
    backend.form_cells(&mut ctx);

    for (l, layer_cells) in ctx.cells().iter().enumerate() {
        for cell in layer_cells {
            let first_tracklet = ctx.tracklets()[l][cell.first_tracklet_index];
            let second_tracklet = ctx.tracklets()[l + 1][cell.second_tracklet_index];
            assert_eq!(first_tracklet.second_cluster_index, cell.second_cluster_index);
            assert_eq!(second_tracklet.first_cluster_index, cell.second_cluster_index);
        }
    }
}

#[test]
fn ca_level_soundness() {
    let mut constants = Constants::default();
    constants.cells_min_level = 1;
    let event = common::single_track_event(&constants, 11, 0.0, None);
    let mut ctx = PrimaryVertexContext::new(&event, &constants, [0.0, 0.0, 0.0]);

    let backend = CpuBackend;
    backend.form_tracklets(&mut ctx);
    backend.form_cells(&mut ctx);
    backend.link_neighbours(&mut ctx);

    for l in 1..ctx.cells().len() {
        for (idx, cell) in ctx.cells()[l].iter().enumerate() {
            if cell.level < 2 {
                continue;
            }
            let predecessors = &ctx.cells_neighbours()[l - 1][idx];
            assert!(
                predecessors.iter().any(|&p| ctx.cells()[l - 1][p as usize].level == cell.level - 1),
                "cell at layer {l} with level {} has no level-{} predecessor",
                cell.level,
                cell.level - 1
            );
        }
    }
}

#[test]
fn road_monotonicity() {
    let mut constants = Constants::default();
    constants.cells_min_level = 1;
    let event = common::single_track_event(&constants, 11, 0.0, None);
    let tracker = Tracker::new(constants);

    let roads = tracker.process_vertex_sequential(&event, [0.0, 0.0, 0.0]);

    for road in &roads {
        let layers: Vec<usize> = road.layers().collect();
        for window in layers.windows(2) {
            assert!(window[0] < window[1]);
        }
    }
}

#[test]
fn mc_labelling_idempotence() {
    let mut constants = Constants::default();
    constants.cells_min_level = 1;
    let event = common::single_track_event(&constants, 11, 0.0, None);
    let mut ctx = PrimaryVertexContext::new(&event, &constants, [0.0, 0.0, 0.0]);

    let backend = CpuBackend;
    backend.form_tracklets(&mut ctx);
    backend.form_cells(&mut ctx);
    backend.link_neighbours(&mut ctx);
    backend.extract_roads(&mut ctx);
    backend.label_roads(&mut ctx);
    let first_pass = ctx.roads().to_vec();

    backend.label_roads(&mut ctx);
    let second_pass = ctx.roads().to_vec();

    assert_eq!(first_pass, second_pass);
}

#[test]
fn determinism_across_repeated_runs() {
    let mut constants = Constants::default();
    constants.cells_min_level = 1;
    let event = common::single_track_event(&constants, 11, 0.0, None);
    let tracker = Tracker::new(constants);

    let first = tracker.process(&event);
    let second = tracker.process(&event);

    assert_eq!(first, second);
}
