mod common;

use common::{init_tracing, with_ccr};
use wfsynth::cost::tables::{fixed_duration, size_range};
use wfsynth::cost::CostModel;
use wfsynth::errors::WfsynthError;
use wfsynth::generator::generate;
use wfsynth::rng::SeededRandom;
use wfsynth::topology::{build, SizeParams};
use wfsynth::types::Archetype;
use wfsynth_test_utils::fixed_sequence::FixedSequence;

#[test]
fn fixed_mode_uses_the_duration_table_and_no_randomness() {
    init_tracing();
    let mut wf = build(SizeParams::Epigenomics {
        samples: 4,
        analyses: 2,
    })
    .unwrap();
    let mut rng = FixedSequence::midpoint();
    CostModel::FixedDuration.apply(&mut wf, &mut rng).unwrap();

    assert_eq!(rng.draws(), 0);
    for task in &wf.tasks {
        assert_eq!(
            Some(task.size),
            fixed_duration(Archetype::Epigenomics, &task.kind)
        );
    }
    assert!(wf.edges.iter().all(|e| e.data_volume.is_none()));
    assert_eq!(wf.realized_ccr(), 0.0);
}

#[test]
fn montage_fixed_durations() {
    let wf = common::fixed(SizeParams::Montage { images: 1 });
    let sizes: Vec<f64> = wf.tasks.iter().map(|t| t.size).collect();
    assert_eq!(sizes, vec![8.0, 3.0, 2.0, 4.0, 6.0, 10.0, 3.0]);
}

#[test]
fn ccr_sizes_stay_in_the_archetype_range() {
    for archetype in Archetype::ALL {
        let generated = with_ccr(SizeParams::defaults(archetype), 1.0, 11);
        let (low, high) = size_range(archetype);
        for task in &generated.workflow.tasks {
            assert!(task.size >= low && task.size < high, "{archetype}: {}", task.size);
        }
    }
}

#[test]
fn ccr_volumes_stay_within_the_spread() {
    let ccr = 2.5;
    let epsilon = 0.25;
    let generated = with_ccr(SizeParams::Ligo {
        segments: 30,
        templates: 4,
    }, ccr, 3);
    let wf = &generated.workflow;

    let mean = wf.total_size() / wf.task_count() as f64;
    let low = mean * ccr * (1.0 - epsilon);
    let high = mean * ccr * (1.0 + epsilon);
    for edge in &wf.edges {
        let volume = edge.data_volume.expect("ccr edges carry volumes");
        assert!(volume >= low - 1e-9 && volume <= high + 1e-9, "{volume}");
    }
}

#[test]
fn rescale_hits_the_target_exactly() {
    init_tracing();
    let target = 0.8;
    let model = CostModel::CcrCalibrated {
        ccr: target,
        epsilon: 0.5,
        rescale: true,
    };
    for archetype in Archetype::ALL {
        let mut rng = SeededRandom::new(99);
        let generated = generate(SizeParams::defaults(archetype), &model, &mut rng).unwrap();
        let realized = generated.workflow.realized_ccr();
        assert!(
            ((realized - target) / target).abs() < 1e-9,
            "{archetype}: realized {realized}"
        );
    }
}

#[test]
fn sizes_are_drawn_before_volumes() {
    init_tracing();
    let mut wf = build(SizeParams::Montage { images: 1 }).unwrap();
    let mut rng = FixedSequence::new(vec![0.0, 1.0]);
    CostModel::ccr(1.0).apply(&mut wf, &mut rng).unwrap();

    assert_eq!(rng.draws(), wf.task_count() + wf.edge_count());
    for range in &rng.requested[..wf.task_count()] {
        assert_eq!(*range, (500.0, 700.0));
    }

    // alternating bounds: 500, 700, 500, ... over 7 tasks
    let mean = (4.0 * 500.0 + 3.0 * 700.0) / 7.0;
    let (low, high) = rng.requested[wf.task_count()];
    assert!((low - mean * 0.75).abs() < 1e-9);
    assert!((high - mean * 1.25).abs() < 1e-9);
}

#[test]
fn invalid_ccr_is_rejected_before_generation() {
    let mut rng = SeededRandom::new(1);
    let err = generate(
        SizeParams::Montage { images: 2 },
        &CostModel::ccr(0.001),
        &mut rng,
    )
    .unwrap_err();
    match err {
        WfsynthError::ParameterValidation { param, .. } => assert_eq!(param, "ccr"),
        other => panic!("unexpected error {other:?}"),
    }
}
