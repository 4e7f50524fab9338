mod common;

use std::collections::BTreeMap;

use common::fixed;
use wfsynth::dag::analysis::Shape;
use wfsynth::dag::{
    check_creation_order, check_invariants, compute_levels, critical_path, critical_path_cost,
    critical_path_length, is_acyclic, structural_report,
};
use wfsynth::errors::StructuralViolation;
use wfsynth::topology::SizeParams;
use wfsynth::types::{Archetype, CriticalPathMetric};
use wfsynth_test_utils::builders::GraphBuilder;

#[test]
fn diamond_join_sits_below_its_deepest_parent() {
    let (tasks, edges) = GraphBuilder::diamond().build();
    let levels = compute_levels(&tasks, &edges);
    assert_eq!(levels, BTreeMap::from([(1, 0), (2, 1), (3, 1), (4, 2)]));
}

#[test]
fn levels_do_not_depend_on_edge_order() {
    let (tasks, mut edges) = GraphBuilder::diamond().edge(2, 3).build();
    let forward = compute_levels(&tasks, &edges);
    edges.reverse();
    let backward = compute_levels(&tasks, &edges);

    assert_eq!(forward, backward);
    assert_eq!(forward[&4], 3);
}

#[test]
fn chain_critical_path_counts_edges() {
    for n in [1, 2, 6, 40] {
        let (tasks, edges) = GraphBuilder::chain(n).build();
        assert_eq!(critical_path_length(&tasks, &edges), n - 1);
        assert_eq!(
            critical_path(&tasks, &edges, CriticalPathMetric::Edges),
            (1..=n).collect::<Vec<_>>()
        );
    }
}

#[test]
fn size_metric_follows_the_heavy_branch() {
    let (tasks, edges) = GraphBuilder::new()
        .task(1.0)
        .task(5.0)
        .task(2.0)
        .task(1.0)
        .edge(1, 2)
        .edge(1, 3)
        .edge(2, 4)
        .edge(3, 4)
        .build();

    assert_eq!(critical_path_cost(&tasks, &edges), 7.0);
    assert_eq!(
        critical_path(&tasks, &edges, CriticalPathMetric::Size),
        vec![1, 2, 4]
    );
}

#[test]
fn cycle_is_detected_and_named() {
    let (tasks, edges) = GraphBuilder::with_tasks(4, 1.0)
        .edge(1, 2)
        .edge(2, 3)
        .edge(3, 1)
        .edge(3, 4)
        .build();

    assert!(!is_acyclic(&tasks, &edges));
    match check_invariants(&tasks, &edges) {
        Err(StructuralViolation::Cycle { task }) => assert!((1..=3).contains(&task)),
        other => panic!("expected a cycle, got {other:?}"),
    }
}

#[test]
fn cyclic_graph_has_no_critical_path() {
    let (tasks, edges) = GraphBuilder::with_tasks(3, 1.0)
        .edge(1, 2)
        .edge(2, 3)
        .edge(3, 2)
        .build();

    for metric in [CriticalPathMetric::Edges, CriticalPathMetric::Size] {
        assert!(critical_path(&tasks, &edges, metric).is_empty());
    }
}

#[test]
fn malformed_edges_are_rejected() {
    let (tasks, edges) = GraphBuilder::with_tasks(2, 1.0).edge(1, 1).build();
    assert_eq!(
        check_invariants(&tasks, &edges),
        Err(StructuralViolation::SelfLoop { task: 1 })
    );

    let (tasks, edges) = GraphBuilder::with_tasks(2, 1.0).edge(1, 9).build();
    assert_eq!(
        check_invariants(&tasks, &edges),
        Err(StructuralViolation::DanglingEdge { from: 1, to: 9 })
    );

    let (tasks, edges) = GraphBuilder::with_tasks(2, 1.0).edge(1, 2).edge(1, 2).build();
    assert_eq!(
        check_invariants(&tasks, &edges),
        Err(StructuralViolation::DuplicateEdge { from: 1, to: 2 })
    );
}

#[test]
fn gaps_in_ids_are_rejected() {
    let (mut tasks, edges) = GraphBuilder::chain(3).build();
    tasks[2].id = 4;
    assert_eq!(
        check_invariants(&tasks, &edges),
        Err(StructuralViolation::NonContiguousIds {
            position: 2,
            expected: 3,
            found: 4,
        })
    );
}

#[test]
fn creation_order_must_be_topological() {
    let (tasks, edges) = GraphBuilder::with_tasks(2, 1.0).edge(2, 1).build();

    check_invariants(&tasks, &edges).unwrap();
    assert_eq!(
        check_creation_order(&tasks, &edges),
        Err(StructuralViolation::ForwardReference {
            task: 1,
            dependency: 2,
        })
    );
}

#[test]
fn montage_report_describes_a_fan_in() {
    let wf = fixed(SizeParams::Montage { images: 3 });
    let report = structural_report(&wf.tasks, &wf.edges, CriticalPathMetric::Edges);

    assert!(report.is_acyclic);
    assert_eq!(report.shape, Shape::FanIn);
    assert_eq!(report.roots, vec![1, 2, 3]);
    assert_eq!(report.leaves, vec![17]);
    assert_eq!(report.depth, 6);
    assert_eq!(report.level_widths, vec![3, 3, 3, 3, 3, 1, 1]);
    assert_eq!(report.critical_path, 6.0);
    assert!((report.density - 16.0 / (17.0 * 16.0)).abs() < 1e-12);
    assert!(
        report
            .warnings
            .iter()
            .any(|w| w.contains("very small graph"))
    );

    let counted: usize = report.size_histogram.iter().map(|b| b.count).sum();
    assert_eq!(counted, 17);
}

#[test]
fn cybershake_report_finds_the_widest_fan_out() {
    let wf = fixed(SizeParams::defaults(Archetype::CyberShake));
    let report = structural_report(&wf.tasks, &wf.edges, CriticalPathMetric::Size);

    assert_eq!(report.shape, Shape::Pipeline);
    assert_eq!(report.degree.widest_fan_out, Some((1, 5)));
    assert_eq!(report.degree.max_in, 5);
    assert_eq!(report.critical_path_metric, CriticalPathMetric::Size);
    // PreCVM 2 + GenCVM 3 + GenSGT 5 + PSA 4 + ZipPSA 2 + PostProcess 3
    assert_eq!(report.critical_path, 19.0);
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);
}

#[test]
fn cyclic_graph_report_skips_levels() {
    let (tasks, edges) = GraphBuilder::with_tasks(2, 1.0).edge(1, 2).edge(2, 1).build();
    let report = structural_report(&tasks, &edges, CriticalPathMetric::Edges);

    assert!(!report.is_acyclic);
    assert!(report.level_widths.is_empty());
    assert!(report.warnings.iter().any(|w| w.contains("cycle")));
    assert!(report.warnings.iter().any(|w| w.contains("no root")));
}

#[test]
fn isolated_tasks_are_flagged_as_disconnected() {
    let (tasks, edges) = GraphBuilder::with_tasks(3, 1.0).build();
    let report = structural_report(&tasks, &edges, CriticalPathMetric::Edges);

    assert_eq!(report.shape, Shape::Mixed);
    assert!(report.warnings.iter().any(|w| w.contains("disconnected")));
}

#[test]
fn shapes_classify_by_roots_and_leaves() {
    assert_eq!(Shape::classify(1, 1), Shape::Pipeline);
    assert_eq!(Shape::classify(1, 4), Shape::FanOut);
    assert_eq!(Shape::classify(4, 1), Shape::FanIn);
    assert_eq!(Shape::classify(2, 2), Shape::Mixed);
    assert_eq!(Shape::FanOut.to_string(), "fan-out");
}
