// src/dag/analysis.rs

//! Level, critical-path and shape analysis of task graphs.
//!
//! All functions here assume an acyclic input (see
//! [`validate::is_acyclic`](crate::dag::validate::is_acyclic)). On a cyclic
//! graph the relaxations stop after `|V|` passes and their results carry no
//! meaning; [`structural_report`] checks acyclicity first and skips them.

use std::collections::BTreeMap;
use std::fmt;

use crate::dag::graph::DagGraph;
use crate::dag::model::{Edge, Task, TaskId};
use crate::dag::validate::kahn_order;
use crate::types::CriticalPathMetric;

/// Topological level of every task.
///
/// Roots sit at level 0; every other task sits one below its deepest
/// predecessor. Levels are relaxed until nothing changes, so the result does
/// not depend on the order in which tasks or edges are listed.
pub fn compute_levels(tasks: &[Task], edges: &[Edge]) -> BTreeMap<TaskId, usize> {
    let graph = DagGraph::from_parts(tasks, edges);
    levels_of(&graph)
}

pub(crate) fn levels_of(graph: &DagGraph) -> BTreeMap<TaskId, usize> {
    let mut levels: BTreeMap<TaskId, usize> = graph.tasks().map(|id| (id, 0)).collect();

    for _pass in 0..=graph.len() {
        let mut changed = false;
        for id in graph.tasks() {
            let deepest = graph
                .dependencies_of(id)
                .iter()
                .map(|dep| levels[dep] + 1)
                .max()
                .unwrap_or(0);
            if deepest > levels[&id] {
                levels.insert(id, deepest);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    levels
}

/// Longest root-to-leaf path, counted in edges.
pub fn critical_path_length(tasks: &[Task], edges: &[Edge]) -> usize {
    compute_levels(tasks, edges)
        .values()
        .copied()
        .max()
        .unwrap_or(0)
}

/// Heaviest root-to-leaf path, counted as the sum of task sizes on it.
pub fn critical_path_cost(tasks: &[Task], edges: &[Edge]) -> f64 {
    let graph = DagGraph::from_parts(tasks, edges);
    let (cost, _) = weighted_relaxation(&graph, &sizes_by_id(tasks));
    cost.values().copied().fold(0.0, f64::max)
}

/// One longest path under `metric`, from a root to a leaf.
///
/// Only the length is canonical; when several paths tie, the one ending at
/// the lowest leaf id and preferring the lowest predecessor id is returned.
/// A cyclic graph has no critical path and yields an empty one.
pub fn critical_path(tasks: &[Task], edges: &[Edge], metric: CriticalPathMetric) -> Vec<TaskId> {
    let graph = DagGraph::from_parts(tasks, edges);
    if graph.is_empty() || !kahn_order(&graph).1 {
        return Vec::new();
    }

    let weights: BTreeMap<TaskId, f64> = match metric {
        CriticalPathMetric::Edges => graph.tasks().map(|id| (id, 1.0)).collect(),
        CriticalPathMetric::Size => sizes_by_id(tasks),
    };
    let (dist, best_pred) = weighted_relaxation(&graph, &weights);

    let mut end = None;
    for (&id, &d) in dist.iter() {
        match end {
            Some((_, best)) if d <= best => {}
            _ => end = Some((id, d)),
        }
    }

    let mut path = Vec::new();
    let mut cursor = end.map(|(id, _)| id);
    while let Some(id) = cursor {
        path.push(id);
        cursor = best_pred.get(&id).copied();
    }
    path.reverse();
    path
}

fn sizes_by_id(tasks: &[Task]) -> BTreeMap<TaskId, f64> {
    tasks.iter().map(|t| (t.id, t.size)).collect()
}

/// Longest-path relaxation where every node contributes its own weight.
///
/// Returns the best distance ending at each node and the predecessor that
/// achieved it.
fn weighted_relaxation(
    graph: &DagGraph,
    weights: &BTreeMap<TaskId, f64>,
) -> (BTreeMap<TaskId, f64>, BTreeMap<TaskId, TaskId>) {
    let weight = |id: TaskId| weights.get(&id).copied().unwrap_or(0.0);

    let mut dist: BTreeMap<TaskId, f64> = graph.tasks().map(|id| (id, weight(id))).collect();
    let mut best_pred: BTreeMap<TaskId, TaskId> = BTreeMap::new();

    for _pass in 0..=graph.len() {
        let mut changed = false;
        for id in graph.tasks() {
            let mut best: Option<(TaskId, f64)> = None;
            for &dep in graph.dependencies_of(id) {
                let d = dist[&dep];
                if best.is_none_or(|(prev, bd)| d > bd || (d == bd && dep < prev)) {
                    best = Some((dep, d));
                }
            }

            let candidate = weight(id) + best.map(|(_, d)| d).unwrap_or(0.0);
            if candidate != dist[&id] {
                dist.insert(id, candidate);
                changed = true;
            }
            if let Some((dep, _)) = best {
                best_pred.insert(id, dep);
            }
        }
        if !changed {
            break;
        }
    }

    (dist, best_pred)
}

/// Coarse shape of a graph, by root and leaf counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Exactly one root and one leaf.
    Pipeline,
    /// One root, many leaves.
    FanOut,
    /// Many roots, one leaf.
    FanIn,
    Mixed,
}

impl Shape {
    pub fn classify(roots: usize, leaves: usize) -> Self {
        match (roots, leaves) {
            (1, 1) => Shape::Pipeline,
            (1, _) => Shape::FanOut,
            (_, 1) => Shape::FanIn,
            _ => Shape::Mixed,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Shape::Pipeline => "pipeline",
            Shape::FanOut => "fan-out",
            Shape::FanIn => "fan-in",
            Shape::Mixed => "mixed",
        };
        f.write_str(tag)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DegreeStats {
    pub max_in: usize,
    pub max_out: usize,
    /// Mean in-degree; equals the mean out-degree (`|E| / |V|`).
    pub mean_degree: f64,
    /// Task with the most successors, lowest id on ties.
    pub widest_fan_out: Option<(TaskId, usize)>,
    /// Task with the most predecessors, lowest id on ties.
    pub widest_fan_in: Option<(TaskId, usize)>,
}

pub fn degree_stats(graph: &DagGraph) -> DegreeStats {
    let mut widest_fan_out: Option<(TaskId, usize)> = None;
    let mut widest_fan_in: Option<(TaskId, usize)> = None;

    for id in graph.tasks() {
        let out = graph.out_degree(id);
        if widest_fan_out.is_none_or(|(_, best)| out > best) {
            widest_fan_out = Some((id, out));
        }
        let inn = graph.in_degree(id);
        if widest_fan_in.is_none_or(|(_, best)| inn > best) {
            widest_fan_in = Some((id, inn));
        }
    }

    let mean_degree = if graph.is_empty() {
        0.0
    } else {
        graph.edge_count() as f64 / graph.len() as f64
    };

    DegreeStats {
        max_in: widest_fan_in.map(|(_, d)| d).unwrap_or(0),
        max_out: widest_fan_out.map(|(_, d)| d).unwrap_or(0),
        mean_degree,
        widest_fan_out,
        widest_fan_in,
    }
}

/// One bucket of the task-size histogram: `[low, high)` and its count.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeBucket {
    pub low: f64,
    pub high: f64,
    pub count: usize,
}

const HISTOGRAM_BUCKETS: usize = 6;

/// Equal-width histogram over the observed size range.
///
/// The last bucket is closed so the largest size is counted.
pub fn size_histogram(tasks: &[Task]) -> Vec<SizeBucket> {
    if tasks.is_empty() {
        return Vec::new();
    }
    let min = tasks.iter().map(|t| t.size).fold(f64::INFINITY, f64::min);
    let max = tasks.iter().map(|t| t.size).fold(f64::NEG_INFINITY, f64::max);
    if max <= min {
        return vec![SizeBucket {
            low: min,
            high: max,
            count: tasks.len(),
        }];
    }

    let width = (max - min) / HISTOGRAM_BUCKETS as f64;
    let mut buckets: Vec<SizeBucket> = (0..HISTOGRAM_BUCKETS)
        .map(|i| SizeBucket {
            low: min + width * i as f64,
            high: min + width * (i + 1) as f64,
            count: 0,
        })
        .collect();

    for task in tasks {
        let idx = (((task.size - min) / width) as usize).min(HISTOGRAM_BUCKETS - 1);
        buckets[idx].count += 1;
    }
    buckets
}

/// Everything the validator knows about a graph's structure.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuralReport {
    pub task_count: usize,
    pub edge_count: usize,
    pub is_acyclic: bool,
    pub roots: Vec<TaskId>,
    pub leaves: Vec<TaskId>,
    /// `|E| / (|V| * (|V| - 1))`, 0 for graphs with fewer than two tasks.
    pub density: f64,
    pub shape: Shape,
    /// Deepest level (equals the edge-count critical path length).
    pub depth: usize,
    /// Number of tasks on each level, from level 0.
    pub level_widths: Vec<usize>,
    pub critical_path_metric: CriticalPathMetric,
    /// Critical path length under `critical_path_metric`.
    pub critical_path: f64,
    pub degree: DegreeStats,
    pub size_histogram: Vec<SizeBucket>,
    /// Advisory findings; none of them makes the graph invalid.
    pub warnings: Vec<String>,
}

/// Advisory threshold under which a workflow is flagged as very small.
const SMALL_GRAPH_TASKS: usize = 20;

pub fn structural_report(
    tasks: &[Task],
    edges: &[Edge],
    metric: CriticalPathMetric,
) -> StructuralReport {
    let graph = DagGraph::from_parts(tasks, edges);
    let (_order, is_acyclic) = kahn_order(&graph);

    let roots = graph.roots();
    let leaves = graph.leaves();
    let n = graph.len();
    let density = if n > 1 {
        graph.edge_count() as f64 / (n as f64 * (n as f64 - 1.0))
    } else {
        0.0
    };

    let mut warnings = Vec::new();
    if !is_acyclic {
        warnings.push("graph contains a cycle".to_string());
    }
    if roots.is_empty() {
        warnings.push("no root task (graph may be cyclic)".to_string());
    }
    if leaves.is_empty() {
        warnings.push("no leaf task (graph may be cyclic)".to_string());
    }
    if n < SMALL_GRAPH_TASKS {
        warnings.push(format!("very small graph: {n} tasks"));
    }
    if n > 0 && graph.edge_count() < n - 1 {
        warnings.push(format!(
            "possibly disconnected: {} edges for {} tasks",
            graph.edge_count(),
            n
        ));
    }

    let (depth, level_widths, critical) = if is_acyclic {
        let levels = levels_of(&graph);
        let depth = levels.values().copied().max().unwrap_or(0);
        let mut widths = vec![0usize; if n == 0 { 0 } else { depth + 1 }];
        for level in levels.values() {
            widths[*level] += 1;
        }
        let critical = match metric {
            CriticalPathMetric::Edges => depth as f64,
            CriticalPathMetric::Size => {
                let (cost, _) = weighted_relaxation(&graph, &sizes_by_id(tasks));
                cost.values().copied().fold(0.0, f64::max)
            }
        };
        (depth, widths, critical)
    } else {
        (0, Vec::new(), 0.0)
    };

    StructuralReport {
        task_count: n,
        edge_count: graph.edge_count(),
        is_acyclic,
        shape: Shape::classify(roots.len(), leaves.len()),
        roots,
        leaves,
        density,
        depth,
        level_widths,
        critical_path_metric: metric,
        critical_path: critical,
        degree: degree_stats(&graph),
        size_histogram: size_histogram(tasks),
        warnings,
    }
}
