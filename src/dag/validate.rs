// src/dag/validate.rs

//! Structural certification of task graphs.

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use crate::dag::graph::DagGraph;
use crate::dag::model::{Edge, Task, TaskId, Workflow};
use crate::errors::StructuralViolation;

/// Kahn's algorithm over the adjacency view.
///
/// Returns the processing order and whether every task was processed. An
/// incomplete order means at least one cycle.
pub fn kahn_order(graph: &DagGraph) -> (Vec<TaskId>, bool) {
    let mut in_degree: HashMap<TaskId, usize> =
        graph.tasks().map(|id| (id, graph.in_degree(id))).collect();

    let mut queue: VecDeque<TaskId> = graph.tasks().filter(|id| in_degree[id] == 0).collect();
    let mut order = Vec::with_capacity(graph.len());

    while let Some(current) = queue.pop_front() {
        order.push(current);
        for &next in graph.dependents_of(current) {
            if let Some(deg) = in_degree.get_mut(&next) {
                *deg -= 1;
                if *deg == 0 {
                    queue.push_back(next);
                }
            }
        }
    }

    let complete = order.len() == graph.len();
    (order, complete)
}

/// `true` iff the graph induced by `tasks` and `edges` has no cycle.
pub fn is_acyclic(tasks: &[Task], edges: &[Edge]) -> bool {
    let graph = DagGraph::from_parts(tasks, edges);
    kahn_order(&graph).1
}

/// Check the invariants every task graph must satisfy, whatever produced it:
///
/// - ids are exactly `1..=N` in list order
/// - no self-loops
/// - every edge endpoint exists
/// - no duplicate `(from, to)` pairs
/// - no cycles
pub fn check_invariants(tasks: &[Task], edges: &[Edge]) -> Result<(), StructuralViolation> {
    for (position, task) in tasks.iter().enumerate() {
        let expected = position + 1;
        if task.id != expected {
            return Err(StructuralViolation::NonContiguousIds {
                position,
                expected,
                found: task.id,
            });
        }
    }

    let known: HashSet<TaskId> = tasks.iter().map(|t| t.id).collect();
    let mut seen: HashSet<(TaskId, TaskId)> = HashSet::with_capacity(edges.len());

    for edge in edges {
        if edge.from == edge.to {
            return Err(StructuralViolation::SelfLoop { task: edge.from });
        }
        if !known.contains(&edge.from) || !known.contains(&edge.to) {
            return Err(StructuralViolation::DanglingEdge {
                from: edge.from,
                to: edge.to,
            });
        }
        if !seen.insert((edge.from, edge.to)) {
            return Err(StructuralViolation::DuplicateEdge {
                from: edge.from,
                to: edge.to,
            });
        }
    }

    if !is_acyclic(tasks, edges) {
        return Err(StructuralViolation::Cycle {
            task: cycle_witness(tasks, edges),
        });
    }

    Ok(())
}

/// Check that creation order is a topological order and that each task's
/// dependency set agrees with the edge list.
pub fn check_creation_order(tasks: &[Task], edges: &[Edge]) -> Result<(), StructuralViolation> {
    for task in tasks {
        if let Some(&dependency) = task.dependencies.iter().find(|&&d| d >= task.id) {
            return Err(StructuralViolation::ForwardReference {
                task: task.id,
                dependency,
            });
        }
    }

    let graph = DagGraph::from_parts(tasks, edges);
    for task in tasks {
        let mut from_edges: Vec<TaskId> = graph.dependencies_of(task.id).to_vec();
        from_edges.sort_unstable();
        if !from_edges.iter().eq(task.dependencies.iter()) {
            return Err(StructuralViolation::DependencyMismatch { task: task.id });
        }
    }

    Ok(())
}

/// Full certification of a generated workflow.
pub fn certify(workflow: &Workflow) -> Result<(), StructuralViolation> {
    check_invariants(&workflow.tasks, &workflow.edges)?;
    check_creation_order(&workflow.tasks, &workflow.edges)?;
    debug!(
        archetype = %workflow.archetype,
        tasks = workflow.task_count(),
        edges = workflow.edge_count(),
        "workflow certified"
    );
    Ok(())
}

/// Name one task that lies on a cycle.
fn cycle_witness(tasks: &[Task], edges: &[Edge]) -> TaskId {
    let mut graph: DiGraphMap<TaskId, ()> = DiGraphMap::new();
    for task in tasks {
        graph.add_node(task.id);
    }
    for edge in edges {
        graph.add_edge(edge.from, edge.to, ());
    }

    match toposort(&graph, None) {
        Ok(_order) => 0,
        Err(cycle) => cycle.node_id(),
    }
}
