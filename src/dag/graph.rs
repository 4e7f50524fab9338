// src/dag/graph.rs

use std::collections::BTreeMap;

use crate::dag::model::{Edge, Task, TaskId};

/// Internal node structure: stores immediate deps and dependents.
#[derive(Debug, Clone, Default)]
struct DagNode {
    /// Direct predecessors.
    deps: Vec<TaskId>,
    /// Direct successors.
    dependents: Vec<TaskId>,
}

/// In-memory adjacency view of a task graph keyed by task id.
///
/// This does not validate anything: edges whose endpoints are not in the
/// task list are dropped here and reported by
/// [`check_invariants`](crate::dag::validate::check_invariants) instead.
#[derive(Debug, Clone)]
pub struct DagGraph {
    nodes: BTreeMap<TaskId, DagNode>,
    edge_count: usize,
}

impl DagGraph {
    pub fn from_parts(tasks: &[Task], edges: &[Edge]) -> Self {
        let mut nodes: BTreeMap<TaskId, DagNode> = tasks
            .iter()
            .map(|t| (t.id, DagNode::default()))
            .collect();

        let mut edge_count = 0;
        for edge in edges {
            if !nodes.contains_key(&edge.from) || !nodes.contains_key(&edge.to) {
                continue;
            }
            if let Some(node) = nodes.get_mut(&edge.to) {
                node.deps.push(edge.from);
            }
            if let Some(node) = nodes.get_mut(&edge.from) {
                node.dependents.push(edge.to);
            }
            edge_count += 1;
        }

        Self { nodes, edge_count }
    }

    /// All task ids, ascending.
    pub fn tasks(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of edges whose endpoints both exist.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Immediate predecessors of a task.
    pub fn dependencies_of(&self, id: TaskId) -> &[TaskId] {
        self.nodes
            .get(&id)
            .map(|n| n.deps.as_slice())
            .unwrap_or(&[])
    }

    /// Immediate successors of a task.
    pub fn dependents_of(&self, id: TaskId) -> &[TaskId] {
        self.nodes
            .get(&id)
            .map(|n| n.dependents.as_slice())
            .unwrap_or(&[])
    }

    pub fn in_degree(&self, id: TaskId) -> usize {
        self.dependencies_of(id).len()
    }

    pub fn out_degree(&self, id: TaskId) -> usize {
        self.dependents_of(id).len()
    }

    /// Tasks without predecessors.
    pub fn roots(&self) -> Vec<TaskId> {
        self.tasks().filter(|&id| self.in_degree(id) == 0).collect()
    }

    /// Tasks without successors.
    pub fn leaves(&self) -> Vec<TaskId> {
        self.tasks().filter(|&id| self.out_degree(id) == 0).collect()
    }
}
