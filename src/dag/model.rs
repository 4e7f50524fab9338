// src/dag/model.rs

//! Core data model shared by every generator stage.

use std::collections::BTreeSet;

use crate::topology::SizeParams;
use crate::types::Archetype;

/// Task identifier. Ids are 1-based and follow creation order.
pub type TaskId = usize;

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    /// Computational cost (duration units in fixed mode, MI in CCR mode).
    pub size: f64,
    /// Stage label, e.g. `"mProject"`. Empty for tasks read back from files.
    pub kind: String,
    /// Ids of the direct predecessors.
    pub dependencies: BTreeSet<TaskId>,
}

impl Task {
    pub fn new(id: TaskId, kind: impl Into<String>) -> Self {
        Self {
            id,
            size: 0.0,
            kind: kind.into(),
            dependencies: BTreeSet::new(),
        }
    }
}

/// A dependency `from -> to`, optionally carrying a data volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: TaskId,
    pub to: TaskId,
    pub data_volume: Option<f64>,
}

impl Edge {
    pub fn new(from: TaskId, to: TaskId) -> Self {
        Self {
            from,
            to,
            data_volume: None,
        }
    }
}

/// A generated workflow: the tasks in creation order plus the edge list.
#[derive(Debug, Clone, PartialEq)]
pub struct Workflow {
    pub archetype: Archetype,
    pub params: SizeParams,
    pub tasks: Vec<Task>,
    pub edges: Vec<Edge>,
}

impl Workflow {
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Look up a task by id. Relies on ids being contiguous from 1.
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        id.checked_sub(1)
            .and_then(|idx| self.tasks.get(idx))
            .filter(|t| t.id == id)
    }

    pub fn tasks_of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks.iter().filter(move |t| t.kind == kind)
    }

    pub fn total_size(&self) -> f64 {
        self.tasks.iter().map(|t| t.size).sum()
    }

    pub fn total_data_volume(&self) -> f64 {
        self.edges.iter().filter_map(|e| e.data_volume).sum()
    }

    /// Realized communication-to-computation ratio.
    ///
    /// Zero when edges carry no volumes or the workflow has no computation.
    pub fn realized_ccr(&self) -> f64 {
        let size = self.total_size();
        if size <= 0.0 {
            return 0.0;
        }
        self.total_data_volume() / size
    }
}
