#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::PathBuf;

use wfsynth::config::{GenerationConfig, RawConfigFile};
use wfsynth::dag::{Edge, Task, TaskId};
use wfsynth::types::{Archetype, CostMode};

/// Builder for `GenerationConfig` to simplify test setup.
pub struct ConfigBuilder {
    config: RawConfigFile,
}

impl ConfigBuilder {
    pub fn new(archetype: Archetype) -> Self {
        let mut config = RawConfigFile::default();
        config.workflow.archetype = Some(archetype);
        Self { config }
    }

    pub fn param(mut self, name: &str, value: i64) -> Self {
        self.config.params.insert(name.to_string(), value);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.workflow.seed = Some(seed);
        self
    }

    pub fn ccr(mut self, ccr: f64) -> Self {
        self.config.cost.mode = Some(CostMode::Ccr);
        self.config.cost.ccr = Some(ccr);
        self
    }

    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.config.cost.epsilon = Some(epsilon);
        self
    }

    pub fn rescale(mut self) -> Self {
        self.config.cost.rescale = Some(true);
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output.dir = Some(dir.into());
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> GenerationConfig {
        GenerationConfig::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

/// Builder for hand-made task graphs.
///
/// Tasks are numbered from 1 in insertion order; `edge` also records the
/// dependency on the target task.
#[derive(Default)]
pub struct GraphBuilder {
    tasks: BTreeMap<TaskId, Task>,
    edges: Vec<Edge>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// `n` tasks of the given size, ids `1..=n`.
    pub fn with_tasks(n: usize, size: f64) -> Self {
        let mut builder = Self::new();
        for _ in 0..n {
            builder = builder.task(size);
        }
        builder
    }

    pub fn task(mut self, size: f64) -> Self {
        let id = self.tasks.len() + 1;
        let mut task = Task::new(id, "");
        task.size = size;
        self.tasks.insert(id, task);
        self
    }

    pub fn edge(mut self, from: TaskId, to: TaskId) -> Self {
        self.edges.push(Edge::new(from, to));
        if let Some(task) = self.tasks.get_mut(&to) {
            task.dependencies.insert(from);
        }
        self
    }

    /// `1 -> 2 -> ... -> n`.
    pub fn chain(n: usize) -> Self {
        let mut builder = Self::with_tasks(n, 1.0);
        for id in 1..n {
            builder = builder.edge(id, id + 1);
        }
        builder
    }

    /// `1 -> {2, 3} -> 4`.
    pub fn diamond() -> Self {
        Self::with_tasks(4, 1.0)
            .edge(1, 2)
            .edge(1, 3)
            .edge(2, 4)
            .edge(3, 4)
    }

    pub fn build(self) -> (Vec<Task>, Vec<Edge>) {
        (self.tasks.into_values().collect(), self.edges)
    }
}
