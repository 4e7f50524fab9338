// src/topology/template.rs

//! Declarative stage templates and the one builder that interprets them.
//!
//! A template is an ordered list of [`Stage`]s. Each stage produces its tasks
//! in *groups* (one group per image, site, segment or sample) so that later
//! stages can wire themselves per group. Stages are emitted stage-major, so a
//! task can only depend on tasks of earlier stages and creation order is a
//! topological order.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::dag::{Edge, Task, TaskId};
use crate::errors::{Result, WfsynthError};
use crate::topology::params::SizeParams;
use crate::types::Archetype;

/// How many tasks (or groups) a stage produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Count {
    Fixed(usize),
    /// The value of a named size parameter.
    Param(&'static str),
    /// `ceil(param / divisor)`, never less than 1.
    CeilDiv(&'static str, usize),
}

/// How the groups of the gathered stages are batched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Batch {
    /// Every group in one batch.
    All,
    /// Consecutive runs of this many groups; the last batch may be shorter.
    Groups(usize),
    /// Consecutive runs of exactly this many groups. A shorter remainder is
    /// left out unless it is the only batch.
    Whole(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FanPattern {
    /// Independent tasks with no predecessors.
    Roots { groups: Count, per_group: Count },
    /// `count` tasks, each depending on every task of `from`. Every new task
    /// starts its own group.
    Broadcast { from: &'static str, count: Count },
    /// For each group of `from`, `per_group` tasks depending on every task of
    /// that group and on every task of the `also` stages.
    PerGroup {
        from: &'static str,
        per_group: Count,
        also: &'static [&'static str],
    },
    /// One task per batch of groups drawn from the listed stages, depending
    /// on every task in its batch.
    Gather {
        from: &'static [&'static str],
        batch: Batch,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    /// Name later stages refer to. Usually the same as `kind`.
    pub name: &'static str,
    /// Label given to every task of this stage.
    pub kind: &'static str,
    pub pattern: FanPattern,
}

impl Stage {
    pub const fn new(kind: &'static str, pattern: FanPattern) -> Self {
        Self {
            name: kind,
            kind,
            pattern,
        }
    }

    /// A stage whose tasks share a label with another stage.
    pub const fn named(name: &'static str, kind: &'static str, pattern: FanPattern) -> Self {
        Self {
            name,
            kind,
            pattern,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub archetype: Archetype,
    pub stages: Vec<Stage>,
}

impl Template {
    pub fn stage_kinds(&self) -> BTreeSet<&'static str> {
        self.stages.iter().map(|s| s.kind).collect()
    }
}

type Groups = Vec<Vec<TaskId>>;

/// Interpreter state: the tasks emitted so far and each stage's groups.
struct Builder<'a> {
    archetype: Archetype,
    params: &'a SizeParams,
    tasks: Vec<Task>,
    edges: Vec<Edge>,
    outputs: HashMap<&'static str, Groups>,
}

impl<'a> Builder<'a> {
    fn new(archetype: Archetype, params: &'a SizeParams) -> Self {
        Self {
            archetype,
            params,
            tasks: Vec::new(),
            edges: Vec::new(),
            outputs: HashMap::new(),
        }
    }

    fn resolve(&self, count: Count) -> Result<usize> {
        let param = |name: &str| {
            self.params.get(name).ok_or_else(|| {
                WfsynthError::ConfigError(format!(
                    "{} template refers to unknown parameter `{name}`",
                    self.archetype
                ))
            })
        };
        match count {
            Count::Fixed(n) => Ok(n),
            Count::Param(name) => param(name),
            Count::CeilDiv(name, divisor) => Ok(param(name)?.div_ceil(divisor.max(1)).max(1)),
        }
    }

    fn groups_of(&self, stage: &str) -> Result<&Groups> {
        self.outputs.get(stage).ok_or_else(|| {
            WfsynthError::ConfigError(format!(
                "{} template refers to unknown or later stage `{stage}`",
                self.archetype
            ))
        })
    }

    fn all_of(&self, stage: &str) -> Result<Vec<TaskId>> {
        Ok(self.groups_of(stage)?.iter().flatten().copied().collect())
    }

    /// Create one task with the given predecessors and its incoming edges.
    fn emit(&mut self, kind: &str, deps: impl IntoIterator<Item = TaskId>) -> TaskId {
        let id = self.tasks.len() + 1;
        let mut task = Task::new(id, kind);
        task.dependencies = deps.into_iter().collect();
        self.edges
            .extend(task.dependencies.iter().map(|&from| Edge::new(from, id)));
        self.tasks.push(task);
        id
    }

    fn apply(&mut self, stage: &Stage) -> Result<Groups> {
        let mut out: Groups = Vec::new();
        match &stage.pattern {
            FanPattern::Roots { groups, per_group } => {
                let groups = self.resolve(*groups)?;
                let per_group = self.resolve(*per_group)?;
                for _ in 0..groups {
                    let group = (0..per_group)
                        .map(|_| self.emit(stage.kind, []))
                        .collect();
                    out.push(group);
                }
            }
            FanPattern::Broadcast { from, count } => {
                let count = self.resolve(*count)?;
                let deps = self.all_of(from)?;
                for _ in 0..count {
                    let id = self.emit(stage.kind, deps.iter().copied());
                    out.push(vec![id]);
                }
            }
            FanPattern::PerGroup {
                from,
                per_group,
                also,
            } => {
                let per_group = self.resolve(*per_group)?;
                let upstream = self.groups_of(from)?.clone();
                let mut shared = Vec::new();
                for name in also.iter() {
                    shared.extend(self.all_of(name)?);
                }
                for group in upstream {
                    let ids = (0..per_group)
                        .map(|_| {
                            self.emit(stage.kind, group.iter().chain(shared.iter()).copied())
                        })
                        .collect();
                    out.push(ids);
                }
            }
            FanPattern::Gather { from, batch } => {
                let mut pooled: Groups = Vec::new();
                for name in from.iter() {
                    pooled.extend(self.groups_of(name)?.iter().cloned());
                }
                let (size, limit) = match batch {
                    Batch::All => (pooled.len().max(1), 1),
                    Batch::Groups(n) => ((*n).max(1), usize::MAX),
                    Batch::Whole(n) => {
                        let n = (*n).max(1);
                        (n, (pooled.len() / n).max(1))
                    }
                };
                for chunk in pooled.chunks(size).take(limit) {
                    let id = self.emit(stage.kind, chunk.iter().flatten().copied());
                    out.push(vec![id]);
                }
            }
        }
        Ok(out)
    }
}

/// Expand a template into tasks and edges.
///
/// Task sizes are left at zero; the cost model fills them in. Parameters are
/// assumed to be validated already.
pub fn instantiate(template: &Template, params: &SizeParams) -> Result<(Vec<Task>, Vec<Edge>)> {
    let mut builder = Builder::new(template.archetype, params);

    for stage in &template.stages {
        let groups = builder.apply(stage)?;
        debug!(
            archetype = %template.archetype,
            stage = stage.name,
            groups = groups.len(),
            tasks = groups.iter().map(Vec::len).sum::<usize>(),
            "stage expanded"
        );
        builder.outputs.insert(stage.name, groups);
    }

    Ok((builder.tasks, builder.edges))
}
