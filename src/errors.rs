// src/errors.rs

//! Crate-wide error type and `Result` alias.

use std::path::PathBuf;

use thiserror::Error;

use crate::dag::TaskId;

/// A structural defect found in a generated (or loaded) task graph.
///
/// Any of these coming out of a topology builder is a builder bug.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralViolation {
    #[error("cycle detected in task graph involving task {task}")]
    Cycle { task: TaskId },

    #[error("edge {from} -> {to} references a task that does not exist")]
    DanglingEdge { from: TaskId, to: TaskId },

    #[error("task {task} depends on itself")]
    SelfLoop { task: TaskId },

    #[error("duplicate edge {from} -> {to}")]
    DuplicateEdge { from: TaskId, to: TaskId },

    #[error("task ids are not contiguous: expected {expected} at position {position}, found {found}")]
    NonContiguousIds {
        position: usize,
        expected: TaskId,
        found: TaskId,
    },

    #[error("task {task} depends on task {dependency}, which is not created before it")]
    ForwardReference { task: TaskId, dependency: TaskId },

    #[error("dependency set of task {task} disagrees with the edge list")]
    DependencyMismatch { task: TaskId },
}

#[derive(Error, Debug)]
pub enum WfsynthError {
    #[error("parameter `{param}` = {value} is outside the accepted range {range}")]
    ParameterValidation {
        param: String,
        value: String,
        range: String,
    },

    #[error("structural invariant violated: {0}")]
    StructuralInvariant(#[from] StructuralViolation),

    #[error("failed to write {path:?}: {source}")]
    SerializationIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path:?} line {line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WfsynthError {
    /// Build a [`WfsynthError::ParameterValidation`] for an out-of-range value.
    pub fn out_of_range(
        param: impl Into<String>,
        value: impl ToString,
        range: impl Into<String>,
    ) -> Self {
        WfsynthError::ParameterValidation {
            param: param.into(),
            value: value.to_string(),
            range: range.into(),
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, WfsynthError>;
