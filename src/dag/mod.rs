// src/dag/mod.rs

//! Task graph model and structural validation.
//!
//! - [`model`] holds the task/edge/workflow types every stage shares.
//! - [`graph`] is an adjacency view over a task and edge list.
//! - [`validate`] certifies acyclicity and the id/edge invariants.
//! - [`analysis`] computes levels, critical paths and the structural report.

pub mod analysis;
pub mod graph;
pub mod model;
pub mod validate;

pub use analysis::{
    compute_levels, critical_path, critical_path_cost, critical_path_length, structural_report,
    Shape, StructuralReport,
};
pub use graph::DagGraph;
pub use model::{Edge, Task, TaskId, Workflow};
pub use validate::{certify, check_creation_order, check_invariants, is_acyclic};
