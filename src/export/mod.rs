// src/export/mod.rs

//! The four plain-text artifacts consumed by the scheduler.
//!
//! | file                      | one line per            |
//! |---------------------------|-------------------------|
//! | `task.csv`                | task: `id size`         |
//! | `dag.csv`                 | edge: `from to [volume]`|
//! | `vm.csv`                  | VM ids, then matrix rows|
//! | `processing_capacity.csv` | VM: `id capacity`       |
//!
//! Values are separated by a single space, ids are bare 1-based integers and
//! floats are printed with four decimals.

pub mod reader;
pub mod writer;

pub const TASK_FILE: &str = "task.csv";
pub const DAG_FILE: &str = "dag.csv";
pub const VM_FILE: &str = "vm.csv";
pub const CAPACITY_FILE: &str = "processing_capacity.csv";

pub use reader::{parse_edges, parse_tasks, read_graph, LoadedGraph};
pub use writer::{write_artifacts, ArtifactDigest, ArtifactManifest};
