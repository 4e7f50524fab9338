// src/export/writer.rs

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::dag::{Edge, Task, Workflow};
use crate::errors::{Result, WfsynthError};
use crate::export::{CAPACITY_FILE, DAG_FILE, TASK_FILE, VM_FILE};
use crate::fs::FileSystem;
use crate::resources::{BandwidthMatrix, ResourceModel, Vm};

/// Digest of one written file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDigest {
    pub path: PathBuf,
    pub bytes: usize,
    /// Hex-encoded blake3 hash of the file contents.
    pub blake3: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactManifest {
    pub files: Vec<ArtifactDigest>,
}

impl ArtifactManifest {
    pub fn digest_of(&self, file_name: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|d| d.path.file_name().is_some_and(|n| n == file_name))
            .map(|d| d.blake3.as_str())
    }
}

pub fn render_tasks(tasks: &[Task]) -> String {
    let mut out = String::new();
    for task in tasks {
        let _ = writeln!(out, "{} {:.4}", task.id, task.size);
    }
    out
}

/// Edges with a volume get a third column; edges without get two.
pub fn render_edges(edges: &[Edge]) -> String {
    let mut out = String::new();
    for edge in edges {
        match edge.data_volume {
            Some(volume) => {
                let _ = writeln!(out, "{} {} {:.4}", edge.from, edge.to, volume);
            }
            None => {
                let _ = writeln!(out, "{} {}", edge.from, edge.to);
            }
        }
    }
    out
}

pub fn render_bandwidth(vms: &[Vm], matrix: &BandwidthMatrix) -> String {
    let mut out = String::new();
    let ids: Vec<String> = vms.iter().map(|vm| vm.id.to_string()).collect();
    let _ = writeln!(out, "{}", ids.join(" "));
    for row in matrix.rows() {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:.4}")).collect();
        let _ = writeln!(out, "{}", cells.join(" "));
    }
    out
}

pub fn render_capacities(vms: &[Vm]) -> String {
    let mut out = String::new();
    for vm in vms {
        let _ = writeln!(out, "{} {:.4}", vm.id, vm.processing_capacity);
    }
    out
}

/// Write all four files into `dir`, which must already exist.
pub fn write_artifacts(
    fs: &dyn FileSystem,
    dir: &Path,
    workflow: &Workflow,
    resources: &ResourceModel,
) -> Result<ArtifactManifest> {
    let rendered = [
        (TASK_FILE, render_tasks(&workflow.tasks)),
        (DAG_FILE, render_edges(&workflow.edges)),
        (VM_FILE, render_bandwidth(&resources.vms, &resources.bandwidth)),
        (CAPACITY_FILE, render_capacities(&resources.vms)),
    ];

    let mut manifest = ArtifactManifest::default();
    for (name, contents) in rendered {
        let path = dir.join(name);
        fs.write(&path, contents.as_bytes())
            .map_err(|source| WfsynthError::SerializationIo {
                path: path.clone(),
                source,
            })?;

        let digest = blake3::hash(contents.as_bytes()).to_hex().to_string();
        debug!(path = %path.display(), bytes = contents.len(), blake3 = %digest, "artifact written");
        manifest.files.push(ArtifactDigest {
            path,
            bytes: contents.len(),
            blake3: digest,
        });
    }

    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_render_two_or_three_columns() {
        let mut with_volume = Edge::new(1, 2);
        with_volume.data_volume = Some(12.5);
        let text = render_edges(&[Edge::new(1, 3), with_volume]);
        assert_eq!(text, "1 3\n1 2 12.5000\n");
    }

    #[test]
    fn tasks_use_four_decimals() {
        let mut task = Task::new(1, "mAdd");
        task.size = 10.0;
        assert_eq!(render_tasks(&[task]), "1 10.0000\n");
    }
}
