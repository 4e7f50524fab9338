// src/export/reader.rs

//! Reads `task.csv` and `dag.csv` back into a task graph.
//!
//! Besides the canonical encoding the reader accepts older variants of the
//! same files: `t`/`vm` id prefixes, comma separators, `#` comment lines and
//! a header line before the first record.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use tracing::debug;

use crate::dag::{Edge, Task, TaskId};
use crate::errors::{Result, WfsynthError};
use crate::export::{DAG_FILE, TASK_FILE};
use crate::fs::FileSystem;

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedGraph {
    pub tasks: Vec<Task>,
    pub edges: Vec<Edge>,
}

/// Read `task.csv` and `dag.csv` from `dir`.
///
/// Dependency sets are filled in from the edges. No structural checks are
/// made here; the caller decides what to validate.
pub fn read_graph(fs: &dyn FileSystem, dir: &Path) -> Result<LoadedGraph> {
    let task_path = dir.join(TASK_FILE);
    let dag_path = dir.join(DAG_FILE);

    let task_text = fs
        .read_to_string(&task_path)
        .with_context(|| format!("reading {task_path:?}"))?;
    let dag_text = fs
        .read_to_string(&dag_path)
        .with_context(|| format!("reading {dag_path:?}"))?;

    let mut tasks = parse_tasks(&task_path, &task_text)?;
    let edges = parse_edges(&dag_path, &dag_text)?;

    let position: HashMap<TaskId, usize> =
        tasks.iter().enumerate().map(|(idx, t)| (t.id, idx)).collect();
    for edge in &edges {
        if let Some(&idx) = position.get(&edge.to) {
            tasks[idx].dependencies.insert(edge.from);
        }
    }

    debug!(
        dir = %dir.display(),
        tasks = tasks.len(),
        edges = edges.len(),
        "graph loaded"
    );
    Ok(LoadedGraph { tasks, edges })
}

/// Meaningful lines with their 1-based line numbers, split into fields.
fn records(text: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    text.lines().enumerate().filter_map(|(idx, line)| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let fields = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|f| !f.is_empty())
            .collect();
        Some((idx + 1, fields))
    })
}

fn parse_id(field: &str) -> Option<TaskId> {
    let digits = field
        .strip_prefix("vm")
        .or_else(|| field.strip_prefix(['t', 'T']))
        .unwrap_or(field);
    digits.parse().ok()
}

fn parse_error(path: &Path, line: usize, message: impl Into<String>) -> WfsynthError {
    WfsynthError::Parse {
        path: path.to_path_buf(),
        line,
        message: message.into(),
    }
}

/// Records after dropping a leading header line, if there is one.
fn data_records<'t>(text: &'t str) -> Vec<(usize, Vec<&'t str>)> {
    let mut all: Vec<_> = records(text).collect();
    let is_header = all
        .first()
        .and_then(|(_, fields)| fields.first())
        .is_some_and(|first| parse_id(first).is_none());
    if is_header {
        all.remove(0);
    }
    all
}

pub fn parse_tasks(path: &Path, text: &str) -> Result<Vec<Task>> {
    let mut tasks = Vec::new();
    for (line, fields) in data_records(text) {
        let [id, size, ..] = fields.as_slice() else {
            return Err(parse_error(path, line, "expected `id size`"));
        };
        let id = parse_id(id).ok_or_else(|| parse_error(path, line, format!("bad task id `{id}`")))?;
        let size: f64 = size
            .parse()
            .map_err(|_| parse_error(path, line, format!("bad task size `{size}`")))?;

        let mut task = Task::new(id, "");
        task.size = size;
        tasks.push(task);
    }
    Ok(tasks)
}

pub fn parse_edges(path: &Path, text: &str) -> Result<Vec<Edge>> {
    let mut edges = Vec::new();
    for (line, fields) in data_records(text) {
        let (from, to, volume) = match fields.as_slice() {
            [from, to] => (from, to, None),
            [from, to, volume, ..] => (from, to, Some(volume)),
            _ => return Err(parse_error(path, line, "expected `from to [volume]`")),
        };
        let from = parse_id(from)
            .ok_or_else(|| parse_error(path, line, format!("bad task id `{from}`")))?;
        let to =
            parse_id(to).ok_or_else(|| parse_error(path, line, format!("bad task id `{to}`")))?;
        let data_volume = volume
            .map(|v| {
                v.parse::<f64>()
                    .map_err(|_| parse_error(path, line, format!("bad data volume `{v}`")))
            })
            .transpose()?;

        edges.push(Edge {
            from,
            to,
            data_volume,
        });
    }
    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixed_ids_are_accepted() {
        assert_eq!(parse_id("t12"), Some(12));
        assert_eq!(parse_id("vm3"), Some(3));
        assert_eq!(parse_id("7"), Some(7));
        assert_eq!(parse_id("task"), None);
    }

    #[test]
    fn bad_size_reports_line_number() {
        let err = parse_tasks(Path::new("task.csv"), "# sizes\n1 2.0\n2 oops\n").unwrap_err();
        match err {
            WfsynthError::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
