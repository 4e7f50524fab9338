// src/report.rs

//! Plain-text rendering of structural reports for the CLI.

use std::fmt::Write as _;

use crate::dag::StructuralReport;
use crate::export::ArtifactManifest;
use crate::types::CriticalPathMetric;

pub fn render_report(title: &str, report: &StructuralReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "  tasks:          {}", report.task_count);
    let _ = writeln!(out, "  edges:          {}", report.edge_count);
    let _ = writeln!(out, "  acyclic:        {}", report.is_acyclic);
    let _ = writeln!(out, "  shape:          {}", report.shape);
    let _ = writeln!(out, "  roots:          {}", report.roots.len());
    let _ = writeln!(out, "  leaves:         {}", report.leaves.len());
    let _ = writeln!(out, "  density:        {:.6}", report.density);
    let _ = writeln!(out, "  depth:          {}", report.depth);

    let widths: Vec<String> = report.level_widths.iter().map(|w| w.to_string()).collect();
    let _ = writeln!(out, "  level widths:   [{}]", widths.join(", "));

    match report.critical_path_metric {
        CriticalPathMetric::Edges => {
            let _ = writeln!(out, "  critical path:  {} edges", report.critical_path);
        }
        CriticalPathMetric::Size => {
            let _ = writeln!(out, "  critical path:  {:.4} size", report.critical_path);
        }
    }

    let degree = &report.degree;
    let _ = writeln!(
        out,
        "  degree:         max in {}, max out {}, mean {:.3}",
        degree.max_in, degree.max_out, degree.mean_degree
    );
    if let Some((task, fan)) = degree.widest_fan_out {
        let _ = writeln!(out, "  widest fan-out: task {task} ({fan} successors)");
    }

    if !report.size_histogram.is_empty() {
        let _ = writeln!(out, "  task sizes:");
        for bucket in &report.size_histogram {
            let _ = writeln!(
                out,
                "    [{:>10.4}, {:>10.4}]  {}",
                bucket.low, bucket.high, bucket.count
            );
        }
    }

    for warning in &report.warnings {
        let _ = writeln!(out, "  warning: {warning}");
    }
    out
}

pub fn render_manifest(manifest: &ArtifactManifest) -> String {
    let mut out = String::new();
    for file in &manifest.files {
        let _ = writeln!(
            out,
            "  {}  {} bytes  blake3 {}",
            file.path.display(),
            file.bytes,
            file.blake3
        );
    }
    out
}
