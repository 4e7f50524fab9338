// src/topology/epigenomics.rs

//! Epigenomics: sequencing-read analysis.

use crate::topology::template::{Batch, Count, FanPattern, Stage, Template};
use crate::types::Archetype;

/// Samples compared by one `DifferentialAnalysis` task.
const SAMPLES_PER_COMPARISON: usize = 2;

pub fn template() -> Template {
    let chain = |kind, from| {
        Stage::new(
            kind,
            FanPattern::PerGroup {
                from,
                per_group: Count::Fixed(1),
                also: &[],
            },
        )
    };

    Template {
        archetype: Archetype::Epigenomics,
        stages: vec![
            // paired-end reads: R1 and R2
            Stage::new(
                "FastQC",
                FanPattern::Roots {
                    groups: Count::Param("samples"),
                    per_group: Count::Fixed(2),
                },
            ),
            chain("Trimming", "FastQC"),
            chain("Alignment", "Trimming"),
            chain("Sorting", "Alignment"),
            chain("Deduplication", "Sorting"),
            Stage::new(
                "PeakCalling",
                FanPattern::PerGroup {
                    from: "Deduplication",
                    per_group: Count::Param("analyses"),
                    also: &[],
                },
            ),
            chain("Annotation", "PeakCalling"),
            Stage::new(
                "DifferentialAnalysis",
                FanPattern::Gather {
                    from: &["Annotation"],
                    batch: Batch::Whole(SAMPLES_PER_COMPARISON),
                },
            ),
            Stage::named(
                "SampleVisualization",
                "Visualization",
                FanPattern::PerGroup {
                    from: "Annotation",
                    per_group: Count::Fixed(1),
                    also: &[],
                },
            ),
            Stage::named(
                "GroupVisualization",
                "Visualization",
                FanPattern::PerGroup {
                    from: "DifferentialAnalysis",
                    per_group: Count::Fixed(1),
                    also: &[],
                },
            ),
            Stage::new(
                "FinalReport",
                FanPattern::Gather {
                    from: &[
                        "DifferentialAnalysis",
                        "SampleVisualization",
                        "GroupVisualization",
                    ],
                    batch: Batch::All,
                },
            ),
        ],
    }
}
