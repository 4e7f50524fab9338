// src/topology/ligo.rs

//! LIGO inspiral search.
//!
//! Every data segment is matched against every template of a shared template
//! bank. Segments are checked for coincidences four at a time, triggers are
//! banked, and `Thinca` combines them with the injection runs.

use crate::topology::template::{Batch, Count, FanPattern, Stage, Template};
use crate::types::Archetype;

/// Segments per `Coincidence` task.
const COINCIDENCE_BATCH: usize = 4;
/// Segments covered by one `Injection` task.
const SEGMENTS_PER_INJECTION: usize = 10;

pub fn template() -> Template {
    Template {
        archetype: Archetype::Ligo,
        stages: vec![
            Stage::new(
                "DataFind",
                FanPattern::Roots {
                    groups: Count::Param("segments"),
                    per_group: Count::Fixed(1),
                },
            ),
            Stage::new(
                "TemplateBank",
                FanPattern::Roots {
                    groups: Count::Fixed(1),
                    per_group: Count::Fixed(1),
                },
            ),
            Stage::new(
                "Inspiral",
                FanPattern::PerGroup {
                    from: "DataFind",
                    per_group: Count::Param("templates"),
                    also: &["TemplateBank"],
                },
            ),
            Stage::new(
                "Coincidence",
                FanPattern::Gather {
                    from: &["Inspiral"],
                    batch: Batch::Groups(COINCIDENCE_BATCH),
                },
            ),
            Stage::new(
                "TrigBank",
                FanPattern::Gather {
                    from: &["Coincidence"],
                    batch: Batch::All,
                },
            ),
            Stage::new(
                "Injection",
                FanPattern::Broadcast {
                    from: "TemplateBank",
                    count: Count::CeilDiv("segments", SEGMENTS_PER_INJECTION),
                },
            ),
            Stage::new(
                "Thinca",
                FanPattern::Gather {
                    from: &["TrigBank", "Injection"],
                    batch: Batch::All,
                },
            ),
            Stage::new(
                "PostProcess",
                FanPattern::PerGroup {
                    from: "Thinca",
                    per_group: Count::Fixed(1),
                    also: &[],
                },
            ),
        ],
    }
}
