// src/topology/cybershake.rs

//! CyberShake: seismic hazard characterisation.
//!
//! One `PreCVM` prepares the velocity model for every site. Per site, a
//! `GenCVM` fans out to the strain Green tensor variations, every peak
//! spectral acceleration filter reads all of the site's tensors, and the
//! site's PSAs are zipped. A single `PostProcess` collects every site.

use crate::topology::template::{Batch, Count, FanPattern, Stage, Template};
use crate::types::Archetype;

pub fn template() -> Template {
    Template {
        archetype: Archetype::CyberShake,
        stages: vec![
            Stage::new(
                "PreCVM",
                FanPattern::Roots {
                    groups: Count::Fixed(1),
                    per_group: Count::Fixed(1),
                },
            ),
            Stage::new(
                "GenCVM",
                FanPattern::Broadcast {
                    from: "PreCVM",
                    count: Count::Param("sites"),
                },
            ),
            Stage::new(
                "GenSGT",
                FanPattern::PerGroup {
                    from: "GenCVM",
                    per_group: Count::Param("sgt_variations"),
                    also: &[],
                },
            ),
            Stage::new(
                "PSA",
                FanPattern::PerGroup {
                    from: "GenSGT",
                    per_group: Count::Param("psa_filters"),
                    also: &[],
                },
            ),
            Stage::new(
                "ZipPSA",
                FanPattern::PerGroup {
                    from: "PSA",
                    per_group: Count::Fixed(1),
                    also: &[],
                },
            ),
            Stage::new(
                "PostProcess",
                FanPattern::Gather {
                    from: &["ZipPSA"],
                    batch: Batch::All,
                },
            ),
        ],
    }
}
