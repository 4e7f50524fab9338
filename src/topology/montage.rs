// src/topology/montage.rs

//! Montage: astronomical image mosaicking.
//!
//! Each input image runs a five-stage chain (reproject, difference fit,
//! concatenate fit, background model, background correction). All corrected
//! images are co-added by one `mAdd`, which feeds one `mJPEG`.

use crate::topology::template::{Batch, Count, FanPattern, Stage, Template};
use crate::types::Archetype;

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
        archetype: Archetype::Montage,
        stages: vec![
            Stage::new(
                "mProject",
                FanPattern::Roots {
                    groups: Count::Param("images"),
                    per_group: Count::Fixed(1),
                },
            ),
            chain("mDiffFit", "mProject"),
            chain("mConcatFit", "mDiffFit"),
            chain("mBgModel", "mConcatFit"),
            chain("mBackground", "mBgModel"),
            Stage::new(
                "mAdd",
                FanPattern::Gather {
                    from: &["mBackground"],
                    batch: Batch::All,
                },
            ),
            chain("mJPEG", "mAdd"),
        ],
    }
}
