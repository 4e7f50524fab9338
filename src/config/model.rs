// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::cost::CostModel;
use crate::topology::SizeParams;
use crate::types::{Archetype, CostMode, CriticalPathMetric};

/// Generation config as read from a TOML file, before validation.
///
/// ```toml
/// [workflow]
/// archetype = "ligo"
/// seed = 42
///
/// [params]
/// segments = 40
/// templates = 5
///
/// [cost]
/// mode = "ccr"
/// ccr = 1.5
/// epsilon = 0.2
/// rescale = true
///
/// [output]
/// dir = "out/ligo"
/// ```
///
/// Every section is optional. CLI flags are layered on top of this before
/// it is validated into a [`GenerationConfig`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub workflow: WorkflowSection,

    /// Size parameters by name. Signed so that negative values reach
    /// range validation instead of failing to parse.
    #[serde(default)]
    pub params: BTreeMap<String, i64>,

    #[serde(default)]
    pub cost: CostSection,

    #[serde(default)]
    pub output: OutputSection,
}

/// `[workflow]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkflowSection {
    pub archetype: Option<Archetype>,

    /// Seed for every random draw of the run. Drawn from OS entropy when
    /// absent.
    pub seed: Option<u64>,

    /// Metric for the critical path in the printed report.
    pub critical_path: Option<CriticalPathMetric>,
}

/// `[cost]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CostSection {
    /// `"fixed"` or `"ccr"`. Inferred as `"ccr"` when only `ccr` is set.
    pub mode: Option<CostMode>,
    pub ccr: Option<f64>,
    pub epsilon: Option<f64>,
    pub rescale: Option<bool>,
}

/// `[output]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    pub dir: Option<PathBuf>,
}

/// Directory artifacts are written to when none is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "out";

/// A validated generation request.
///
/// Only constructed through `TryFrom<RawConfigFile>`, so every value in it
/// is within range.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub params: SizeParams,
    pub cost: CostModel,
    pub seed: Option<u64>,
    pub critical_path: CriticalPathMetric,
    pub output_dir: PathBuf,
}

impl GenerationConfig {
    pub(crate) fn new_unchecked(
        params: SizeParams,
        cost: CostModel,
        seed: Option<u64>,
        critical_path: CriticalPathMetric,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            params,
            cost,
            seed,
            critical_path,
            output_dir,
        }
    }

    pub fn archetype(&self) -> Archetype {
        self.params.archetype()
    }
}
