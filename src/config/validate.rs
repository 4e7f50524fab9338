// src/config/validate.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::config::model::{CostSection, GenerationConfig, RawConfigFile, DEFAULT_OUTPUT_DIR};
use crate::cost::{CostModel, DEFAULT_EPSILON};
use crate::errors::{Result, WfsynthError};
use crate::topology::{bounds, SizeParams};
use crate::types::{Archetype, CostMode};

impl TryFrom<RawConfigFile> for GenerationConfig {
    type Error = WfsynthError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let archetype = raw.workflow.archetype.ok_or_else(|| {
            WfsynthError::ConfigError(
                "no archetype given (set [workflow].archetype or pass --archetype)".to_string(),
            )
        })?;

        let params = validate_params(archetype, &raw.params)?;
        let cost = validate_cost(&raw.cost)?;
        let output_dir = raw
            .output
            .dir
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        Ok(GenerationConfig::new_unchecked(
            params,
            cost,
            raw.workflow.seed,
            raw.workflow.critical_path.unwrap_or_default(),
            output_dir,
        ))
    }
}

fn validate_params(archetype: Archetype, given: &BTreeMap<String, i64>) -> Result<SizeParams> {
    let accepted = bounds(archetype);

    for (name, value) in given {
        let Some(bound) = accepted.iter().find(|b| b.name == name) else {
            let names: Vec<&str> = accepted.iter().map(|b| b.name).collect();
            return Err(WfsynthError::ConfigError(format!(
                "unknown parameter `{name}` for {archetype} (accepted: {})",
                names.join(", ")
            )));
        };
        if *value < 0 {
            return Err(WfsynthError::out_of_range(
                name.as_str(),
                value,
                bound.range_label(),
            ));
        }
    }

    let params = SizeParams::from_lookup(archetype, |name| {
        given.get(name).and_then(|&v| usize::try_from(v).ok())
    });
    params.validate()?;
    Ok(params)
}

fn validate_cost(cost: &CostSection) -> Result<CostModel> {
    let mode = match (cost.mode, cost.ccr) {
        (Some(mode), _) => mode,
        (None, Some(_)) => CostMode::Ccr,
        (None, None) => CostMode::Fixed,
    };

    let model = match mode {
        CostMode::Fixed => {
            if cost.ccr.is_some() || cost.epsilon.is_some() || cost.rescale.is_some() {
                return Err(WfsynthError::ConfigError(
                    "ccr, epsilon and rescale only apply to the \"ccr\" cost mode".to_string(),
                ));
            }
            CostModel::FixedDuration
        }
        CostMode::Ccr => {
            let ccr = cost.ccr.ok_or_else(|| {
                WfsynthError::ConfigError(
                    "cost mode \"ccr\" needs a target ratio (set [cost].ccr or pass --ccr)"
                        .to_string(),
                )
            })?;
            CostModel::CcrCalibrated {
                ccr,
                epsilon: cost.epsilon.unwrap_or(DEFAULT_EPSILON),
                rescale: cost.rescale.unwrap_or(false),
            }
        }
    };

    model.validate()?;
    Ok(model)
}
