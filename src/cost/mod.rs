// src/cost/mod.rs

//! Task sizes and edge data volumes.
//!
//! Two models are available:
//!
//! - [`CostModel::FixedDuration`] looks sizes up in a per-stage table and
//!   leaves edges without volumes. It draws nothing from the random source.
//! - [`CostModel::CcrCalibrated`] draws every task size from the archetype's
//!   range, then every edge volume around `mean_size * ccr`. The realized
//!   ratio matches the target only in expectation unless `rescale` is set.

pub mod tables;

use tracing::debug;

use crate::dag::Workflow;
use crate::errors::{Result, WfsynthError};
use crate::rng::RandomSource;

pub const DEFAULT_EPSILON: f64 = 0.25;

pub const CCR_RANGE: (f64, f64) = (0.01, 100.0);

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum CostModel {
    #[default]
    FixedDuration,
    CcrCalibrated {
        ccr: f64,
        /// Relative half-width of the volume distribution, in `[0, 1)`.
        epsilon: f64,
        /// Scale volumes afterwards so the realized ratio is exactly `ccr`.
        rescale: bool,
    },
}

impl CostModel {
    /// CCR calibration with the default spread and no rescaling.
    pub fn ccr(ccr: f64) -> Self {
        CostModel::CcrCalibrated {
            ccr,
            epsilon: DEFAULT_EPSILON,
            rescale: false,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let CostModel::CcrCalibrated { ccr, epsilon, .. } = *self {
            let (low, high) = CCR_RANGE;
            if !(low..=high).contains(&ccr) {
                return Err(WfsynthError::out_of_range(
                    "ccr",
                    ccr,
                    format!("[{low}, {high}]"),
                ));
            }
            if !(0.0..1.0).contains(&epsilon) {
                return Err(WfsynthError::out_of_range("epsilon", epsilon, "[0, 1)"));
            }
        }
        Ok(())
    }

    /// Assign sizes, and volumes in CCR mode, to every task and edge.
    pub fn apply(&self, workflow: &mut Workflow, rng: &mut dyn RandomSource) -> Result<()> {
        self.validate()?;
        match *self {
            CostModel::FixedDuration => apply_fixed(workflow),
            CostModel::CcrCalibrated {
                ccr,
                epsilon,
                rescale,
            } => {
                apply_ccr(workflow, rng, ccr, epsilon, rescale);
                Ok(())
            }
        }
    }
}

fn apply_fixed(workflow: &mut Workflow) -> Result<()> {
    let archetype = workflow.archetype;
    for task in workflow.tasks.iter_mut() {
        task.size = tables::fixed_duration(archetype, &task.kind).ok_or_else(|| {
            WfsynthError::ConfigError(format!(
                "no duration for {archetype} stage `{}`",
                task.kind
            ))
        })?;
    }
    for edge in workflow.edges.iter_mut() {
        edge.data_volume = None;
    }
    Ok(())
}

fn apply_ccr(
    workflow: &mut Workflow,
    rng: &mut dyn RandomSource,
    ccr: f64,
    epsilon: f64,
    rescale: bool,
) {
    let (low, high) = tables::size_range(workflow.archetype);
    for task in workflow.tasks.iter_mut() {
        task.size = rng.uniform(low, high);
    }

    let mean = if workflow.tasks.is_empty() {
        0.0
    } else {
        workflow.total_size() / workflow.tasks.len() as f64
    };
    let centre = mean * ccr;
    for edge in workflow.edges.iter_mut() {
        edge.data_volume = Some(rng.uniform(centre * (1.0 - epsilon), centre * (1.0 + epsilon)));
    }

    let realized = workflow.realized_ccr();
    debug!(
        target_ccr = ccr,
        realized_ccr = realized,
        drift = realized - ccr,
        "ccr calibration"
    );

    if rescale && realized > 0.0 {
        let factor = ccr / realized;
        for edge in workflow.edges.iter_mut() {
            edge.data_volume = edge.data_volume.map(|v| v * factor);
        }
        debug!(factor, "edge volumes rescaled to target ccr");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{build, template_for, SizeParams};
    use crate::types::Archetype;

    #[test]
    fn defaults_to_fixed_durations() {
        assert_eq!(CostModel::default(), CostModel::FixedDuration);
        assert_eq!(crate::types::CostMode::default(), crate::types::CostMode::Fixed);
    }

    #[test]
    fn every_stage_kind_has_a_duration() {
        for archetype in Archetype::ALL {
            for kind in template_for(archetype).stage_kinds() {
                assert!(
                    tables::fixed_duration(archetype, kind).is_some(),
                    "{archetype} stage {kind} has no duration"
                );
            }
        }
    }

    #[test]
    fn rejects_out_of_range_ccr_and_epsilon() {
        assert!(CostModel::ccr(0.0).validate().is_err());
        assert!(CostModel::ccr(100.5).validate().is_err());
        let wide = CostModel::CcrCalibrated {
            ccr: 1.0,
            epsilon: 1.0,
            rescale: false,
        };
        assert!(matches!(
            wide.validate(),
            Err(WfsynthError::ParameterValidation { .. })
        ));
    }

    struct Constant(f64);

    impl RandomSource for Constant {
        fn uniform(&mut self, low: f64, high: f64) -> f64 {
            low + (high - low) * self.0
        }
    }

    #[test]
    fn midpoint_draws_centre_volumes_on_mean_size() {
        let mut wf = build(SizeParams::Montage { images: 2 }).unwrap();
        CostModel::ccr(2.0).apply(&mut wf, &mut Constant(0.5)).unwrap();

        assert!(wf.tasks.iter().all(|t| t.size == 600.0));
        for edge in &wf.edges {
            let volume = edge.data_volume.unwrap();
            assert!((volume - 1200.0).abs() < 1e-9);
        }
    }
}
