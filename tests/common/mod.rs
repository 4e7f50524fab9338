#![allow(dead_code)]

use wfsynth::cli::GenerateArgs;
use wfsynth::cost::CostModel;
use wfsynth::dag::Workflow;
use wfsynth::generator::{generate, Generated};
use wfsynth::rng::SeededRandom;
use wfsynth::topology::SizeParams;
use wfsynth::types::Archetype;

pub use wfsynth_test_utils::init_tracing;

/// Generate with fixed durations.
pub fn fixed(params: SizeParams) -> Workflow {
    init_tracing();
    let mut rng = SeededRandom::new(0);
    generate(params, &CostModel::FixedDuration, &mut rng)
        .expect("fixed generation failed")
        .workflow
}

/// Generate with CCR calibration and the default spread.
pub fn with_ccr(params: SizeParams, ccr: f64, seed: u64) -> Generated {
    init_tracing();
    let mut rng = SeededRandom::new(seed);
    generate(params, &CostModel::ccr(ccr), &mut rng).expect("ccr generation failed")
}

/// `generate` arguments with nothing set except the archetype.
pub fn generate_args(archetype: Archetype) -> GenerateArgs {
    GenerateArgs {
        config: None,
        archetype: Some(archetype),
        params: Vec::new(),
        seed: None,
        cost_mode: None,
        ccr: None,
        epsilon: None,
        rescale: false,
        output: None,
        critical_path: None,
        dry_run: false,
    }
}

pub fn deps(workflow: &Workflow, id: usize) -> Vec<usize> {
    workflow
        .task(id)
        .expect("task exists")
        .dependencies
        .iter()
        .copied()
        .collect()
}

pub fn kind_count(workflow: &Workflow, kind: &str) -> usize {
    workflow.tasks_of_kind(kind).count()
}
