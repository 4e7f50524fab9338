// src/generator.rs

//! One generation run: topology, cost, resources, certification.
//!
//! The random source is consumed in that order: task sizes, edge volumes,
//! VM capacities, then bandwidth pairs. Fixed-duration runs draw nothing
//! until the resource model.

use tracing::info;

use crate::cost::CostModel;
use crate::dag::{certify, Workflow};
use crate::errors::Result;
use crate::resources::{self, ResourceModel};
use crate::rng::RandomSource;
use crate::topology::{self, SizeParams};

/// Everything one run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub workflow: Workflow,
    pub resources: ResourceModel,
}

pub fn generate(
    params: SizeParams,
    cost: &CostModel,
    rng: &mut dyn RandomSource,
) -> Result<Generated> {
    cost.validate()?;

    let mut workflow = topology::build(params)?;
    cost.apply(&mut workflow, rng)?;
    let resources = resources::build(workflow.archetype, workflow.task_count(), rng);
    certify(&workflow)?;

    info!(
        archetype = %workflow.archetype,
        tasks = workflow.task_count(),
        edges = workflow.edge_count(),
        vms = resources.vm_count(),
        realized_ccr = workflow.realized_ccr(),
        "workflow generated"
    );

    Ok(Generated {
        workflow,
        resources,
    })
}
