// src/topology/mod.rs

//! Workflow topology builders.
//!
//! Each archetype is described by a declarative stage [`Template`]; one
//! interpreter ([`template::instantiate`]) turns any of them into tasks and
//! edges.

pub mod cybershake;
pub mod epigenomics;
pub mod ligo;
pub mod montage;
pub mod params;
pub mod template;

use tracing::info;

use crate::dag::Workflow;
use crate::errors::Result;
use crate::types::Archetype;

pub use params::{bounds, ParamBound, SizeParams};
pub use template::{Batch, Count, FanPattern, Stage, Template};

/// The stage template of an archetype.
pub fn template_for(archetype: Archetype) -> Template {
    match archetype {
        Archetype::Montage => montage::template(),
        Archetype::CyberShake => cybershake::template(),
        Archetype::Ligo => ligo::template(),
        Archetype::Epigenomics => epigenomics::template(),
    }
}

/// Build the task graph for `params`.
///
/// Parameters are range-checked first; nothing is built if any is out of
/// range. Task sizes are zero and edges carry no volume until a cost model
/// is applied.
pub fn build(params: SizeParams) -> Result<Workflow> {
    params.validate()?;

    let archetype = params.archetype();
    let (tasks, edges) = template::instantiate(&template_for(archetype), &params)?;

    info!(
        %archetype,
        tasks = tasks.len(),
        edges = edges.len(),
        "topology built"
    );

    Ok(Workflow {
        archetype,
        params,
        tasks,
        edges,
    })
}
