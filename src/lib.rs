// src/lib.rs

pub mod cli;
pub mod config;
pub mod cost;
pub mod dag;
pub mod errors;
pub mod export;
pub mod fs;
pub mod generator;
pub mod logging;
pub mod report;
pub mod resources;
pub mod rng;
pub mod topology;
pub mod types;

use anyhow::Result;
use tracing::{info, warn};

use crate::cli::{CheckArgs, CliArgs, Command, GenerateArgs};
use crate::config::{load_from_path, GenerationConfig, RawConfigFile};
use crate::dag::{check_invariants, structural_report, StructuralReport};
use crate::errors::WfsynthError;
use crate::export::{read_graph, write_artifacts, ArtifactManifest};
use crate::fs::{FileSystem, RealFileSystem};
use crate::generator::{generate, Generated};
use crate::rng::SeededRandom;

/// High-level entry point used by `main.rs`.
pub fn run(args: CliArgs) -> Result<()> {
    let fs = RealFileSystem;
    match args.command {
        Command::Generate(generate_args) => {
            let outcome = run_generate(&fs, &generate_args)?;
            let title = format!(
                "{} (seed {})",
                outcome.generated.workflow.params, outcome.seed
            );
            print!("{}", report::render_report(&title, &outcome.report));
            if let Some(manifest) = &outcome.manifest {
                print!("{}", report::render_manifest(manifest));
            }
        }
        Command::Check(check_args) => {
            let report = run_check(&fs, &check_args)?;
            let title = format!("{}", check_args.dir.display());
            print!("{}", report::render_report(&title, &report));
        }
    }
    Ok(())
}

/// What a `generate` run produced.
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    pub config: GenerationConfig,
    pub seed: u64,
    pub generated: Generated,
    pub report: StructuralReport,
    /// `None` for dry runs.
    pub manifest: Option<ArtifactManifest>,
}

/// Layer CLI flags over the optional config file and validate the result.
pub fn resolve_config(args: &GenerateArgs) -> errors::Result<GenerationConfig> {
    let mut raw = match &args.config {
        Some(path) => load_from_path(path)?,
        None => RawConfigFile::default(),
    };

    if let Some(archetype) = args.archetype {
        raw.workflow.archetype = Some(archetype);
    }
    if let Some(seed) = args.seed {
        raw.workflow.seed = Some(seed);
    }
    if let Some(metric) = args.critical_path {
        raw.workflow.critical_path = Some(metric);
    }
    for (name, value) in &args.params {
        raw.params.insert(name.clone(), *value);
    }
    if let Some(mode) = args.cost_mode {
        raw.cost.mode = Some(mode);
    }
    if let Some(ccr) = args.ccr {
        raw.cost.ccr = Some(ccr);
    }
    if let Some(epsilon) = args.epsilon {
        raw.cost.epsilon = Some(epsilon);
    }
    if args.rescale {
        raw.cost.rescale = Some(true);
    }
    if let Some(dir) = &args.output {
        raw.output.dir = Some(dir.clone());
    }

    GenerationConfig::try_from(raw)
}

pub fn run_generate(fs: &dyn FileSystem, args: &GenerateArgs) -> Result<GenerateOutcome> {
    let config = resolve_config(args)?;

    let mut rng = match config.seed {
        Some(seed) => SeededRandom::new(seed),
        None => SeededRandom::from_entropy_seed(),
    };
    let seed = rng.seed();
    info!(seed, archetype = %config.archetype(), "starting generation");

    let generated = generate(config.params, &config.cost, &mut rng)?;
    let report = structural_report(
        &generated.workflow.tasks,
        &generated.workflow.edges,
        config.critical_path,
    );

    let manifest = if args.dry_run {
        info!("dry run, nothing written");
        None
    } else {
        let dir = &config.output_dir;
        fs.create_dir_all(dir)
            .map_err(|source| WfsynthError::SerializationIo {
                path: dir.clone(),
                source,
            })?;
        let manifest = write_artifacts(fs, dir, &generated.workflow, &generated.resources)?;
        for file in &manifest.files {
            info!(path = %file.path.display(), blake3 = %file.blake3, "wrote artifact");
        }
        Some(manifest)
    };

    Ok(GenerateOutcome {
        config,
        seed,
        generated,
        report,
        manifest,
    })
}

pub fn run_check(fs: &dyn FileSystem, args: &CheckArgs) -> Result<StructuralReport> {
    let graph = read_graph(fs, &args.dir)?;

    if args.strict {
        check_invariants(&graph.tasks, &graph.edges).map_err(WfsynthError::from)?;
    }

    let report = structural_report(&graph.tasks, &graph.edges, args.critical_path);
    for warning in &report.warnings {
        warn!(dir = %args.dir.display(), "{warning}");
    }
    Ok(report)
}
