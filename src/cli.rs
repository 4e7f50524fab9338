// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::types::{Archetype, CostMode, CriticalPathMetric};

/// Command-line arguments for `wfsynth`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "wfsynth",
    version,
    about = "Generate synthetic scientific workflow DAGs and their resource models.",
    long_about = None
)]
pub struct CliArgs {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WFSYNTH_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Build a workflow and resource model and write the four CSV files.
    Generate(GenerateArgs),
    /// Load `task.csv` and `dag.csv` from a directory and report on the graph.
    Check(CheckArgs),
}

#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// TOML config file; flags below override its values.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[arg(long, short, value_enum)]
    pub archetype: Option<Archetype>,

    /// Size parameter as `name=value`, e.g. `--param images=25`. Repeatable.
    #[arg(long = "param", short = 'p', value_name = "NAME=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, i64)>,

    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, value_enum)]
    pub cost_mode: Option<CostMode>,

    /// Target communication-to-computation ratio. Implies `--cost-mode ccr`.
    #[arg(long)]
    pub ccr: Option<f64>,

    /// Relative spread of edge volumes around the target.
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Rescale edge volumes so the realized CCR equals the target.
    #[arg(long)]
    pub rescale: bool,

    /// Output directory, created if missing.
    #[arg(long, short, value_name = "DIR")]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub critical_path: Option<CriticalPathMetric>,

    /// Build and report, but write nothing.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// Directory containing `task.csv` and `dag.csv`.
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    #[arg(long, value_enum, default_value = "edges")]
    pub critical_path: CriticalPathMetric,

    /// Fail unless the graph satisfies every structural invariant.
    #[arg(long)]
    pub strict: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn parse_param(s: &str) -> Result<(String, i64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{s}`"))?;
    let value = value
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid value for `{}`: {e}", name.trim()))?;
    Ok((name.trim().to_string(), value))
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_flag_splits_name_and_value() {
        assert_eq!(parse_param("images=25"), Ok(("images".to_string(), 25)));
        assert!(parse_param("images").is_err());
        assert!(parse_param("images=many").is_err());
    }

    #[test]
    fn generate_flags_parse() {
        let args = CliArgs::try_parse_from([
            "wfsynth", "generate", "-a", "ligo", "-p", "segments=8", "--ccr", "1.5", "--seed",
            "7",
        ])
        .unwrap();
        let Command::Generate(generate) = args.command else {
            panic!("expected generate");
        };
        assert_eq!(generate.archetype, Some(Archetype::Ligo));
        assert_eq!(generate.params, vec![("segments".to_string(), 8)]);
        assert_eq!(generate.ccr, Some(1.5));
        assert_eq!(generate.seed, Some(7));
    }
}
