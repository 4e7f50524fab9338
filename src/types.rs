// src/types.rs

use std::fmt;

use clap::ValueEnum;
use serde::Deserialize;

/// The scientific pipeline a generated workflow imitates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    Montage,
    #[serde(alias = "cyber_shake")]
    #[value(name = "cybershake", alias = "cyber-shake")]
    CyberShake,
    Ligo,
    Epigenomics,
}

impl Archetype {
    pub const ALL: [Archetype; 4] = [
        Archetype::Montage,
        Archetype::CyberShake,
        Archetype::Ligo,
        Archetype::Epigenomics,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Archetype::Montage => "montage",
            Archetype::CyberShake => "cybershake",
            Archetype::Ligo => "ligo",
            Archetype::Epigenomics => "epigenomics",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How task sizes and edge volumes are assigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CostMode {
    /// Static per-stage duration table, no randomness.
    #[default]
    Fixed,
    /// Random sizes; edge volumes centred on `avg_size * ccr`.
    Ccr,
}

/// Which length the critical path is measured in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CriticalPathMetric {
    /// Number of edges on the path.
    #[default]
    Edges,
    /// Sum of task sizes on the path.
    Size,
}
