// src/topology/params.rs

//! Size parameters for each archetype and their accepted ranges.

use std::fmt;

use crate::errors::{Result, WfsynthError};
use crate::types::Archetype;

/// Accepted range and default of one size parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamBound {
    pub name: &'static str,
    pub min: usize,
    pub max: usize,
    pub default: usize,
}

impl ParamBound {
    pub const fn new(name: &'static str, min: usize, max: usize, default: usize) -> Self {
        Self {
            name,
            min,
            max,
            default,
        }
    }

    pub fn contains(&self, value: usize) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn range_label(&self) -> String {
        format!("[{}, {}]", self.min, self.max)
    }

    pub fn check(&self, value: usize) -> Result<()> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(WfsynthError::out_of_range(self.name, value, self.range_label()))
        }
    }
}

const MONTAGE_BOUNDS: &[ParamBound] = &[ParamBound::new("images", 1, 200, 10)];

const CYBERSHAKE_BOUNDS: &[ParamBound] = &[
    ParamBound::new("sites", 1, 100, 5),
    ParamBound::new("sgt_variations", 1, 10, 2),
    ParamBound::new("psa_filters", 1, 10, 3),
];

const LIGO_BOUNDS: &[ParamBound] = &[
    ParamBound::new("segments", 1, 1000, 20),
    ParamBound::new("templates", 1, 50, 10),
];

const EPIGENOMICS_BOUNDS: &[ParamBound] = &[
    ParamBound::new("samples", 1, 100, 10),
    ParamBound::new("analyses", 1, 5, 3),
];

/// The parameters an archetype accepts, in declaration order.
pub fn bounds(archetype: Archetype) -> &'static [ParamBound] {
    match archetype {
        Archetype::Montage => MONTAGE_BOUNDS,
        Archetype::CyberShake => CYBERSHAKE_BOUNDS,
        Archetype::Ligo => LIGO_BOUNDS,
        Archetype::Epigenomics => EPIGENOMICS_BOUNDS,
    }
}

/// Size parameters of one workflow, tagged by archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeParams {
    Montage {
        images: usize,
    },
    CyberShake {
        sites: usize,
        sgt_variations: usize,
        psa_filters: usize,
    },
    Ligo {
        segments: usize,
        templates: usize,
    },
    Epigenomics {
        samples: usize,
        analyses: usize,
    },
}

impl SizeParams {
    pub fn defaults(archetype: Archetype) -> Self {
        let d = |name: &str| {
            bounds(archetype)
                .iter()
                .find(|b| b.name == name)
                .map(|b| b.default)
                .unwrap_or(1)
        };
        match archetype {
            Archetype::Montage => SizeParams::Montage {
                images: d("images"),
            },
            Archetype::CyberShake => SizeParams::CyberShake {
                sites: d("sites"),
                sgt_variations: d("sgt_variations"),
                psa_filters: d("psa_filters"),
            },
            Archetype::Ligo => SizeParams::Ligo {
                segments: d("segments"),
                templates: d("templates"),
            },
            Archetype::Epigenomics => SizeParams::Epigenomics {
                samples: d("samples"),
                analyses: d("analyses"),
            },
        }
    }

    /// Start from the defaults and override with whatever `lookup` supplies.
    pub fn from_lookup(archetype: Archetype, lookup: impl Fn(&str) -> Option<usize>) -> Self {
        let mut params = Self::defaults(archetype);
        for bound in bounds(archetype) {
            if let Some(value) = lookup(bound.name) {
                params.set(bound.name, value);
            }
        }
        params
    }

    pub fn archetype(&self) -> Archetype {
        match self {
            SizeParams::Montage { .. } => Archetype::Montage,
            SizeParams::CyberShake { .. } => Archetype::CyberShake,
            SizeParams::Ligo { .. } => Archetype::Ligo,
            SizeParams::Epigenomics { .. } => Archetype::Epigenomics,
        }
    }

    /// Value of a named parameter, if this archetype has it.
    pub fn get(&self, name: &str) -> Option<usize> {
        match (*self, name) {
            (SizeParams::Montage { images }, "images") => Some(images),
            (SizeParams::CyberShake { sites, .. }, "sites") => Some(sites),
            (SizeParams::CyberShake { sgt_variations, .. }, "sgt_variations") => {
                Some(sgt_variations)
            }
            (SizeParams::CyberShake { psa_filters, .. }, "psa_filters") => Some(psa_filters),
            (SizeParams::Ligo { segments, .. }, "segments") => Some(segments),
            (SizeParams::Ligo { templates, .. }, "templates") => Some(templates),
            (SizeParams::Epigenomics { samples, .. }, "samples") => Some(samples),
            (SizeParams::Epigenomics { analyses, .. }, "analyses") => Some(analyses),
            _ => None,
        }
    }

    fn set(&mut self, name: &str, value: usize) {
        match (self, name) {
            (SizeParams::Montage { images }, "images") => *images = value,
            (SizeParams::CyberShake { sites, .. }, "sites") => *sites = value,
            (SizeParams::CyberShake { sgt_variations, .. }, "sgt_variations") => {
                *sgt_variations = value
            }
            (SizeParams::CyberShake { psa_filters, .. }, "psa_filters") => *psa_filters = value,
            (SizeParams::Ligo { segments, .. }, "segments") => *segments = value,
            (SizeParams::Ligo { templates, .. }, "templates") => *templates = value,
            (SizeParams::Epigenomics { samples, .. }, "samples") => *samples = value,
            (SizeParams::Epigenomics { analyses, .. }, "analyses") => *analyses = value,
            _ => {}
        }
    }

    /// `(name, value)` pairs in declaration order.
    pub fn entries(&self) -> Vec<(&'static str, usize)> {
        bounds(self.archetype())
            .iter()
            .filter_map(|b| self.get(b.name).map(|v| (b.name, v)))
            .collect()
    }

    /// Check every parameter against its accepted range.
    ///
    /// Fails on the first offending parameter, before anything is built.
    pub fn validate(&self) -> Result<()> {
        for bound in bounds(self.archetype()) {
            if let Some(value) = self.get(bound.name) {
                bound.check(value)?;
            }
        }
        Ok(())
    }

    /// Closed-form task count of the workflow these parameters describe.
    pub fn expected_task_count(&self) -> usize {
        match *self {
            SizeParams::Montage { images } => 5 * images + 2,
            SizeParams::CyberShake {
                sites,
                sgt_variations,
                psa_filters,
            } => 1 + sites * (1 + sgt_variations + psa_filters) + sites + 1,
            SizeParams::Ligo {
                segments,
                templates,
            } => {
                let coincidence = segments.div_ceil(4);
                let injection = segments.div_ceil(10).max(1);
                segments + 1 + segments * templates + coincidence + 1 + injection + 1 + 1
            }
            SizeParams::Epigenomics { samples, analyses } => {
                let reads = 2 * samples;
                let per_sample_chain = 4 * samples;
                let peaks = samples * analyses;
                let annotations = samples;
                let comparisons = (samples / 2).max(1);
                let visualizations = samples + comparisons;
                reads + per_sample_chain + peaks + annotations + comparisons + visualizations + 1
            }
        }
    }
}

impl fmt::Display for SizeParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .entries()
            .into_iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        write!(f, "{} ({})", self.archetype(), parts.join(", "))
    }
}
