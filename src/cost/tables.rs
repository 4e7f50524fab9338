// src/cost/tables.rs

//! Per-archetype cost constants.

use crate::types::Archetype;

const MONTAGE_DURATIONS: &[(&str, f64)] = &[
    ("mProject", 8.0),
    ("mDiffFit", 3.0),
    ("mConcatFit", 2.0),
    ("mBgModel", 4.0),
    ("mBackground", 6.0),
    ("mAdd", 10.0),
    ("mJPEG", 3.0),
];

const CYBERSHAKE_DURATIONS: &[(&str, f64)] = &[
    ("PreCVM", 2.0),
    ("GenCVM", 3.0),
    ("GenSGT", 5.0),
    ("PSA", 4.0),
    ("ZipPSA", 2.0),
    ("PostProcess", 3.0),
];

const LIGO_DURATIONS: &[(&str, f64)] = &[
    ("DataFind", 2.0),
    ("TemplateBank", 15.0),
    ("Inspiral", 8.0),
    ("Coincidence", 12.0),
    ("TrigBank", 20.0),
    ("Injection", 5.0),
    ("Thinca", 25.0),
    ("PostProcess", 10.0),
];

const EPIGENOMICS_DURATIONS: &[(&str, f64)] = &[
    ("FastQC", 3.0),
    ("Trimming", 5.0),
    ("Alignment", 15.0),
    ("Sorting", 8.0),
    ("Deduplication", 6.0),
    ("PeakCalling", 12.0),
    ("Annotation", 10.0),
    ("DifferentialAnalysis", 18.0),
    ("Visualization", 7.0),
    ("FinalReport", 25.0),
];

/// Stage durations used by the fixed-duration cost model.
pub fn durations(archetype: Archetype) -> &'static [(&'static str, f64)] {
    match archetype {
        Archetype::Montage => MONTAGE_DURATIONS,
        Archetype::CyberShake => CYBERSHAKE_DURATIONS,
        Archetype::Ligo => LIGO_DURATIONS,
        Archetype::Epigenomics => EPIGENOMICS_DURATIONS,
    }
}

pub fn fixed_duration(archetype: Archetype, kind: &str) -> Option<f64> {
    durations(archetype)
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, d)| *d)
}

/// Range task sizes (MI) are drawn from in CCR mode.
pub fn size_range(archetype: Archetype) -> (f64, f64) {
    match archetype {
        Archetype::Montage => (500.0, 700.0),
        Archetype::CyberShake => (400.0, 600.0),
        Archetype::Ligo => (550.0, 750.0),
        Archetype::Epigenomics => (450.0, 650.0),
    }
}
