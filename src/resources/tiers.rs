// src/resources/tiers.rs

use crate::types::Archetype;

/// One class of virtual machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    pub name: &'static str,
    /// Processing capacity range (MIPS).
    pub capacity: (f64, f64),
    pub cost: f64,
    /// One VM of this tier per `divisor` tasks, at least one.
    pub divisor: usize,
    /// Bandwidth range between two VMs of this tier.
    pub bandwidth: (f64, f64),
}

impl Tier {
    const fn new(
        name: &'static str,
        capacity: (f64, f64),
        cost: f64,
        divisor: usize,
        bandwidth: (f64, f64),
    ) -> Self {
        Self {
            name,
            capacity,
            cost,
            divisor,
            bandwidth,
        }
    }

    pub fn vm_count(&self, task_count: usize) -> usize {
        (task_count / self.divisor.max(1)).max(1)
    }
}

// Tiers are listed in ascending order of their intra-tier bandwidth.

const MONTAGE: &[Tier] = &[
    Tier::new("small", (13.5, 16.5), 1.5, 18, (135.0, 165.0)),
    Tier::new("medium", (27.0, 33.0), 3.0, 12, (285.0, 315.0)),
    Tier::new("large", (54.0, 66.0), 6.0, 8, (585.0, 615.0)),
    Tier::new("xlarge", (108.0, 132.0), 12.0, 6, (1185.0, 1215.0)),
];

const CYBERSHAKE: &[Tier] = &[
    Tier::new("small", (9.0, 11.0), 1.0, 20, (40.0, 60.0)),
    Tier::new("medium", (18.0, 22.0), 2.0, 15, (90.0, 110.0)),
    Tier::new("large", (36.0, 44.0), 4.0, 10, (190.0, 210.0)),
    Tier::new("xlarge", (72.0, 88.0), 8.0, 8, (390.0, 410.0)),
];

const LIGO: &[Tier] = &[
    Tier::new("cpu_intensive", (13.5, 16.5), 0.5, 60, (200.0, 400.0)),
    Tier::new("cpu_medium", (27.0, 33.0), 0.8, 40, (300.0, 500.0)),
    Tier::new("cpu_high", (54.0, 66.0), 1.2, 30, (400.0, 600.0)),
    Tier::new("cpu_ultra", (108.0, 132.0), 2.0, 20, (600.0, 1000.0)),
    Tier::new("gpu_standard", (180.0, 220.0), 3.0, 80, (800.0, 1000.0)),
    Tier::new("gpu_high", (360.0, 440.0), 5.0, 120, (1000.0, 1200.0)),
];

const EPIGENOMICS: &[Tier] = &[
    Tier::new("bio_standard", (18.0, 22.0), 0.6, 20, (200.0, 350.0)),
    Tier::new("bio_medium", (36.0, 44.0), 1.0, 15, (250.0, 400.0)),
    Tier::new("bio_high", (72.0, 88.0), 1.5, 12, (300.0, 500.0)),
    Tier::new("bio_ultra", (144.0, 176.0), 2.5, 15, (500.0, 900.0)),
    Tier::new("mem_intensive", (90.0, 110.0), 2.0, 30, (700.0, 900.0)),
    Tier::new("mem_ultra", (180.0, 220.0), 4.0, 60, (900.0, 1100.0)),
];

pub fn tiers(archetype: Archetype) -> &'static [Tier] {
    match archetype {
        Archetype::Montage => MONTAGE,
        Archetype::CyberShake => CYBERSHAKE,
        Archetype::Ligo => LIGO,
        Archetype::Epigenomics => EPIGENOMICS,
    }
}

/// Scale applied to the lower tier's range for links between tiers.
pub const CROSS_TIER_FACTOR: f64 = 0.5;

/// Range a link between tier `a` and tier `b` (indices) is drawn from.
pub fn link_range(tiers: &[Tier], a: usize, b: usize) -> (f64, f64) {
    if a == b {
        return tiers[a].bandwidth;
    }
    let (low, high) = tiers[a.min(b)].bandwidth;
    (low * CROSS_TIER_FACTOR, high * CROSS_TIER_FACTOR)
}
