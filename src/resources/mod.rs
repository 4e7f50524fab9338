// src/resources/mod.rs

//! VM pool and network bandwidth model.
//!
//! Capacities are drawn first, in VM order, then one bandwidth value per
//! unordered VM pair (row-major, `i < j`) which is mirrored into both
//! directions.

pub mod tiers;

use tracing::info;

use crate::rng::RandomSource;
use crate::types::Archetype;

pub use tiers::{tiers, Tier};

#[derive(Debug, Clone, PartialEq)]
pub struct Vm {
    /// 1-based.
    pub id: usize,
    pub tier: &'static str,
    /// MIPS.
    pub processing_capacity: f64,
    pub cost: f64,
}

/// Square, symmetric matrix of link bandwidths with a zero diagonal.
#[derive(Debug, Clone, PartialEq)]
pub struct BandwidthMatrix {
    n: usize,
    values: Vec<f64>,
}

impl BandwidthMatrix {
    fn zeros(n: usize) -> Self {
        Self {
            n,
            values: vec![0.0; n * n],
        }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Bandwidth between the VMs at 0-based positions `i` and `j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.n + j]
    }

    fn set_pair(&mut self, i: usize, j: usize, value: f64) {
        self.values[i * self.n + j] = value;
        self.values[j * self.n + i] = value;
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks(self.n.max(1)).take(self.n)
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| (0..self.n).all(|j| self.get(i, j) == self.get(j, i)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceModel {
    pub vms: Vec<Vm>,
    pub bandwidth: BandwidthMatrix,
}

impl ResourceModel {
    pub fn vm_count(&self) -> usize {
        self.vms.len()
    }

    pub fn vms_of_tier<'a>(&'a self, tier: &'a str) -> impl Iterator<Item = &'a Vm> + 'a {
        self.vms.iter().filter(move |vm| vm.tier == tier)
    }
}

/// Build the VM pool and bandwidth matrix sized for `task_count` tasks.
pub fn build(archetype: Archetype, task_count: usize, rng: &mut dyn RandomSource) -> ResourceModel {
    let table = tiers(archetype);

    // (tier index, vm) in tier order
    let mut pool: Vec<(usize, Vm)> = Vec::new();
    for (index, tier) in table.iter().enumerate() {
        for _ in 0..tier.vm_count(task_count) {
            let (low, high) = tier.capacity;
            let id = pool.len() + 1;
            pool.push((
                index,
                Vm {
                    id,
                    tier: tier.name,
                    processing_capacity: rng.uniform(low, high),
                    cost: tier.cost,
                },
            ));
        }
    }

    let n = pool.len();
    let mut bandwidth = BandwidthMatrix::zeros(n);
    for i in 0..n {
        for j in (i + 1)..n {
            let (low, high) = tiers::link_range(table, pool[i].0, pool[j].0);
            bandwidth.set_pair(i, j, rng.uniform(low, high));
        }
    }

    info!(%archetype, vms = n, tiers = table.len(), "resource model built");

    ResourceModel {
        vms: pool.into_iter().map(|(_, vm)| vm).collect(),
        bandwidth,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededRandom;

    #[test]
    fn tiers_are_in_ascending_bandwidth_order() {
        for archetype in Archetype::ALL {
            for pair in tiers(archetype).windows(2) {
                assert!(pair[0].bandwidth.0 <= pair[1].bandwidth.0, "{archetype}");
            }
        }
    }

    #[test]
    fn small_workflows_still_get_one_vm_per_tier() {
        let mut rng = SeededRandom::new(1);
        let model = build(Archetype::Ligo, 3, &mut rng);
        assert_eq!(model.vm_count(), 6);
        assert_eq!(model.bandwidth.len(), 6);
        assert!(model.bandwidth.is_symmetric());
    }

    #[test]
    fn diagonal_is_zero() {
        let mut rng = SeededRandom::new(9);
        let model = build(Archetype::Montage, 52, &mut rng);
        for i in 0..model.bandwidth.len() {
            assert_eq!(model.bandwidth.get(i, i), 0.0);
        }
    }
}
