// src/rng.rs

//! Injected randomness for the generators.
//!
//! Every builder that needs random draws takes a `&mut dyn RandomSource`.
//! There is no process-wide generator: the same seed always yields the same
//! sequence of draws, so a `(archetype, parameters, seed)` triple fully
//! determines the generated artifacts.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The single capability the generators need from a random source.
pub trait RandomSource {
    /// Draw a value from the half-open interval `[low, high)`.
    ///
    /// When `low == high` the bound itself is returned.
    fn uniform(&mut self, low: f64, high: f64) -> f64;
}

/// Production random source backed by `ChaCha8Rng`.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seed chosen from OS entropy, for runs where the caller gave none.
    ///
    /// The seed is still recorded so the run can be replayed.
    pub fn from_entropy_seed() -> Self {
        Self::new(rand::random::<u64>())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..high)
    }
}
