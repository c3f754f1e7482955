//! Configurable noise generator for simulation
//!
//! Provides Gaussian noise generation with deterministic seeding support.

use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use rand_distr::StandardNormal;

/// Noise generator with configurable seed for reproducibility
#[derive(Debug, Clone)]
pub struct NoiseGenerator {
    rng: SmallRng,
}

impl NoiseGenerator {
    /// Create a new noise generator
    ///
    /// If seed is 0, uses random entropy for non-deterministic behavior.
    /// Otherwise, uses the provided seed for reproducible results.
    pub fn new(seed: u64) -> Self {
        let rng = if seed == 0 {
            SmallRng::from_os_rng()
        } else {
            SmallRng::seed_from_u64(seed)
        };
        Self { rng }
    }

    /// Derive an independent generator from this one.
    ///
    /// Used to hand each parallel worker its own stream while keeping the
    /// whole step reproducible from the parent seed.
    pub fn fork(&mut self) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(self.rng.next_u64()),
        }
    }

    /// Generate Gaussian noise with given standard deviation
    #[inline]
    pub fn gaussian(&mut self, stddev: f64) -> f64 {
        if stddev == 0.0 {
            return 0.0;
        }
        let n: f64 = self.rng.sample(StandardNormal);
        n * stddev
    }

    /// Generate uniform random in [0, 1)
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Generate uniform random in [low, high)
    ///
    /// Returns `low` when the range is empty.
    #[inline]
    pub fn uniform_range(&mut self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        self.rng.random_range(low..high)
    }
}
