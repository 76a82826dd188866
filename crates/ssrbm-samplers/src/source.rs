//! The random-number capability consumed by every stochastic operation.
//!
//! Conditionals never reach for a global generator: callers pass a
//! [`RandomSource`], which makes runs reproducible per seed and lets tests
//! substitute scripted draws.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::rng::RngKey;

/// Source of uniform and standard-normal draws.
pub trait RandomSource {
    /// A draw from `U[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// A draw from `N(0, 1)`.
    fn standard_normal(&mut self) -> f64;

    /// `1.0` with probability `p`, otherwise `0.0`.
    fn bernoulli(&mut self, p: f64) -> f64 {
        if self.uniform() < p {
            1.0
        } else {
            0.0
        }
    }

    /// A draw from `N(mean, variance)`.
    fn normal(&mut self, mean: f64, variance: f64) -> f64 {
        mean + variance.sqrt() * self.standard_normal()
    }
}

/// ChaCha8-backed [`RandomSource`].
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: ChaCha8Rng,
}

impl SeededSource {
    pub fn from_key(key: RngKey) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(key.seed()),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::from_key(RngKey::new(seed))
    }
}

impl RandomSource for SeededSource {
    fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn standard_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.rng)
    }
}
