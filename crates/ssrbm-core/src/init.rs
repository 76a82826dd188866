//! Initialization rules for the flat parameter buffer.
//!
//! A rule receives the whole buffer (weights, spike bias and visible penalty)
//! right after it has been zeroed and must write every element. Random rules
//! re-seed on every call, so resetting a model twice with the same rule gives
//! bit-identical parameters.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal};

/// Strategy that fills a freshly zeroed parameter buffer.
pub trait InitializationRule {
    fn initialize(&self, parameters: &mut [f64]);
}

/// Every element set to the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantInit(pub f64);

impl InitializationRule for ConstantInit {
    fn initialize(&self, parameters: &mut [f64]) {
        parameters.fill(self.0);
    }
}

/// Independent draws from `U[lower, upper)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformInit {
    pub lower: f64,
    pub upper: f64,
    pub seed: u64,
}

impl UniformInit {
    pub fn new(lower: f64, upper: f64, seed: u64) -> Self {
        Self { lower, upper, seed }
    }
}

impl InitializationRule for UniformInit {
    fn initialize(&self, parameters: &mut [f64]) {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let width = self.upper - self.lower;
        for p in parameters.iter_mut() {
            *p = self.lower + width * rng.gen::<f64>();
        }
    }
}

/// Independent draws from `N(mean, variance)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianInit {
    pub mean: f64,
    pub variance: f64,
    pub seed: u64,
}

impl GaussianInit {
    pub fn new(mean: f64, variance: f64, seed: u64) -> Self {
        Self {
            mean,
            variance,
            seed,
        }
    }
}

impl InitializationRule for GaussianInit {
    fn initialize(&self, parameters: &mut [f64]) {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let std_dev = self.variance.max(0.0).sqrt();
        for p in parameters.iter_mut() {
            let z: f64 = StandardNormal.sample(&mut rng);
            *p = self.mean + std_dev * z;
        }
    }
}
