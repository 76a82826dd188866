//! Independent Gaussian draws sharing one variance.
//!
//! Used for slab units (variance `1/slab_penalty`) and visible units
//! (variance `1/α`).

use crate::source::RandomSource;
use ssrbm_core::error::{RbmError, Result};

/// `out[k] ~ N(means[k], variance)`.
pub fn sample_gaussian<R: RandomSource + ?Sized>(
    rng: &mut R,
    means: &[f64],
    variance: f64,
    out: &mut [f64],
) -> Result<()> {
    RbmError::check_len("gaussian output", means.len(), out.len())?;
    RbmError::check_positive("variance", variance)?;
    for (o, &m) in out.iter_mut().zip(means) {
        *o = rng.normal(m, variance);
    }
    Ok(())
}

/// Euclidean norm of `x`.
pub fn l2_norm(x: &[f64]) -> f64 {
    x.iter().map(|v| v * v).sum::<f64>().sqrt()
}
