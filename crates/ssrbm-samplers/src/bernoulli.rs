//! Independent Bernoulli draws for spike units.

use crate::source::RandomSource;
use ssrbm_core::error::{RbmError, Result};

/// `out[k] ~ Bernoulli(probs[k])`, one uniform draw per unit.
pub fn sample_bernoulli<R: RandomSource + ?Sized>(
    rng: &mut R,
    probs: &[f64],
    out: &mut [f64],
) -> Result<()> {
    RbmError::check_len("bernoulli output", probs.len(), out.len())?;
    for (o, &p) in out.iter_mut().zip(probs) {
        *o = rng.bernoulli(p);
    }
    Ok(())
}
