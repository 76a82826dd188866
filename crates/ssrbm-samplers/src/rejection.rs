//! Bounded rejection sampling inside an L2 ball.
//!
//! The visible Gaussian of a spike-and-slab RBM is only a proper density on a
//! bounded region, so visible samples are redrawn until their norm falls
//! strictly below the configured radius. After `max_trials` failures the last
//! draw is kept and a warning is logged; training carries on with a slightly
//! biased sample instead of aborting.

use crate::gaussian::{l2_norm, sample_gaussian};
use crate::source::RandomSource;
use ssrbm_core::error::{RbmError, Result};

/// Acceptance region and retry budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusRejection {
    pub radius: f64,
    pub max_trials: usize,
}

/// What happened during one rejection loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RejectionOutcome {
    /// Draws made, in `1..=max_trials`.
    pub attempts: usize,
    /// `false` when the budget ran out and `out` holds an out-of-radius draw.
    pub accepted: bool,
    /// Norm of the returned sample.
    pub norm: f64,
}

impl RadiusRejection {
    pub fn new(radius: f64, max_trials: usize) -> Result<Self> {
        RbmError::check_positive("radius", radius)?;
        if max_trials == 0 {
            return Err(RbmError::NonPositive {
                name: "max_trials",
                value: 0.0,
            });
        }
        Ok(Self { radius, max_trials })
    }

    /// Draw `out ~ N(mean, variance·I)` until `‖out‖ < radius` or the budget is spent.
    pub fn sample<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        mean: &[f64],
        variance: f64,
        out: &mut [f64],
    ) -> Result<RejectionOutcome> {
        let mut norm = f64::INFINITY;
        for attempt in 1..=self.max_trials {
            sample_gaussian(rng, mean, variance, out)?;
            norm = l2_norm(out);
            if norm < self.radius {
                log::trace!("visible sample accepted after {attempt} attempt(s), norm {norm:.4}");
                return Ok(RejectionOutcome {
                    attempts: attempt,
                    accepted: true,
                    norm,
                });
            }
        }

        log::warn!(
            "visible sample still outside radius {} after {} attempts (norm {:.4}); keeping last draw",
            self.radius,
            self.max_trials,
            norm
        );
        Ok(RejectionOutcome {
            attempts: self.max_trials,
            accepted: false,
            norm,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SeededSource;

    #[test]
    fn test_accepts_inside_radius() {
        let rejection = RadiusRejection::new(10.0, 10).unwrap();
        let mut rng = SeededSource::from_seed(1);
        let mut out = [0.0; 3];
        let outcome = rejection
            .sample(&mut rng, &[0.0, 0.0, 0.0], 0.01, &mut out)
            .unwrap();
        assert!(outcome.accepted);
        assert_eq!(outcome.attempts, 1);
        assert!(outcome.norm < 10.0);
        assert!((outcome.norm - l2_norm(&out)).abs() < 1e-15);
    }

    #[test]
    fn test_exhausts_budget_far_from_origin() {
        let rejection = RadiusRejection::new(1.0, 4).unwrap();
        let mut rng = SeededSource::from_seed(2);
        let mut out = [0.0; 2];
        let outcome = rejection
            .sample(&mut rng, &[100.0, 100.0], 0.01, &mut out)
            .unwrap();
        assert!(!outcome.accepted);
        assert_eq!(outcome.attempts, 4);
        assert!(outcome.norm >= 1.0);
        // Last draw is returned as-is
        assert!(out[0] > 90.0 && out[1] > 90.0);
    }

    #[test]
    fn test_invalid_construction() {
        assert!(RadiusRejection::new(0.0, 10).is_err());
        assert!(RadiusRejection::new(1.0, 0).is_err());
    }
}
