//! Error taxonomy shared by every ssrbm crate.
//!
//! Configuration errors (zero dimensions, non-positive precisions, use before
//! `reset`) are caller bugs and abort the operation. Numerical degeneracy is
//! reported separately so a trainer can tell a bad parameter update from a bad
//! call. A rejection loop that runs out of trials is *not* an error; see
//! `ssrbm_samplers::rejection`.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, RbmError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RbmError {
    /// A size in the configuration is zero.
    #[error("{name} must be greater than zero")]
    ZeroDimension { name: &'static str },

    /// A precision, radius or retry bound that must be strictly positive is not.
    #[error("{name} must be strictly positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    /// The parameter store has not been allocated yet.
    #[error("model parameters are not initialized; call reset() first")]
    Uninitialized,

    /// A caller-supplied buffer has the wrong length.
    #[error("{what}: expected length {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A conditional mean or quadratic form evaluated to NaN or infinity.
    #[error("numerical instability in {what}: {detail}")]
    NumericalInstability { what: &'static str, detail: String },

    #[error("failed to read config file {path}: {message}")]
    ConfigIo { path: PathBuf, message: String },

    #[error("invalid config: {0}")]
    ConfigParse(String),
}

impl RbmError {
    /// Shorthand for the length check every buffer-taking operation performs.
    pub fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(RbmError::ShapeMismatch {
                what,
                expected,
                actual,
            })
        }
    }

    /// Ensure `value` is finite and strictly positive.
    pub fn check_positive(name: &'static str, value: f64) -> Result<()> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(RbmError::NonPositive { name, value })
        }
    }

    /// Returns `Ok(())` when the dimension is non-zero.
    pub fn check_dimension(name: &'static str, value: usize) -> Result<()> {
        if value == 0 {
            Err(RbmError::ZeroDimension { name })
        } else {
            Ok(())
        }
    }
}
