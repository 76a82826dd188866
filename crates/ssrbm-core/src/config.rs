//! Construction-time configuration for a spike-and-slab RBM.
//!
//! A [`SpikeSlabConfig`] can be built in code with the `with_*` setters or
//! loaded from TOML:
//!
//! ```toml
//! visible_size = 16
//! hidden_size = 8
//! pool_size = 2
//! slab_penalty = 8.0
//! radius = 4.0
//! batch_size = 10
//! max_trials = 10
//! initial_visible_penalty = 5.0
//! ```
//!
//! ```
//! use ssrbm_core::config::SpikeSlabConfig;
//!
//! let config = SpikeSlabConfig::new(16, 8, 2).with_radius(4.0).with_max_trials(20);
//! assert!(config.validate().is_ok());
//! assert_eq!(config.parameter_len(), 16 * 2 * 8 + 8 + 1);
//! ```

use crate::error::{RbmError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default slab precision.
pub const DEFAULT_SLAB_PENALTY: f64 = 8.0;
/// Default L2 acceptance radius for visible samples.
pub const DEFAULT_RADIUS: f64 = 1.0;
/// Default bound on visible-sample rejection attempts.
pub const DEFAULT_MAX_TRIALS: usize = 10;

fn default_pool_size() -> usize {
    2
}

fn default_slab_penalty() -> f64 {
    DEFAULT_SLAB_PENALTY
}

fn default_radius() -> f64 {
    DEFAULT_RADIUS
}

fn default_batch_size() -> usize {
    1
}

fn default_max_trials() -> usize {
    DEFAULT_MAX_TRIALS
}

/// Dimensions and fixed hyperparameters of a spike-and-slab RBM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpikeSlabConfig {
    /// Number of visible units (V).
    pub visible_size: usize,
    /// Number of hidden spike units (H).
    pub hidden_size: usize,
    /// Slab factors per hidden unit (P).
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
    /// Precision of the slab Gaussian. Not learned.
    #[serde(default = "default_slab_penalty")]
    pub slab_penalty: f64,
    /// Visible samples are accepted once their L2 norm is strictly below this.
    #[serde(default = "default_radius")]
    pub radius: f64,
    /// Columns of the negative-samples buffer.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Upper bound on visible-sample rejection attempts per call.
    #[serde(default = "default_max_trials")]
    pub max_trials: usize,
    /// Written over the visible penalty after the initializer has run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_visible_penalty: Option<f64>,
}

impl SpikeSlabConfig {
    pub const fn new(visible_size: usize, hidden_size: usize, pool_size: usize) -> Self {
        Self {
            visible_size,
            hidden_size,
            pool_size,
            slab_penalty: DEFAULT_SLAB_PENALTY,
            radius: DEFAULT_RADIUS,
            batch_size: 1,
            max_trials: DEFAULT_MAX_TRIALS,
            initial_visible_penalty: None,
        }
    }

    pub const fn with_slab_penalty(mut self, slab_penalty: f64) -> Self {
        self.slab_penalty = slab_penalty;
        self
    }

    pub const fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub const fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub const fn with_max_trials(mut self, max_trials: usize) -> Self {
        self.max_trials = max_trials;
        self
    }

    pub const fn with_initial_visible_penalty(mut self, visible_penalty: f64) -> Self {
        self.initial_visible_penalty = Some(visible_penalty);
        self
    }

    /// Reject zero sizes, non-positive precisions and a zero retry bound.
    pub fn validate(&self) -> Result<()> {
        RbmError::check_dimension("visible_size", self.visible_size)?;
        RbmError::check_dimension("hidden_size", self.hidden_size)?;
        RbmError::check_dimension("pool_size", self.pool_size)?;
        RbmError::check_dimension("batch_size", self.batch_size)?;
        RbmError::check_positive("slab_penalty", self.slab_penalty)?;
        RbmError::check_positive("radius", self.radius)?;
        if self.max_trials == 0 {
            return Err(RbmError::NonPositive {
                name: "max_trials",
                value: 0.0,
            });
        }
        if let Some(alpha) = self.initial_visible_penalty {
            RbmError::check_positive("initial_visible_penalty", alpha)?;
        }
        Ok(())
    }

    /// Length of the flat parameter buffer: `V·P·H + H + 1`.
    pub fn parameter_len(&self) -> usize {
        self.visible_size * self.pool_size * self.hidden_size + self.hidden_size + 1
    }

    /// Length of a hidden state vector: `H + P·H`.
    pub fn hidden_len(&self) -> usize {
        self.hidden_size + self.pool_size * self.hidden_size
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: SpikeSlabConfig =
            toml::from_str(contents).map_err(|e| RbmError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| RbmError::ConfigIo {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| RbmError::ConfigParse(e.to_string()))
    }
}
