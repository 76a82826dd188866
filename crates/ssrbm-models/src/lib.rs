//! # ssrbm-models
//!
//! The spike-and-slab restricted Boltzmann machine (ssRBM) layer.
//!
//! ## Conditionals
//!
//! [`conditional`] holds the closed-form conditionals as free functions over a
//! [`ParamsView`](ssrbm_core::ParamsView): spike mean, slab mean and visible
//! mean, plus the Bernoulli / Gaussian draws built on them.
//!
//! ## Free energy and gradients
//!
//! [`evaluator`] computes the free energy of a visible vector and writes the
//! per-sample sufficient statistics in the parameter layout.
//!
//! ## The layer
//!
//! [`SpikeSlabRbm`] ties configuration, initialization, parameter storage and
//! the rejection-sampled visible conditional together. [`RbmVariant`] is the
//! object-safe interface a host trainer drives.
//!
//! ```
//! use ssrbm_core::{GaussianInit, SpikeSlabConfig};
//! use ssrbm_models::{RbmVariant, SpikeSlabRbm};
//! use ssrbm_samplers::RngKey;
//!
//! let config = SpikeSlabConfig::new(4, 3, 2)
//!     .with_radius(10.0)
//!     .with_initial_visible_penalty(5.0);
//! let mut rbm: Box<dyn RbmVariant> =
//!     Box::new(SpikeSlabRbm::new(config, GaussianInit::new(0.0, 0.01, 7))?);
//! rbm.reset()?;
//!
//! let mut rng = RngKey::new(0).source();
//! let visible = [0.1, -0.2, 0.0, 0.3];
//! let mut hidden = vec![0.0; rbm.hidden_len()];
//! rbm.sample_hidden(&visible, &mut hidden, &mut rng)?;
//!
//! let mut sample = [0.0; 4];
//! let outcome = rbm.sample_visible(&hidden, &mut sample, &mut rng)?;
//! assert!(outcome.attempts >= 1);
//! assert!(rbm.free_energy(&sample)?.is_finite());
//! # Ok::<(), ssrbm_core::RbmError>(())
//! ```

pub mod conditional;
pub mod evaluator;
pub mod hidden;
pub mod spike_slab;
pub mod variant;

pub use evaluator::{free_energy, write_gradient};
pub use hidden::HiddenLayout;
pub use spike_slab::SpikeSlabRbm;
pub use variant::RbmVariant;
