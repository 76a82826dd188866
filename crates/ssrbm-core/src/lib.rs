//! # ssrbm-core
//!
//! Storage and numeric primitives for spike-and-slab restricted Boltzmann
//! machines (ssRBMs).
//!
//! - [`SpikeSlabConfig`]: dimensions `V`, `H`, `P` and fixed hyperparameters
//! - [`ParamLayout`] / [`Region`]: offsets of the weight tensor, spike bias and
//!   visible penalty inside one flat buffer of length `V·P·H + H + 1`
//! - [`ParamsView`] / [`ParamsViewMut`]: typed views over any buffer with that layout
//! - [`ParameterStore`] / [`GradientBuffers`]: the owned parameter and gradient buffers
//! - [`InitializationRule`]: pluggable parameter initialization
//! - [`activation`]: `logistic` and `softplus`
//! - [`RbmError`]: the error taxonomy shared by every ssrbm crate
//!
//! ```
//! use ssrbm_core::{ConstantInit, ParamLayout, ParameterStore};
//!
//! let layout = ParamLayout::new(4, 2, 3)?;
//! let store = ParameterStore::initialized(layout, 1, &ConstantInit(0.1))?;
//! assert_eq!(store.parameters().len(), 4 * 2 * 3 + 3 + 1);
//! assert_eq!(store.params().spike_bias().len(), 3);
//! # Ok::<(), ssrbm_core::RbmError>(())
//! ```

pub mod activation;
pub mod config;
pub mod error;
pub mod init;
pub mod layout;
pub mod store;
pub mod view;

pub use activation::{logistic, softplus};
pub use config::*;
pub use error::*;
pub use init::*;
pub use layout::*;
pub use store::*;
pub use view::*;
