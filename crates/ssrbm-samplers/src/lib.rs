//! # ssrbm-samplers
//!
//! Randomness for spike-and-slab RBM conditionals:
//!
//! - [`RngKey`]: deterministic, splittable seeds
//! - [`RandomSource`]: the injectable uniform / normal capability, with the
//!   ChaCha8-backed [`SeededSource`]
//! - [`sample_bernoulli`] / [`sample_gaussian`]: element-wise draws into caller buffers
//! - [`RadiusRejection`]: bounded retry loop keeping visible samples inside an L2 ball
//!
//! ```
//! use ssrbm_samplers::{RandomSource, RngKey};
//!
//! let (pos_key, neg_key) = RngKey::new(42).split_two();
//! let mut rng = pos_key.source();
//! let x = rng.normal(0.0, 1.0);
//! assert!(x.is_finite());
//! assert_ne!(pos_key, neg_key);
//! ```

pub mod bernoulli;
pub mod gaussian;
pub mod rejection;
pub mod rng;
pub mod source;

pub use bernoulli::*;
pub use gaussian::*;
pub use rejection::*;
pub use rng::*;
pub use source::*;
