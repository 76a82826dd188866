//! The capability interface a host training loop drives an RBM layer through.

use ssrbm_core::error::Result;
use ssrbm_core::init::InitializationRule;
use ssrbm_samplers::{RandomSource, RejectionOutcome};

use crate::spike_slab::SpikeSlabRbm;

/// Object-safe RBM variant.
///
/// A host can hold a `Box<dyn RbmVariant>` and drive contrastive-divergence
/// style training without knowing the concrete layer. Randomness is always
/// supplied by the caller.
pub trait RbmVariant {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    fn visible_size(&self) -> usize;

    /// Length of a hidden state vector.
    fn hidden_len(&self) -> usize;

    /// Length of the flat parameter buffer, and of every gradient buffer.
    fn parameter_len(&self) -> usize;

    fn is_initialized(&self) -> bool;

    fn reset(&mut self) -> Result<()>;

    fn parameters(&self) -> Result<&[f64]>;

    fn parameters_mut(&mut self) -> Result<&mut [f64]>;

    fn free_energy(&self, visible: &[f64]) -> Result<f64>;

    fn sample_hidden(
        &mut self,
        visible: &[f64],
        hidden: &mut [f64],
        rng: &mut dyn RandomSource,
    ) -> Result<()>;

    fn hidden_mean(
        &mut self,
        visible: &[f64],
        hidden: &mut [f64],
        rng: &mut dyn RandomSource,
    ) -> Result<()>;

    fn sample_visible(
        &mut self,
        hidden: &[f64],
        visible: &mut [f64],
        rng: &mut dyn RandomSource,
    ) -> Result<RejectionOutcome>;

    fn phase(
        &mut self,
        visible: &[f64],
        gradient: &mut [f64],
        rng: &mut dyn RandomSource,
    ) -> Result<()>;
}

impl<I: InitializationRule> RbmVariant for SpikeSlabRbm<I> {
    fn name(&self) -> &'static str {
        "ssRBM"
    }

    fn visible_size(&self) -> usize {
        SpikeSlabRbm::visible_size(self)
    }

    fn hidden_len(&self) -> usize {
        SpikeSlabRbm::hidden_len(self)
    }

    fn parameter_len(&self) -> usize {
        SpikeSlabRbm::parameter_len(self)
    }

    fn is_initialized(&self) -> bool {
        SpikeSlabRbm::is_initialized(self)
    }

    fn reset(&mut self) -> Result<()> {
        SpikeSlabRbm::reset(self)
    }

    fn parameters(&self) -> Result<&[f64]> {
        SpikeSlabRbm::parameters(self)
    }

    fn parameters_mut(&mut self) -> Result<&mut [f64]> {
        SpikeSlabRbm::parameters_mut(self)
    }

    fn free_energy(&self, visible: &[f64]) -> Result<f64> {
        SpikeSlabRbm::free_energy(self, visible)
    }

    fn sample_hidden(
        &mut self,
        visible: &[f64],
        hidden: &mut [f64],
        rng: &mut dyn RandomSource,
    ) -> Result<()> {
        SpikeSlabRbm::sample_hidden(self, visible, hidden, rng)
    }

    fn hidden_mean(
        &mut self,
        visible: &[f64],
        hidden: &mut [f64],
        rng: &mut dyn RandomSource,
    ) -> Result<()> {
        SpikeSlabRbm::hidden_mean(self, visible, hidden, rng)
    }

    fn sample_visible(
        &mut self,
        hidden: &[f64],
        visible: &mut [f64],
        rng: &mut dyn RandomSource,
    ) -> Result<RejectionOutcome> {
        SpikeSlabRbm::sample_visible(self, hidden, visible, rng)
    }

    fn phase(
        &mut self,
        visible: &[f64],
        gradient: &mut [f64],
        rng: &mut dyn RandomSource,
    ) -> Result<()> {
        SpikeSlabRbm::phase(self, visible, gradient, rng)
    }
}
