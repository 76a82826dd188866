//! Spike-and-slab restricted Boltzmann machine layer.
//!
//! [`SpikeSlabRbm`] owns the configuration, the initialization rule and, once
//! [`reset`](SpikeSlabRbm::reset) has run, a [`ParameterStore`]. Before that
//! every operation touching parameters returns [`RbmError::Uninitialized`].
//!
//! Hidden states are `H + P·H` vectors, see [`HiddenLayout`].

use ssrbm_core::config::SpikeSlabConfig;
use ssrbm_core::error::{RbmError, Result};
use ssrbm_core::init::InitializationRule;
use ssrbm_core::layout::ParamLayout;
use ssrbm_core::store::ParameterStore;
use ssrbm_core::view::{ParamsView, ParamsViewMut};
use ssrbm_samplers::{RadiusRejection, RandomSource, RejectionOutcome};

use crate::conditional;
use crate::evaluator;
use crate::hidden::HiddenLayout;

/// Per-call intermediates, sized once at construction.
#[derive(Debug, Clone)]
struct Scratch {
    spike_mean: Vec<f64>,
    spike_sample: Vec<f64>,
    slab_mean: Vec<f64>,
    visible_mean: Vec<f64>,
}

impl Scratch {
    fn new(layout: &ParamLayout) -> Self {
        Self {
            spike_mean: vec![0.0; layout.hidden()],
            spike_sample: vec![0.0; layout.hidden()],
            slab_mean: vec![0.0; layout.pool() * layout.hidden()],
            visible_mean: vec![0.0; layout.visible()],
        }
    }

    // Spike mean, one spike draw, then the slab mean given that draw.
    fn phase_statistics<R: RandomSource + ?Sized>(
        &mut self,
        params: &ParamsView<'_>,
        slab_penalty: f64,
        visible: &[f64],
        rng: &mut R,
    ) -> Result<()> {
        conditional::spike_mean(params, slab_penalty, visible, &mut self.spike_mean)?;
        conditional::sample_spike(rng, &self.spike_mean, &mut self.spike_sample)?;
        conditional::slab_mean(
            params,
            slab_penalty,
            visible,
            &self.spike_sample,
            &mut self.slab_mean,
        )
    }
}

/// A spike-and-slab RBM with `V` visible units, `H` spikes and `P` slab
/// factors per spike.
#[derive(Debug, Clone)]
pub struct SpikeSlabRbm<I> {
    config: SpikeSlabConfig,
    initializer: I,
    layout: ParamLayout,
    hidden_layout: HiddenLayout,
    rejection: RadiusRejection,
    store: Option<ParameterStore>,
    scratch: Scratch,
}

impl<I: InitializationRule> SpikeSlabRbm<I> {
    /// Validate `config`. No parameter memory is allocated until `reset`.
    pub fn new(config: SpikeSlabConfig, initializer: I) -> Result<Self> {
        config.validate()?;
        let layout = ParamLayout::new(config.visible_size, config.pool_size, config.hidden_size)?;
        let rejection = RadiusRejection::new(config.radius, config.max_trials)?;
        Ok(Self {
            hidden_layout: HiddenLayout::new(config.hidden_size, config.pool_size),
            scratch: Scratch::new(&layout),
            config,
            initializer,
            layout,
            rejection,
            store: None,
        })
    }

    /// Allocate zeroed parameter and gradient buffers and run the initializer.
    ///
    /// Calling it again discards all previous state; with a deterministic rule
    /// the resulting parameters are identical every time.
    pub fn reset(&mut self) -> Result<()> {
        let mut store =
            ParameterStore::initialized(self.layout, self.config.batch_size, &self.initializer)?;
        if let Some(alpha) = self.config.initial_visible_penalty {
            *store.params_mut().visible_penalty_mut() = alpha;
        }
        self.scratch = Scratch::new(&self.layout);
        self.store = Some(store);
        log::debug!(
            "ssRBM reset: visible={} hidden={} pool={} batch={}",
            self.layout.visible(),
            self.layout.hidden(),
            self.layout.pool(),
            self.config.batch_size
        );
        Ok(())
    }
}

impl<I> SpikeSlabRbm<I> {
    pub fn config(&self) -> &SpikeSlabConfig {
        &self.config
    }

    pub fn initializer(&self) -> &I {
        &self.initializer
    }

    pub fn layout(&self) -> &ParamLayout {
        &self.layout
    }

    pub fn hidden_layout(&self) -> &HiddenLayout {
        &self.hidden_layout
    }

    pub fn visible_size(&self) -> usize {
        self.layout.visible()
    }

    /// `H + P·H`.
    pub fn hidden_len(&self) -> usize {
        self.hidden_layout.len()
    }

    /// `V·P·H + H + 1`.
    pub fn parameter_len(&self) -> usize {
        self.layout.len()
    }

    pub fn is_initialized(&self) -> bool {
        self.store.is_some()
    }

    pub fn store(&self) -> Result<&ParameterStore> {
        self.store.as_ref().ok_or(RbmError::Uninitialized)
    }

    pub fn store_mut(&mut self) -> Result<&mut ParameterStore> {
        self.store.as_mut().ok_or(RbmError::Uninitialized)
    }

    pub fn parameters(&self) -> Result<&[f64]> {
        Ok(self.store()?.parameters())
    }

    pub fn parameters_mut(&mut self) -> Result<&mut [f64]> {
        Ok(self.store_mut()?.parameters_mut())
    }

    pub fn params(&self) -> Result<ParamsView<'_>> {
        Ok(self.store()?.params())
    }

    pub fn params_mut(&mut self) -> Result<ParamsViewMut<'_>> {
        Ok(self.store_mut()?.params_mut())
    }

    /// `W[:, :, h]`, column-major `V×P`.
    pub fn weight_slice(&self, h: usize) -> Result<&[f64]> {
        Ok(self.store()?.params().weight_slice(h))
    }

    pub fn spike_bias(&self) -> Result<&[f64]> {
        Ok(self.store()?.params().spike_bias())
    }

    pub fn visible_penalty(&self) -> Result<f64> {
        Ok(self.store()?.params().visible_penalty())
    }

    pub fn set_visible_penalty(&mut self, alpha: f64) -> Result<()> {
        *self.params_mut()?.visible_penalty_mut() = alpha;
        Ok(())
    }

    /// `P(s_h = 1 | v)` for every hidden unit.
    pub fn spike_mean(&self, visible: &[f64], out: &mut [f64]) -> Result<()> {
        conditional::spike_mean(&self.params()?, self.config.slab_penalty, visible, out)
    }

    /// Slab means given `visible` and a spike vector, column-major `P×H`.
    pub fn slab_mean(&self, visible: &[f64], spike: &[f64], out: &mut [f64]) -> Result<()> {
        conditional::slab_mean(&self.params()?, self.config.slab_penalty, visible, spike, out)
    }

    /// Mean of `v | s, x` for a hidden state.
    pub fn visible_mean(&self, hidden: &[f64], out: &mut [f64]) -> Result<()> {
        let (spike, slab) = self.hidden_layout.split(hidden)?;
        conditional::visible_mean(&self.params()?, spike, slab, out)
    }

    /// Draw `(s, x) ~ P(s, x | v)` into `hidden`.
    pub fn sample_hidden<R: RandomSource + ?Sized>(
        &mut self,
        visible: &[f64],
        hidden: &mut [f64],
        rng: &mut R,
    ) -> Result<()> {
        let params = self.store.as_ref().ok_or(RbmError::Uninitialized)?.params();
        let slab_penalty = self.config.slab_penalty;
        let (spike, slab) = self.hidden_layout.split_mut(hidden)?;

        conditional::spike_mean(&params, slab_penalty, visible, &mut self.scratch.spike_mean)?;
        conditional::sample_spike(rng, &self.scratch.spike_mean, spike)?;
        conditional::slab_mean(
            &params,
            slab_penalty,
            visible,
            spike,
            &mut self.scratch.slab_mean,
        )?;
        conditional::sample_slab(rng, &self.scratch.slab_mean, slab_penalty, slab)
    }

    /// Mean hidden state: the spike part holds spike means, the slab part holds
    /// slab means conditioned on one sampled spike vector.
    pub fn hidden_mean<R: RandomSource + ?Sized>(
        &mut self,
        visible: &[f64],
        hidden: &mut [f64],
        rng: &mut R,
    ) -> Result<()> {
        let params = self.store.as_ref().ok_or(RbmError::Uninitialized)?.params();
        let (spike, slab) = self.hidden_layout.split_mut(hidden)?;

        self.scratch
            .phase_statistics(&params, self.config.slab_penalty, visible, rng)?;
        spike.copy_from_slice(&self.scratch.spike_mean);
        slab.copy_from_slice(&self.scratch.slab_mean);
        Ok(())
    }

    /// Draw `v ~ N(visible_mean, 1/α)` restricted to the acceptance radius.
    ///
    /// When every trial lands outside the radius the last draw is left in
    /// `visible` and the outcome reports `accepted == false`.
    pub fn sample_visible<R: RandomSource + ?Sized>(
        &mut self,
        hidden: &[f64],
        visible: &mut [f64],
        rng: &mut R,
    ) -> Result<RejectionOutcome> {
        let params = self.store.as_ref().ok_or(RbmError::Uninitialized)?.params();
        let (spike, slab) = self.hidden_layout.split(hidden)?;
        RbmError::check_len("visible", self.layout.visible(), visible.len())?;

        conditional::visible_mean(&params, spike, slab, &mut self.scratch.visible_mean)?;
        let variance = 1.0 / params.visible_penalty();
        self.rejection
            .sample(rng, &self.scratch.visible_mean, variance, visible)
    }

    /// Sufficient statistics of `visible` written into `gradient`, which
    /// must have the parameter layout.
    pub fn phase<R: RandomSource + ?Sized>(
        &mut self,
        visible: &[f64],
        gradient: &mut [f64],
        rng: &mut R,
    ) -> Result<()> {
        let params = self.store.as_ref().ok_or(RbmError::Uninitialized)?.params();
        RbmError::check_len("gradient", self.layout.len(), gradient.len())?;

        self.scratch
            .phase_statistics(&params, self.config.slab_penalty, visible, rng)?;
        evaluator::write_gradient(
            self.layout,
            visible,
            &self.scratch.spike_mean,
            &self.scratch.slab_mean,
            gradient,
        )
    }

    /// [`phase`](Self::phase) of a data sample into the positive gradient buffer.
    pub fn positive_phase<R: RandomSource + ?Sized>(
        &mut self,
        visible: &[f64],
        rng: &mut R,
    ) -> Result<()> {
        let store = self.store.as_mut().ok_or(RbmError::Uninitialized)?;
        let (params, gradients) = store.split_gradients_mut();

        self.scratch
            .phase_statistics(&params, self.config.slab_penalty, visible, rng)?;
        evaluator::write_gradient(
            self.layout,
            visible,
            &self.scratch.spike_mean,
            &self.scratch.slab_mean,
            gradients.positive_mut(),
        )
    }

    /// [`phase`](Self::phase) of a model sample, added onto the negative
    /// gradient buffer.
    pub fn negative_phase<R: RandomSource + ?Sized>(
        &mut self,
        sample: &[f64],
        rng: &mut R,
    ) -> Result<()> {
        let store = self.store.as_mut().ok_or(RbmError::Uninitialized)?;
        let (params, gradients) = store.split_gradients_mut();

        self.scratch
            .phase_statistics(&params, self.config.slab_penalty, sample, rng)?;
        evaluator::write_gradient(
            self.layout,
            sample,
            &self.scratch.spike_mean,
            &self.scratch.slab_mean,
            gradients.scratch_mut(),
        )?;
        gradients.accumulate_scratch();
        Ok(())
    }

    /// Zero all three gradient buffers.
    pub fn clear_gradients(&mut self) -> Result<()> {
        self.store_mut()?.gradients_mut().clear();
        Ok(())
    }

    /// `positive − negative / n_negative` into `out`.
    pub fn contrastive_gradient(&self, n_negative: usize, out: &mut [f64]) -> Result<()> {
        self.store()?.gradients().contrastive_into(n_negative, out)
    }

    pub fn free_energy(&self, visible: &[f64]) -> Result<f64> {
        evaluator::free_energy(&self.params()?, self.config.slab_penalty, visible)
    }

    /// Mean free energy over a column-major `V × n` batch.
    pub fn mean_free_energy(&self, batch: &[f64]) -> Result<f64> {
        let params = self.params()?;
        let v = self.layout.visible();
        if batch.is_empty() || batch.len() % v != 0 {
            return Err(RbmError::ShapeMismatch {
                what: "visible batch",
                expected: v * (batch.len() / v).max(1),
                actual: batch.len(),
            });
        }

        let mut total = 0.0;
        for column in batch.chunks_exact(v) {
            total += evaluator::free_energy(&params, self.config.slab_penalty, column)?;
        }
        Ok(total / (batch.len() / v) as f64)
    }
}
