//! Owned parameter and gradient buffers.
//!
//! [`ParameterStore`] owns one flat parameter buffer, three gradient buffers
//! with the identical layout and a `V × batch` negative-samples buffer.
//! Nothing else allocates parameter memory; every consumer goes through the
//! typed views in [`crate::view`].

use crate::error::{RbmError, Result};
use crate::init::InitializationRule;
use crate::layout::ParamLayout;
use crate::view::{ParamsView, ParamsViewMut};

/// Positive, negative and scratch gradient accumulators.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientBuffers {
    layout: ParamLayout,
    positive: Vec<f64>,
    negative: Vec<f64>,
    scratch: Vec<f64>,
}

impl GradientBuffers {
    pub fn zeroed(layout: ParamLayout) -> Self {
        let n = layout.len();
        Self {
            layout,
            positive: vec![0.0; n],
            negative: vec![0.0; n],
            scratch: vec![0.0; n],
        }
    }

    pub fn layout(&self) -> &ParamLayout {
        &self.layout
    }

    /// Data-driven statistics.
    pub fn positive(&self) -> &[f64] {
        &self.positive
    }

    pub fn positive_mut(&mut self) -> &mut [f64] {
        &mut self.positive
    }

    /// Model-driven statistics, summed over negative samples.
    pub fn negative(&self) -> &[f64] {
        &self.negative
    }

    pub fn negative_mut(&mut self) -> &mut [f64] {
        &mut self.negative
    }

    /// Per-sample negative statistics before accumulation.
    pub fn scratch(&self) -> &[f64] {
        &self.scratch
    }

    pub fn scratch_mut(&mut self) -> &mut [f64] {
        &mut self.scratch
    }

    pub fn clear(&mut self) {
        self.positive.fill(0.0);
        self.negative.fill(0.0);
        self.scratch.fill(0.0);
    }

    /// `negative += scratch`.
    pub fn accumulate_scratch(&mut self) {
        for (n, s) in self.negative.iter_mut().zip(self.scratch.iter()) {
            *n += *s;
        }
    }

    /// Writes `positive - negative / n_negative` into `out`.
    pub fn contrastive_into(&self, n_negative: usize, out: &mut [f64]) -> Result<()> {
        RbmError::check_len("contrastive gradient", self.layout.len(), out.len())?;
        if n_negative == 0 {
            return Err(RbmError::ZeroDimension { name: "n_negative" });
        }
        let scale = 1.0 / n_negative as f64;
        for ((o, p), n) in out
            .iter_mut()
            .zip(self.positive.iter())
            .zip(self.negative.iter())
        {
            *o = p - n * scale;
        }
        Ok(())
    }

    pub fn positive_view(&self) -> ParamsView<'_> {
        view_of(self.layout, &self.positive)
    }

    pub fn negative_view(&self) -> ParamsView<'_> {
        view_of(self.layout, &self.negative)
    }
}

/// The model's numeric state: parameters, gradients and sample scratch.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterStore {
    layout: ParamLayout,
    parameters: Vec<f64>,
    gradients: GradientBuffers,
    batch_size: usize,
    negative_samples: Vec<f64>,
}

impl ParameterStore {
    /// Allocate every buffer zero-filled.
    pub fn zeroed(layout: ParamLayout, batch_size: usize) -> Result<Self> {
        RbmError::check_dimension("batch_size", batch_size)?;
        Ok(Self {
            layout,
            parameters: vec![0.0; layout.len()],
            gradients: GradientBuffers::zeroed(layout),
            batch_size,
            negative_samples: vec![0.0; layout.visible() * batch_size],
        })
    }

    /// Allocate zeroed buffers, then let `rule` fill the parameters.
    pub fn initialized<I: InitializationRule + ?Sized>(
        layout: ParamLayout,
        batch_size: usize,
        rule: &I,
    ) -> Result<Self> {
        let mut store = Self::zeroed(layout, batch_size)?;
        rule.initialize(&mut store.parameters);
        log::debug!(
            "initialized ssRBM parameters: V={} P={} H={} ({} values)",
            layout.visible(),
            layout.pool(),
            layout.hidden(),
            layout.len()
        );
        Ok(store)
    }

    /// Re-zero all buffers in place and re-run `rule`.
    pub fn reinitialize<I: InitializationRule + ?Sized>(&mut self, rule: &I) {
        self.parameters.fill(0.0);
        self.gradients.clear();
        self.negative_samples.fill(0.0);
        rule.initialize(&mut self.parameters);
    }

    pub fn layout(&self) -> &ParamLayout {
        &self.layout
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn parameters(&self) -> &[f64] {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut [f64] {
        &mut self.parameters
    }

    pub fn params(&self) -> ParamsView<'_> {
        view_of(self.layout, &self.parameters)
    }

    pub fn params_mut(&mut self) -> ParamsViewMut<'_> {
        ParamsViewMut::from_parts(self.layout, &mut self.parameters)
    }

    pub fn gradients(&self) -> &GradientBuffers {
        &self.gradients
    }

    pub fn gradients_mut(&mut self) -> &mut GradientBuffers {
        &mut self.gradients
    }

    /// Parameters for reading and gradients for writing at the same time.
    pub fn split_gradients_mut(&mut self) -> (ParamsView<'_>, &mut GradientBuffers) {
        (view_of(self.layout, &self.parameters), &mut self.gradients)
    }

    /// Column-major `V × batch_size` buffer of negative-phase samples.
    pub fn negative_samples(&self) -> &[f64] {
        &self.negative_samples
    }

    pub fn negative_samples_mut(&mut self) -> &mut [f64] {
        &mut self.negative_samples
    }

    /// Column `k` of the negative-samples buffer.
    pub fn negative_sample_mut(&mut self, k: usize) -> &mut [f64] {
        let v = self.layout.visible();
        &mut self.negative_samples[k * v..(k + 1) * v]
    }
}

// Every buffer here is allocated with `layout.len()` elements and never resized.
fn view_of(layout: ParamLayout, flat: &[f64]) -> ParamsView<'_> {
    ParamsView::from_parts(layout, flat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::ConstantInit;

    #[test]
    fn test_zeroed_lengths() {
        let layout = ParamLayout::new(3, 2, 4).unwrap();
        let store = ParameterStore::zeroed(layout, 5).unwrap();
        assert_eq!(store.parameters().len(), 3 * 2 * 4 + 4 + 1);
        assert_eq!(store.gradients().positive().len(), layout.len());
        assert_eq!(store.gradients().negative().len(), layout.len());
        assert_eq!(store.gradients().scratch().len(), layout.len());
        assert_eq!(store.negative_samples().len(), 3 * 5);
        assert!(store.parameters().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_zero_batch_rejected() {
        let layout = ParamLayout::new(3, 2, 4).unwrap();
        assert!(ParameterStore::zeroed(layout, 0).is_err());
    }

    #[test]
    fn test_reinitialize_clears_gradients() {
        let layout = ParamLayout::new(2, 1, 2).unwrap();
        let mut store = ParameterStore::initialized(layout, 1, &ConstantInit(0.5)).unwrap();
        store.gradients_mut().positive_mut().fill(3.0);
        store.negative_sample_mut(0).fill(9.0);

        store.reinitialize(&ConstantInit(0.5));

        assert!(store.parameters().iter().all(|&x| x == 0.5));
        assert!(store.gradients().positive().iter().all(|&x| x == 0.0));
        assert!(store.negative_samples().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_contrastive_into() {
        let layout = ParamLayout::new(1, 1, 1).unwrap();
        let mut grads = GradientBuffers::zeroed(layout);
        grads.positive_mut().copy_from_slice(&[1.0, 2.0, 3.0]);

        grads.scratch_mut().copy_from_slice(&[1.0, 1.0, 1.0]);
        grads.accumulate_scratch();
        grads.scratch_mut().copy_from_slice(&[3.0, 1.0, 5.0]);
        grads.accumulate_scratch();
        assert_eq!(grads.negative(), &[4.0, 2.0, 6.0]);

        let mut out = vec![0.0; 3];
        grads.contrastive_into(2, &mut out).unwrap();
        assert_eq!(out, vec![-1.0, 1.0, 0.0]);

        assert!(grads.contrastive_into(0, &mut out).is_err());
        assert!(grads.contrastive_into(1, &mut [0.0; 2]).is_err());
    }

    #[test]
    fn test_split_gradients() {
        let layout = ParamLayout::new(2, 1, 1).unwrap();
        let mut store = ParameterStore::initialized(layout, 1, &ConstantInit(1.0)).unwrap();
        let (params, grads) = store.split_gradients_mut();
        grads.positive_mut()[0] = params.visible_penalty();
        assert_eq!(store.gradients().positive()[0], 1.0);
    }
}
