//! # ssrbm-examples utilities
//!
//! Shared helpers for the ssrbm demos: synthetic data inside the acceptance
//! ball, a plain gradient-ascent update and a CD-1 epoch driver.

use ssrbm_core::error::{RbmError, Result};
use ssrbm_core::init::InitializationRule;
use ssrbm_core::layout::ParamLayout;
use ssrbm_models::SpikeSlabRbm;
use ssrbm_samplers::{l2_norm, RandomSource};

/// Smallest visible penalty an update may leave behind.
pub const MIN_VISIBLE_PENALTY: f64 = 1e-3;

/// Column-major `V × n` batch of Gaussian blobs around a few fixed centres.
///
/// Samples whose norm reaches `radius` are scaled back to 90% of it so every
/// column lies inside the model's acceptance region.
pub fn synthetic_batch<R: RandomSource + ?Sized>(
    rng: &mut R,
    visible: usize,
    n: usize,
    radius: f64,
    noise: f64,
) -> Vec<f64> {
    let centres = [0.5, -0.5, 0.25];
    let mut batch = Vec::with_capacity(visible * n);
    for k in 0..n {
        let centre = centres[k % centres.len()] * radius / (visible as f64).sqrt();
        let start = batch.len();
        for i in 0..visible {
            let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
            batch.push(rng.normal(sign * centre, noise));
        }

        let column = &mut batch[start..];
        let norm = l2_norm(column);
        if norm >= radius {
            let shrink = 0.9 * radius / norm;
            column.iter_mut().for_each(|x| *x *= shrink);
        }
    }
    batch
}

/// `parameters += learning_rate · gradient`, then keep the visible penalty
/// above [`MIN_VISIBLE_PENALTY`].
pub fn ascent_step(
    layout: &ParamLayout,
    parameters: &mut [f64],
    gradient: &[f64],
    learning_rate: f64,
) -> Result<()> {
    RbmError::check_len("parameters", layout.len(), parameters.len())?;
    RbmError::check_len("gradient", layout.len(), gradient.len())?;
    for (p, g) in parameters.iter_mut().zip(gradient) {
        *p += learning_rate * g;
    }
    let alpha = &mut parameters[layout.visible_penalty().offset];
    *alpha = alpha.max(MIN_VISIBLE_PENALTY);
    Ok(())
}

/// Summary of one pass over a batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochStats {
    pub mean_free_energy: f64,
    /// Negative samples whose rejection loop ran out of trials.
    pub rejected: usize,
    pub visible_penalty: f64,
}

/// One pass of contrastive divergence (CD-1) over a column-major batch,
/// updating the parameters after every column.
pub fn cd1_epoch<I, R>(
    rbm: &mut SpikeSlabRbm<I>,
    batch: &[f64],
    learning_rate: f64,
    rng: &mut R,
) -> Result<EpochStats>
where
    I: InitializationRule,
    R: RandomSource + ?Sized,
{
    let v = rbm.visible_size();
    if batch.is_empty() || batch.len() % v != 0 {
        return Err(RbmError::ShapeMismatch {
            what: "training batch",
            expected: v * (batch.len() / v).max(1),
            actual: batch.len(),
        });
    }

    let layout = *rbm.layout();
    let mut hidden = vec![0.0; rbm.hidden_len()];
    let mut sample = vec![0.0; v];
    let mut gradient = vec![0.0; layout.len()];
    let mut rejected = 0;

    for column in batch.chunks_exact(v) {
        rbm.clear_gradients()?;
        rbm.positive_phase(column, rng)?;

        rbm.sample_hidden(column, &mut hidden, rng)?;
        if !rbm.sample_visible(&hidden, &mut sample, rng)?.accepted {
            rejected += 1;
        }
        rbm.negative_phase(&sample, rng)?;

        rbm.contrastive_gradient(1, &mut gradient)?;
        ascent_step(&layout, rbm.parameters_mut()?, &gradient, learning_rate)?;
    }

    Ok(EpochStats {
        mean_free_energy: rbm.mean_free_energy(batch)?,
        rejected,
        visible_penalty: rbm.visible_penalty()?,
    })
}
