//! Closed-form conditionals of the spike-and-slab RBM.
//!
//! With visible `v`, spikes `s_h`, slab pools `x_h` (length P) and weights
//! `W_h = W[:, :, h]`, the model's conditionals are:
//!
//! ```text
//! P(s_h = 1 | v)      = σ( ‖W_hᵀ v‖² / (2λ) + b_h )
//! x_h | v, s_h        ~ N( s_h / λ · W_hᵀ v,  1/λ · I )
//! v | s, x            ~ N( 1/α · Σ_h W_h x_h s_h,  1/α · I )
//! ```
//!
//! where `λ` is the slab penalty and `α` the visible penalty. The spike
//! marginal integrates the slab out analytically, which is what keeps
//! block-Gibbs sampling cheap.
//!
//! Every function reads parameters through a [`ParamsView`] and writes into a
//! caller-supplied buffer.

use ssrbm_core::activation::logistic;
use ssrbm_core::error::{RbmError, Result};
use ssrbm_core::view::ParamsView;
use ssrbm_samplers::{sample_bernoulli, sample_gaussian, RandomSource};

#[inline]
pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// `‖W_hᵀ v‖²`.
pub fn squared_projection(params: &ParamsView<'_>, h: usize, visible: &[f64]) -> f64 {
    (0..params.layout().pool())
        .map(|j| {
            let p = dot(params.weight_column(j, h), visible);
            p * p
        })
        .sum()
}

fn check_finite(what: &'static str, values: &[f64]) -> Result<()> {
    match values.iter().position(|x| !x.is_finite()) {
        None => Ok(()),
        Some(k) => Err(RbmError::NumericalInstability {
            what,
            detail: format!("entry {k} is {}", values[k]),
        }),
    }
}

/// Spike activation probabilities, length H. Each entry lies in (0, 1).
pub fn spike_mean(
    params: &ParamsView<'_>,
    slab_penalty: f64,
    visible: &[f64],
    out: &mut [f64],
) -> Result<()> {
    let layout = params.layout();
    RbmError::check_len("visible", layout.visible(), visible.len())?;
    RbmError::check_len("spike mean", layout.hidden(), out.len())?;

    let bias = params.spike_bias();
    for (h, o) in out.iter_mut().enumerate() {
        let activation = squared_projection(params, h, visible) / (2.0 * slab_penalty) + bias[h];
        if !activation.is_finite() {
            return Err(RbmError::NumericalInstability {
                what: "spike mean",
                detail: format!("activation of hidden unit {h} is {activation}"),
            });
        }
        *o = logistic(activation);
    }
    Ok(())
}

/// One Bernoulli draw per hidden unit.
pub fn sample_spike<R: RandomSource + ?Sized>(
    rng: &mut R,
    spike_mean: &[f64],
    out: &mut [f64],
) -> Result<()> {
    sample_bernoulli(rng, spike_mean, out)
}

/// Slab means as a column-major `P×H` matrix.
///
/// Column `h` is `spike[h] / slab_penalty · W_hᵀ v`; an inactive spike gives an
/// all-zero column.
pub fn slab_mean(
    params: &ParamsView<'_>,
    slab_penalty: f64,
    visible: &[f64],
    spike: &[f64],
    out: &mut [f64],
) -> Result<()> {
    let layout = params.layout();
    let pool = layout.pool();
    RbmError::check_len("visible", layout.visible(), visible.len())?;
    RbmError::check_len("spike", layout.hidden(), spike.len())?;
    RbmError::check_len("slab mean", pool * layout.hidden(), out.len())?;

    for (h, column) in out.chunks_exact_mut(pool).enumerate() {
        if spike[h] == 0.0 {
            column.fill(0.0);
            continue;
        }
        let scale = spike[h] / slab_penalty;
        for (j, c) in column.iter_mut().enumerate() {
            *c = scale * dot(params.weight_column(j, h), visible);
        }
    }
    check_finite("slab mean", out)
}

/// `out[j, h] ~ N(slab_mean[j, h], 1/slab_penalty)`.
pub fn sample_slab<R: RandomSource + ?Sized>(
    rng: &mut R,
    slab_mean: &[f64],
    slab_penalty: f64,
    out: &mut [f64],
) -> Result<()> {
    RbmError::check_positive("slab_penalty", slab_penalty)?;
    sample_gaussian(rng, slab_mean, 1.0 / slab_penalty, out)
}

/// Visible mean `1/α · Σ_h W_h · slab[:, h] · spike[h]`, length V.
pub fn visible_mean(
    params: &ParamsView<'_>,
    spike: &[f64],
    slab: &[f64],
    out: &mut [f64],
) -> Result<()> {
    let layout = params.layout();
    let pool = layout.pool();
    RbmError::check_len("spike", layout.hidden(), spike.len())?;
    RbmError::check_len("slab", pool * layout.hidden(), slab.len())?;
    RbmError::check_len("visible mean", layout.visible(), out.len())?;

    let alpha = params.visible_penalty();
    RbmError::check_positive("visible_penalty", alpha)?;

    out.fill(0.0);
    for (h, column) in slab.chunks_exact(pool).enumerate() {
        let gate = spike[h];
        for (j, &x) in column.iter().enumerate() {
            for (o, &w) in out.iter_mut().zip(params.weight_column(j, h)) {
                *o += w * x * gate;
            }
        }
    }

    let inv_alpha = 1.0 / alpha;
    for o in out.iter_mut() {
        *o *= inv_alpha;
    }
    check_finite("visible mean", out)
}
