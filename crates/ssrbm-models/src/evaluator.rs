//! Free energy and per-sample gradient statistics.

use std::f64::consts::PI;

use ssrbm_core::activation::softplus;
use ssrbm_core::error::{RbmError, Result};
use ssrbm_core::layout::ParamLayout;
use ssrbm_core::view::{ParamsView, ParamsViewMut};

use crate::conditional::{dot, squared_projection};

/// Free energy of a visible vector with the slab integrated out:
///
/// ```text
/// F(v) = ½·α·‖v‖² − ½·H·P·ln(2π/λ) − Σ_h softplus(b_h − ‖W_hᵀ v‖² / (2λ))
/// ```
pub fn free_energy(params: &ParamsView<'_>, slab_penalty: f64, visible: &[f64]) -> Result<f64> {
    let layout = params.layout();
    RbmError::check_len("visible", layout.visible(), visible.len())?;
    RbmError::check_positive("slab_penalty", slab_penalty)?;

    let units = (layout.hidden() * layout.pool()) as f64;
    let mut energy = 0.5 * params.visible_penalty() * dot(visible, visible);
    energy -= 0.5 * units * (2.0 * PI / slab_penalty).ln();

    for (h, &b) in params.spike_bias().iter().enumerate() {
        energy -= softplus(b - squared_projection(params, h, visible) / (2.0 * slab_penalty));
    }

    if !energy.is_finite() {
        return Err(RbmError::NumericalInstability {
            what: "free energy",
            detail: format!("evaluated to {energy}"),
        });
    }
    Ok(energy)
}

/// Write the sufficient statistics of one visible sample into `gradient`.
///
/// `gradient` uses the parameter layout:
/// `G_W[i, j, h] = v_i · slab_mean[j, h] · spike_mean[h]`, `G_b = spike_mean`
/// and `G_α = −½·vᵀv`.
pub fn write_gradient(
    layout: ParamLayout,
    visible: &[f64],
    spike_mean: &[f64],
    slab_mean: &[f64],
    gradient: &mut [f64],
) -> Result<()> {
    let pool = layout.pool();
    let v = layout.visible();
    RbmError::check_len("visible", v, visible.len())?;
    RbmError::check_len("spike mean", layout.hidden(), spike_mean.len())?;
    RbmError::check_len("slab mean", pool * layout.hidden(), slab_mean.len())?;

    let mut out = ParamsViewMut::new(layout, gradient)?;
    for (h, (&m, column)) in spike_mean.iter().zip(slab_mean.chunks_exact(pool)).enumerate() {
        let slice = out.weight_slice_mut(h);
        for (block, &s) in slice.chunks_exact_mut(v).zip(column) {
            for (g, &x) in block.iter_mut().zip(visible) {
                *g = x * s * m;
            }
        }
    }
    out.spike_bias_mut().copy_from_slice(spike_mean);
    *out.visible_penalty_mut() = -0.5 * dot(visible, visible);
    Ok(())
}
