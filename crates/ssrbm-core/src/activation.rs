//! Scalar activation functions used by the spike conditionals and free energy.

/// Smallest distance kept between a logistic output and either bound.
pub const LOGISTIC_MARGIN: f64 = f64::EPSILON;

/// Logistic sigmoid `1 / (1 + e^{-x})`, clamped into `[ε, 1 - ε]`.
///
/// For |x| beyond ~37 the exact value rounds to 0 or 1 in f64; the clamp keeps
/// spike probabilities strictly inside (0, 1).
#[inline]
pub fn logistic(x: f64) -> f64 {
    let y = if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    };
    y.clamp(LOGISTIC_MARGIN, 1.0 - LOGISTIC_MARGIN)
}

/// Softplus `ln(1 + e^x)`, computed as `max(x, 0) + ln(1 + e^{-|x|})`.
#[inline]
pub fn softplus(x: f64) -> f64 {
    x.max(0.0) + (-x.abs()).exp().ln_1p()
}
