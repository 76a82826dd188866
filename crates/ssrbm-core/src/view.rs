//! Typed, non-owning views over a flat buffer laid out by [`ParamLayout`].
//!
//! The same views are used for the parameter buffer and for all gradient
//! buffers, so the offset arithmetic lives in exactly one place.

use crate::error::{RbmError, Result};
use crate::layout::ParamLayout;

/// Read-only view of weights, spike bias and visible penalty.
#[derive(Debug, Clone, Copy)]
pub struct ParamsView<'a> {
    layout: ParamLayout,
    weight: &'a [f64],
    spike_bias: &'a [f64],
    visible_penalty: f64,
}

impl<'a> ParamsView<'a> {
    pub fn new(layout: ParamLayout, flat: &'a [f64]) -> Result<Self> {
        RbmError::check_len("parameter buffer", layout.len(), flat.len())?;
        Ok(Self::from_parts(layout, flat))
    }

    /// Caller guarantees `flat.len() == layout.len()`.
    pub(crate) fn from_parts(layout: ParamLayout, flat: &'a [f64]) -> Self {
        Self {
            layout,
            weight: &flat[layout.weight().range()],
            spike_bias: &flat[layout.spike_bias().range()],
            visible_penalty: flat[layout.visible_penalty().offset],
        }
    }

    pub fn layout(&self) -> &ParamLayout {
        &self.layout
    }

    /// The whole weight tensor, column-major `V×P×H`.
    pub fn weight(&self) -> &'a [f64] {
        self.weight
    }

    /// `W[:, :, h]` as a column-major `V×P` block.
    pub fn weight_slice(&self, h: usize) -> &'a [f64] {
        &self.weight[self.layout.slice_range(h)]
    }

    /// `W[:, j, h]`, length V.
    pub fn weight_column(&self, j: usize, h: usize) -> &'a [f64] {
        let v = self.layout.visible();
        &self.weight_slice(h)[j * v..(j + 1) * v]
    }

    #[inline]
    pub fn weight_at(&self, i: usize, j: usize, h: usize) -> f64 {
        self.weight[self.layout.weight_index(i, j, h)]
    }

    pub fn spike_bias(&self) -> &'a [f64] {
        self.spike_bias
    }

    pub fn visible_penalty(&self) -> f64 {
        self.visible_penalty
    }
}

/// Mutable view over the same three regions.
#[derive(Debug)]
pub struct ParamsViewMut<'a> {
    layout: ParamLayout,
    weight: &'a mut [f64],
    spike_bias: &'a mut [f64],
    visible_penalty: &'a mut f64,
}

impl<'a> ParamsViewMut<'a> {
    pub fn new(layout: ParamLayout, flat: &'a mut [f64]) -> Result<Self> {
        RbmError::check_len("parameter buffer", layout.len(), flat.len())?;
        Ok(Self::from_parts(layout, flat))
    }

    /// Caller guarantees `flat.len() == layout.len()`.
    pub(crate) fn from_parts(layout: ParamLayout, flat: &'a mut [f64]) -> Self {
        let (weight, rest) = flat.split_at_mut(layout.weight().len);
        let (spike_bias, rest) = rest.split_at_mut(layout.spike_bias().len);
        Self {
            layout,
            weight,
            spike_bias,
            visible_penalty: &mut rest[0],
        }
    }

    pub fn layout(&self) -> &ParamLayout {
        &self.layout
    }

    pub fn weight_mut(&mut self) -> &mut [f64] {
        &mut self.weight[..]
    }

    pub fn weight_slice_mut(&mut self, h: usize) -> &mut [f64] {
        let range = self.layout.slice_range(h);
        &mut self.weight[range]
    }

    pub fn set_weight(&mut self, i: usize, j: usize, h: usize, value: f64) {
        let idx = self.layout.weight_index(i, j, h);
        self.weight[idx] = value;
    }

    pub fn spike_bias_mut(&mut self) -> &mut [f64] {
        &mut self.spike_bias[..]
    }

    pub fn visible_penalty_mut(&mut self) -> &mut f64 {
        &mut *self.visible_penalty
    }

    /// Reborrow as a read-only view.
    pub fn as_view(&self) -> ParamsView<'_> {
        ParamsView {
            layout: self.layout,
            weight: &self.weight[..],
            spike_bias: &self.spike_bias[..],
            visible_penalty: *self.visible_penalty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> ParamLayout {
        ParamLayout::new(2, 3, 2).unwrap()
    }

    #[test]
    fn test_view_regions() {
        let layout = layout();
        let flat: Vec<f64> = (0..layout.len()).map(|i| i as f64).collect();
        let view = ParamsView::new(layout, &flat).unwrap();

        assert_eq!(view.weight().len(), 12);
        assert_eq!(view.weight_slice(1), &flat[6..12]);
        assert_eq!(view.weight_column(2, 1), &[10.0, 11.0]);
        assert_eq!(view.weight_at(1, 2, 1), 11.0);
        assert_eq!(view.spike_bias(), &[12.0, 13.0]);
        assert_eq!(view.visible_penalty(), 14.0);
    }

    #[test]
    fn test_view_rejects_wrong_length() {
        let flat = vec![0.0; 3];
        assert!(matches!(
            ParamsView::new(layout(), &flat),
            Err(RbmError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_mut_view_writes_through() {
        let layout = layout();
        let mut flat = vec![0.0; layout.len()];
        {
            let mut view = ParamsViewMut::new(layout, &mut flat).unwrap();
            view.set_weight(1, 0, 1, 7.0);
            view.spike_bias_mut()[1] = -2.0;
            *view.visible_penalty_mut() = 3.0;
            assert_eq!(view.as_view().visible_penalty(), 3.0);
        }
        assert_eq!(flat[layout.weight_index(1, 0, 1)], 7.0);
        assert_eq!(flat[layout.spike_bias().offset + 1], -2.0);
        assert_eq!(flat[layout.len() - 1], 3.0);
    }
}
