//! Layout of a hidden state vector.
//!
//! A hidden state is `H + P·H` values: the `H` spike entries first, then the
//! slab as a column-major `P×H` matrix (column `h` is hidden unit `h`'s pool).

use ssrbm_core::error::{RbmError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HiddenLayout {
    hidden: usize,
    pool: usize,
}

impl HiddenLayout {
    pub fn new(hidden: usize, pool: usize) -> Self {
        Self { hidden, pool }
    }

    pub fn hidden(&self) -> usize {
        self.hidden
    }

    pub fn pool(&self) -> usize {
        self.pool
    }

    /// `H + P·H`.
    pub fn len(&self) -> usize {
        self.hidden + self.slab_len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn slab_len(&self) -> usize {
        self.pool * self.hidden
    }

    /// Split into `(spike, slab)`.
    pub fn split<'a>(&self, state: &'a [f64]) -> Result<(&'a [f64], &'a [f64])> {
        RbmError::check_len("hidden state", self.len(), state.len())?;
        Ok(state.split_at(self.hidden))
    }

    pub fn split_mut<'a>(&self, state: &'a mut [f64]) -> Result<(&'a mut [f64], &'a mut [f64])> {
        RbmError::check_len("hidden state", self.len(), state.len())?;
        Ok(state.split_at_mut(self.hidden))
    }

    /// Column `h` of a `P×H` slab matrix.
    pub fn slab_column<'a>(&self, slab: &'a [f64], h: usize) -> &'a [f64] {
        &slab[h * self.pool..(h + 1) * self.pool]
    }
}
