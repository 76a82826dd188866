//! Offset arithmetic for the flat parameter buffer.
//!
//! ```text
//! [ W: V·P·H (column-major V×P×H) | b: H | α: 1 ]
//! ```
//!
//! `W[i, j, h]` lives at `i + V·(j + P·h)`, so slice `h` is one contiguous
//! `V×P` block and column `j` of that block is contiguous as well. The same
//! layout is used for every gradient buffer.

use crate::error::{RbmError, Result};
use std::ops::Range;

/// A contiguous region `[offset, offset + len)` of a flat buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub offset: usize,
    pub len: usize,
}

impl Region {
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    pub const fn end(&self) -> usize {
        self.offset + self.len
    }

    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }

    pub fn overlaps(&self, other: &Region) -> bool {
        self.offset < other.end() && other.offset < self.end()
    }
}

/// Shape of the weight tensor plus the three regions derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamLayout {
    visible: usize,
    pool: usize,
    hidden: usize,
    weight: Region,
    spike_bias: Region,
    visible_penalty: Region,
}

impl ParamLayout {
    pub fn new(visible: usize, pool: usize, hidden: usize) -> Result<Self> {
        RbmError::check_dimension("visible_size", visible)?;
        RbmError::check_dimension("pool_size", pool)?;
        RbmError::check_dimension("hidden_size", hidden)?;

        let weight = Region::new(0, visible * pool * hidden);
        let spike_bias = Region::new(weight.end(), hidden);
        let visible_penalty = Region::new(spike_bias.end(), 1);

        Ok(Self {
            visible,
            pool,
            hidden,
            weight,
            spike_bias,
            visible_penalty,
        })
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    pub fn pool(&self) -> usize {
        self.pool
    }

    pub fn hidden(&self) -> usize {
        self.hidden
    }

    /// Total buffer length, `V·P·H + H + 1`.
    pub fn len(&self) -> usize {
        self.visible_penalty.end()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn weight(&self) -> Region {
        self.weight
    }

    pub fn spike_bias(&self) -> Region {
        self.spike_bias
    }

    pub fn visible_penalty(&self) -> Region {
        self.visible_penalty
    }

    /// Elements in one hidden unit's `V×P` weight slice.
    pub fn slice_len(&self) -> usize {
        self.visible * self.pool
    }

    /// Range of slice `h` relative to the start of the weight region.
    pub fn slice_range(&self, h: usize) -> Range<usize> {
        let n = self.slice_len();
        h * n..(h + 1) * n
    }

    /// Flat index of `W[i, j, h]`.
    #[inline]
    pub fn weight_index(&self, i: usize, j: usize, h: usize) -> usize {
        i + self.visible * (j + self.pool * h)
    }
}
