//! Column-wise non-maximum suppression helpers
//!
//! Icons in a killfeed row only move horizontally, so suppression works on
//! column windows instead of box overlap.

use std::ops::Range;

/// Columns covered by a suppression window centred on `center`, clamped to `0..len`.
pub fn suppression_window(center: usize, half_width: usize, len: usize) -> Range<usize> {
    let start = center.saturating_sub(half_width).min(len);
    let end = center.saturating_add(half_width + 1).min(len);
    start..end
}

/// Tracks which columns are already claimed by an accepted match
#[derive(Debug, Clone)]
pub struct ColumnSuppressor {
    covered: Vec<bool>,
    half_width: usize,
}

impl ColumnSuppressor {
    pub fn new(len: usize, half_width: usize) -> Self {
        Self {
            covered: vec![false; len],
            half_width,
        }
    }

    pub fn is_covered(&self, column: usize) -> bool {
        self.covered.get(column).copied().unwrap_or(false)
    }

    /// Claim the window around `column` unless the column itself is already covered.
    pub fn claim(&mut self, column: usize) -> bool {
        if self.is_covered(column) {
            return false;
        }

        let window = suppression_window(column, self.half_width, self.covered.len());
        self.covered[window].fill(true);
        true
    }
}
