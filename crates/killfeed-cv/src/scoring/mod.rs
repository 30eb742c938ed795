//! Icon scoring strategies
//!
//! Both strategies answer the same question, "which template sits at which
//! edge-valid column", and differ only in cost. The sparse one correlates a
//! single patch per valid column; the dense one runs one full pass per
//! template. [`IconScorer`] picks whichever is cheaper for the mask at hand.

pub mod dense;
pub mod sparse;

pub use dense::DenseScorer;
pub use sparse::SparseScorer;

use crate::Result;
use crate::edge::EdgeMask;
use crate::icon_match::IconMatch;
use crate::template::TemplateLibrary;
use crate::traits::IconScoring;
use image::RgbImage;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoringStrategy {
    /// Patch comparison at each valid column, then suppression
    Sparse,
    /// Full correlation surface per template, two peaks each
    Dense,
}

impl ScoringStrategy {
    /// Sparse while the mask has at most `max_sparse_columns` valid columns.
    pub fn for_mask(mask: &EdgeMask, max_sparse_columns: usize) -> Self {
        if mask.valid_count() <= max_sparse_columns {
            ScoringStrategy::Sparse
        } else {
            ScoringStrategy::Dense
        }
    }
}

/// Adaptive scorer switching between sparse and dense scoring
pub struct IconScorer<'a> {
    sparse: SparseScorer<'a>,
    dense: DenseScorer<'a>,
    max_sparse_columns: usize,
}

impl<'a> IconScorer<'a> {
    pub fn new(library: &'a TemplateLibrary, half_width: u32, max_sparse_columns: usize) -> Self {
        Self {
            sparse: SparseScorer::new(library, half_width),
            dense: DenseScorer::new(library, half_width),
            max_sparse_columns,
        }
    }

    pub fn strategy_for(&self, mask: &EdgeMask) -> ScoringStrategy {
        ScoringStrategy::for_mask(mask, self.max_sparse_columns)
    }

    /// Score with an explicit strategy
    pub fn score_with(
        &self,
        strategy: ScoringStrategy,
        row: &RgbImage,
        mask: &EdgeMask,
    ) -> Result<Vec<IconMatch>> {
        match strategy {
            ScoringStrategy::Sparse => self.sparse.score_icons(row, mask),
            ScoringStrategy::Dense => self.dense.score_icons(row, mask),
        }
    }
}

impl IconScoring for IconScorer<'_> {
    fn score_icons(&self, row: &RgbImage, mask: &EdgeMask) -> Result<Vec<IconMatch>> {
        let strategy = self.strategy_for(mask);
        debug!(?strategy, valid_columns = mask.valid_count(), "scoring icons");
        self.score_with(strategy, row, mask)
    }
}
