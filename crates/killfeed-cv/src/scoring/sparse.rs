//! Sparse scoring: compare templates only at edge-valid columns.
//!
//! Cheaper than the dense pass when only a handful of columns survive edge
//! validation.

use crate::Result;
use crate::edge::EdgeMask;
use crate::icon_match::{IconMatch, IconMatchCollection};
use crate::template::{TemplateLibrary, TemplateMatcher};
use crate::traits::IconScoring;
use crate::utils::ImageUtils;
use image::RgbImage;
use tracing::trace;

pub struct SparseScorer<'a> {
    matcher: TemplateMatcher<'a>,
    half_width: u32,
}

impl<'a> SparseScorer<'a> {
    pub fn new(library: &'a TemplateLibrary, half_width: u32) -> Self {
        Self {
            matcher: TemplateMatcher::new(library),
            half_width,
        }
    }

    /// Best template at every valid column, before suppression
    pub fn raw_matches(&self, row: &RgbImage, mask: &EdgeMask) -> Result<IconMatchCollection> {
        let library = self.matcher.library();
        let mut raw = IconMatchCollection::new();

        for x in mask.valid_columns() {
            let patch = ImageUtils::crop_columns(row, x, library.width(), library.height())?;
            if let Some(best) = self.matcher.best_match(&patch, x)? {
                trace!(%best, "sparse candidate");
                raw.push(best);
            }
        }

        Ok(raw)
    }
}

impl IconScoring for SparseScorer<'_> {
    fn score_icons(&self, row: &RgbImage, mask: &EdgeMask) -> Result<Vec<IconMatch>> {
        let raw = self.raw_matches(row, mask)?;
        Ok(raw.suppress_overlaps(self.half_width, row.width()).into_vec())
    }
}
