//! Killfeed analyzer for a single row

use super::classifier::EventClassifier;
use super::config::AnalyzerConfig;
use crate::Result;
use crate::edge::{EdgeMask, EdgeValidator};
use crate::error::KillfeedError;
use crate::scoring::IconScorer;
use crate::selection::{MatchSelector, Selection};
use crate::template::TemplateLibrary;
use crate::traits::IconScoring;
use image::RgbImage;
use killfeed_core::{FrameContext, KillfeedEvent};
use std::cell::OnceCell;
use tracing::debug;

/// Analyzes one cropped killfeed row.
///
/// The first successful analysis is cached; later calls to
/// [`killfeed`](Self::killfeed) return it without recomputing. Create one
/// analyzer per row.
pub struct KillfeedAnalyzer<'a> {
    row: &'a RgbImage,
    context: &'a FrameContext,
    validator: EdgeValidator,
    scorer: IconScorer<'a>,
    selector: MatchSelector,
    classifier: EventClassifier,
    killfeed: OnceCell<Option<KillfeedEvent>>,
}

impl<'a> KillfeedAnalyzer<'a> {
    /// Fails if the row or the templates don't fit the configured layout.
    pub fn new(
        row: &'a RgbImage,
        config: &'a AnalyzerConfig,
        library: &'a TemplateLibrary,
        context: &'a FrameContext,
    ) -> Result<Self> {
        config.check_library(library)?;

        let layout = &config.layout;
        let expected = (layout.row_width, layout.icon_height);
        if row.dimensions() != expected {
            let found = row.dimensions();
            return Err(KillfeedError::dimension_mismatch("killfeed row", expected, found).into());
        }

        let matching = &config.matching;
        Ok(Self {
            row,
            context,
            validator: EdgeValidator::new(
                layout.icon_height,
                matching.canny_low,
                matching.canny_high,
            ),
            scorer: IconScorer::new(
                library,
                matching.suppression_half_width,
                matching.max_sparse_columns,
            ),
            selector: MatchSelector::new(
                matching.acceptance_threshold,
                matching.suppression_half_width,
                layout.row_width,
                layout.max_second_icon_width,
            ),
            classifier: EventClassifier::new(layout.icon_width, matching.team_sample_offset),
            killfeed: OnceCell::new(),
        })
    }

    /// The killfeed event in this row, if any. Computed once.
    pub fn killfeed(&self) -> Result<Option<&KillfeedEvent>> {
        if let Some(cached) = self.killfeed.get() {
            return Ok(cached.as_ref());
        }

        let computed = self.analyze()?;
        Ok(self.killfeed.get_or_init(|| computed).as_ref())
    }

    /// Run the full pipeline, bypassing the cache.
    pub fn analyze(&self) -> Result<Option<KillfeedEvent>> {
        let mask = self.edge_mask();
        let selection = self.select(&mask)?;
        let event = self.classifier.classify(self.row, &selection, self.context);

        debug!(
            time = self.context.time,
            valid_columns = mask.valid_count(),
            event = ?event.as_ref().map(|e| e.kind),
            "analyzed killfeed row"
        );
        Ok(event)
    }

    pub fn edge_mask(&self) -> EdgeMask {
        self.validator.validate(self.row)
    }

    /// Score and select icons against a given mask.
    pub fn select(&self, mask: &EdgeMask) -> Result<Selection> {
        let candidates = self.scorer.score_icons(self.row, mask)?;
        Ok(self.selector.select(candidates, mask))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::IconTemplate;
    use image::Rgb;

    fn library() -> TemplateLibrary {
        let icon = RgbImage::from_fn(36, 26, |x, y| Rgb([(x * 7) as u8, (y * 9) as u8, 128]));
        TemplateLibrary::new(vec![IconTemplate::new("ana", icon)]).expect("valid library")
    }

    #[test]
    fn test_blank_row_is_cached_as_no_event() -> Result<()> {
        let config = AnalyzerConfig::default();
        let library = library();
        let context = FrameContext::default();
        let row = RgbImage::from_pixel(300, 26, Rgb([12, 12, 12]));

        let analyzer = KillfeedAnalyzer::new(&row, &config, &library, &context)?;
        assert_eq!(analyzer.edge_mask().valid_count(), 0);
        assert_eq!(analyzer.killfeed()?, None);
        assert_eq!(analyzer.killfeed()?, None);
        assert!(analyzer.killfeed.get().is_some());
        Ok(())
    }

    #[test]
    fn test_rejects_wrong_row_size() {
        let config = AnalyzerConfig::default();
        let library = library();
        let context = FrameContext::default();
        let row = RgbImage::new(300, 20);

        let err = KillfeedAnalyzer::new(&row, &config, &library, &context).err().expect("error");
        assert!(matches!(
            err.downcast_ref::<KillfeedError>(),
            Some(KillfeedError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_rejects_templates_of_other_size() -> Result<()> {
        let mut config = AnalyzerConfig::default();
        config.layout.icon_width = 30;
        let library = library();
        let context = FrameContext::default();
        let row = RgbImage::new(300, 26);

        assert!(KillfeedAnalyzer::new(&row, &config, &library, &context).is_err());
        Ok(())
    }
}
