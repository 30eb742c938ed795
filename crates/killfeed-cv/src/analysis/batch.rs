//! Analysis of every row of a frame

use super::analyzer::KillfeedAnalyzer;
use super::config::AnalyzerConfig;
use crate::Result;
use crate::template::TemplateLibrary;
use image::RgbImage;
use killfeed_core::{FrameContext, KillfeedEvent};

/// Analyze independent rows, keeping their order in the output.
///
/// With the `parallel` feature rows are spread over the rayon pool; rows
/// share nothing but the read-only configuration.
pub fn analyze_rows(
    rows: &[RgbImage],
    config: &AnalyzerConfig,
    library: &TemplateLibrary,
    context: &FrameContext,
) -> Result<Vec<Option<KillfeedEvent>>> {
    let analyze_one = |row: &RgbImage| -> Result<Option<KillfeedEvent>> {
        KillfeedAnalyzer::new(row, config, library, context)?.analyze()
    };

    #[cfg(feature = "parallel")]
    let events = {
        use rayon::prelude::*;
        rows.par_iter().map(analyze_one).collect()
    };

    #[cfg(not(feature = "parallel"))]
    let events = rows.iter().map(analyze_one).collect();

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::IconTemplate;
    use image::Rgb;

    #[test]
    fn test_rows_keep_order_and_fail_fast() -> Result<()> {
        let config = AnalyzerConfig::default();
        let icon = RgbImage::from_fn(36, 26, |x, y| Rgb([(x * 5) as u8, (y * 3) as u8, 60]));
        let library = TemplateLibrary::new(vec![IconTemplate::new("moira", icon)])?;
        let context = FrameContext::default();

        let rows = vec![RgbImage::new(300, 26), RgbImage::from_pixel(300, 26, Rgb([50, 50, 50]))];
        assert_eq!(analyze_rows(&rows, &config, &library, &context)?, vec![None, None]);

        let bad = vec![RgbImage::new(300, 26), RgbImage::new(299, 26)];
        assert!(analyze_rows(&bad, &config, &library, &context).is_err());
        Ok(())
    }
}
