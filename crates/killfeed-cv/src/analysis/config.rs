//! Analyzer configuration

use crate::Result;
use crate::error::KillfeedError;
use crate::template::TemplateLibrary;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main analyzer configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub layout: KillfeedLayout,
    pub matching: MatchingConfig,
}

/// Geometry of a killfeed row, in pixels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KillfeedLayout {
    /// Width of a cropped killfeed row.
    pub row_width: u32,
    /// Widest the right-hand part of an entry (icon plus name) can be. A lone
    /// icon must start within this distance of the row's right end.
    pub max_second_icon_width: u32,
    pub icon_width: u32,
    pub icon_height: u32,
}

/// Tuned constants of the matching pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Lowest correlation score accepted as an icon (inclusive).
    pub acceptance_threshold: f64,
    /// Up to this many edge-valid columns the sparse scorer is used.
    pub max_sparse_columns: usize,
    /// Half width of the non-maximum suppression window.
    pub suppression_half_width: u32,
    pub canny_low: f32,
    pub canny_high: f32,
    /// Distance between an icon and the pixel sampled for its team color.
    pub team_sample_offset: u32,
}

impl Default for KillfeedLayout {
    fn default() -> Self {
        Self {
            row_width: 300,
            max_second_icon_width: 100,
            icon_width: 36,
            icon_height: 26,
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            acceptance_threshold: 0.6,
            max_sparse_columns: 7,
            suppression_half_width: 5,
            canny_low: 100.0,
            canny_high: 200.0,
            team_sample_offset: 5,
        }
    }
}

impl AnalyzerConfig {
    /// Load a configuration from JSON; missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {:?}", path.as_ref()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("Failed to parse config: {:?}", path.as_ref()))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The icon templates must have exactly the layout's icon size.
    pub fn check_library(&self, library: &TemplateLibrary) -> Result<()> {
        let expected = (self.layout.icon_width, self.layout.icon_height);
        let found = (library.width(), library.height());
        if expected != found {
            return Err(
                KillfeedError::dimension_mismatch("icon template size", expected, found).into(),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::IconTemplate;
    use image::RgbImage;

    #[test]
    fn test_defaults() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.matching.acceptance_threshold, 0.6);
        assert_eq!(config.matching.max_sparse_columns, 7);
        assert_eq!(config.matching.suppression_half_width, 5);
        assert_eq!((config.matching.canny_low, config.matching.canny_high), (100.0, 200.0));
    }

    #[test]
    fn test_partial_json_keeps_defaults() -> Result<()> {
        let config = AnalyzerConfig::from_json_str(r#"{ "layout": { "row_width": 420 } }"#)?;
        assert_eq!(config.layout.row_width, 420);
        assert_eq!(config.layout.icon_width, 36);
        assert_eq!(config.matching, MatchingConfig::default());
        Ok(())
    }

    #[test]
    fn test_json_file_roundtrip() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("killfeed.json");

        let mut config = AnalyzerConfig::default();
        config.layout.max_second_icon_width = 120;
        fs::write(&path, config.to_json_string()?)?;

        assert_eq!(AnalyzerConfig::from_json_file(&path)?, config);
        assert!(AnalyzerConfig::from_json_file(dir.path().join("missing.json")).is_err());
        Ok(())
    }

    #[test]
    fn test_check_library() -> Result<()> {
        let config = AnalyzerConfig::default();
        let good = TemplateLibrary::new(vec![IconTemplate::new("ana", RgbImage::new(36, 26))])?;
        let bad = TemplateLibrary::new(vec![IconTemplate::new("ana", RgbImage::new(30, 26))])?;

        config.check_library(&good)?;
        assert!(config.check_library(&bad).is_err());
        Ok(())
    }
}
