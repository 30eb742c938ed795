//! Killfeed Computer Vision Library
//!
//! Locates hero icons in a cropped killfeed row and turns them into
//! killfeed events. The pipeline runs in four stages:
//!
//! 1. [`edge::EdgeValidator`] marks the columns where an icon border could start.
//! 2. [`scoring::IconScorer`] correlates the icon templates at those columns,
//!    picking a sparse or dense strategy depending on how many columns survived.
//! 3. [`selection::MatchSelector`] keeps at most two confident, non-overlapping matches.
//! 4. [`analysis::EventClassifier`] reads the team colors and builds the event.
//!
//! [`analysis::KillfeedAnalyzer`] wires the stages together for one row.

pub mod analysis;
pub mod edge;
pub mod error;
pub mod icon_match;
pub mod scoring;
pub mod selection;
pub mod template;
pub mod utils;

// Re-export commonly used types
pub use analysis::{AnalyzerConfig, KillfeedAnalyzer, KillfeedLayout, MatchingConfig, analyze_rows};
pub use edge::{EdgeMask, EdgeValidator};
pub use error::KillfeedError;
pub use icon_match::{IconMatch, IconMatchCollection};
pub use scoring::{DenseScorer, IconScorer, ScoringStrategy, SparseScorer};
pub use selection::{MatchSelector, Selection};
pub use template::{IconTemplate, TemplateLibrary, TemplateLoader, TemplateMatcher};

pub use killfeed_core::{EventKind, FrameContext, KillfeedEvent, TeamProfile};

// Error handling
pub type Result<T> = anyhow::Result<T>;

/// Core traits for the CV system
pub mod traits {
    use super::*;
    use image::RgbImage;

    /// Produces raw icon candidates for a row. Implementations may return
    /// overlapping or duplicate candidates; the selector sorts them out.
    pub trait IconScoring {
        fn score_icons(&self, row: &RgbImage, mask: &EdgeMask) -> Result<Vec<IconMatch>>;
    }
}
