//! Row-level analysis: configuration, team/event classification and the
//! analyzer that runs the whole pipeline on one killfeed row.

pub mod analyzer;
pub mod batch;
pub mod classifier;
pub mod config;

pub use analyzer::KillfeedAnalyzer;
pub use batch::analyze_rows;
pub use classifier::{EventClassifier, IconPosition};
pub use config::{AnalyzerConfig, KillfeedLayout, MatchingConfig};
