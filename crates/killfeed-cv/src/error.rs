//! Contract violations raised by the pipeline.
//!
//! Ambiguous rows are never errors; they come back as "no event". These
//! variants are for inputs the pipeline cannot compare at all.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KillfeedError {
    #[error("{what}: expected {expected:?}, found {found:?}")]
    DimensionMismatch {
        what: String,
        expected: (u32, u32),
        found: (u32, u32),
    },

    #[error("icon template library is empty")]
    EmptyLibrary,

    #[error("invalid icon position {0}, expected 0 (left) or 1 (right)")]
    InvalidPosition(u8),

    #[error("patch at x={x} with width {width} exceeds row width {row_width}")]
    OutOfBounds { x: u32, width: u32, row_width: u32 },
}

impl KillfeedError {
    pub fn dimension_mismatch(
        what: impl Into<String>,
        expected: (u32, u32),
        found: (u32, u32),
    ) -> Self {
        KillfeedError::DimensionMismatch {
            what: what.into(),
            expected,
            found,
        }
    }
}
