//! Utility modules

pub mod image;
pub mod nms;

pub use self::image::ImageUtils;
pub use nms::{ColumnSuppressor, suppression_window};
