//! Image loading and pixel helpers built on the `image` crate

use crate::Result;
use crate::error::KillfeedError;
use anyhow::Context;
use image::{GrayImage, Luma, RgbImage, imageops};
use std::path::Path;

/// Image utility functions
pub struct ImageUtils;

impl ImageUtils {
    /// Load image as RGB, dropping any alpha channel
    pub fn load_rgb<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
        let img = image::open(&path)
            .with_context(|| format!("Failed to open image: {:?}", path.as_ref()))?;
        Ok(img.to_rgb8())
    }

    /// Save RGB image, format chosen by extension
    pub fn save_rgb<P: AsRef<Path>>(image: &RgbImage, path: P) -> Result<()> {
        image
            .save(&path)
            .with_context(|| format!("Failed to save image: {:?}", path.as_ref()))
    }

    /// One colour channel as a gray image, grown by `pad` pixels on every side.
    /// The new pixels repeat the nearest edge pixel.
    pub fn padded_channel(image: &RgbImage, channel: usize, pad: u32) -> GrayImage {
        let (width, height) = image.dimensions();
        let max_x = width.saturating_sub(1);
        let max_y = height.saturating_sub(1);

        GrayImage::from_fn(width + 2 * pad, height + 2 * pad, |x, y| {
            let sx = x.saturating_sub(pad).min(max_x);
            let sy = y.saturating_sub(pad).min(max_y);
            Luma([image.get_pixel(sx, sy)[channel]])
        })
    }

    /// Copy a `width x height` patch whose top-left corner is `(x, 0)`.
    pub fn crop_columns(image: &RgbImage, x: u32, width: u32, height: u32) -> Result<RgbImage> {
        let (row_width, row_height) = image.dimensions();
        if height > row_height {
            return Err(KillfeedError::dimension_mismatch(
                "patch taller than row",
                (width, height),
                (row_width, row_height),
            )
            .into());
        }
        if x.checked_add(width).is_none_or(|end| end > row_width) {
            return Err(KillfeedError::OutOfBounds { x, width, row_width }.into());
        }

        Ok(imageops::crop_imm(image, x, 0, width, height).to_image())
    }

    /// Pixel of the first image row at column `x`, clamped into the image.
    pub fn sample_top_row(image: &RgbImage, x: i64) -> [u8; 3] {
        let max_x = i64::from(image.width().saturating_sub(1));
        let x = x.clamp(0, max_x) as u32;
        image.get_pixel(x, 0).0
    }
}
