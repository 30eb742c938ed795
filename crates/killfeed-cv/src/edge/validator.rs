//! Finds columns where a killfeed icon can start.
//!
//! Every hero icon is framed by two vertical borders. A column `i` is a
//! candidate left edge when a near-complete vertical edge sits at
//! `i-2..i+2` and a slightly gappier one sits at `i+33..i+37`.

use super::EdgeMask;
use crate::utils::ImageUtils;
use image::{GrayImage, RgbImage, imageops};
use imageproc::edges::canny;
use tracing::trace;

/// Columns before the first testable position.
const LEFT_MARGIN: usize = 2;
/// Columns after the last testable position.
const RIGHT_MARGIN: usize = 38;
/// Window searched for the left border, relative to the candidate column.
const LEFT_WINDOW: (usize, usize) = (2, 2);
/// Window searched for the right border, relative to the candidate column.
const RIGHT_WINDOW: (usize, usize) = (33, 37);
/// Rows the left border may miss.
const LEFT_MISSING_ROWS: f64 = 2.0;
/// Rows the right border may miss.
const RIGHT_MISSING_ROWS: f64 = 5.0;

#[derive(Debug, Clone)]
pub struct EdgeValidator {
    icon_height: u32,
    canny_low: f32,
    canny_high: f32,
}

impl EdgeValidator {
    pub fn new(icon_height: u32, canny_low: f32, canny_high: f32) -> Self {
        Self {
            icon_height,
            canny_low,
            canny_high,
        }
    }

    /// Binary Canny edge map of the row.
    ///
    /// Canny runs on each colour channel separately and the maps are merged,
    /// so a border between two colours of equal brightness still shows up.
    /// `canny` never marks the outermost pixels of its input, so every
    /// channel is padded by one replicated pixel on each side first.
    pub fn edge_map(&self, row: &RgbImage) -> GrayImage {
        let (width, height) = row.dimensions();
        let mut merged = GrayImage::new(width, height);

        for channel in 0..3 {
            let padded = ImageUtils::padded_channel(row, channel, 1);
            let edges = canny(&padded, self.canny_low, self.canny_high);
            let edges = imageops::crop_imm(&edges, 1, 1, width, height).to_image();

            for (out, edge) in merged.pixels_mut().zip(edges.pixels()) {
                out[0] = out[0].max(edge[0]);
            }
        }

        merged
    }

    /// Fraction of rows holding a vertical edge at each column.
    ///
    /// Each edge pixel is widened to two columns (itself and the one to its
    /// right) so a border that jitters by a pixel between rows still counts.
    /// Column 0 has no left neighbour and always spans to zero.
    pub fn column_profile(&self, edges: &GrayImage) -> Vec<f64> {
        let (width, height) = edges.dimensions();
        let mut sums = vec![0u64; width as usize];

        for y in 0..height {
            for x in 1..width {
                let here = u64::from(edges.get_pixel(x, y)[0]);
                let left = u64::from(edges.get_pixel(x - 1, y)[0]);
                sums[x as usize] += here + left;
            }
        }

        let norm = 255.0 * f64::from(self.icon_height);
        sums.into_iter().map(|sum| sum as f64 / norm).collect()
    }

    /// Validate every column of a row
    pub fn validate(&self, row: &RgbImage) -> EdgeMask {
        let profile = self.column_profile(&self.edge_map(row));
        self.validate_profile(&profile)
    }

    /// Mask from a precomputed column profile
    pub fn validate_profile(&self, profile: &[f64]) -> EdgeMask {
        let width = profile.len();
        let height = f64::from(self.icon_height);
        let left_threshold = (height - LEFT_MISSING_ROWS) / height;
        let right_threshold = (height - RIGHT_MISSING_ROWS) / height;

        let mut mask = vec![false; width];
        for i in LEFT_MARGIN..width.saturating_sub(RIGHT_MARGIN) {
            let left = window_max(&profile[i - LEFT_WINDOW.0..i + LEFT_WINDOW.1]);
            let right = window_max(&profile[i + RIGHT_WINDOW.0..i + RIGHT_WINDOW.1]);

            if left >= left_threshold && right >= right_threshold {
                trace!(x = i, left, right, "column passes edge validation");
                mask[i] = true;
            }
        }

        EdgeMask::from_vec(mask)
    }
}

fn window_max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}
