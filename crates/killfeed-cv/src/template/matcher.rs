//! Normalized correlation-coefficient matching over RGB images
//!
//! Scores follow the usual `TM_CCOEFF_NORMED` definition: template and patch
//! are mean-centred per channel, then the dot product is divided by the
//! product of their norms. All three channels contribute to one score.

use super::{IconTemplate, TemplateLibrary};
use crate::Result;
use crate::error::KillfeedError;
use crate::icon_match::IconMatch;
use image::RgbImage;

/// Template with its per-channel mean removed, ready for repeated scoring
#[derive(Debug, Clone)]
struct CenteredTemplate {
    width: u32,
    height: u32,
    values: Vec<[f64; 3]>,
    energy: f64,
}

impl CenteredTemplate {
    fn new(image: &RgbImage) -> Self {
        let (width, height) = image.dimensions();
        let n = f64::from(width * height).max(1.0);

        let mut mean = [0.0f64; 3];
        for pixel in image.pixels() {
            for c in 0..3 {
                mean[c] += f64::from(pixel[c]);
            }
        }
        mean.iter_mut().for_each(|m| *m /= n);

        let values: Vec<[f64; 3]> = image
            .pixels()
            .map(|p| {
                [
                    f64::from(p[0]) - mean[0],
                    f64::from(p[1]) - mean[1],
                    f64::from(p[2]) - mean[2],
                ]
            })
            .collect();
        let energy: f64 = values.iter().flatten().map(|v| v * v).sum();

        Self {
            width,
            height,
            values,
            energy,
        }
    }

    /// Score against the patch of `image` whose left edge is column `x0`.
    /// Caller guarantees the patch fits.
    fn score_at(&self, image: &RgbImage, x0: u32) -> f64 {
        let n = f64::from(self.width * self.height).max(1.0);

        let mut mean = [0.0f64; 3];
        for y in 0..self.height {
            for x in 0..self.width {
                let pixel = image.get_pixel(x0 + x, y);
                for c in 0..3 {
                    mean[c] += f64::from(pixel[c]);
                }
            }
        }
        mean.iter_mut().for_each(|m| *m /= n);

        let mut numerator = 0.0;
        let mut variance = 0.0;
        for y in 0..self.height {
            for x in 0..self.width {
                let pixel = image.get_pixel(x0 + x, y);
                let centered = &self.values[(y * self.width + x) as usize];
                for c in 0..3 {
                    let d = f64::from(pixel[c]) - mean[c];
                    numerator += centered[c] * d;
                    variance += d * d;
                }
            }
        }

        let denominator = (self.energy * variance).sqrt();
        if denominator <= f64::EPSILON {
            // Flat patch or flat template: no structure to correlate.
            0.0
        } else {
            (numerator / denominator).clamp(-1.0, 1.0)
        }
    }
}

/// Correlates every template of a library against killfeed rows
#[derive(Debug, Clone)]
pub struct TemplateMatcher<'a> {
    library: &'a TemplateLibrary,
    centered: Vec<CenteredTemplate>,
}

impl<'a> TemplateMatcher<'a> {
    pub fn new(library: &'a TemplateLibrary) -> Self {
        let centered = library.iter().map(|t| CenteredTemplate::new(&t.image)).collect();
        Self { library, centered }
    }

    pub fn library(&self) -> &'a TemplateLibrary {
        self.library
    }

    /// Score two images of identical size.
    pub fn score_images(patch: &RgbImage, template: &RgbImage) -> Result<f64> {
        if patch.dimensions() != template.dimensions() {
            return Err(KillfeedError::dimension_mismatch(
                "patch and template differ in size",
                template.dimensions(),
                patch.dimensions(),
            )
            .into());
        }
        Ok(CenteredTemplate::new(template).score_at(patch, 0))
    }

    /// Best-scoring template for a patch cut to the template size.
    ///
    /// The first template in library order wins ties. Returns `None` only if
    /// no template scores above -1.
    pub fn best_match(&self, patch: &RgbImage, x: u32) -> Result<Option<IconMatch>> {
        self.check_patch(patch)?;

        let mut best: Option<(&IconTemplate, f64)> = None;
        for (template, centered) in self.library.iter().zip(&self.centered) {
            let score = centered.score_at(patch, 0);
            if score > best.map_or(-1.0, |(_, s)| s) {
                best = Some((template, score));
            }
        }

        Ok(best.map(|(template, score)| IconMatch::new(template.name.clone(), score, x)))
    }

    /// Full correlation surface of one template along the row: one score per
    /// column `0..=row_width - template_width`.
    pub fn correlate(&self, row: &RgbImage, template_index: usize) -> Result<Vec<f64>> {
        self.check_row(row)?;
        let Some(centered) = self.centered.get(template_index) else {
            return Ok(Vec::new());
        };

        let positions = row.width() - self.library.width() + 1;
        Ok((0..positions).map(|x| centered.score_at(row, x)).collect())
    }

    fn check_patch(&self, patch: &RgbImage) -> Result<()> {
        let expected = (self.library.width(), self.library.height());
        if patch.dimensions() != expected {
            return Err(KillfeedError::dimension_mismatch(
                "patch does not match template size",
                expected,
                patch.dimensions(),
            )
            .into());
        }
        Ok(())
    }

    fn check_row(&self, row: &RgbImage) -> Result<()> {
        let (width, height) = (self.library.width(), self.library.height());
        if row.height() != height {
            return Err(KillfeedError::dimension_mismatch(
                "row height must equal template height",
                (row.width(), height),
                row.dimensions(),
            )
            .into());
        }
        if row.width() < width {
            return Err(KillfeedError::OutOfBounds {
                x: 0,
                width,
                row_width: row.width(),
            }
            .into());
        }
        Ok(())
    }
}
