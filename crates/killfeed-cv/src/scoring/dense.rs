//! Dense scoring: one full correlation pass per template.
//!
//! Each template contributes at most its two best non-overlapping peaks,
//! and only peaks sitting on an edge-valid column are kept.

use crate::Result;
use crate::edge::EdgeMask;
use crate::icon_match::IconMatch;
use crate::template::{TemplateLibrary, TemplateMatcher};
use crate::traits::IconScoring;
use crate::utils::suppression_window;
use image::RgbImage;
use tracing::trace;

/// Written over suppressed scores so they never win again.
const SUPPRESSED: f64 = f64::MIN;

pub struct DenseScorer<'a> {
    matcher: TemplateMatcher<'a>,
    half_width: u32,
}

impl<'a> DenseScorer<'a> {
    pub fn new(library: &'a TemplateLibrary, half_width: u32) -> Self {
        Self {
            matcher: TemplateMatcher::new(library),
            half_width,
        }
    }
}

/// Column and value of the first maximum.
fn first_max(surface: &[f64]) -> Option<(usize, f64)> {
    surface
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best, (x, score)| match best {
            Some((_, best_score)) if score <= best_score => best,
            // NaN never displaces a real score
            Some(_) if score.is_nan() => best,
            _ => Some((x, score)),
        })
}

impl IconScoring for DenseScorer<'_> {
    fn score_icons(&self, row: &RgbImage, mask: &EdgeMask) -> Result<Vec<IconMatch>> {
        let library = self.matcher.library();
        let mut result = Vec::new();

        for (index, template) in library.iter().enumerate() {
            // Owned working copy; suppression never touches the row.
            let mut surface = self.matcher.correlate(row, index)?;

            let Some((first_x, first_score)) = first_max(&surface) else {
                continue;
            };
            if mask.is_valid(first_x as u32) {
                result.push(IconMatch::new(template.name.clone(), first_score, first_x as u32));
            }

            let window = suppression_window(first_x, self.half_width as usize, surface.len());
            surface[window].fill(SUPPRESSED);

            if let Some((second_x, second_score)) = first_max(&surface) {
                if mask.is_valid(second_x as u32) {
                    result.push(IconMatch::new(
                        template.name.clone(),
                        second_score,
                        second_x as u32,
                    ));
                }
            }

            trace!(template = %template.name, first_x, first_score, "dense peaks");
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_max_prefers_earliest() {
        assert_eq!(first_max(&[0.1, 0.5, 0.2, 0.5]), Some((1, 0.5)));
        assert_eq!(first_max(&[]), None);
        assert_eq!(first_max(&[f64::NAN, 0.3]), Some((1, 0.3)));
    }
}
