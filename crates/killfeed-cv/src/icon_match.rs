//! Icon match records and suppression of overlapping matches
//!
//! Core abstraction for representing the intermediate result of a
//! recognized icon in a killfeed row.

use crate::utils::nms::ColumnSuppressor;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A template that matched somewhere in the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconMatch {
    /// Name of the matched template.
    pub name: String,
    /// Normalized correlation score, higher is better.
    pub score: f64,
    /// Column of the icon's left edge in the row image.
    pub x: u32,
}

impl IconMatch {
    pub fn new(name: impl Into<String>, score: f64, x: u32) -> Self {
        Self {
            name: name.into(),
            score,
            x,
        }
    }

    /// Check whether two matches sit within `half_width` columns of each other
    pub fn overlaps(&self, other: &IconMatch, half_width: u32) -> bool {
        self.x.abs_diff(other.x) <= half_width
    }

    /// Descending by score, NaN last.
    fn by_score_desc(a: &IconMatch, b: &IconMatch) -> Ordering {
        match (a.score.is_nan(), b.score.is_nan()) {
            (false, false) => b.score.total_cmp(&a.score),
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (true, true) => Ordering::Equal,
        }
    }
}

impl fmt::Display for IconMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IconMatch<{}, {:.4}, {}>", self.name, self.score, self.x)
    }
}

/// Collection of icon matches with batch operations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IconMatchCollection {
    matches: Vec<IconMatch>,
}

impl IconMatchCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(matches: Vec<IconMatch>) -> Self {
        Self { matches }
    }

    pub fn push(&mut self, icon: IconMatch) {
        self.matches.push(icon);
    }

    pub fn as_slice(&self) -> &[IconMatch] {
        &self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IconMatch> {
        self.matches.iter()
    }

    /// Sort by score (descending). Stable, so equal scores keep their order.
    pub fn sort_by_score(&mut self) {
        self.matches.sort_by(IconMatch::by_score_desc);
    }

    /// Filter by score threshold (inclusive)
    pub fn filter_by_score(mut self, threshold: f64) -> Self {
        self.matches.retain(|icon| icon.score >= threshold);
        self
    }

    /// Keep the best match in every neighbourhood of `half_width` columns.
    ///
    /// Matches are visited best first. A match is kept unless its column is
    /// already covered by a kept match's window; a kept match then covers
    /// `x - half_width ..= x + half_width`.
    pub fn suppress_overlaps(mut self, half_width: u32, row_width: u32) -> Self {
        if self.matches.is_empty() {
            return self;
        }

        self.sort_by_score();

        let mut suppressor = ColumnSuppressor::new(row_width as usize, half_width as usize);
        let mut keep = Vec::new();

        for icon in self.matches {
            if suppressor.claim(icon.x as usize) {
                keep.push(icon);
            }
        }

        Self::from_vec(keep)
    }

    pub fn into_vec(self) -> Vec<IconMatch> {
        self.matches
    }
}

impl IntoIterator for IconMatchCollection {
    type Item = IconMatch;
    type IntoIter = std::vec::IntoIter<IconMatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.into_iter()
    }
}

impl FromIterator<IconMatch> for IconMatchCollection {
    fn from_iter<I: IntoIterator<Item = IconMatch>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}
