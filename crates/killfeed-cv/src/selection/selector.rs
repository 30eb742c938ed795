//! Reduces raw icon candidates to the at most two icons of a killfeed entry.

use crate::edge::EdgeMask;
use crate::icon_match::IconMatch;
use tracing::debug;

/// Score an empty slot compares as; real candidates must beat it.
const EMPTY_SLOT_SCORE: f64 = -1.0;

/// Outcome of selection for one row
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// No confident icon in the row.
    Empty,
    /// One icon, but too far left to be the only icon of an entry. The row is
    /// probably still sliding in; a later frame should read it fully.
    Partial(IconMatch),
    /// One icon at the right-hand position.
    Single(IconMatch),
    /// Two icons, ordered by column.
    Pair { left: IconMatch, right: IconMatch },
}

impl Selection {
    /// Accepted icons, left to right. Partial reads yield nothing.
    pub fn icons(&self) -> Vec<&IconMatch> {
        match self {
            Selection::Empty | Selection::Partial(_) => Vec::new(),
            Selection::Single(icon) => vec![icon],
            Selection::Pair { left, right } => vec![left, right],
        }
    }

    pub fn is_event(&self) -> bool {
        matches!(self, Selection::Single(_) | Selection::Pair { .. })
    }
}

/// The three best candidates seen so far, best first.
///
/// A candidate only moves into a slot if it is strictly better, so the
/// earlier of two equal scores always wins.
#[derive(Debug, Clone, Default)]
pub struct TopThree {
    slots: [Option<IconMatch>; 3],
}

impl TopThree {
    fn slot_score(&self, index: usize) -> f64 {
        self.slots[index].as_ref().map_or(EMPTY_SLOT_SCORE, |m| m.score)
    }

    pub fn offer(&mut self, candidate: IconMatch) {
        if candidate.score > self.slot_score(0) {
            self.slots[2] = self.slots[1].take();
            self.slots[1] = self.slots[0].take();
            self.slots[0] = Some(candidate);
        } else if candidate.score > self.slot_score(1) {
            self.slots[2] = self.slots[1].take();
            self.slots[1] = Some(candidate);
        } else if candidate.score > self.slot_score(2) {
            self.slots[2] = Some(candidate);
        }
    }

    pub fn into_vec(self) -> Vec<IconMatch> {
        self.slots.into_iter().flatten().collect()
    }
}

impl FromIterator<IconMatch> for TopThree {
    fn from_iter<I: IntoIterator<Item = IconMatch>>(iter: I) -> Self {
        let mut top = TopThree::default();
        for candidate in iter {
            top.offer(candidate);
        }
        top
    }
}

#[derive(Debug, Clone)]
pub struct MatchSelector {
    threshold: f64,
    half_width: u32,
    /// Leftmost column a lone icon may start at.
    single_icon_min_x: u32,
}

impl MatchSelector {
    pub fn new(
        threshold: f64,
        half_width: u32,
        row_width: u32,
        max_second_icon_width: u32,
    ) -> Self {
        Self {
            threshold,
            half_width,
            single_icon_min_x: row_width.saturating_sub(max_second_icon_width),
        }
    }

    /// Survivors of the top three: confident, edge-valid and not overlapping
    /// a better survivor. Best first.
    pub fn accepted(
        &self,
        candidates: impl IntoIterator<Item = IconMatch>,
        mask: &EdgeMask,
    ) -> Vec<IconMatch> {
        let top: TopThree = candidates.into_iter().collect();

        let mut accepted: Vec<IconMatch> = Vec::with_capacity(3);
        for candidate in top.into_vec() {
            if candidate.score < self.threshold || !mask.is_valid(candidate.x) {
                continue;
            }
            if accepted.iter().any(|kept| kept.overlaps(&candidate, self.half_width)) {
                continue;
            }
            accepted.push(candidate);
        }
        accepted
    }

    pub fn select(
        &self,
        candidates: impl IntoIterator<Item = IconMatch>,
        mask: &EdgeMask,
    ) -> Selection {
        let mut accepted = self.accepted(candidates, mask).into_iter();

        let selection = match (accepted.next(), accepted.next()) {
            (None, _) => Selection::Empty,
            (Some(only), None) if only.x < self.single_icon_min_x => Selection::Partial(only),
            (Some(only), None) => Selection::Single(only),
            (Some(a), Some(b)) => {
                if a.x <= b.x {
                    Selection::Pair { left: a, right: b }
                } else {
                    Selection::Pair { left: b, right: a }
                }
            }
        };

        debug!(?selection, "icon selection");
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_valid(width: usize) -> EdgeMask {
        EdgeMask::from_vec(vec![true; width])
    }

    fn selector() -> MatchSelector {
        MatchSelector::new(0.6, 5, 300, 100)
    }

    #[test]
    fn test_top_three_ties_keep_earlier() {
        let top: TopThree = vec![
            IconMatch::new("first", 0.8, 10),
            IconMatch::new("second", 0.8, 50),
            IconMatch::new("third", 0.8, 90),
            IconMatch::new("fourth", 0.8, 130),
        ]
        .into_iter()
        .collect();

        let names: Vec<_> = top.into_vec().into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_top_three_insertion_order() {
        let top: TopThree = vec![
            IconMatch::new("c", 0.3, 0),
            IconMatch::new("a", 0.9, 0),
            IconMatch::new("d", 0.1, 0),
            IconMatch::new("b", 0.5, 0),
            IconMatch::new("e", 0.4, 0),
        ]
        .into_iter()
        .collect();

        let names: Vec<_> = top.into_vec().into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["a", "b", "e"]);
    }

    #[test]
    fn test_threshold_boundary() {
        let mask = all_valid(300);
        let accepted = selector().accepted(
            vec![IconMatch::new("exact", 0.6, 220), IconMatch::new("below", 0.5999, 40)],
            &mask,
        );
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].name, "exact");
    }

    #[test]
    fn test_mask_gate() {
        let mut columns = vec![true; 300];
        columns[40] = false;
        let mask = EdgeMask::from_vec(columns);

        let selection = selector().select(
            vec![IconMatch::new("off_edge", 0.95, 40), IconMatch::new("on_edge", 0.7, 230)],
            &mask,
        );
        assert_eq!(selection, Selection::Single(IconMatch::new("on_edge", 0.7, 230)));
    }

    #[test]
    fn test_only_top_three_are_considered() {
        let mask = all_valid(300);
        // The fourth-best is never looked at, even though the top three collapse to one.
        let selection = selector().select(
            vec![
                IconMatch::new("a", 0.9, 220),
                IconMatch::new("b", 0.85, 222),
                IconMatch::new("c", 0.8, 224),
                IconMatch::new("d", 0.75, 40),
            ],
            &mask,
        );
        assert_eq!(selection, Selection::Single(IconMatch::new("a", 0.9, 220)));
    }

    #[test]
    fn test_accepted_never_overlap() {
        let mask = all_valid(300);
        let accepted = selector().accepted(
            vec![
                IconMatch::new("a", 0.9, 100),
                IconMatch::new("a", 0.88, 105),
                IconMatch::new("b", 0.7, 106),
            ],
            &mask,
        );
        let xs: Vec<u32> = accepted.iter().map(|m| m.x).collect();
        assert_eq!(xs, vec![100, 106]);
    }

    #[test]
    fn test_partial_single_is_deferred() {
        let mask = all_valid(300);
        let selection = selector().select(vec![IconMatch::new("lucio", 0.9, 150)], &mask);
        assert_eq!(selection, Selection::Partial(IconMatch::new("lucio", 0.9, 150)));
        assert!(!selection.is_event());
        assert!(selection.icons().is_empty());

        let selection = selector().select(vec![IconMatch::new("lucio", 0.9, 200)], &mask);
        assert!(matches!(selection, Selection::Single(_)));
    }

    #[test]
    fn test_pair_is_ordered_by_column() {
        let mask = all_valid(300);
        let selection = selector().select(
            vec![
                IconMatch::new("right", 0.95, 220),
                IconMatch::new("left", 0.7, 30),
                IconMatch::new("noise", 0.65, 120),
            ],
            &mask,
        );
        assert_eq!(
            selection,
            Selection::Pair {
                left: IconMatch::new("left", 0.7, 30),
                right: IconMatch::new("right", 0.95, 220),
            }
        );
    }

    #[test]
    fn test_empty() {
        let mask = all_valid(300);
        assert_eq!(selector().select(Vec::new(), &mask), Selection::Empty);
        assert_eq!(
            selector().select(vec![IconMatch::new("weak", 0.3, 220)], &mask),
            Selection::Empty
        );
    }
}
