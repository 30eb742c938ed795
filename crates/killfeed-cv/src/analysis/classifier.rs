//! Team and event classification of selected icons.
//!
//! A killfeed entry draws each hero's team color just outside its icon: left
//! of the left icon and right of the right icon. The sampled color is matched
//! to the closer of the two team colors.

use crate::error::KillfeedError;
use crate::icon_match::IconMatch;
use crate::selection::Selection;
use crate::utils::ImageUtils;
use image::RgbImage;
use killfeed_core::{FrameContext, KillfeedEvent, TeamProfile};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Where an icon sits in its killfeed entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IconPosition {
    Left,
    Right,
}

impl TryFrom<u8> for IconPosition {
    type Error = KillfeedError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(IconPosition::Left),
            1 => Ok(IconPosition::Right),
            other => Err(KillfeedError::InvalidPosition(other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventClassifier {
    icon_width: u32,
    sample_offset: u32,
}

impl EventClassifier {
    pub fn new(icon_width: u32, sample_offset: u32) -> Self {
        Self {
            icon_width,
            sample_offset,
        }
    }

    /// Column whose color identifies the icon's team.
    pub fn sample_column(&self, icon: &IconMatch, position: IconPosition) -> i64 {
        let x = i64::from(icon.x);
        match position {
            IconPosition::Left => x - i64::from(self.sample_offset),
            IconPosition::Right => x + i64::from(self.icon_width) + i64::from(self.sample_offset),
        }
    }

    pub fn team_of<'c>(
        &self,
        row: &RgbImage,
        icon: &IconMatch,
        position: IconPosition,
        context: &'c FrameContext,
    ) -> &'c TeamProfile {
        let column = self.sample_column(icon, position);
        let pixel = ImageUtils::sample_top_row(row, column);
        let team = context.nearest_team(pixel);
        trace!(icon = %icon.name, ?position, column, ?pixel, team = %team.name, "team sample");
        team
    }

    /// Turn a selection into an event; `None` unless the selection is one.
    pub fn classify(
        &self,
        row: &RgbImage,
        selection: &Selection,
        context: &FrameContext,
    ) -> Option<KillfeedEvent> {
        match selection {
            Selection::Empty | Selection::Partial(_) => None,
            Selection::Single(icon) => {
                let team = self.team_of(row, icon, IconPosition::Right, context);
                Some(KillfeedEvent::self_elimination(
                    context.time,
                    icon.name.clone(),
                    team.name.clone(),
                ))
            }
            Selection::Pair { left, right } => {
                let left_team = self.team_of(row, left, IconPosition::Left, context);
                let right_team = self.team_of(row, right, IconPosition::Right, context);
                Some(KillfeedEvent::between(
                    context.time,
                    (left.name.clone(), left_team.name.clone()),
                    (right.name.clone(), right_team.name.clone()),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use killfeed_core::EventKind;

    const RED: (u8, u8, u8) = (200, 40, 40);
    const BLUE: (u8, u8, u8) = (40, 40, 200);

    fn context() -> FrameContext {
        FrameContext::new(3.0, TeamProfile::new("Red", RED), TeamProfile::new("Blue", BLUE))
    }

    /// Row painted `left` up to column 100 and `right` after.
    fn two_tone(left: (u8, u8, u8), right: (u8, u8, u8)) -> RgbImage {
        RgbImage::from_fn(300, 26, |x, _| {
            let (r, g, b) = if x < 100 { left } else { right };
            Rgb([r, g, b])
        })
    }

    #[test]
    fn test_position_codes() {
        assert_eq!(IconPosition::try_from(0), Ok(IconPosition::Left));
        assert_eq!(IconPosition::try_from(1), Ok(IconPosition::Right));
        assert_eq!(IconPosition::try_from(2), Err(KillfeedError::InvalidPosition(2)));
    }

    #[test]
    fn test_sample_columns() {
        let classifier = EventClassifier::new(36, 5);
        let icon = IconMatch::new("ana", 0.9, 40);
        assert_eq!(classifier.sample_column(&icon, IconPosition::Left), 35);
        assert_eq!(classifier.sample_column(&icon, IconPosition::Right), 81);
    }

    #[test]
    fn test_elimination_and_resurrection() {
        let classifier = EventClassifier::new(36, 5);
        let selection = Selection::Pair {
            left: IconMatch::new("ana", 0.9, 20),
            right: IconMatch::new("genji", 0.8, 200),
        };

        let event = classifier
            .classify(&two_tone(RED, BLUE), &selection, &context())
            .expect("event");
        assert_eq!(event.kind, EventKind::Elimination);
        assert_eq!(event.time, 3.0);
        assert_eq!(event.team1.as_deref(), Some("Red"));
        assert_eq!(event.team2.as_deref(), Some("Blue"));

        let event = classifier
            .classify(&two_tone(BLUE, BLUE), &selection, &context())
            .expect("event");
        assert_eq!(event.kind, EventKind::Resurrection);
    }

    #[test]
    fn test_single_uses_right_sample() {
        let classifier = EventClassifier::new(36, 5);
        let selection = Selection::Single(IconMatch::new("junkrat", 0.9, 50));

        // Sample lands at 50 + 36 + 5 = 91, still on the left color.
        let event = classifier
            .classify(&two_tone(BLUE, RED), &selection, &context())
            .expect("event");
        assert_eq!(event.kind, EventKind::SelfElimination);
        assert_eq!(event.characters(), vec!["junkrat"]);
        assert_eq!(event.team1, None);
        assert_eq!(event.team2.as_deref(), Some("Blue"));
    }

    #[test]
    fn test_no_event_for_empty_or_partial() {
        let classifier = EventClassifier::new(36, 5);
        let row = two_tone(RED, BLUE);
        assert!(classifier.classify(&row, &Selection::Empty, &context()).is_none());
        let partial = Selection::Partial(IconMatch::new("ana", 0.9, 20));
        assert!(classifier.classify(&row, &partial, &context()).is_none());
    }
}
