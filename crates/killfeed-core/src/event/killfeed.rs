use serde::{Deserialize, Serialize};
use std::fmt;

/// What a killfeed row reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Left hero eliminated the right hero.
    Elimination,
    /// Left hero brought the right hero, a teammate, back.
    Resurrection,
    /// A single hero died without an opposing participant.
    SelfElimination,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Elimination => "elimination",
            EventKind::Resurrection => "resurrection",
            EventKind::SelfElimination => "self_elimination",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recognized killfeed entry.
///
/// The right-hand participant is always present. A self-elimination has no
/// left-hand participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KillfeedEvent {
    pub kind: EventKind,
    pub time: f64,
    pub character1: Option<String>,
    pub character2: String,
    pub team1: Option<String>,
    pub team2: Option<String>,
}

impl KillfeedEvent {
    pub fn self_elimination(
        time: f64,
        character: impl Into<String>,
        team: impl Into<String>,
    ) -> Self {
        Self {
            kind: EventKind::SelfElimination,
            time,
            character1: None,
            character2: character.into(),
            team1: None,
            team2: Some(team.into()),
        }
    }

    /// Two-hero event; same team on both sides means a resurrection.
    pub fn between(
        time: f64,
        left: (impl Into<String>, impl Into<String>),
        right: (impl Into<String>, impl Into<String>),
    ) -> Self {
        let (character1, team1) = (left.0.into(), left.1.into());
        let (character2, team2) = (right.0.into(), right.1.into());

        let kind = if team1 == team2 {
            EventKind::Resurrection
        } else {
            EventKind::Elimination
        };

        Self {
            kind,
            time,
            character1: Some(character1),
            character2,
            team1: Some(team1),
            team2: Some(team2),
        }
    }

    /// Character names, left to right.
    pub fn characters(&self) -> Vec<&str> {
        self.character1
            .as_deref()
            .into_iter()
            .chain(std::iter::once(self.character2.as_str()))
            .collect()
    }
}

impl fmt::Display for KillfeedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>8.2}s  ", self.time)?;
        if let Some(character1) = &self.character1 {
            write!(f, "{} ({}) -> ", character1, self.team1.as_deref().unwrap_or("?"))?;
        }
        write!(
            f,
            "{} ({})  [{}]",
            self.character2,
            self.team2.as_deref().unwrap_or("?"),
            self.kind
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_between_infers_kind() {
        let elim = KillfeedEvent::between(1.0, ("ana", "Blue"), ("genji", "Red"));
        assert_eq!(elim.kind, EventKind::Elimination);
        assert_eq!(elim.characters(), vec!["ana", "genji"]);

        let res = KillfeedEvent::between(1.0, ("mercy", "Blue"), ("reinhardt", "Blue"));
        assert_eq!(res.kind, EventKind::Resurrection);
    }

    #[test]
    fn test_display() {
        let event = KillfeedEvent::self_elimination(12.5, "junkrat", "Red");
        assert_eq!(event.to_string(), "   12.50s  junkrat (Red)  [self_elimination]");
    }
}
