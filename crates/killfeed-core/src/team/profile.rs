use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A team as it appears on screen: its display name and the plate color
/// drawn next to its heroes in the killfeed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamProfile {
    pub name: String,
    pub rgb: (u8, u8, u8),
}

impl TeamProfile {
    pub fn new(name: impl Into<String>, rgb: (u8, u8, u8)) -> Self {
        Self {
            name: name.into(),
            rgb,
        }
    }

    /// Euclidean distance between a sampled pixel and this team's color.
    pub fn distance_to(&self, pixel: [u8; 3]) -> f64 {
        let (r, g, b) = self.rgb;
        [r, g, b]
            .iter()
            .zip(pixel.iter())
            .map(|(&a, &b)| {
                let d = f64::from(a) - f64::from(b);
                d * d
            })
            .sum::<f64>()
            .sqrt()
    }
}

impl fmt::Display for TeamProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.rgb;
        write!(f, "{}={},{},{}", self.name, r, g, b)
    }
}

/// Parses `Name=R,G,B`.
impl FromStr for TeamProfile {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (name, color) = s
            .split_once('=')
            .with_context(|| format!("Invalid team '{}' (expected Name=R,G,B)", s))?;

        let name = name.trim();
        if name.is_empty() {
            bail!("Invalid team '{}': empty name", s);
        }

        let parts: Vec<&str> = color.split(',').map(|p| p.trim()).collect();
        if parts.len() != 3 {
            bail!("Invalid color format '{}' (expected R,G,B)", color);
        }

        let mut channels = [0u8; 3];
        for (channel, part) in channels.iter_mut().zip(&parts) {
            *channel = part
                .parse()
                .with_context(|| format!("Invalid color channel '{}' in '{}'", part, s))?;
        }

        Ok(Self::new(name, (channels[0], channels[1], channels[2])))
    }
}

/// Everything the enclosing frame analyzer hands to a row: when the frame was
/// captured and which teams are playing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameContext {
    /// Capture time of the frame, in seconds.
    pub time: f64,
    pub team1: TeamProfile,
    pub team2: TeamProfile,
}

impl FrameContext {
    pub fn new(time: f64, team1: TeamProfile, team2: TeamProfile) -> Self {
        Self { time, team1, team2 }
    }

    /// Team whose color is closest to `pixel`. Ties go to team one.
    pub fn nearest_team(&self, pixel: [u8; 3]) -> &TeamProfile {
        if self.team1.distance_to(pixel) <= self.team2.distance_to(pixel) {
            &self.team1
        } else {
            &self.team2
        }
    }
}

impl Default for FrameContext {
    fn default() -> Self {
        Self {
            time: 0.0,
            team1: TeamProfile::new("Team 1", (88, 160, 220)),
            team2: TeamProfile::new("Team 2", (230, 60, 70)),
        }
    }
}
