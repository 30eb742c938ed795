//! Domain records for killfeed analysis: teams, frame context and events.

pub mod event;
pub mod team;

pub use event::{EventKind, KillfeedEvent};
pub use team::{FrameContext, TeamProfile};
