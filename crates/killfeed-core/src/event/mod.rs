pub mod killfeed;

pub use killfeed::{EventKind, KillfeedEvent};
