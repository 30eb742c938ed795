pub mod profile;

pub use profile::{FrameContext, TeamProfile};
