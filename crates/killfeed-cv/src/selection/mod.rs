//! Match selection

pub mod selector;

pub use selector::{MatchSelector, Selection, TopThree};
