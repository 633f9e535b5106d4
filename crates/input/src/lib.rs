//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameCommand`]s. The map is
//! status-aware so a finished or paused round ignores movement keys.

pub mod map;

pub use blockfall_types as types;

pub use map::{map_key, should_quit};
