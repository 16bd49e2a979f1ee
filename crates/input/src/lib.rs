//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. There is no
//! repeat handling of its own: every key press event, including the terminal's
//! auto-repeat, becomes exactly one action.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, is_press, should_quit};
