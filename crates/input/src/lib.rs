//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::UserAction`]s. Both games
//! share one binding table; the engines decide which actions matter in their
//! current state.

pub mod map;

pub use brick_game_types as types;

pub use map::{handle_key_event, is_hold, translate};
