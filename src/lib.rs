//! Brick Game (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, the
//! integration tests and the benches can use `brick_game::{core,engine,input,term,types}`.

pub use brick_game_core as core;
pub use brick_game_engine as engine;
pub use brick_game_input as input;
pub use brick_game_term as term;
pub use brick_game_types as types;
