//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds both brick games behind one polling contract,
//! [`BrickGame`]: the caller injects user actions and periodically asks the
//! engine to advance one step and hand back a [`GameInfo`] snapshot. Engines
//! do no I/O of their own apart from the injected [`HighScoreStore`], own no
//! timers and never fail; invalid input is a no-op.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 playfield with row clearing
//! - [`pieces`]: immutable tetromino rotation table
//! - [`rng`]: seeded LCG for food and piece draws
//! - [`scoring`]: points, levels and step-interval curves
//! - [`snapshot`]: the render-ready [`GameInfo`] value
//! - [`high_score`]: persistence port plus file and in-memory stores
//! - [`snake`]: [`SnakeGame`]
//! - [`tetris`]: [`TetrisGame`]
//!
//! # Pacing
//!
//! Engines advance exactly one step per `advance_and_snapshot` call. The
//! caller waits `step_interval_ms` of the last snapshot before the next call.
//!
//! # Example
//!
//! ```
//! use brick_game_core::{BrickGame, MemoryHighScore, SnakeGame};
//! use brick_game_core::types::{GameState, UserAction};
//!
//! let mut game = SnakeGame::new(12345, MemoryHighScore::default());
//! game.apply_action(UserAction::Start, false);
//!
//! let info = game.advance_and_snapshot();
//! assert_eq!(info.state, GameState::Running);
//! assert_eq!(info.score, 0);
//! ```

pub mod board;
pub mod high_score;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snake;
pub mod snapshot;
pub mod tetris;

pub use brick_game_types as types;

pub use board::{Board, BoardGrid};
pub use high_score::{FileHighScore, HighScoreError, HighScoreStore, MemoryHighScore, NoHighScore};
pub use pieces::{get_shape, preview_grid, PieceGrid};
pub use rng::SimpleRng;
pub use snake::SnakeGame;
pub use snapshot::GameInfo;
pub use tetris::{Piece, PiecePhase, TetrisGame};

use types::UserAction;

/// Uniform contract of both engines
pub trait BrickGame {
    /// Feed one user action. `hold` reports a held key and is currently
    /// ignored by both engines.
    fn apply_action(&mut self, action: UserAction, hold: bool);

    /// Advance one discrete step and return a copy of the resulting state
    fn advance_and_snapshot(&mut self) -> GameInfo;

    /// Copy of the current state without advancing
    fn snapshot(&self) -> GameInfo;
}

impl<G: BrickGame + ?Sized> BrickGame for Box<G> {
    fn apply_action(&mut self, action: UserAction, hold: bool) {
        (**self).apply_action(action, hold)
    }

    fn advance_and_snapshot(&mut self) -> GameInfo {
        (**self).advance_and_snapshot()
    }

    fn snapshot(&self) -> GameInfo {
        (**self).snapshot()
    }
}
