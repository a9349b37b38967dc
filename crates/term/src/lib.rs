//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It avoids
//! widget/layout libraries and renders a `GameInfo` snapshot into a simple
//! framebuffer that is then diffed and flushed to the terminal.
//!
//! Goals:
//! - Keep `core` deterministic and free of I/O
//! - One view for both games; the snapshot carries everything it needs
//! - Precise control over aspect ratio (2 chars wide per cell by default)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use brick_game_core as core;
pub use brick_game_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::TerminalRenderer;
