//! Snapshot module - the value handed to renderers after every step
//!
//! A [`GameInfo`] is a plain `Copy` value: the board grid, the 4x4 preview and
//! the counters, with no references back into the engine. Renderers read it;
//! nothing writes it except the engine that produced it.

use crate::board::BoardGrid;
use crate::pieces::PieceGrid;
use crate::types::{
    CellLabel, GameState, Point, BOARD_HEIGHT, BOARD_WIDTH, INITIAL_STEP_MS, MIN_LEVEL,
    PIECE_GRID_SIZE,
};

/// Render-ready copy of an engine's state, returned by `advance_and_snapshot`.
///
/// Plain fixed-size arrays, copied by value; holding a snapshot never keeps
/// the engine borrowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameInfo {
    /// `board[y][x]`
    pub board: BoardGrid,
    /// Tetris look-ahead piece; all empty for Snake
    pub next: PieceGrid,
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    /// How long the caller should wait before the next advance
    pub step_interval_ms: u32,
    pub paused: bool,
    pub state: GameState,
}

impl GameInfo {
    /// Label at a board point, `None` if out of bounds
    pub fn cell(&self, p: Point) -> Option<CellLabel> {
        if !p.in_bounds() {
            return None;
        }
        Some(self.board[p.y as usize][p.x as usize])
    }

    /// All points carrying `label`, in row-major order
    pub fn cells_with(&self, label: CellLabel) -> impl Iterator<Item = Point> + '_ {
        self.board.iter().enumerate().flat_map(move |(y, row)| {
            row.iter()
                .enumerate()
                .filter(move |(_, c)| **c == label)
                .map(move |(x, _)| Point::new(x as i8, y as i8))
        })
    }

    /// Whether the preview grid has anything to show
    pub fn has_next(&self) -> bool {
        self.next.iter().flatten().any(|c| !c.is_empty())
    }
}

impl Default for GameInfo {
    fn default() -> Self {
        Self {
            board: [[CellLabel::Empty; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            next: [[CellLabel::Empty; PIECE_GRID_SIZE as usize]; PIECE_GRID_SIZE as usize],
            score: 0,
            high_score: 0,
            level: MIN_LEVEL,
            step_interval_ms: INITIAL_STEP_MS,
            paused: false,
            state: GameState::StartScreen,
        }
    }
}
