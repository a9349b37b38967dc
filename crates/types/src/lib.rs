//! Shared types module - constants and plain data used by every crate
//!
//! Everything here is pure data with no external dependencies, so it can be
//! used by the engines, the terminal renderer and the input layer alike.
//!
//! # Board Dimensions
//!
//! Both games play on the same playfield:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Preview**: 4x4 grid for the Tetris "next" piece
//!
//! # Pacing Constants
//!
//! Values are in milliseconds between two `advance_and_snapshot` calls:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_STEP_MS` | 500 | Interval at level 1 (both games) |
//! | `SNAKE_STEP_DECREMENT_MS` | 40 | Snake interval shrink per level |
//! | `SNAKE_MIN_STEP_MS` | 100 | Snake interval floor |
//! | `TETRIS_STEP_DECREMENT_MS` | 40 | Tetris interval shrink per level |
//! | `TETRIS_MIN_STEP_MS` | 50 | Tetris interval floor |
//!
//! # Examples
//!
//! ```
//! use brick_game_types::{GameState, Point, Rotation, UserAction, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(UserAction::ALL.len(), 8);
//! assert_eq!(UserAction::Start.as_str(), "start");
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Point::new(1, 2) + Point::new(1, 0), Point::new(2, 2));
//! assert!(GameState::Terminated.is_terminal());
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use std::ops::Add;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Side of the square bounding grid of a tetromino and of the preview area
pub const PIECE_GRID_SIZE: u8 = 4;

/// Step interval at level 1 for both games
pub const INITIAL_STEP_MS: u32 = 500;

/// Lowest level of a fresh game
pub const MIN_LEVEL: u32 = 1;

/// Highest reachable level
pub const MAX_LEVEL: u32 = 10;

/// Points the snake must gain for each level-up
pub const SNAKE_POINTS_PER_LEVEL: u32 = 5;

/// Snake interval shrink per level
pub const SNAKE_STEP_DECREMENT_MS: u32 = 40;

/// Snake interval floor
pub const SNAKE_MIN_STEP_MS: u32 = 100;

/// Body length that wins the Snake game
pub const SNAKE_WIN_LENGTH: usize = 200;

/// Number of segments of a freshly spawned snake
pub const SNAKE_INITIAL_LENGTH: usize = 4;

/// Score needed per Tetris level
pub const TETRIS_POINTS_PER_LEVEL: u32 = 600;

/// Tetris interval shrink per level
pub const TETRIS_STEP_DECREMENT_MS: u32 = 40;

/// Tetris interval floor
pub const TETRIS_MIN_STEP_MS: u32 = 50;

/// Advance calls per automatic gravity drop
pub const GRAVITY_TICKS: u32 = 1;

/// Line clear points for 1..=4 rows (index = rows cleared)
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 700, 1500];

/// Extra points per row beyond four in a single lock
pub const EXTRA_LINE_SCORE: u32 = 800;

/// Default high-score file of the Snake game
pub const SNAKE_HIGH_SCORE_FILE: &str = "high_score.txt";

/// Default high-score file of the Tetris game
pub const TETRIS_HIGH_SCORE_FILE: &str = "tetris_highscore.txt";


/// User actions accepted by both engines
///
/// The same eight buttons drive both games; each engine decides which ones
/// mean something in its current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserAction {
    /// Start a game, or reset after pause / game over
    Start,
    /// Toggle pause
    Pause,
    /// End the session
    Terminate,
    Left,
    Right,
    Up,
    Down,
    /// Snake: step immediately. Tetris: rotate clockwise.
    Action,
}

impl UserAction {
    pub const ALL: [UserAction; 8] = [
        UserAction::Start,
        UserAction::Pause,
        UserAction::Terminate,
        UserAction::Left,
        UserAction::Right,
        UserAction::Up,
        UserAction::Down,
        UserAction::Action,
    ];

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            UserAction::Start => "start",
            UserAction::Pause => "pause",
            UserAction::Terminate => "terminate",
            UserAction::Left => "left",
            UserAction::Right => "right",
            UserAction::Up => "up",
            UserAction::Down => "down",
            UserAction::Action => "action",
        }
    }
}

/// Outer game state reported in every snapshot
///
/// Tetris never reaches `WonGameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    StartScreen,
    Running,
    Paused,
    WonGameOver,
    LostGameOver,
    Terminated,
}

impl GameState {
    /// No further action has any effect
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameState::Terminated)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameState::StartScreen => "start_screen",
            GameState::Running => "running",
            GameState::Paused => "paused",
            GameState::WonGameOver => "won",
            GameState::LostGameOver => "lost",
            GameState::Terminated => "terminated",
        }
    }
}

/// A cell of the board or of the preview grid
///
/// - `Empty`: nothing there
/// - `Head`: snake head
/// - `Body`: snake body, or any Tetris block (locked or falling)
/// - `Food`: snake food
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellLabel {
    #[default]
    Empty,
    Head,
    Body,
    Food,
}

impl CellLabel {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellLabel::Empty)
    }
}

/// Integer board coordinate, also used as a unit direction vector
///
/// `x` grows to the right, `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i8,
    pub y: i8,
}

impl Point {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Check if the point lies on the board
    pub fn in_bounds(&self) -> bool {
        self.x >= 0 && self.x < BOARD_WIDTH as i8 && self.y >= 0 && self.y < BOARD_HEIGHT as i8
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Rotation table order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Index into the rotation table
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::J => 1,
            PieceKind::L => 2,
            PieceKind::O => 3,
            PieceKind::S => 4,
            PieceKind::T => 5,
            PieceKind::Z => 6,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }
}

/// Rotation states, indexed 0..=3
///
/// - **North**: Spawn orientation (index 0)
/// - **East**: One clockwise step (index 1)
/// - **South**: Two steps (index 2)
/// - **West**: Three steps (index 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°), i.e. `(index + 1) mod 4`
    ///
    /// # Examples
    ///
    /// ```
    /// use brick_game_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Build from an index, wrapping modulo 4
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }
}
