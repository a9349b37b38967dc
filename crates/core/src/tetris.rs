//! Tetris engine
//!
//! Two state variables drive the game: the outer [`GameState`] shared with
//! Snake, and a per-piece [`PiecePhase`] that only moves while the outer
//! state is `Running`. Reachable combinations between two calls:
//!
//! | Outer | Piece phases |
//! |-------|--------------|
//! | `StartScreen` | `Spawning` (no active piece) |
//! | `Running` | `Spawning`, `Falling`, `Locking` |
//! | `Paused` | `Spawning`, `Falling`, `Locking` |
//! | `LostGameOver` | `Spawning` (spawn failed, no active piece) |
//! | `Terminated` | any, frozen |
//!
//! `ClearingLines` only exists inside a single [`TetrisGame::step`]: locking
//! a piece, clearing rows and returning to `Spawning` happen in one call.
//!
//! The falling piece is never written to the board until it locks; snapshots
//! overlay it on a copy.

use tracing::{debug, info};

use crate::board::Board;
use crate::high_score::HighScoreStore;
use crate::pieces::{get_shape, preview_grid, PieceShape, SPAWN_POSITION};
use crate::rng::SimpleRng;
use crate::scoring::{line_clear_points, tetris_level_for_score, tetris_step_interval_ms};
use crate::snapshot::GameInfo;
use crate::types::{
    CellLabel, GameState, PieceKind, Point, Rotation, UserAction, GRAVITY_TICKS, INITIAL_STEP_MS,
    MIN_LEVEL,
};
use crate::BrickGame;

/// Per-piece phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PiecePhase {
    /// Waiting to bring the look-ahead piece onto the board
    #[default]
    Spawning,
    /// Active piece accepts input and falls with gravity
    Falling,
    /// Active piece is grounded and will be written into the board
    Locking,
    /// Full rows are being removed
    ClearingLines,
}

/// The falling tetromino
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    /// Top-left corner of the 4x4 bounding grid
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Piece at the spawn anchor in rotation 0
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
        }
    }

    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Board cells covered by the piece
    pub fn cells(&self) -> [Point; 4] {
        self.shape()
            .map(|(dx, dy)| Point::new(self.x + dx, self.y + dy))
    }

    /// All cells in bounds and empty on `board`
    pub fn fits(&self, board: &Board) -> bool {
        self.cells().iter().all(|p| board.is_valid(p.x, p.y))
    }

    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn rotated(&self) -> Self {
        Self {
            rotation: self.rotation.rotate_cw(),
            ..*self
        }
    }
}

/// Tetris game state machine
#[derive(Debug, Clone)]
pub struct TetrisGame<S> {
    /// Locked blocks only
    board: Board,
    active: Option<Piece>,
    next: PieceKind,
    phase: PiecePhase,
    state: GameState,
    score: u32,
    high_score: u32,
    /// Last value handed to the store
    saved_high_score: u32,
    level: u32,
    step_interval_ms: u32,
    /// Advance calls since the last drop
    gravity_ticks: u32,
    rng: SimpleRng,
    store: S,
}

impl<S: HighScoreStore> TetrisGame<S> {
    /// Create a game on the start screen and draw the first look-ahead piece
    pub fn new(seed: u32, mut store: S) -> Self {
        let high_score = store.load_high_score();
        let mut rng = SimpleRng::new(seed);
        let next = rng.next_piece_kind();
        Self {
            board: Board::new(),
            active: None,
            next,
            phase: PiecePhase::Spawning,
            state: GameState::StartScreen,
            score: 0,
            high_score,
            saved_high_score: high_score,
            level: MIN_LEVEL,
            step_interval_ms: INITIAL_STEP_MS,
            gravity_ticks: 0,
            rng,
            store,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn phase(&self) -> PiecePhase {
        self.phase
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    /// Look-ahead piece
    pub fn next(&self) -> PieceKind {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn step_interval_ms(&self) -> u32 {
        self.step_interval_ms
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct access to the locked blocks, for scripted setups.
    /// Full rows written here are cleared the next time a piece locks.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Empty board, score and pacing back to level 1, ready to spawn.
    /// The look-ahead piece is kept.
    fn reset(&mut self) {
        self.board.clear();
        self.active = None;
        self.phase = PiecePhase::Spawning;
        self.score = 0;
        self.level = MIN_LEVEL;
        self.step_interval_ms = INITIAL_STEP_MS;
        self.gravity_ticks = 0;
        self.state = GameState::Running;
        debug!(next = self.next.as_str(), "tetris reset");
    }

    fn spawn(&mut self) {
        let piece = Piece::spawn(self.next);
        self.next = self.rng.next_piece_kind();
        self.gravity_ticks = 0;

        if !piece.fits(&self.board) {
            self.active = None;
            self.state = GameState::LostGameOver;
            self.persist_if_improved();
            info!(score = self.score, high_score = self.high_score, "tetris game over");
            return;
        }

        self.active = Some(piece);
        self.phase = PiecePhase::Falling;
    }

    /// Commit `candidate` if it fits; returns whether it did.
    fn try_place(&mut self, candidate: Piece) -> bool {
        if candidate.fits(&self.board) {
            self.active = Some(candidate);
            true
        } else {
            false
        }
    }

    fn lock(&mut self) {
        if let Some(piece) = self.active.take() {
            let written = self.board.lock_cells(&piece.cells(), CellLabel::Body);
            debug!(kind = piece.kind.as_str(), x = piece.x, y = piece.y, written, "piece locked");
        }
        self.phase = PiecePhase::ClearingLines;
    }

    fn clear_lines(&mut self) {
        let cleared = self.board.clear_full_rows();
        if !cleared.is_empty() {
            self.add_score(line_clear_points(cleared.len()));
            debug!(rows = cleared.len(), score = self.score, "lines cleared");
        }
        self.phase = PiecePhase::Spawning;
    }

    fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        if self.score > self.high_score {
            self.high_score = self.score;
        }

        let level = tetris_level_for_score(self.score);
        if level > self.level {
            self.level = level;
            self.step_interval_ms = tetris_step_interval_ms(level);
            debug!(level, interval_ms = self.step_interval_ms, "tetris level up");
        }
    }

    fn persist_if_improved(&mut self) {
        if self.high_score > self.saved_high_score {
            self.store.save_high_score(self.high_score);
            self.saved_high_score = self.high_score;
            info!(high_score = self.high_score, "new tetris record");
        }
    }

    /// Gravity tick; piece drops once every `GRAVITY_TICKS` calls
    fn fall(&mut self) {
        self.gravity_ticks += 1;
        if self.gravity_ticks < GRAVITY_TICKS {
            return;
        }
        self.gravity_ticks = 0;

        match self.active {
            Some(piece) => {
                if !self.try_place(piece.shifted(0, 1)) {
                    self.phase = PiecePhase::Locking;
                }
            }
            None => self.phase = PiecePhase::Spawning,
        }
    }

    /// Advance the piece phase by one step, chaining
    /// `Locking -> ClearingLines -> Spawning` within the call.
    pub fn step(&mut self) {
        if self.state != GameState::Running {
            return;
        }

        loop {
            match self.phase {
                PiecePhase::Spawning => {
                    self.spawn();
                    return;
                }
                PiecePhase::Falling => {
                    self.fall();
                    return;
                }
                PiecePhase::Locking => self.lock(),
                PiecePhase::ClearingLines => {
                    self.clear_lines();
                    return;
                }
            }
        }
    }

    fn move_active(&mut self, action: UserAction) {
        let Some(piece) = self.active else {
            return;
        };
        if self.phase != PiecePhase::Falling {
            return;
        }

        match action {
            UserAction::Left => {
                self.try_place(piece.shifted(-1, 0));
            }
            UserAction::Right => {
                self.try_place(piece.shifted(1, 0));
            }
            UserAction::Down => {
                if self.try_place(piece.shifted(0, 1)) {
                    self.gravity_ticks = 0;
                } else {
                    self.phase = PiecePhase::Locking;
                }
            }
            UserAction::Action => {
                self.try_place(piece.rotated());
            }
            _ => {}
        }
    }

    fn terminate(&mut self) {
        self.store.save_high_score(self.high_score);
        self.saved_high_score = self.high_score;
        self.state = GameState::Terminated;
        debug!("tetris terminated");
    }
}

impl<S: HighScoreStore> BrickGame for TetrisGame<S> {
    fn apply_action(&mut self, action: UserAction, _hold: bool) {
        let before = self.state;
        match (self.state, action) {
            (GameState::Terminated, _) => {}
            (_, UserAction::Terminate) => self.terminate(),
            (
                GameState::StartScreen | GameState::LostGameOver | GameState::Paused,
                UserAction::Start,
            ) => self.reset(),
            (GameState::Running, UserAction::Pause) => self.state = GameState::Paused,
            (GameState::Paused, UserAction::Pause) => {
                self.state = GameState::Running;
                self.gravity_ticks = 0;
            }
            (GameState::Running, _) => self.move_active(action),
            _ => {}
        }
        if self.state != before {
            debug!(from = before.as_str(), to = self.state.as_str(), action = action.as_str(), "tetris state");
        }
    }

    fn advance_and_snapshot(&mut self) -> GameInfo {
        self.step();
        self.snapshot()
    }

    fn snapshot(&self) -> GameInfo {
        let mut info = GameInfo::default();
        self.board.write_grid(&mut info.board);
        if let Some(piece) = self.active {
            for p in piece.cells() {
                if p.in_bounds() {
                    info.board[p.y as usize][p.x as usize] = CellLabel::Body;
                }
            }
        }
        info.next = preview_grid(self.next);
        info.score = self.score;
        info.high_score = self.high_score;
        info.level = self.level;
        info.step_interval_ms = self.step_interval_ms;
        info.paused = self.state == GameState::Paused;
        info.state = self.state;
        info
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::high_score::MemoryHighScore;
    use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

    fn new_game() -> TetrisGame<MemoryHighScore> {
        TetrisGame::new(12345, MemoryHighScore::default())
    }

    /// Started game whose first piece is `kind`, spawned and falling
    fn running_with(kind: PieceKind) -> TetrisGame<MemoryHighScore> {
        let mut game = new_game();
        game.next = kind;
        game.apply_action(UserAction::Start, false);
        game.advance_and_snapshot();
        game
    }

    fn drop_until_locking(game: &mut TetrisGame<MemoryHighScore>) {
        while game.phase() == PiecePhase::Falling {
            game.apply_action(UserAction::Down, false);
        }
    }

    #[test]
    fn fresh_game_waits_on_start_screen() {
        let mut game = new_game();
        assert_eq!(game.state(), GameState::StartScreen);
        assert_eq!(game.phase(), PiecePhase::Spawning);
        assert!(game.active().is_none());

        let info = game.advance_and_snapshot();
        assert_eq!(info.state, GameState::StartScreen);
        assert!(info.has_next());
        assert_eq!(info.next, preview_grid(game.next()));
        assert_eq!(info.cells_with(CellLabel::Body).count(), 0);
    }

    #[test]
    fn start_then_advance_spawns_at_center_top() {
        let mut game = new_game();
        let first = game.next();
        game.apply_action(UserAction::Start, false);
        let info = game.advance_and_snapshot();

        assert_eq!(info.state, GameState::Running);
        let piece = game.active().unwrap();
        assert_eq!(piece.kind, first);
        assert_eq!((piece.x, piece.y), (3, 0));
        assert_eq!(piece.rotation, Rotation::North);
        assert_eq!(game.phase(), PiecePhase::Falling);
        assert_eq!(info.cells_with(CellLabel::Body).count(), 4);
        assert_eq!(game.board().occupied_count(), 0);
    }

    #[test]
    fn gravity_drops_one_row_per_advance() {
        let mut game = running_with(PieceKind::T);
        game.advance_and_snapshot();
        assert_eq!(game.active().unwrap().y, 1);
        game.advance_and_snapshot();
        assert_eq!(game.active().unwrap().y, 2);
    }

    #[test]
    fn shifts_stop_at_the_walls() {
        let mut game = running_with(PieceKind::O);
        for _ in 0..10 {
            game.apply_action(UserAction::Left, false);
        }
        // O occupies grid columns 1 and 2.
        assert_eq!(game.active().unwrap().x, -1);

        for _ in 0..20 {
            game.apply_action(UserAction::Right, false);
        }
        assert_eq!(game.active().unwrap().x, BOARD_WIDTH as i8 - 3);
    }

    #[test]
    fn action_rotates_clockwise() {
        let mut game = running_with(PieceKind::T);
        game.apply_action(UserAction::Action, false);
        assert_eq!(game.active().unwrap().rotation, Rotation::East);
        for _ in 0..3 {
            game.apply_action(UserAction::Action, false);
        }
        assert_eq!(game.active().unwrap().rotation, Rotation::North);
    }

    #[test]
    fn blocked_rotation_is_rejected() {
        let mut game = running_with(PieceKind::I);
        let upright = Piece {
            kind: PieceKind::I,
            rotation: Rotation::East,
            x: -1,
            y: 5,
        };
        game.active = Some(upright);

        game.apply_action(UserAction::Action, false);
        assert_eq!(game.active(), Some(upright));
        assert_eq!(game.phase(), PiecePhase::Falling);
    }

    #[test]
    fn up_and_hold_are_inert() {
        let mut plain = running_with(PieceKind::L);
        let mut noisy = running_with(PieceKind::L);
        noisy.apply_action(UserAction::Up, true);
        noisy.apply_action(UserAction::Start, false);
        assert_eq!(noisy.advance_and_snapshot(), plain.advance_and_snapshot());
    }

    #[test]
    fn blocked_soft_drop_locks_on_next_advance() {
        let mut game = running_with(PieceKind::O);
        drop_until_locking(&mut game);
        assert_eq!(game.phase(), PiecePhase::Locking);
        let landed = game.active().unwrap();
        assert_eq!(landed.y, BOARD_HEIGHT as i8 - 2);

        game.apply_action(UserAction::Left, false);
        assert_eq!(game.active(), Some(landed));

        let info = game.advance_and_snapshot();
        assert_eq!(game.phase(), PiecePhase::Spawning);
        assert!(game.active().is_none());
        assert_eq!(game.board().occupied_count(), 4);
        assert_eq!(info.cells_with(CellLabel::Body).count(), 4);

        game.advance_and_snapshot();
        assert_eq!(game.phase(), PiecePhase::Falling);
        assert!(game.active().is_some());
    }

    #[test]
    fn soft_drop_resets_gravity() {
        let mut game = running_with(PieceKind::T);
        game.gravity_ticks = 7;
        game.apply_action(UserAction::Down, false);
        assert_eq!(game.gravity_ticks, 0);
        assert_eq!(game.active().unwrap().y, 1);
    }

    #[test]
    fn injected_full_row_clears_on_lock() {
        let mut game = running_with(PieceKind::O);
        let bottom = BOARD_HEIGHT as usize - 1;
        game.board_mut().fill_row(bottom, CellLabel::Body);
        game.board_mut().set(9, bottom as i8 - 1, CellLabel::Body);

        drop_until_locking(&mut game);
        let info = game.advance_and_snapshot();

        assert_eq!(info.score, 100);
        assert!(!game.board().is_row_full(bottom));
        // Marker and the O piece moved down one row.
        assert_eq!(game.board().get(9, bottom as i8), Some(CellLabel::Body));
        assert_eq!(game.board().occupied_count(), 5);
    }

    #[test]
    fn two_rows_score_three_hundred_and_shift_by_two() {
        let mut game = running_with(PieceKind::I);
        let bottom = BOARD_HEIGHT as usize - 1;
        game.board_mut().fill_row(bottom, CellLabel::Body);
        game.board_mut().fill_row(bottom - 1, CellLabel::Body);
        game.board_mut().set(0, bottom as i8 - 2, CellLabel::Body);

        drop_until_locking(&mut game);
        game.advance_and_snapshot();

        assert_eq!(game.score(), 300);
        assert_eq!(game.board().get(0, bottom as i8), Some(CellLabel::Body));
        assert_eq!(game.board().get(0, bottom as i8 - 2), Some(CellLabel::Empty));
    }

    #[test]
    fn crossing_six_hundred_levels_up() {
        let mut game = running_with(PieceKind::O);
        game.score = 500;
        game.board_mut().fill_row(BOARD_HEIGHT as usize - 1, CellLabel::Body);

        drop_until_locking(&mut game);
        let info = game.advance_and_snapshot();

        assert_eq!(info.score, 600);
        assert_eq!(info.level, 2);
        assert_eq!(info.step_interval_ms, 460);
        assert_eq!(info.high_score, 600);
    }

    #[test]
    fn blocked_spawn_loses_and_persists_record() {
        let store = MemoryHighScore::new(100);
        let mut game = TetrisGame::new(9, store.clone());
        game.apply_action(UserAction::Start, false);
        game.advance_and_snapshot();

        game.score = 900;
        game.high_score = 900;
        game.active = None;
        game.phase = PiecePhase::Spawning;
        for x in 0..BOARD_WIDTH as i8 - 1 {
            game.board_mut().set(x, 1, CellLabel::Body);
        }

        let info = game.advance_and_snapshot();
        assert_eq!(info.state, GameState::LostGameOver);
        assert!(game.active().is_none());
        assert_eq!(store.value(), 900);

        // Frozen until Start.
        assert_eq!(game.advance_and_snapshot(), info);
        game.apply_action(UserAction::Pause, false);
        assert_eq!(game.state(), GameState::LostGameOver);

        game.apply_action(UserAction::Start, false);
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.score(), 0);
        assert_eq!(game.high_score(), 900);
        assert_eq!(game.board().occupied_count(), 0);
    }

    #[test]
    fn game_over_without_record_does_not_save() {
        let store = MemoryHighScore::new(5000);
        let mut game = TetrisGame::new(9, store.clone());
        game.apply_action(UserAction::Start, false);
        for x in 0..BOARD_WIDTH as i8 - 1 {
            game.board_mut().set(x, 1, CellLabel::Body);
        }
        game.advance_and_snapshot();
        assert_eq!(game.state(), GameState::LostGameOver);
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn pause_freezes_input_and_gravity() {
        let mut game = running_with(PieceKind::T);
        game.apply_action(UserAction::Pause, false);
        let frozen = game.active();

        let info = game.advance_and_snapshot();
        assert!(info.paused);
        assert_eq!(info.state, GameState::Paused);
        game.apply_action(UserAction::Left, false);
        game.apply_action(UserAction::Action, false);
        assert_eq!(game.active(), frozen);

        game.gravity_ticks = 3;
        game.apply_action(UserAction::Pause, false);
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.gravity_ticks, 0);
    }

    #[test]
    fn pause_is_ignored_on_start_screen() {
        let mut game = new_game();
        game.apply_action(UserAction::Pause, false);
        assert_eq!(game.state(), GameState::StartScreen);
    }

    #[test]
    fn start_while_paused_restarts_but_keeps_next() {
        let mut game = running_with(PieceKind::S);
        game.board_mut().set(0, 19, CellLabel::Body);
        game.score = 300;
        game.apply_action(UserAction::Pause, false);
        let next = game.next();

        game.apply_action(UserAction::Start, false);
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.phase(), PiecePhase::Spawning);
        assert_eq!(game.score(), 0);
        assert_eq!(game.next(), next);
        assert!(game.active().is_none());
        assert_eq!(game.board().occupied_count(), 0);
    }

    #[test]
    fn start_is_ignored_while_running() {
        let mut game = running_with(PieceKind::J);
        let piece = game.active();
        game.apply_action(UserAction::Start, false);
        assert_eq!(game.active(), piece);
        assert_eq!(game.phase(), PiecePhase::Falling);
    }

    #[test]
    fn terminate_saves_and_is_absorbing() {
        let store = MemoryHighScore::new(40);
        let mut game = TetrisGame::new(3, store.clone());
        game.apply_action(UserAction::Start, false);
        game.apply_action(UserAction::Terminate, false);

        assert_eq!(game.state(), GameState::Terminated);
        assert_eq!(store.save_count(), 1);
        assert_eq!(store.value(), 40);

        game.apply_action(UserAction::Start, false);
        game.apply_action(UserAction::Terminate, false);
        assert_eq!(game.advance_and_snapshot().state, GameState::Terminated);
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn snapshot_overlays_without_touching_the_board() {
        let game = running_with(PieceKind::T);
        let info = game.snapshot();
        for p in game.active().unwrap().cells() {
            assert_eq!(info.cell(p), Some(CellLabel::Body));
            assert_eq!(game.board().get_at(p), Some(CellLabel::Empty));
        }
    }

    #[test]
    fn long_run_keeps_invariants() {
        let mut game = TetrisGame::new(777, MemoryHighScore::default());
        let mut rng = SimpleRng::new(11);
        game.apply_action(UserAction::Start, false);
        let mut last_score = 0;
        let mut last_level = MIN_LEVEL;

        for _ in 0..5_000 {
            let action = match rng.next_range(5) {
                0 => UserAction::Left,
                1 => UserAction::Right,
                2 => UserAction::Action,
                3 => UserAction::Down,
                _ => UserAction::Up,
            };
            game.apply_action(action, false);
            let info = game.advance_and_snapshot();

            assert!((0..BOARD_HEIGHT as usize).all(|y| !game.board().is_row_full(y)));
            if let Some(piece) = game.active() {
                assert!(piece.fits(game.board()));
            }

            match info.state {
                GameState::Running => {
                    assert!(info.score >= last_score);
                    assert!(info.level >= last_level);
                    assert_eq!(info.step_interval_ms, tetris_step_interval_ms(info.level));
                    last_score = info.score;
                    last_level = info.level;
                }
                GameState::LostGameOver => {
                    game.apply_action(UserAction::Start, false);
                    last_score = 0;
                    last_level = MIN_LEVEL;
                }
                other => panic!("unexpected state {other:?}"),
            }
        }
    }
}
