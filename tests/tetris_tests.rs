//! Tetris engine scenarios through the public API

use std::fs;

use brick_game::core::{preview_grid, BrickGame, FileHighScore, MemoryHighScore, PiecePhase, TetrisGame};
use brick_game::types::{CellLabel, GameState, Rotation, UserAction, BOARD_HEIGHT};
use tempfile::TempDir;

fn started(seed: u32) -> TetrisGame<MemoryHighScore> {
    let mut game = TetrisGame::new(seed, MemoryHighScore::default());
    game.apply_action(UserAction::Start, false);
    game
}

#[test]
fn start_and_one_step_spawns_centered() {
    let mut game = started(12345);
    let info = game.advance_and_snapshot();

    assert_eq!(info.state, GameState::Running);
    let piece = game.active().expect("piece spawned");
    assert_eq!((piece.x, piece.y), (3, 0));
    assert_eq!(piece.rotation, Rotation::North);
    assert_eq!(info.cells_with(CellLabel::Body).count(), 4);
    assert_eq!(info.next, preview_grid(game.next()));
}

#[test]
fn injected_full_row_is_cleared_by_the_next_lock() {
    let mut game = started(4);
    game.advance_and_snapshot();
    let bottom = BOARD_HEIGHT as usize - 1;
    game.board_mut().fill_row(bottom, CellLabel::Body);
    game.board_mut().set(0, bottom as i8 - 1, CellLabel::Body);

    while game.phase() == PiecePhase::Falling {
        game.apply_action(UserAction::Down, false);
    }
    let info = game.advance_and_snapshot();

    assert_eq!(info.score, 100);
    assert!(!game.board().is_row_full(bottom));
    assert_eq!(game.board().get(0, bottom as i8), Some(CellLabel::Body));
    assert_eq!(game.board().occupied_count(), 5);
}

#[test]
fn gravity_eventually_locks_and_spawns_the_next_piece() {
    let mut game = started(8);
    game.advance_and_snapshot();
    let upcoming = game.next();

    let mut steps = 0;
    while game.phase() != PiecePhase::Spawning {
        game.advance_and_snapshot();
        steps += 1;
        assert!(steps <= BOARD_HEIGHT as usize + 2);
    }
    assert_eq!(game.board().occupied_count(), 4);

    game.advance_and_snapshot();
    assert_eq!(game.active().unwrap().kind, upcoming);
}

#[test]
fn stacking_in_the_middle_ends_the_game() {
    let mut game = started(21);
    let mut info = game.advance_and_snapshot();
    let mut guard = 0;
    while info.state == GameState::Running {
        game.apply_action(UserAction::Down, false);
        info = game.advance_and_snapshot();
        guard += 1;
        assert!(guard < 10_000);
    }

    assert_eq!(info.state, GameState::LostGameOver);
    assert!(game.active().is_none());
    let frozen = game.advance_and_snapshot();
    assert_eq!(frozen, info);
}

#[test]
fn pause_and_terminate() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tetris_highscore.txt");
    fs::write(&path, "2500").unwrap();

    let mut game = TetrisGame::new(2, FileHighScore::new(&path));
    game.apply_action(UserAction::Start, false);
    game.advance_and_snapshot();
    game.apply_action(UserAction::Pause, false);

    let paused = game.advance_and_snapshot();
    assert!(paused.paused);
    assert_eq!(paused.high_score, 2500);
    assert_eq!(game.advance_and_snapshot(), paused);

    fs::remove_file(&path).unwrap();
    game.apply_action(UserAction::Terminate, false);
    assert_eq!(game.advance_and_snapshot().state, GameState::Terminated);
    assert_eq!(fs::read_to_string(&path).unwrap(), "2500");
}

#[test]
fn same_seed_same_pieces() {
    let mut a = started(77);
    let mut b = started(77);
    for i in 0..300 {
        let action = match i % 5 {
            0 => UserAction::Left,
            1 => UserAction::Action,
            2 => UserAction::Right,
            _ => UserAction::Down,
        };
        a.apply_action(action, false);
        b.apply_action(action, false);
        assert_eq!(a.advance_and_snapshot(), b.advance_and_snapshot());
    }
}
