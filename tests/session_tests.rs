//! Pacing driver against the real engines

use brick_game::core::{BrickGame, MemoryHighScore, SnakeGame, TetrisGame};
use brick_game::engine::{Session, SharedGame};
use brick_game::types::{GameState, UserAction};

#[test]
fn snake_session_waits_the_reported_interval() {
    let mut session = Session::new(SnakeGame::new(1, MemoryHighScore::default()));
    session.apply_action(UserAction::Start, false);

    assert!(session.step_if_due(0).is_some());
    assert_eq!(session.time_until_step(100), 400);
    assert!(session.step_if_due(499).is_none());
    assert!(session.step_if_due(500).is_some());
    assert_eq!(session.steps(), 2);
    assert_eq!(session.game().head().x, 7);
}

#[test]
fn simulated_clock_drives_tetris_until_terminate() {
    let mut session = Session::new(TetrisGame::new(9, MemoryHighScore::default()));
    session.apply_action(UserAction::Start, false);

    let mut now = 0;
    while session.steps() < 30 {
        now += session.time_until_step(now);
        let info = session.step_if_due(now).expect("step is due");
        assert_eq!(info.state, GameState::Running);
    }
    assert_eq!(now, 29 * 500);

    session.apply_action(UserAction::Terminate, false);
    now += session.time_until_step(now);
    session.step(now);
    assert!(session.is_finished());
}

#[test]
fn shared_game_serializes_both_operations() {
    let shared = SharedGame::new(SnakeGame::new(4, MemoryHighScore::default()));
    let mut input = shared.clone();
    let mut stepper = shared.clone();

    input.apply_action(UserAction::Start, false);
    let info = stepper.advance_and_snapshot();
    assert_eq!(info.state, GameState::Running);
    assert_eq!(shared.with(|g| g.head().x), 6);
}
