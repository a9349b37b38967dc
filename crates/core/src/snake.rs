//! Snake engine
//!
//! The snake lives on the shared 10x20 [`Board`] together with its food. The
//! board is kept in sync with the body deque on every step so snapshots are a
//! plain copy.
//!
//! Steering is relative: `Left`/`Right` turn 90 degrees away from the current
//! heading, `Action` takes one step immediately, `Up`/`Down` do nothing.

use std::collections::VecDeque;

use tracing::{debug, info};

use crate::board::Board;
use crate::high_score::HighScoreStore;
use crate::rng::SimpleRng;
use crate::scoring::{snake_levels_up, snake_step_interval_ms};
use crate::snapshot::GameInfo;
use crate::types::{
    CellLabel, GameState, Point, UserAction, BOARD_HEIGHT, BOARD_WIDTH, INITIAL_STEP_MS,
    MIN_LEVEL, SNAKE_INITIAL_LENGTH, SNAKE_WIN_LENGTH,
};
use crate::BrickGame;

/// Heading of a fresh snake
const INITIAL_DIRECTION: Point = Point { x: 1, y: 0 };

/// Head of a fresh snake, board center
const INITIAL_HEAD: Point = Point {
    x: (BOARD_WIDTH / 2) as i8,
    y: (BOARD_HEIGHT / 2) as i8,
};

/// Heading after a relative 90 degree turn.
///
/// Only `Left` and `Right` turn; any other action keeps the heading.
pub fn turn(direction: Point, action: UserAction) -> Point {
    let horizontal = direction.y == 0;
    match action {
        UserAction::Left if horizontal => Point::new(0, -direction.x),
        UserAction::Left => Point::new(direction.y, 0),
        UserAction::Right if horizontal => Point::new(0, direction.x),
        UserAction::Right => Point::new(-direction.y, 0),
        _ => direction,
    }
}

/// Snake game state machine
#[derive(Debug, Clone)]
pub struct SnakeGame<S> {
    board: Board,
    /// Head at the front, tail at the back
    snake: VecDeque<Point>,
    direction: Point,
    food: Point,
    score: u32,
    high_score: u32,
    level: u32,
    step_interval_ms: u32,
    state: GameState,
    rng: SimpleRng,
    store: S,
}

impl<S: HighScoreStore> SnakeGame<S> {
    /// Create a game on the start screen, loading the record from `store`
    pub fn new(seed: u32, mut store: S) -> Self {
        let high_score = store.load_high_score();
        let mut game = Self {
            board: Board::new(),
            snake: VecDeque::with_capacity(SNAKE_WIN_LENGTH),
            direction: INITIAL_DIRECTION,
            food: INITIAL_HEAD,
            score: 0,
            high_score,
            level: MIN_LEVEL,
            step_interval_ms: INITIAL_STEP_MS,
            state: GameState::StartScreen,
            rng: SimpleRng::new(seed),
            store,
        };
        game.reset();
        game
    }

    pub fn state(&self) -> GameState {
        self.state
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

    /// Segments from head to tail
    pub fn snake(&self) -> impl ExactSizeIterator<Item = Point> + '_ {
        self.snake.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    pub fn head(&self) -> Point {
        self.snake.front().copied().unwrap_or(INITIAL_HEAD)
    }

    pub fn direction(&self) -> Point {
        self.direction
    }

    pub fn food(&self) -> Point {
        self.food
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fresh snake, fresh food, score and pacing back to level 1.
    /// The in-memory record survives.
    fn reset(&mut self) {
        self.board.clear();
        self.snake.clear();
        for i in 0..SNAKE_INITIAL_LENGTH as i8 {
            self.snake
                .push_back(Point::new(INITIAL_HEAD.x - i, INITIAL_HEAD.y));
        }
        self.direction = INITIAL_DIRECTION;
        self.score = 0;
        self.level = MIN_LEVEL;
        self.step_interval_ms = INITIAL_STEP_MS;
        self.paint_snake();
        self.place_food();
        self.state = GameState::StartScreen;
    }

    fn paint_snake(&mut self) {
        for (i, &p) in self.snake.iter().enumerate() {
            let label = if i == 0 { CellLabel::Head } else { CellLabel::Body };
            self.board.set_at(p, label);
        }
    }

    /// Rejection-sample an empty cell for the food.
    ///
    /// Callers guarantee the board has at least one empty cell.
    fn place_food(&mut self) {
        loop {
            let p = self.rng.next_point();
            if self.board.get_at(p) == Some(CellLabel::Empty) {
                self.food = p;
                self.board.set_at(p, CellLabel::Food);
                return;
            }
        }
    }

    /// One movement step; only called while Running.
    fn step(&mut self) {
        let head = self.head();
        let new_head = head + self.direction;

        if !new_head.in_bounds() {
            self.lose("wall");
            return;
        }

        let eating = new_head == self.food;
        // The tail moves away this step unless the snake grows.
        let checked = if eating {
            self.snake.len()
        } else {
            self.snake.len().saturating_sub(1)
        };
        if self.snake.iter().take(checked).any(|&p| p == new_head) {
            self.lose("self");
            return;
        }

        self.board.set_at(head, CellLabel::Body);
        if !eating {
            if let Some(tail) = self.snake.pop_back() {
                self.board.set_at(tail, CellLabel::Empty);
            }
        }
        self.snake.push_front(new_head);
        self.board.set_at(new_head, CellLabel::Head);

        if eating {
            self.eat();
        }
    }

    fn eat(&mut self) {
        self.score += 1;
        if self.score > self.high_score {
            self.high_score = self.score;
            self.store.save_high_score(self.high_score);
        }

        if snake_levels_up(self.score, self.level) {
            self.level += 1;
            self.step_interval_ms = snake_step_interval_ms(self.level);
            debug!(level = self.level, interval_ms = self.step_interval_ms, "snake level up");
        }

        if self.snake.len() >= SNAKE_WIN_LENGTH {
            info!(score = self.score, "snake filled the board");
            self.state = GameState::WonGameOver;
            return;
        }

        self.place_food();
    }

    fn lose(&mut self, cause: &'static str) {
        info!(cause, score = self.score, high_score = self.high_score, "snake game over");
        self.state = GameState::LostGameOver;
    }

    fn terminate(&mut self) {
        self.store.save_high_score(self.high_score);
        self.state = GameState::Terminated;
        debug!("snake terminated");
    }
}

impl<S: HighScoreStore> BrickGame for SnakeGame<S> {
    fn apply_action(&mut self, action: UserAction, _hold: bool) {
        let before = self.state;
        match (self.state, action) {
            (GameState::Terminated, _) => {}
            (_, UserAction::Terminate) => self.terminate(),
            (GameState::StartScreen, UserAction::Start) => self.state = GameState::Running,
            (GameState::Running, UserAction::Pause) => self.state = GameState::Paused,
            (GameState::Running, UserAction::Left | UserAction::Right) => {
                self.direction = turn(self.direction, action);
            }
            (GameState::Running, UserAction::Action) => self.step(),
            (GameState::Paused, UserAction::Pause) => self.state = GameState::Running,
            (
                GameState::Paused | GameState::WonGameOver | GameState::LostGameOver,
                UserAction::Start,
            ) => self.reset(),
            _ => {}
        }
        if self.state != before {
            debug!(from = before.as_str(), to = self.state.as_str(), action = action.as_str(), "snake state");
        }
    }

    fn advance_and_snapshot(&mut self) -> GameInfo {
        if self.state == GameState::Running {
            self.step();
        }
        self.snapshot()
    }

    fn snapshot(&self) -> GameInfo {
        let mut info = GameInfo::default();
        self.board.write_grid(&mut info.board);
        info.score = self.score;
        info.high_score = self.high_score;
        info.level = self.level;
        info.step_interval_ms = self.step_interval_ms;
        info.paused = self.state == GameState::Paused;
        info.state = self.state;
        info
    }
}
