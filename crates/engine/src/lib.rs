//! Engine driver - pacing and sharing for [`BrickGame`] engines
//!
//! Engines own no timers: each snapshot reports how long the caller should
//! wait before the next `advance_and_snapshot`. [`Session`] keeps that
//! contract for the caller, using an explicit millisecond clock so it can be
//! driven from tests as easily as from a real event loop.
//!
//! [`SharedGame`] puts one engine behind one mutex so input and stepping can
//! come from different threads.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tracing::trace;

pub use brick_game_core as core;
pub use brick_game_types as types;

use brick_game_core::{BrickGame, GameInfo};
use brick_game_types::UserAction;

/// One engine plus the pacing state of its caller
#[derive(Debug, Clone)]
pub struct Session<G> {
    game: G,
    last: GameInfo,
    last_step_ms: Option<u64>,
    steps: u64,
}

impl<G: BrickGame> Session<G> {
    /// The first step is due immediately.
    pub fn new(game: G) -> Self {
        Self {
            game,
            last: GameInfo::default(),
            last_step_ms: None,
            steps: 0,
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn into_inner(self) -> G {
        self.game
    }

    /// Apply an action and refresh the last snapshot so it can be redrawn
    /// before the next step. Pacing is unchanged.
    pub fn apply_action(&mut self, action: UserAction, hold: bool) -> GameInfo {
        self.game.apply_action(action, hold);
        self.last = self.game.snapshot();
        self.last
    }

    /// Snapshot from the most recent step or action
    pub fn last_snapshot(&self) -> &GameInfo {
        &self.last
    }

    /// Number of steps taken so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Wait the engine asked for after its last step
    pub fn interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.last.step_interval_ms))
    }

    /// Milliseconds left until the next step is due at `now_ms`
    pub fn time_until_step(&self, now_ms: u64) -> u64 {
        match self.last_step_ms {
            None => 0,
            Some(at) => at
                .saturating_add(u64::from(self.last.step_interval_ms))
                .saturating_sub(now_ms),
        }
    }

    pub fn is_due(&self, now_ms: u64) -> bool {
        self.time_until_step(now_ms) == 0
    }

    /// Advance now, regardless of pacing
    pub fn step(&mut self, now_ms: u64) -> GameInfo {
        self.last = self.game.advance_and_snapshot();
        self.last_step_ms = Some(now_ms);
        self.steps += 1;
        trace!(
            step = self.steps,
            state = self.last.state.as_str(),
            next_in_ms = self.last.step_interval_ms,
            "session step"
        );
        self.last
    }

    /// Advance only if the previous interval has elapsed
    pub fn step_if_due(&mut self, now_ms: u64) -> Option<GameInfo> {
        if self.is_due(now_ms) {
            Some(self.step(now_ms))
        } else {
            None
        }
    }

    /// The last snapshot reported `Terminated`
    pub fn is_finished(&self) -> bool {
        self.last.state.is_terminal()
    }
}

/// Engine behind one lock, cloneable across threads
#[derive(Debug, Default)]
pub struct SharedGame<G> {
    inner: Arc<Mutex<G>>,
}

impl<G> Clone for SharedGame<G> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<G: BrickGame> SharedGame<G> {
    pub fn new(game: G) -> Self {
        Self {
            inner: Arc::new(Mutex::new(game)),
        }
    }

    /// Lock the engine, ignoring poisoning
    pub fn lock(&self) -> MutexGuard<'_, G> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run `f` with exclusive access to the engine
    pub fn with<R>(&self, f: impl FnOnce(&mut G) -> R) -> R {
        f(&mut self.lock())
    }
}

impl<G: BrickGame> BrickGame for SharedGame<G> {
    fn apply_action(&mut self, action: UserAction, hold: bool) {
        self.lock().apply_action(action, hold);
    }

    fn advance_and_snapshot(&mut self) -> GameInfo {
        self.lock().advance_and_snapshot()
    }

    fn snapshot(&self) -> GameInfo {
        self.lock().snapshot()
    }
}
