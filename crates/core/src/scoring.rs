//! Scoring module - points, levels and pacing curves for both games
//!
//! All functions are pure so the curves can be checked in isolation.

use crate::types::{
    EXTRA_LINE_SCORE, INITIAL_STEP_MS, LINE_SCORES, MAX_LEVEL, MIN_LEVEL, SNAKE_MIN_STEP_MS,
    SNAKE_POINTS_PER_LEVEL, SNAKE_STEP_DECREMENT_MS, TETRIS_MIN_STEP_MS, TETRIS_POINTS_PER_LEVEL,
    TETRIS_STEP_DECREMENT_MS,
};

/// Points for clearing `lines` rows with one lock
///
/// 1: 100, 2: 300, 3: 700, 4: 1500, then 800 per extra row.
pub fn line_clear_points(lines: usize) -> u32 {
    match lines {
        0..=4 => LINE_SCORES[lines],
        _ => LINE_SCORES[4].saturating_add(EXTRA_LINE_SCORE.saturating_mul((lines - 4) as u32)),
    }
}

/// Tetris level for a score: `score / 600 + 1`, clamped to 1..=10
pub fn tetris_level_for_score(score: u32) -> u32 {
    (score / TETRIS_POINTS_PER_LEVEL + 1).clamp(MIN_LEVEL, MAX_LEVEL)
}

/// Tetris step interval: `max(50, 500 - 40 * (level - 1))`
pub fn tetris_step_interval_ms(level: u32) -> u32 {
    step_interval_ms(level, TETRIS_STEP_DECREMENT_MS, TETRIS_MIN_STEP_MS)
}

/// Snake step interval: `max(100, 500 - 40 * (level - 1))`
pub fn snake_step_interval_ms(level: u32) -> u32 {
    step_interval_ms(level, SNAKE_STEP_DECREMENT_MS, SNAKE_MIN_STEP_MS)
}

/// Whether reaching `score` levels the snake up from `level`
pub fn snake_levels_up(score: u32, level: u32) -> bool {
    score > 0 && score % SNAKE_POINTS_PER_LEVEL == 0 && level < MAX_LEVEL
}

fn step_interval_ms(level: u32, decrement: u32, floor: u32) -> u32 {
    let steps = level.clamp(MIN_LEVEL, MAX_LEVEL) - MIN_LEVEL;
    INITIAL_STEP_MS
        .saturating_sub(decrement.saturating_mul(steps))
        .max(floor)
}
