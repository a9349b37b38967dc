//! RNG module - small deterministic generator for food and piece draws
//!
//! Both engines take a seed at construction so a game can be replayed
//! exactly in tests. Draws use the high bits of the LCG state because the low
//! bits of a power-of-two LCG cycle with very short periods.

use crate::types::{PieceKind, Point, BOARD_HEIGHT, BOARD_WIDTH};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Multiply-shift keeps the high bits.
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }

    /// Uniformly random cell on the board
    pub fn next_point(&mut self) -> Point {
        let x = self.next_range(BOARD_WIDTH as u32) as i8;
        let y = self.next_range(BOARD_HEIGHT as u32) as i8;
        Point::new(x, y)
    }

    /// Uniformly random tetromino kind
    pub fn next_piece_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.next_range(PieceKind::ALL.len() as u32) as usize]
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_next_range_stays_below_max() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn test_next_point_reaches_every_cell() {
        let mut rng = SimpleRng::new(99);
        let mut seen = HashSet::new();
        for _ in 0..20_000 {
            let p = rng.next_point();
            assert!(p.in_bounds());
            seen.insert(p);
        }
        assert_eq!(seen.len(), (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize));
    }

    #[test]
    fn test_next_piece_kind_draws_all_kinds() {
        let mut rng = SimpleRng::new(1);
        let drawn: HashSet<PieceKind> = (0..500).map(|_| rng.next_piece_kind()).collect();
        assert_eq!(drawn.len(), 7);
    }
}
