//! RNG module - seeded color draws
//!
//! Every random choice the engine makes (initial board, refills, directional
//! assignment in bomb combos) goes through [`TokenRng`] so callers can inject a
//! seeded generator and replay a game exactly.
//!
//! Also provides a simple LCG as the default implementation.

use crate::types::Color;

/// Source of randomness for color draws
pub trait TokenRng {
    /// Uniform value in `[0, max)`. `max` is never zero.
    fn next_range(&mut self, max: u32) -> u32;

    /// Coin flip
    fn next_bool(&mut self) -> bool {
        self.next_range(2) == 1
    }

    /// Uniform pick from a non-empty slice of colors
    fn pick_color(&mut self, colors: &[Color]) -> Color {
        debug_assert!(!colors.is_empty());
        colors[self.next_range(colors.len() as u32) as usize]
    }
}

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

    /// Current state, usable as a seed to fork an identical stream
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl TokenRng for SimpleRng {
    fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        (self.next_u32() >> 16) % max.max(1)
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Replays a fixed sequence of draws, cycling when exhausted
///
/// Each value is reduced modulo the requested range. Useful for pinning refills
/// in tests.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<u32>,
    pos: usize,
}

impl ScriptedRng {
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, pos: 0 }
    }
}

impl TokenRng for ScriptedRng {
    fn next_range(&mut self, max: u32) -> u32 {
        if self.values.is_empty() {
            return 0;
        }
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v % max.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_zero_seed_remapped() {
        let mut a = SimpleRng::new(0);
        let mut b = SimpleRng::new(1);
        assert_eq!(a.next_u32(), b.next_u32());
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(6) < 6);
        }
    }

    #[test]
    fn test_pick_color_covers_palette() {
        let mut rng = SimpleRng::new(99);
        let mut seen = [false; 6];
        for _ in 0..500 {
            let c = rng.pick_color(&Color::PALETTE);
            let idx = Color::PALETTE.iter().position(|p| *p == c).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_scripted_rng_cycles() {
        let mut rng = ScriptedRng::new(vec![0, 4, 7]);
        assert_eq!(rng.next_range(6), 0);
        assert_eq!(rng.next_range(6), 4);
        assert_eq!(rng.next_range(6), 1);
        assert_eq!(rng.next_range(6), 0);
    }
}
