//! Seedable Random Number Generator
//!
//! Xorshift128+ PRNG used for randomized spawning. Given the same seed it
//! produces the same sequence everywhere, which keeps spawn-placement tests
//! reproducible.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::vec2::Vec2;

/// Seedable PRNG using the Xorshift128+ algorithm.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameRng {
    state: [u64; 2],
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(0)
    }
}

impl GameRng {
    /// Create a new RNG from a 64-bit seed.
    ///
    /// Uses SplitMix64 to initialize the internal state, ensuring
    /// good distribution even from weak seeds.
    pub fn new(seed: u64) -> Self {
        let mut s = seed;
        let state0 = splitmix64(&mut s);
        let state1 = splitmix64(&mut s);

        // Ensure state is never all zeros
        let state = if state0 == 0 && state1 == 0 {
            [1, 1]
        } else {
            [state0, state1]
        };

        Self { state }
    }

    /// Generate the next 64-bit random value.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let s0 = self.state[0];
        let mut s1 = self.state[1];
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.state[0] = s0.rotate_left(24) ^ s1 ^ (s1 << 16);
        self.state[1] = s1.rotate_left(37);

        result
    }

    /// Generate a random integer in range `[0, max)`.
    #[inline]
    pub fn next_int(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        (self.next_u64() % max as u64) as u32
    }

    /// Generate a random float in `[0, 1)`.
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        // Use the upper 24 bits for a uniformly distributed mantissa
        (self.next_u64() >> 40) as f32 / (1u32 << 24) as f32
    }

    /// Generate a random float in `[min, max)`.
    #[inline]
    pub fn next_range(&mut self, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        min + self.next_f32() * (max - min)
    }

    /// Generate a random point within a rectangle.
    #[inline]
    pub fn point_in(&mut self, rect: &Rect) -> Vec2 {
        Vec2::new(
            self.next_range(rect.x, rect.right()),
            self.next_range(rect.y, rect.bottom()),
        )
    }
}

/// SplitMix64 for seed initialization.
/// Produces well-distributed values from sequential seeds.
#[inline]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_determinism() {
        // Same seed must produce same sequence
        let mut rng1 = GameRng::new(12345);
        let mut rng2 = GameRng::new(12345);

        for _ in 0..1000 {
            assert_eq!(rng1.next_u64(), rng2.next_u64());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = GameRng::new(12345);
        let mut rng2 = GameRng::new(54321);

        // Very unlikely to match
        assert_ne!(rng1.next_u64(), rng2.next_u64());
    }

    #[test]
    fn test_next_int() {
        let mut rng = GameRng::new(1234);

        for _ in 0..1000 {
            assert!(rng.next_int(100) < 100);
        }

        // Edge cases
        assert_eq!(rng.next_int(0), 0);
        assert_eq!(rng.next_int(1), 0);
    }

    #[test]
    fn test_next_f32_range() {
        let mut rng = GameRng::new(5678);

        for _ in 0..1000 {
            let v = rng.next_f32();
            assert!((0.0..1.0).contains(&v));
        }

        for _ in 0..1000 {
            let v = rng.next_range(-10.0, 10.0);
            assert!((-10.0..10.0).contains(&v));
        }

        // min >= max collapses to min
        assert_eq!(rng.next_range(5.0, 5.0), 5.0);
    }

    #[test]
    fn test_point_in_rect() {
        let mut rng = GameRng::new(7777);
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);

        for _ in 0..500 {
            let p = rng.point_in(&rect);
            assert!(p.x >= rect.x && p.x < rect.right());
            assert!(p.y >= rect.y && p.y < rect.bottom());
        }
    }
}
