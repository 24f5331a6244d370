//! Core Primitives
//!
//! Math and randomness building blocks shared by the whole game:
//!
//! - `vec2`: 2D float vector
//! - `rect`: axis-aligned rectangle (collision/visibility tests)
//! - `rng`: seedable Xorshift128+ PRNG (randomized spawning)

pub mod rect;
pub mod rng;
pub mod vec2;

pub use rect::Rect;
pub use rng::GameRng;
pub use vec2::Vec2;
