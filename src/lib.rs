//! # SpaceFist Core
//!
//! Entity, state-machine and collision runtime for a vertically
//! scrolling arcade shooter. The crate is the headless heart of the
//! game: it simulates the ship, enemies, pickups and projectiles one
//! frame at a time and talks to the host through small collaborator
//! traits instead of touching a window, audio device or keyboard.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       SPACEFIST CORE                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/            - Math and randomness primitives           │
//! │  ├── vec2.rs      - 2D float vector                          │
//! │  ├── rect.rs      - Axis-aligned rectangle                   │
//! │  └── rng.rs       - Seedable Xorshift128+ PRNG               │
//! │                                                              │
//! │  game/            - Simulation                               │
//! │  ├── entity.rs    - Entities and behavior components         │
//! │  ├── ship.rs      - Player ship and its state machine        │
//! │  ├── ai.rs        - Enemy behavior policies                  │
//! │  ├── enemy.rs     - Enemies and the EnemyManager             │
//! │  ├── pickup.rs    - Pickups with effect-as-data semantics    │
//! │  ├── weapon.rs    - Swappable ship armament                  │
//! │  ├── projectile.rs- Shots in flight and their manager        │
//! │  ├── world.rs     - World bounds and scrolling camera        │
//! │  ├── config.rs    - Session configuration and validation     │
//! │  ├── events.rs    - Serializable event log                   │
//! │  └── session.rs   - Frame driver and collision resolution    │
//! │                                                              │
//! │  io/              - Host collaborator seams                  │
//! │  └── mod.rs       - Renderer, AudioSink, InputSource traits  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Frame Order
//!
//! Every [`game::session::GameSession::tick`] runs the same sequence:
//! camera scroll, ship update, enemy AI, projectile flight, collision
//! resolution. Collision queries therefore always see this frame's
//! post-movement positions. Randomness comes only from the seeded PRNG,
//! so a session is reproducible from its config.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod io;

// Re-export commonly used types
pub use crate::core::rect::Rect;
pub use crate::core::rng::GameRng;
pub use crate::core::vec2::Vec2;
pub use game::config::GameConfig;
pub use game::session::{GameSession, SessionSummary};
pub use game::ship::{Ship, ShipState};
pub use io::{AudioSink, InputSnapshot, InputSource, Renderer};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulation tick rate (Hz)
pub const TICK_RATE: u32 = 60;
