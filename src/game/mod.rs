//! Game Logic
//!
//! The simulation proper: entities with pluggable behavior components,
//! the ship state machine, enemy AI, the managers that own enemies,
//! pickups and projectiles, and the session that drives one frame at a
//! time.

pub mod ai;
pub mod config;
pub mod enemy;
pub mod entity;
pub mod events;
pub mod pickup;
pub mod projectile;
pub mod session;
pub mod ship;
pub mod weapon;
pub mod world;
