//! Weapons
//!
//! The ship fires through a swappable [`Weapon`]. A weapon decides what
//! to put into the [`ProjectileManager`] when triggered; the ship only
//! supplies the firing position. Weapon pickups swap the box on the ship.

use crate::core::vec2::Vec2;
use crate::game::projectile::ProjectileManager;

/// Something the ship can fire.
pub trait Weapon {
    /// Fire from `at` (the ship's nose, top-center of its rectangle).
    fn fire(&mut self, at: Vec2, projectiles: &mut ProjectileManager);
}

/// The default armament: one laser bolt per trigger pull.
#[derive(Debug, Default)]
pub struct LaserWeapon;

impl Weapon for LaserWeapon {
    fn fire(&mut self, at: Vec2, projectiles: &mut ProjectileManager) {
        projectiles.fire_laser(at);
    }
}

/// Upgrade armament: a three-missile cluster per trigger pull.
#[derive(Debug, Default)]
pub struct MissileWeapon;

impl Weapon for MissileWeapon {
    fn fire(&mut self, at: Vec2, projectiles: &mut ProjectileManager) {
        projectiles.fire_missile_cluster(at);
    }
}
