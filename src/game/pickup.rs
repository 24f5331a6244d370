//! Pickups
//!
//! Collectibles with their semantics stored as data: each pickup carries
//! a boxed effect closure invoked when the ship touches it. The closure
//! decides whether the pickup was actually consumed, so "health pickup
//! on a full-health ship" stays in the world without the collision
//! resolver knowing anything about health.

use tracing::info;

use crate::core::rect::Rect;
use crate::core::rng::GameRng;
use crate::core::vec2::Vec2;
use crate::game::entity::{Body, Color, Entity, NullPhysics, Sound, Sprite};
use crate::game::ship::Ship;
use crate::game::weapon::MissileWeapon;
use crate::game::world::GameWorld;
use crate::io::{AudioSink, Renderer, SoundEffect, TextureId};

const PICKUP_WIDTH: f32 = 40.0;
const PICKUP_HEIGHT: f32 = 40.0;

/// Applied to the ship on contact; returns whether the pickup was
/// consumed and should leave the world.
pub type PickupEffect = Box<dyn FnMut(&mut Ship) -> bool>;

/// A collectible sitting in the world.
pub struct Pickup {
    entity: Entity,
    effect: PickupEffect,
}

impl Pickup {
    /// Restores the ship to full health. Not consumed if the ship is
    /// already at full health.
    pub fn health(position: Vec2) -> Self {
        let mut pickup = Self::new(
            position,
            TextureId::HealthPickup,
            Box::new(|ship: &mut Ship| {
                if ship.health() < 1.0 {
                    ship.heal_full();
                    true
                } else {
                    false
                }
            }),
        );
        pickup.entity.body.tint = Color::PINK;
        pickup
    }

    /// Swaps the ship's weapon for the missile cluster. Always consumed.
    pub fn weapon(position: Vec2) -> Self {
        Self::new(
            position,
            TextureId::WeaponPickup,
            Box::new(|ship: &mut Ship| {
                ship.arm(Box::new(MissileWeapon));
                true
            }),
        )
    }

    fn new(position: Vec2, texture: TextureId, effect: PickupEffect) -> Self {
        Self {
            entity: Entity::new(
                Body::new(position, PICKUP_WIDTH, PICKUP_HEIGHT),
                Box::new(NullPhysics),
                Box::new(Sprite::new(texture)),
                Box::new(Sound::new(SoundEffect::PickupCollected)),
            ),
            effect,
        }
    }

    /// Bounding rectangle.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.entity.rect()
    }

    /// Whether the pickup is still collectible.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.entity.is_alive()
    }

    /// Apply the effect to `ship`; returns whether the pickup was
    /// consumed. The caller removes consumed pickups.
    pub fn apply(&mut self, ship: &mut Ship) -> bool {
        (self.effect)(ship)
    }

    /// Play the collection sound.
    pub fn emit_sound(&self, audio: &mut dyn AudioSink) {
        self.entity.emit_sound(audio);
    }
}

impl std::fmt::Debug for Pickup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pickup").field("body", &self.entity.body).finish()
    }
}

// =============================================================================
// MANAGER
// =============================================================================

/// Owns every pickup in the world.
#[derive(Debug, Default)]
pub struct PickUpManager {
    pickups: Vec<Pickup>,
}

impl PickUpManager {
    /// An empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scatter `count` health pickups across the full world bounds.
    pub fn spawn_health_pickups(&mut self, count: u32, world: &GameWorld, rng: &mut GameRng) {
        self.spawn_with(count, world, rng, Pickup::health);
        info!(count, "health pickups spawned");
    }

    /// Scatter `count` weapon pickups across the full world bounds.
    pub fn spawn_weapon_pickups(&mut self, count: u32, world: &GameWorld, rng: &mut GameRng) {
        self.spawn_with(count, world, rng, Pickup::weapon);
        info!(count, "weapon pickups spawned");
    }

    fn spawn_with(
        &mut self,
        count: u32,
        world: &GameWorld,
        rng: &mut GameRng,
        factory: impl Fn(Vec2) -> Pickup,
    ) {
        let bounds = world.pickup_spawn_bounds();
        for _ in 0..count {
            self.pickups.push(factory(rng.point_in(&bounds)));
        }
    }

    /// Add a pickup at an explicit position.
    pub fn add(&mut self, pickup: Pickup) {
        self.pickups.push(pickup);
    }

    /// Draw the pickups currently visible on screen.
    pub fn draw(&self, world: &GameWorld, renderer: &mut dyn Renderer) {
        let screen = world.on_screen();
        for pickup in &self.pickups {
            if pickup.is_alive() && pickup.rect().intersects(&screen) {
                pickup.entity.draw(renderer);
            }
        }
    }

    /// Indices of live pickups intersecting `rect`. Indices stay valid
    /// until the next `remove` or `clear`.
    pub fn collisions(&self, rect: Rect) -> Vec<usize> {
        self.pickups
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_alive() && p.rect().intersects(&rect))
            .map(|(index, _)| index)
            .collect()
    }

    /// Apply the pickup at `index` to `ship`; returns whether it was
    /// consumed. The entry is marked dead on consumption and dropped by
    /// the next `remove_dead`.
    pub fn apply(&mut self, index: usize, ship: &mut Ship) -> bool {
        match self.pickups.get_mut(index) {
            Some(pickup) => {
                let consumed = pickup.apply(ship);
                if consumed {
                    pickup.entity.body.alive = false;
                }
                consumed
            }
            None => false,
        }
    }

    /// The pickup at `index`.
    pub fn pickup(&self, index: usize) -> Option<&Pickup> {
        self.pickups.get(index)
    }

    /// All pickups, consumed ones included until `remove_dead`.
    pub fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    /// Number of collectible pickups.
    pub fn live_count(&self) -> usize {
        self.pickups.iter().filter(|p| p.is_alive()).count()
    }

    /// Drop consumed pickups from storage.
    pub fn remove_dead(&mut self) {
        self.pickups.retain(Pickup::is_alive);
    }

    /// Remove every pickup unconditionally.
    pub fn clear(&mut self) {
        self.pickups.clear();
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::GameConfig;
    use crate::game::projectile::ProjectileManager;
    use crate::game::ship::ShipState;

    fn test_world() -> GameWorld {
        GameWorld::new(&GameConfig::default())
    }

    fn normal_ship() -> Ship {
        let mut ship = Ship::new(Vec2::new(100.0, 100.0));
        ship.set_state(ShipState::Normal);
        ship
    }

    #[test]
    fn test_spawn_covers_full_world() {
        let world = test_world();
        let mut rng = GameRng::new(11);
        let mut manager = PickUpManager::new();

        manager.spawn_health_pickups(30, &world, &mut rng);
        assert_eq!(manager.live_count(), 30);
        for pickup in manager.pickups() {
            assert!(world.bounds.contains_point(pickup.entity.body.position));
        }
    }

    #[test]
    fn test_health_pickup_ignored_at_full_health() {
        let mut manager = PickUpManager::new();
        manager.pickups.push(Pickup::health(Vec2::ZERO));
        let mut ship = normal_ship();

        assert!(!manager.apply(0, &mut ship));
        assert_eq!(ship.health_points(), 100);
        // Declined consumption leaves the pickup in the world
        assert_eq!(manager.live_count(), 1);
    }

    #[test]
    fn test_health_pickup_heals_damaged_ship() {
        let mut manager = PickUpManager::new();
        manager.pickups.push(Pickup::health(Vec2::ZERO));
        let mut ship = normal_ship();
        ship.damage(30);

        assert!(manager.apply(0, &mut ship));
        assert_eq!(ship.health_points(), 100);
        assert_eq!(*ship.state(), ShipState::Normal);

        manager.remove_dead();
        assert!(manager.pickups().is_empty());
    }

    #[test]
    fn test_weapon_pickup_always_consumed() {
        let mut manager = PickUpManager::new();
        manager.pickups.push(Pickup::weapon(Vec2::ZERO));
        let mut ship = normal_ship();

        assert!(manager.apply(0, &mut ship));
        assert_eq!(manager.live_count(), 0);

        // The swapped weapon fires a cluster
        let mut projectiles = ProjectileManager::new();
        ship.fire(&mut projectiles);
        assert_eq!(projectiles.live_count(), 3);
    }

    #[test]
    fn test_collisions_skip_consumed() {
        let mut manager = PickUpManager::new();
        let at = Vec2::new(200.0, 200.0);
        manager.pickups.push(Pickup::weapon(at));
        manager.pickups.push(Pickup::weapon(at));

        let mut ship = normal_ship();
        manager.apply(0, &mut ship);

        let hits = manager.collisions(Rect::new(190.0, 190.0, 60.0, 60.0));
        assert_eq!(hits, vec![1]);
    }

    #[test]
    fn test_clear_empties_queries() {
        let world = test_world();
        let mut rng = GameRng::new(5);
        let mut manager = PickUpManager::new();
        manager.spawn_weapon_pickups(8, &world, &mut rng);

        manager.clear();
        assert_eq!(manager.live_count(), 0);
        assert!(manager.collisions(world.bounds).is_empty());
    }
}
