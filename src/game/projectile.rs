//! Projectiles
//!
//! Laser bolts and missiles fired by the ship, plus the manager that
//! owns them. Projectiles that leave the visible screen are marked dead
//! rather than updated forever; storage is compacted with
//! [`ProjectileManager::purge_dead`].

use tracing::trace;

use crate::core::rect::Rect;
use crate::core::vec2::Vec2;
use crate::game::entity::{Body, Entity, NullSound, Physics, Sprite};
use crate::game::world::GameWorld;
use crate::io::{Renderer, TextureId};

/// Laser bolt speed, world units per tick, straight up.
pub const LASER_SPEED: f32 = 9.0;
/// Speed of the center missile in a cluster.
pub const MISSILE_SPEED: f32 = 20.0;
/// Speed of the two flanking missiles in a cluster.
pub const MISSILE_FLANK_SPEED: f32 = 10.0;
/// Horizontal offset of the flanking missiles from the cluster center.
pub const MISSILE_FLANK_OFFSET: f32 = 50.0;

const LASER_WIDTH: f32 = 8.0;
const LASER_HEIGHT: f32 = 24.0;
const MISSILE_WIDTH: f32 = 14.0;
const MISSILE_HEIGHT: f32 = 40.0;

/// A single shot in flight.
#[derive(Debug)]
pub struct Projectile {
    entity: Entity,
}

impl Projectile {
    /// A laser bolt traveling straight up from `position` (its top-center).
    pub fn laser(position: Vec2) -> Self {
        Self::new(
            TextureId::Laser,
            position,
            LASER_WIDTH,
            LASER_HEIGHT,
            LASER_SPEED,
        )
    }

    /// A missile traveling straight up from `position` at `speed`.
    pub fn missile(position: Vec2, speed: f32) -> Self {
        Self::new(TextureId::Missile, position, MISSILE_WIDTH, MISSILE_HEIGHT, speed)
    }

    fn new(texture: TextureId, position: Vec2, width: f32, height: f32, speed: f32) -> Self {
        // Center the projectile horizontally on the requested position
        let mut body = Body::new(Vec2::new(position.x - width / 2.0, position.y), width, height);
        body.velocity = Vec2::new(0.0, -speed);

        Self {
            entity: Entity::new(
                body,
                Box::new(Physics),
                Box::new(Sprite::new(texture)),
                Box::new(NullSound),
            ),
        }
    }

    /// Bounding rectangle.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.entity.rect()
    }

    /// Whether the projectile is still in flight.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.entity.is_alive()
    }

    /// Take the projectile out of flight (hit something or left the screen).
    pub fn deactivate(&mut self) {
        self.entity.body.alive = false;
    }
}

/// Owns every projectile in flight.
#[derive(Debug, Default)]
pub struct ProjectileManager {
    projectiles: Vec<Projectile>,
}

impl ProjectileManager {
    /// An empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire a single laser bolt from `at`.
    pub fn fire_laser(&mut self, at: Vec2) {
        trace!(x = at.x, y = at.y, "laser fired");
        self.projectiles.push(Projectile::laser(at));
    }

    /// Fire a three-missile cluster from `at`: a fast center missile and
    /// two slower flankers offset to either side.
    pub fn fire_missile_cluster(&mut self, at: Vec2) {
        trace!(x = at.x, y = at.y, "missile cluster fired");
        self.projectiles.push(Projectile::missile(at, MISSILE_SPEED));
        self.projectiles.push(Projectile::missile(
            Vec2::new(at.x + MISSILE_FLANK_OFFSET, at.y),
            MISSILE_FLANK_SPEED,
        ));
        self.projectiles.push(Projectile::missile(
            Vec2::new(at.x - MISSILE_FLANK_OFFSET, at.y),
            MISSILE_FLANK_SPEED,
        ));
    }

    /// Advance live projectiles one tick. A projectile no longer fully
    /// contained in the visible screen is marked dead instead of updated.
    pub fn update(&mut self, world: &GameWorld) {
        let screen = world.on_screen();
        for projectile in &mut self.projectiles {
            if !projectile.is_alive() {
                continue;
            }
            if screen.contains(&projectile.rect()) {
                projectile.entity.update();
            } else {
                projectile.deactivate();
            }
        }
    }

    /// Draw live projectiles.
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        for projectile in self.projectiles.iter().filter(|p| p.is_alive()) {
            projectile.entity.draw(renderer);
        }
    }

    /// Indices of live projectiles whose rectangle intersects `rect`.
    ///
    /// Indices stay valid until the next `purge_dead` or `clear`, so the
    /// caller can deactivate hits without upsetting iteration.
    pub fn collision_indices(&self, rect: Rect) -> Vec<usize> {
        self.projectiles
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_alive() && p.rect().intersects(&rect))
            .map(|(index, _)| index)
            .collect()
    }

    /// Mark the projectile at `index` as spent.
    pub fn deactivate(&mut self, index: usize) {
        if let Some(projectile) = self.projectiles.get_mut(index) {
            projectile.deactivate();
        }
    }

    /// Number of projectiles currently in flight.
    pub fn live_count(&self) -> usize {
        self.projectiles.iter().filter(|p| p.is_alive()).count()
    }

    /// Drop dead projectiles from storage.
    pub fn purge_dead(&mut self) {
        self.projectiles.retain(Projectile::is_alive);
    }

    /// Remove every projectile unconditionally.
    pub fn clear(&mut self) {
        self.projectiles.clear();
    }

    /// All projectiles, dead ones included.
    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::GameConfig;

    fn test_world() -> GameWorld {
        GameWorld::new(&GameConfig {
            world_width: 1000.0,
            world_height: 2000.0,
            screen_width: 1000.0,
            screen_height: 1000.0,
            ..GameConfig::default()
        })
    }

    #[test]
    fn test_laser_moves_up() {
        let world = test_world();
        let mut manager = ProjectileManager::new();
        let origin = Vec2::new(500.0, world.camera.y + 500.0);
        manager.fire_laser(origin);

        let before = manager.projectiles()[0].rect().y;
        manager.update(&world);
        let after = manager.projectiles()[0].rect().y;
        assert_eq!(before - after, LASER_SPEED);
    }

    #[test]
    fn test_missile_cluster_layout() {
        let mut manager = ProjectileManager::new();
        manager.fire_missile_cluster(Vec2::new(500.0, 300.0));

        assert_eq!(manager.live_count(), 3);
        let centers: Vec<f32> = manager
            .projectiles()
            .iter()
            .map(|p| p.rect().center().x)
            .collect();
        assert_eq!(centers, vec![500.0, 550.0, 450.0]);

        // Center missile outruns the flankers
        let speeds: Vec<f32> = manager
            .projectiles()
            .iter()
            .map(|p| -p.entity.body.velocity.y)
            .collect();
        assert_eq!(speeds, vec![MISSILE_SPEED, MISSILE_FLANK_SPEED, MISSILE_FLANK_SPEED]);
    }

    #[test]
    fn test_offscreen_projectile_is_culled() {
        let world = test_world();
        let mut manager = ProjectileManager::new();

        // Just below the top of the screen; one update pushes it out
        manager.fire_laser(Vec2::new(500.0, world.camera.y + 2.0));
        manager.update(&world);
        assert_eq!(manager.live_count(), 1);

        manager.update(&world);
        assert_eq!(manager.live_count(), 0);

        manager.purge_dead();
        assert!(manager.projectiles().is_empty());
    }

    #[test]
    fn test_collision_indices_skip_dead() {
        let world = test_world();
        let mut manager = ProjectileManager::new();
        let at = Vec2::new(500.0, world.camera.y + 500.0);
        manager.fire_laser(at);
        manager.fire_laser(at);
        manager.deactivate(0);

        let target = Rect::new(400.0, world.camera.y + 400.0, 200.0, 200.0);
        assert_eq!(manager.collision_indices(target), vec![1]);
    }
}
