//! Enemies
//!
//! Enemy entities and the manager that owns them. Enemies spawn at random
//! positions inside the world's enemy band, facing down the world, and
//! die in place; dead entries are skipped by every query and stay in
//! storage until [`EnemyManager::purge_dead`] runs.

use std::f32::consts::PI;

use tracing::info;

use crate::core::rect::Rect;
use crate::core::rng::GameRng;
use crate::core::vec2::Vec2;
use crate::game::ai::{AggressiveAi, AiContext, EnemyAi, PatrolAi};
use crate::game::entity::{Body, Entity, Physics, Sound, Sprite};
use crate::game::world::GameWorld;
use crate::io::{AudioSink, Renderer, SoundEffect, TextureId};

/// Fighter pursuit speed.
pub const FIGHTER_SPEED: f32 = 4.0;
/// Freighter patrol speed.
pub const FREIGHTER_SPEED: f32 = 2.0;

const FIGHTER_WIDTH: f32 = 60.0;
const FIGHTER_HEIGHT: f32 = 60.0;
const FREIGHTER_WIDTH: f32 = 80.0;
const FREIGHTER_HEIGHT: f32 = 100.0;

/// An enemy entity driven by an AI policy.
pub struct Enemy {
    entity: Entity,
    ai: Box<dyn EnemyAi>,
}

impl Enemy {
    /// An aggressive fighter that rams the ship.
    pub fn fighter(position: Vec2) -> Self {
        Self::new(
            position,
            FIGHTER_WIDTH,
            FIGHTER_HEIGHT,
            TextureId::EnemyFighter,
            Box::new(AggressiveAi::new(FIGHTER_SPEED)),
        )
    }

    /// A freighter that sweeps the world horizontally.
    pub fn freighter(position: Vec2) -> Self {
        Self::new(
            position,
            FREIGHTER_WIDTH,
            FREIGHTER_HEIGHT,
            TextureId::EnemyFreighter,
            Box::new(PatrolAi::new(FREIGHTER_SPEED)),
        )
    }

    fn new(
        position: Vec2,
        width: f32,
        height: f32,
        texture: TextureId,
        ai: Box<dyn EnemyAi>,
    ) -> Self {
        let mut body = Body::new(position, width, height);
        // Enemies spawn facing down the world, toward the player
        body.rotation = PI;

        Self {
            entity: Entity::new(
                body,
                Box::new(Physics),
                Box::new(Sprite::new(texture)),
                Box::new(Sound::new(SoundEffect::Explosion)),
            ),
            ai,
        }
    }

    /// Run the AI, then integrate physics, for one tick.
    pub fn update(&mut self, ctx: &AiContext<'_>) {
        self.ai.update(&mut self.entity.body, ctx);
        self.entity.update();
    }

    /// Bounding rectangle.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.entity.rect()
    }

    /// Plain body state.
    #[inline]
    pub fn body(&self) -> &Body {
        &self.entity.body
    }

    /// Mutable body state, used by tests to stage scenarios.
    #[inline]
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.entity.body
    }

    /// Whether the enemy is live.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.entity.is_alive()
    }

    /// Kill the enemy in place and play its explosion.
    pub fn destroy(&mut self, audio: &mut dyn AudioSink) {
        self.entity.body.alive = false;
        self.entity.emit_sound(audio);
    }
}

impl std::fmt::Debug for Enemy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enemy").field("body", &self.entity.body).finish()
    }
}

// =============================================================================
// MANAGER
// =============================================================================

/// Owns every enemy in the world.
#[derive(Debug, Default)]
pub struct EnemyManager {
    enemies: Vec<Enemy>,
}

impl EnemyManager {
    /// An empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `count` fighters at random positions in the enemy band.
    /// A zero count is a no-op, not an error.
    pub fn spawn_fighters(&mut self, count: u32, world: &GameWorld, rng: &mut GameRng) {
        self.spawn_with(count, world, rng, Enemy::fighter);
        info!(count, "fighters spawned");
    }

    /// Spawn `count` freighters at random positions in the enemy band.
    pub fn spawn_freighters(&mut self, count: u32, world: &GameWorld, rng: &mut GameRng) {
        self.spawn_with(count, world, rng, Enemy::freighter);
        info!(count, "freighters spawned");
    }

    fn spawn_with(
        &mut self,
        count: u32,
        world: &GameWorld,
        rng: &mut GameRng,
        factory: impl Fn(Vec2) -> Enemy,
    ) {
        let bounds = world.enemy_spawn_bounds();
        for _ in 0..count {
            self.enemies.push(factory(rng.point_in(&bounds)));
        }
    }

    /// Add an enemy at an explicit position.
    pub fn add(&mut self, enemy: Enemy) {
        self.enemies.push(enemy);
    }

    /// Update every live enemy. Dead enemies are skipped, not removed.
    pub fn update(&mut self, ctx: &AiContext<'_>) {
        for enemy in self.enemies.iter_mut().filter(|e| e.is_alive()) {
            enemy.update(ctx);
        }
    }

    /// Draw the enemies currently visible on screen.
    pub fn draw(&self, world: &GameWorld, renderer: &mut dyn Renderer) {
        for enemy in self.visible_enemies(world) {
            enemy.entity.draw(renderer);
        }
    }

    /// Live enemies whose rectangle intersects the visible screen, as a
    /// lazy subsequence. Recomputed fresh on every call, never cached.
    pub fn visible_enemies<'a>(
        &'a self,
        world: &GameWorld,
    ) -> impl Iterator<Item = &'a Enemy> + 'a {
        let screen = world.on_screen();
        self.enemies
            .iter()
            .filter(move |e| e.is_alive() && e.rect().intersects(&screen))
    }

    /// Indices of live enemies intersecting `other`, excluding `other`
    /// itself by reference identity.
    pub fn collisions(&self, other: &Enemy) -> Vec<usize> {
        let rect = other.rect();
        self.enemies
            .iter()
            .enumerate()
            .filter(|(_, e)| {
                e.is_alive() && !std::ptr::eq(*e, other) && e.rect().intersects(&rect)
            })
            .map(|(index, _)| index)
            .collect()
    }

    /// Indices of live enemies intersecting an arbitrary rectangle
    /// (the ship, a projectile). Indices stay valid until the next
    /// `purge_dead` or `clear`.
    pub fn colliding_with(&self, rect: Rect) -> Vec<usize> {
        self.enemies
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_alive() && e.rect().intersects(&rect))
            .map(|(index, _)| index)
            .collect()
    }

    /// The enemy at `index`.
    pub fn enemy(&self, index: usize) -> Option<&Enemy> {
        self.enemies.get(index)
    }

    /// Mutable access to the enemy at `index`.
    pub fn enemy_mut(&mut self, index: usize) -> Option<&mut Enemy> {
        self.enemies.get_mut(index)
    }

    /// All enemies, dead ones included.
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Number of live enemies.
    pub fn live_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_alive()).count()
    }

    /// Compact storage by dropping dead enemies.
    pub fn purge_dead(&mut self) {
        self.enemies.retain(Enemy::is_alive);
    }

    /// Remove every enemy unconditionally.
    pub fn clear(&mut self) {
        self.enemies.clear();
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::GameConfig;
    use crate::io::RecordingAudio;

    fn test_world() -> GameWorld {
        GameWorld::new(&GameConfig::default())
    }

    fn ctx<'a>(world: &'a GameWorld) -> AiContext<'a> {
        AiContext {
            ship_position: Vec2::new(640.0, 3800.0),
            world,
        }
    }

    #[test]
    fn test_spawn_count_rotation_and_bounds() {
        let world = test_world();
        let mut rng = GameRng::new(42);
        let mut manager = EnemyManager::new();

        manager.spawn_fighters(25, &world, &mut rng);
        assert_eq!(manager.live_count(), 25);

        let bounds = world.enemy_spawn_bounds();
        for enemy in manager.enemies() {
            assert!(enemy.is_alive());
            assert_eq!(enemy.body().rotation, PI);
            assert!(bounds.contains_point(enemy.body().position));
        }
    }

    #[test]
    fn test_spawn_zero_is_noop() {
        let world = test_world();
        let mut rng = GameRng::new(1);
        let mut manager = EnemyManager::new();

        manager.spawn_fighters(0, &world, &mut rng);
        assert!(manager.enemies().is_empty());
    }

    #[test]
    fn test_update_skips_dead() {
        let world = test_world();
        let mut rng = GameRng::new(7);
        let mut audio = RecordingAudio::default();
        let mut manager = EnemyManager::new();
        manager.spawn_fighters(2, &world, &mut rng);

        manager.enemy_mut(0).unwrap().destroy(&mut audio);
        let parked = manager.enemy(0).unwrap().body().position;

        manager.update(&ctx(&world));
        assert_eq!(manager.enemy(0).unwrap().body().position, parked);
        assert_eq!(audio.played, vec![SoundEffect::Explosion]);
    }

    #[test]
    fn test_visible_enemies_culling() {
        let world = test_world();
        let mut manager = EnemyManager::new();
        let screen = world.on_screen();

        // Fully inside, fully outside, and straddling the boundary
        let inside = Enemy::fighter(Vec2::new(screen.x + 100.0, screen.y + 100.0));
        let outside = Enemy::fighter(Vec2::new(screen.x + 100.0, screen.y - 500.0));
        let straddling = Enemy::fighter(Vec2::new(screen.x + 100.0, screen.y - 30.0));

        manager.enemies.push(inside);
        manager.enemies.push(outside);
        manager.enemies.push(straddling);

        assert_eq!(manager.visible_enemies(&world).count(), 2);

        // A dead enemy inside the screen is never visible
        let mut audio = RecordingAudio::default();
        manager.enemies[0].destroy(&mut audio);
        assert_eq!(manager.visible_enemies(&world).count(), 1);
    }

    #[test]
    fn test_collisions_exclude_self_and_dead() {
        let mut manager = EnemyManager::new();
        let mut audio = RecordingAudio::default();
        let at = Vec2::new(500.0, 500.0);

        manager.enemies.push(Enemy::fighter(at));
        manager.enemies.push(Enemy::fighter(at));
        manager.enemies.push(Enemy::fighter(at));
        manager.enemies[2].destroy(&mut audio);

        let hits = manager.collisions(&manager.enemies()[0]);
        // Overlapping live enemy only: not itself, not the dead one
        assert_eq!(hits, vec![1]);
    }

    #[test]
    fn test_clear_empties_queries() {
        let world = test_world();
        let mut rng = GameRng::new(3);
        let mut manager = EnemyManager::new();
        manager.spawn_freighters(5, &world, &mut rng);

        manager.clear();
        assert_eq!(manager.live_count(), 0);
        assert!(manager.visible_enemies(&world).next().is_none());
        assert!(manager.colliding_with(world.bounds).is_empty());
    }

    #[test]
    fn test_purge_dead_compacts() {
        let world = test_world();
        let mut rng = GameRng::new(9);
        let mut audio = RecordingAudio::default();
        let mut manager = EnemyManager::new();
        manager.spawn_fighters(4, &world, &mut rng);

        manager.enemy_mut(1).unwrap().destroy(&mut audio);
        manager.enemy_mut(3).unwrap().destroy(&mut audio);
        assert_eq!(manager.enemies().len(), 4);

        manager.purge_dead();
        assert_eq!(manager.enemies().len(), 2);
        assert!(manager.enemies().iter().all(Enemy::is_alive));
    }
}
