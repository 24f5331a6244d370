//! Game Session
//!
//! The frame driver. One [`GameSession::tick`] runs a whole frame in a
//! fixed order: camera scroll, ship update, enemy AI, projectile flight,
//! then collision resolution, so collision queries always see this
//! frame's post-movement positions. Drawing happens separately, after
//! the tick, in the same ship / enemies / pickups order.

use serde::Serialize;
use tracing::{debug, info};

use crate::core::rng::GameRng;
use crate::core::vec2::Vec2;
use crate::game::ai::AiContext;
use crate::game::config::{ConfigError, GameConfig};
use crate::game::enemy::EnemyManager;
use crate::game::events::{GameEvent, GameEventKind};
use crate::game::pickup::PickUpManager;
use crate::game::projectile::ProjectileManager;
use crate::game::ship::{Ship, SHIP_HEIGHT, SHIP_WIDTH};
use crate::game::world::GameWorld;
use crate::io::{AudioSink, InputSource, Renderer, SoundEffect};

/// Damage the ship takes per enemy collision.
pub const HIT_DAMAGE: i32 = 5;
/// Score awarded per enemy destroyed.
pub const KILL_SCORE: u32 = 10;
/// Gap between the ship and the bottom of the screen at (re)spawn.
const SPAWN_MARGIN: f32 = 20.0;

/// One run of the game, from first spawn to game over.
#[derive(Debug)]
pub struct GameSession {
    config: GameConfig,
    world: GameWorld,
    rng: GameRng,
    ship: Ship,
    enemies: EnemyManager,
    pickups: PickUpManager,
    projectiles: ProjectileManager,
    frame: u64,
    score: u32,
    lives: u32,
    game_over: bool,
    events: Vec<GameEvent>,
}

/// End-of-run statistics, serialized by the demo binary.
#[derive(Clone, Debug, Serialize)]
pub struct SessionSummary {
    /// Frames simulated.
    pub frames: u64,
    /// Final score.
    pub score: u32,
    /// Lives left (zero on game over).
    pub lives_remaining: u32,
    /// Enemies still alive in the world.
    pub live_enemies: usize,
    /// Pickups still collectible.
    pub live_pickups: usize,
    /// Whether the run ended.
    pub game_over: bool,
}

impl GameSession {
    /// Build a session from a config: validates it, seeds the RNG, puts
    /// the ship at the bottom-center of the screen and scatters the
    /// starting enemies and pickups.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let world = GameWorld::new(&config);
        let mut rng = GameRng::new(config.rng_seed);
        let ship = Ship::new(Self::spawn_position(&world));

        let mut enemies = EnemyManager::new();
        enemies.spawn_fighters(config.fighter_count, &world, &mut rng);
        enemies.spawn_freighters(config.freighter_count, &world, &mut rng);

        let mut pickups = PickUpManager::new();
        pickups.spawn_health_pickups(config.health_pickup_count, &world, &mut rng);
        pickups.spawn_weapon_pickups(config.weapon_pickup_count, &world, &mut rng);

        info!(
            fighters = config.fighter_count,
            freighters = config.freighter_count,
            lives = config.lives,
            seed = config.rng_seed,
            "session started"
        );

        Ok(Self {
            lives: config.lives,
            config,
            world,
            rng,
            ship,
            enemies,
            pickups,
            projectiles: ProjectileManager::new(),
            frame: 0,
            score: 0,
            game_over: false,
            events: Vec::new(),
        })
    }

    /// Bottom-center of the currently visible screen.
    fn spawn_position(world: &GameWorld) -> Vec2 {
        let screen = world.on_screen();
        Vec2::new(
            screen.x + (screen.width - SHIP_WIDTH) / 2.0,
            screen.bottom() - SHIP_HEIGHT - SPAWN_MARGIN,
        )
    }

    /// Run one frame. Does nothing once the run is over.
    pub fn tick(&mut self, input: &dyn InputSource, audio: &mut dyn AudioSink) {
        if self.game_over {
            return;
        }
        self.frame += 1;

        self.world.scroll();

        self.ship.update(input.snapshot(), &mut self.projectiles);
        self.world.keep_on_screen(self.ship.body_mut());

        let ship_position = self.ship.body().center();
        self.enemies.update(&AiContext {
            ship_position,
            world: &self.world,
        });
        self.projectiles.update(&self.world);

        self.resolve_collisions(audio);

        // Projectiles and consumed pickups are compacted every frame;
        // dead enemies stay parked until an explicit purge.
        self.projectiles.purge_dead();
        self.pickups.remove_dead();
    }

    /// Draw the frame: ship, then enemies, then pickups, then shots.
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        if self.ship.is_alive() {
            self.ship.draw(renderer);
        }
        self.enemies.draw(&self.world, renderer);
        self.pickups.draw(&self.world, renderer);
        self.projectiles.draw(renderer);
    }

    /// Wipe the world and restock it: managers cleared, a fresh wave of
    /// enemies and pickups, the ship respawned. Score and lives carry
    /// over.
    pub fn reset_level(&mut self) {
        self.enemies.clear();
        self.pickups.clear();
        self.projectiles.clear();

        self.world = GameWorld::new(&self.config);
        self.enemies
            .spawn_fighters(self.config.fighter_count, &self.world, &mut self.rng);
        self.enemies
            .spawn_freighters(self.config.freighter_count, &self.world, &mut self.rng);
        self.pickups
            .spawn_health_pickups(self.config.health_pickup_count, &self.world, &mut self.rng);
        self.pickups
            .spawn_weapon_pickups(self.config.weapon_pickup_count, &self.world, &mut self.rng);

        self.ship.respawn(Self::spawn_position(&self.world));
        info!("level reset");
    }

    // =========================================================================
    // COLLISION RESOLUTION
    // =========================================================================

    fn resolve_collisions(&mut self, audio: &mut dyn AudioSink) {
        self.resolve_projectile_hits(audio);
        self.resolve_enemy_rams(audio);
        self.resolve_pickup_contacts(audio);
    }

    /// Each projectile spends itself on the first enemy it overlaps.
    fn resolve_projectile_hits(&mut self, audio: &mut dyn AudioSink) {
        for enemy_index in 0..self.enemies.enemies().len() {
            let rect = match self.enemies.enemy(enemy_index) {
                Some(enemy) if enemy.is_alive() => enemy.rect(),
                _ => continue,
            };

            let hits = self.projectiles.collision_indices(rect);
            if let Some(&projectile_index) = hits.first() {
                self.projectiles.deactivate(projectile_index);
                if let Some(enemy) = self.enemies.enemy_mut(enemy_index) {
                    enemy.destroy(audio);
                }
                self.score += KILL_SCORE;
                debug!(score = self.score, "enemy destroyed");
                self.push_event(GameEventKind::EnemyDestroyed { score: self.score });
            }
        }
    }

    /// Ramming kills the enemy and costs the ship a fixed chunk of
    /// health; the spawn shield still absorbs the damage.
    fn resolve_enemy_rams(&mut self, audio: &mut dyn AudioSink) {
        if !self.ship.is_alive() {
            return;
        }

        for enemy_index in self.enemies.colliding_with(self.ship.rect()) {
            if let Some(enemy) = self.enemies.enemy_mut(enemy_index) {
                enemy.destroy(audio);
            }
            self.ship.damage(HIT_DAMAGE);
        }

        if !self.ship.is_alive() {
            self.handle_ship_death(audio);
        }
    }

    fn resolve_pickup_contacts(&mut self, audio: &mut dyn AudioSink) {
        if !self.ship.is_alive() {
            return;
        }

        for index in self.pickups.collisions(self.ship.rect()) {
            if self.pickups.apply(index, &mut self.ship) {
                if let Some(pickup) = self.pickups.pickup(index) {
                    pickup.emit_sound(audio);
                }
                self.push_event(GameEventKind::PickupCollected);
            }
        }
    }

    fn handle_ship_death(&mut self, audio: &mut dyn AudioSink) {
        self.ship.emit_sound(audio);

        if self.lives > 0 {
            self.lives -= 1;
            self.push_event(GameEventKind::ShipDestroyed {
                lives_remaining: self.lives,
            });

            self.ship.respawn(Self::spawn_position(&self.world));
            audio.play(SoundEffect::PlayerSpawn);
            self.push_event(GameEventKind::ShipRespawned);
            info!(lives = self.lives, "ship respawned");
        } else {
            self.push_event(GameEventKind::ShipDestroyed { lives_remaining: 0 });
            self.game_over = true;
            self.push_event(GameEventKind::GameOver { score: self.score });
            info!(score = self.score, "game over");
        }
    }

    fn push_event(&mut self, kind: GameEventKind) {
        self.events.push(GameEvent {
            frame: self.frame,
            kind,
        });
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Frames simulated so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Current score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Lives remaining.
    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Whether the run has ended.
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The player's ship.
    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    /// Mutable ship access, for hosts that stage scenarios.
    pub fn ship_mut(&mut self) -> &mut Ship {
        &mut self.ship
    }

    /// The enemy collection.
    pub fn enemies(&self) -> &EnemyManager {
        &self.enemies
    }

    /// Mutable enemy collection.
    pub fn enemies_mut(&mut self) -> &mut EnemyManager {
        &mut self.enemies
    }

    /// The pickup collection.
    pub fn pickups(&self) -> &PickUpManager {
        &self.pickups
    }

    /// Mutable pickup collection.
    pub fn pickups_mut(&mut self) -> &mut PickUpManager {
        &mut self.pickups
    }

    /// Projectiles in flight.
    pub fn projectiles(&self) -> &ProjectileManager {
        &self.projectiles
    }

    /// World bounds and camera.
    pub fn world(&self) -> &GameWorld {
        &self.world
    }

    /// Everything notable that has happened, in order.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Drain the event log, handing ownership to the caller. Hosts that
    /// forward events elsewhere call this once per frame.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Snapshot of the run for reporting.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            frames: self.frame,
            score: self.score,
            lives_remaining: self.lives,
            live_enemies: self.enemies.live_count(),
            live_pickups: self.pickups.live_count(),
            game_over: self.game_over,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
