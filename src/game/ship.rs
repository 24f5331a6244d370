//! Player Ship
//!
//! The ship is an entity with an input component, a swappable weapon and
//! an owned state machine. States control invulnerability and the render
//! tint; changing state always runs the old state's exit hook, then the
//! new state's enter hook, then commits the swap, in that order.

use tracing::debug;

use crate::core::rect::Rect;
use crate::core::vec2::Vec2;
use crate::game::entity::{
    Body, Color, Entity, IndexedSprite, InputComponent, Physics, ShipInput, Sound, Steering,
};
use crate::game::projectile::ProjectileManager;
use crate::game::weapon::{LaserWeapon, Weapon};
use crate::io::{AudioSink, InputSnapshot, Renderer, SoundEffect, TextureId};

/// Ship sprite width.
pub const SHIP_WIDTH: f32 = 60.0;
/// Ship sprite height.
pub const SHIP_HEIGHT: f32 = 133.0;
/// Velocity cap on each axis, world units per tick.
pub const MAX_VELOCITY: f32 = 20.0;
/// Full health in points.
pub const MAX_HEALTH_POINTS: i32 = 100;

/// Sprite-sheet frame shown while banking left.
pub const LEFT_FRAME: usize = 0;
/// Sprite-sheet frame shown at rest.
pub const AT_REST_FRAME: usize = 4;
/// Sprite-sheet frame shown while banking right.
pub const RIGHT_FRAME: usize = 7;

/// How long the spawn invulnerability lasts, in ticks.
pub const SPAWN_TICKS: u32 = 180;
/// Low-health warning flash half-period, in ticks.
const FLASH_PERIOD: u32 = 10;
/// Steering acceleration per tick of held input.
const STEER_ACCEL: f32 = 1.0;
/// Alpha the ship fades in from while spawning.
const SPAWN_MIN_ALPHA: f32 = 0.3;

// =============================================================================
// STATE MACHINE
// =============================================================================

/// Exclusive behavioral mode of the ship. Exactly one is active; the old
/// value is dropped on transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShipState {
    /// Fading in after (re)spawn; the ship cannot take damage.
    Spawning {
        /// Ticks until the state hands over to `Normal`.
        ticks_remaining: u32,
    },
    /// Standard play.
    Normal,
    /// Warning mode entered whenever health is below full; flashes the
    /// hull red. Movement and damage behave exactly as in `Normal`.
    LowHealth {
        /// Tick counter driving the flash.
        flash: u32,
    },
}

impl ShipState {
    /// A fresh spawning state with the full invulnerability window.
    pub fn spawning() -> Self {
        Self::Spawning {
            ticks_remaining: SPAWN_TICKS,
        }
    }

    /// Whether this state shields the ship from damage.
    pub fn is_invulnerable(&self) -> bool {
        matches!(self, Self::Spawning { .. })
    }

    fn entering(&mut self, body: &mut Body) {
        match self {
            Self::Spawning { .. } => body.tint = Color::WHITE.with_alpha(SPAWN_MIN_ALPHA),
            Self::Normal => body.tint = Color::WHITE,
            Self::LowHealth { flash } => {
                *flash = 0;
                body.tint = Color::RED;
            }
        }
    }

    fn exiting(&mut self, body: &mut Body) {
        // Every state leaves the hull untinted on the way out
        body.tint = Color::WHITE;
    }

    /// Advance the state one tick; returns the state to transition into,
    /// if any.
    fn update(&mut self, body: &mut Body, health: f32) -> Option<ShipState> {
        match self {
            Self::Spawning { ticks_remaining } => {
                if *ticks_remaining == 0 {
                    return Some(Self::Normal);
                }
                *ticks_remaining -= 1;
                // Fade in as the window runs down
                let progress = 1.0 - *ticks_remaining as f32 / SPAWN_TICKS as f32;
                body.tint = Color::WHITE.with_alpha(SPAWN_MIN_ALPHA + (1.0 - SPAWN_MIN_ALPHA) * progress);
                None
            }
            Self::Normal => {
                // Matches the shipped game: any health below full counts
                // as "low" and trips the warning state.
                if health < 1.0 {
                    return Some(Self::LowHealth { flash: 0 });
                }
                None
            }
            Self::LowHealth { flash } => {
                if health >= 1.0 {
                    return Some(Self::Normal);
                }
                *flash += 1;
                body.tint = if (*flash / FLASH_PERIOD) % 2 == 0 {
                    Color::RED
                } else {
                    Color::WHITE
                };
                None
            }
        }
    }
}

// =============================================================================
// SHIP
// =============================================================================

/// The player's ship.
pub struct Ship {
    entity: Entity,
    input: Box<dyn InputComponent>,
    weapon: Box<dyn Weapon>,
    state: ShipState,
    health_points: i32,
}

impl Ship {
    /// Create a ship at `position` (top-left corner), armed with the
    /// default laser and starting in the spawning state.
    pub fn new(position: Vec2) -> Self {
        let mut body = Body::new(position, SHIP_WIDTH, SHIP_HEIGHT);
        let mut state = ShipState::spawning();
        state.entering(&mut body);

        Self {
            entity: Entity::new(
                body,
                Box::new(Physics),
                Box::new(IndexedSprite::new(TextureId::ShipSheet, AT_REST_FRAME)),
                Box::new(Sound::new(SoundEffect::PlayerDeath)),
            ),
            input: Box::new(ShipInput::default()),
            weapon: Box::new(LaserWeapon),
            state,
            health_points: MAX_HEALTH_POINTS,
        }
    }

    /// Current state, read-only.
    pub fn state(&self) -> &ShipState {
        &self.state
    }

    /// Swap the active state: exit hook on the old state, enter hook on
    /// the new one, then commit. Nothing observes a half-switched ship.
    pub fn set_state(&mut self, mut next: ShipState) {
        debug!(from = ?self.state, to = ?next, "ship state change");
        self.state.exiting(&mut self.entity.body);
        next.entering(&mut self.entity.body);
        self.state = next;
    }

    /// Health as a fraction of full, always `health_points / 100`.
    #[inline]
    pub fn health(&self) -> f32 {
        self.health_points as f32 / MAX_HEALTH_POINTS as f32
    }

    /// Health in points, in `[0, 100]`.
    #[inline]
    pub fn health_points(&self) -> i32 {
        self.health_points
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

    /// Mutable body state, for screen clamping and tests.
    #[inline]
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.entity.body
    }

    /// Whether the ship is live.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.entity.is_alive()
    }

    /// Run one tick: digest input, steer, fire, advance the state
    /// machine, then integrate physics with the velocity cap applied.
    pub fn update(&mut self, snapshot: InputSnapshot, projectiles: &mut ProjectileManager) {
        let steering = self.input.poll(snapshot);
        self.steer(steering);
        if steering.fire {
            self.fire(projectiles);
        }

        let health = self.health();
        if let Some(next) = self.state.update(&mut self.entity.body, health) {
            self.set_state(next);
        }

        self.entity.body.velocity = self.entity.body.velocity.clamp_abs(MAX_VELOCITY);
        self.entity.update();
    }

    /// Fire the current weapon from the ship's nose.
    pub fn fire(&mut self, projectiles: &mut ProjectileManager) {
        let nose = Vec2::new(self.entity.body.center().x, self.entity.body.position.y);
        self.weapon.fire(nose, projectiles);
    }

    /// Replace the current weapon.
    pub fn arm(&mut self, weapon: Box<dyn Weapon>) {
        self.weapon = weapon;
    }

    /// Apply damage. Ignored while the spawn shield is up; health never
    /// drops below zero, and reaching zero kills the ship.
    pub fn damage(&mut self, amount: i32) {
        if self.state.is_invulnerable() {
            return;
        }
        self.health_points = (self.health_points - amount).max(0);
        if self.health_points == 0 {
            self.entity.body.alive = false;
        }
    }

    /// Restore full health and return to normal play.
    pub fn heal_full(&mut self) {
        self.health_points = MAX_HEALTH_POINTS;
        self.set_state(ShipState::Normal);
    }

    /// Put the ship back into the world at `position` with full health,
    /// the at-rest frame and a fresh spawn shield.
    pub fn respawn(&mut self, position: Vec2) {
        self.health_points = MAX_HEALTH_POINTS;
        self.entity.body.alive = true;
        self.entity.body.position = position;
        self.entity.body.velocity = Vec2::ZERO;
        self.reset();
        self.set_state(ShipState::spawning());
    }

    /// Force the at-rest frame and drop transient render state. Health
    /// and the active state are untouched.
    pub fn reset(&mut self) {
        self.entity.set_frame(AT_REST_FRAME);
        self.entity.body.rotation = 0.0;
    }

    /// Drop back to normal play and reset the transient render state.
    pub fn reset_state(&mut self) {
        self.set_state(ShipState::Normal);
        self.reset();
    }

    /// Draw through the graphics component.
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        self.entity.draw(renderer);
    }

    /// Trigger the ship's death sound.
    pub fn emit_sound(&self, audio: &mut dyn AudioSink) {
        self.entity.emit_sound(audio);
    }

    fn steer(&mut self, steering: Steering) {
        if steering.left {
            self.entity.body.velocity.x -= STEER_ACCEL;
            self.entity.set_frame(LEFT_FRAME);
        }
        if steering.right {
            self.entity.body.velocity.x += STEER_ACCEL;
            self.entity.set_frame(RIGHT_FRAME);
        }
        if steering.forward {
            self.entity.body.velocity.y -= STEER_ACCEL;
        }
        if steering.backward {
            self.entity.body.velocity.y += STEER_ACCEL;
        }
        if steering.settle {
            self.entity.set_frame(AT_REST_FRAME);
        }
    }
}

impl std::fmt::Debug for Ship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ship")
            .field("body", &self.entity.body)
            .field("state", &self.state)
            .field("health_points", &self.health_points)
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
