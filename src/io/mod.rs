//! Host Collaborator Seams
//!
//! The non-deterministic edge of the crate. The game core never touches a
//! window, an audio device or a keyboard; it talks to these traits instead:
//!
//! - [`Renderer`] receives a [`DrawCall`] per visible entity
//! - [`AudioSink`] receives a [`SoundEffect`] trigger per entity event
//! - [`InputSource`] answers "what does the player want right now"
//!
//! Headless implementations live here too: null backends for running the
//! simulation without a host, and recording backends used by the demo
//! binary and the test suite.

use serde::{Deserialize, Serialize};

use crate::core::vec2::Vec2;
use crate::game::entity::Color;

// =============================================================================
// RENDERING
// =============================================================================

/// Identifies a texture (or sprite sheet) known to the host.
///
/// The core never loads image data; it only names what to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureId {
    /// Player ship sprite sheet (turn animation frames)
    ShipSheet,
    /// Aggressive enemy fighter
    EnemyFighter,
    /// Patrolling enemy freighter
    EnemyFreighter,
    /// Laser bolt projectile
    Laser,
    /// Missile projectile
    Missile,
    /// Health restore pickup
    HealthPickup,
    /// Weapon upgrade pickup
    WeaponPickup,
}

/// Everything the host needs to draw one entity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrawCall {
    /// Which texture to draw
    pub texture: TextureId,
    /// Frame index within a sprite sheet (0 for plain sprites)
    pub frame: usize,
    /// World position (top-left corner of the entity rectangle)
    pub position: Vec2,
    /// Rotation in radians
    pub rotation: f32,
    /// Rotation origin relative to `position` (the entity center)
    pub origin: Vec2,
    /// Tint color
    pub tint: Color,
    /// Uniform scale factor
    pub scale: f32,
}

/// Drawing collaborator. One call per visible entity per frame.
pub trait Renderer {
    /// Draw a single entity.
    fn draw(&mut self, call: &DrawCall);
}

/// Renderer that discards every call.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _call: &DrawCall) {}
}

/// Renderer that records every call. Used by tests to assert on what
/// the core asked the host to draw.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    /// All draw calls received, in submission order.
    pub calls: Vec<DrawCall>,
}

impl Renderer for RecordingRenderer {
    fn draw(&mut self, call: &DrawCall) {
        self.calls.push(*call);
    }
}

// =============================================================================
// AUDIO
// =============================================================================

/// Sound effects the game can trigger. Mixing and channels are the
/// host's problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Player ship spawned or respawned
    PlayerSpawn,
    /// Player ship destroyed
    PlayerDeath,
    /// Enemy destroyed
    Explosion,
    /// Pickup collected
    PickupCollected,
}

/// Audio collaborator. Receives "play this now" triggers.
pub trait AudioSink {
    /// Play a sound effect.
    fn play(&mut self, effect: SoundEffect);
}

/// Audio sink that discards every trigger.
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Audio sink that records every trigger, for tests.
#[derive(Debug, Default)]
pub struct RecordingAudio {
    /// All effects received, in trigger order.
    pub played: Vec<SoundEffect>,
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, effect: SoundEffect) {
        self.played.push(effect);
    }
}

// =============================================================================
// INPUT
// =============================================================================

/// Current player intent, as sampled from whatever device the host polls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Steer left
    pub left: bool,
    /// Steer right
    pub right: bool,
    /// Accelerate forward (up the world)
    pub forward: bool,
    /// Accelerate backward
    pub backward: bool,
    /// Fire button held
    pub fire: bool,
}

/// Input collaborator. The core only consumes intent; it never polls
/// hardware.
pub trait InputSource {
    /// Sample the current input state.
    fn snapshot(&self) -> InputSnapshot;
}

/// Input source that reports no input at all.
#[derive(Debug, Default)]
pub struct NullInput;

impl InputSource for NullInput {
    fn snapshot(&self) -> InputSnapshot {
        InputSnapshot::default()
    }
}

/// Input source that replays a fixed snapshot. Handy for scripted demos
/// and tests.
#[derive(Debug, Default)]
pub struct FixedInput(pub InputSnapshot);

impl InputSource for FixedInput {
    fn snapshot(&self) -> InputSnapshot {
        self.0
    }
}
