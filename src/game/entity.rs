//! Entities and Behavior Components
//!
//! Every object in the world (ship, enemies, projectiles, pickups) is an
//! [`Entity`]: a positioned rectangle with velocity, rotation, tint and a
//! liveness flag, plus pluggable behavior components.
//!
//! Components are capability traits with trivial null implementations, so
//! an entity that needs no sound (or no physics) carries a no-op rather
//! than a special case:
//!
//! - [`PhysicsComponent`]: integrates velocity into position each tick
//! - [`GraphicsComponent`]: emits a draw call for the current visual
//! - [`SoundComponent`]: plays the entity's associated effect
//! - [`InputComponent`]: maps device intent to ship steering (ship only)

use serde::{Deserialize, Serialize};

use crate::core::rect::Rect;
use crate::core::vec2::Vec2;
use crate::io::{AudioSink, DrawCall, InputSnapshot, Renderer, SoundEffect, TextureId};

// =============================================================================
// COLOR
// =============================================================================

/// RGBA tint color, components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
    /// Alpha
    pub a: f32,
}

impl Color {
    /// No tint.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Warning tint used by the low-health flash.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    /// Health pickup tint.
    pub const PINK: Self = Self::new(1.0, 0.75, 0.8, 1.0);

    /// Create a color from components.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

// =============================================================================
// BODY
// =============================================================================

/// The plain state of an entity: everything components read and write.
///
/// Kept separate from the component boxes so a component can borrow the
/// body mutably while being owned by the same entity.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Body {
    /// World position of the top-left corner
    pub position: Vec2,
    /// Width and height of the bounding rectangle
    pub size: Vec2,
    /// Velocity in world units per tick
    pub velocity: Vec2,
    /// Rotation in radians
    pub rotation: f32,
    /// Tint color applied when drawing
    pub tint: Color,
    /// Dead entities are skipped by update, draw and every query,
    /// but stay in storage until explicitly purged.
    pub alive: bool,
}

impl Body {
    /// Create a live body at a position with a given size.
    pub fn new(position: Vec2, width: f32, height: f32) -> Self {
        Self {
            position,
            size: Vec2::new(width, height),
            velocity: Vec2::ZERO,
            rotation: 0.0,
            tint: Color::WHITE,
            alive: true,
        }
    }

    /// Bounding rectangle at the current position.
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.size.x, self.size.y)
    }

    /// Center of the bounding rectangle.
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }
}

// =============================================================================
// COMPONENT TRAITS
// =============================================================================

/// Moves the entity each tick.
pub trait PhysicsComponent {
    /// Advance the body by one tick.
    fn update(&mut self, body: &mut Body);
}

/// Draws the entity's current visual representation.
pub trait GraphicsComponent {
    /// Emit the draw call for this body.
    fn draw(&self, body: &Body, renderer: &mut dyn Renderer);

    /// Select a sprite-sheet frame. No-op for graphics without frames.
    fn set_frame(&mut self, _frame: usize) {}
}

/// Plays the effect associated with the entity (death, collection, ...).
pub trait SoundComponent {
    /// Trigger the effect on the audio collaborator.
    fn play(&self, audio: &mut dyn AudioSink);
}

/// Maps a device snapshot to steering commands.
///
/// Stateful: fire only triggers on the press edge, and releasing a turn
/// key settles the ship back to its at-rest frame.
pub trait InputComponent {
    /// Digest the current snapshot into steering for this tick.
    fn poll(&mut self, snapshot: InputSnapshot) -> Steering;
}

/// One tick's worth of digested ship commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Steering {
    /// Steer left this tick
    pub left: bool,
    /// Steer right this tick
    pub right: bool,
    /// Accelerate forward this tick
    pub forward: bool,
    /// Accelerate backward this tick
    pub backward: bool,
    /// Fire was pressed this tick (edge, not level)
    pub fire: bool,
    /// A turn key was released; settle to the at-rest frame
    pub settle: bool,
}

// =============================================================================
// COMPONENT IMPLEMENTATIONS
// =============================================================================

/// Standard physics: position += velocity, once per tick.
#[derive(Debug, Default)]
pub struct Physics;

impl PhysicsComponent for Physics {
    fn update(&mut self, body: &mut Body) {
        body.position += body.velocity;
    }
}

/// Physics no-op for entities that never move on their own.
#[derive(Debug, Default)]
pub struct NullPhysics;

impl PhysicsComponent for NullPhysics {
    fn update(&mut self, _body: &mut Body) {}
}

/// Whole-texture sprite.
#[derive(Debug)]
pub struct Sprite {
    texture: TextureId,
}

impl Sprite {
    /// Create a sprite for a texture.
    pub fn new(texture: TextureId) -> Self {
        Self { texture }
    }
}

impl GraphicsComponent for Sprite {
    fn draw(&self, body: &Body, renderer: &mut dyn Renderer) {
        renderer.draw(&DrawCall {
            texture: self.texture,
            frame: 0,
            position: body.position,
            rotation: body.rotation,
            origin: Vec2::new(body.size.x / 2.0, body.size.y / 2.0),
            tint: body.tint,
            scale: 1.0,
        });
    }
}

/// Sprite-sheet graphics that draws one indexed frame of the texture.
///
/// The ship uses this to show itself banking: it sets the index when
/// turning and resets it when the turn key is released.
#[derive(Debug)]
pub struct IndexedSprite {
    texture: TextureId,
    frame: usize,
}

impl IndexedSprite {
    /// Create an indexed sprite starting at a frame.
    pub fn new(texture: TextureId, frame: usize) -> Self {
        Self { texture, frame }
    }

    /// Currently selected frame.
    pub fn frame(&self) -> usize {
        self.frame
    }
}

impl GraphicsComponent for IndexedSprite {
    fn draw(&self, body: &Body, renderer: &mut dyn Renderer) {
        renderer.draw(&DrawCall {
            texture: self.texture,
            frame: self.frame,
            position: body.position,
            rotation: body.rotation,
            origin: Vec2::new(body.size.x / 2.0, body.size.y / 2.0),
            tint: body.tint,
            scale: 1.0,
        });
    }

    fn set_frame(&mut self, frame: usize) {
        self.frame = frame;
    }
}

/// Graphics no-op for invisible entities.
#[derive(Debug, Default)]
pub struct NullGraphics;

impl GraphicsComponent for NullGraphics {
    fn draw(&self, _body: &Body, _renderer: &mut dyn Renderer) {}
}

/// Plays a fixed sound effect when triggered.
#[derive(Debug)]
pub struct Sound {
    effect: SoundEffect,
}

impl Sound {
    /// Create a sound component for an effect.
    pub fn new(effect: SoundEffect) -> Self {
        Self { effect }
    }
}

impl SoundComponent for Sound {
    fn play(&self, audio: &mut dyn AudioSink) {
        audio.play(self.effect);
    }
}

/// Sound no-op for entities with no audio (projectiles, the background).
#[derive(Debug, Default)]
pub struct NullSound;

impl SoundComponent for NullSound {
    fn play(&self, _audio: &mut dyn AudioSink) {}
}

/// Standard ship input: level-triggered steering, edge-triggered fire.
#[derive(Debug, Default)]
pub struct ShipInput {
    fire_down: bool,
    left_down: bool,
    right_down: bool,
}

impl InputComponent for ShipInput {
    fn poll(&mut self, snapshot: InputSnapshot) -> Steering {
        let mut steering = Steering {
            left: snapshot.left,
            right: snapshot.right,
            forward: snapshot.forward,
            backward: snapshot.backward,
            ..Steering::default()
        };

        // Settle back to the at-rest frame when a turn key is released
        if (!snapshot.left && self.left_down) || (!snapshot.right && self.right_down) {
            steering.settle = true;
        }
        self.left_down = snapshot.left;
        self.right_down = snapshot.right;

        // Fire only on the press edge; holding does not autofire
        steering.fire = snapshot.fire && !self.fire_down;
        self.fire_down = snapshot.fire;

        steering
    }
}

/// Input no-op.
#[derive(Debug, Default)]
pub struct NullInputComponent;

impl InputComponent for NullInputComponent {
    fn poll(&mut self, _snapshot: InputSnapshot) -> Steering {
        Steering::default()
    }
}

// =============================================================================
// ENTITY
// =============================================================================

/// A game object: body state plus owned behavior components.
pub struct Entity {
    /// Plain state shared with the components.
    pub body: Body,
    physics: Box<dyn PhysicsComponent>,
    graphics: Box<dyn GraphicsComponent>,
    sound: Box<dyn SoundComponent>,
}

impl Entity {
    /// Assemble an entity from a body and its components.
    pub fn new(
        body: Body,
        physics: Box<dyn PhysicsComponent>,
        graphics: Box<dyn GraphicsComponent>,
        sound: Box<dyn SoundComponent>,
    ) -> Self {
        Self {
            body,
            physics,
            graphics,
            sound,
        }
    }

    /// Run the physics component for one tick.
    pub fn update(&mut self) {
        self.physics.update(&mut self.body);
    }

    /// Draw through the graphics component.
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        self.graphics.draw(&self.body, renderer);
    }

    /// Trigger the entity's sound effect.
    pub fn emit_sound(&self, audio: &mut dyn AudioSink) {
        self.sound.play(audio);
    }

    /// Select a sprite-sheet frame on the graphics component.
    pub fn set_frame(&mut self, frame: usize) {
        self.graphics.set_frame(frame);
    }

    /// Bounding rectangle at the current position.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    /// Whether the entity is live.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.body.alive
    }
}

impl std::fmt::Debug for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entity").field("body", &self.body).finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{RecordingAudio, RecordingRenderer};

    fn test_entity() -> Entity {
        Entity::new(
            Body::new(Vec2::new(10.0, 20.0), 30.0, 40.0),
            Box::new(Physics),
            Box::new(IndexedSprite::new(TextureId::ShipSheet, 4)),
            Box::new(Sound::new(SoundEffect::PlayerDeath)),
        )
    }

    #[test]
    fn test_physics_integrates_velocity() {
        let mut entity = test_entity();
        entity.body.velocity = Vec2::new(2.0, -3.0);

        entity.update();
        assert_eq!(entity.body.position, Vec2::new(12.0, 17.0));

        entity.update();
        assert_eq!(entity.body.position, Vec2::new(14.0, 14.0));
    }

    #[test]
    fn test_null_physics_never_moves() {
        let mut body = Body::new(Vec2::new(1.0, 2.0), 5.0, 5.0);
        body.velocity = Vec2::new(100.0, 100.0);

        NullPhysics.update(&mut body);
        assert_eq!(body.position, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_indexed_sprite_draw_call() {
        let mut entity = test_entity();
        entity.set_frame(7);
        entity.body.tint = Color::RED;

        let mut renderer = RecordingRenderer::default();
        entity.draw(&mut renderer);

        assert_eq!(renderer.calls.len(), 1);
        let call = &renderer.calls[0];
        assert_eq!(call.texture, TextureId::ShipSheet);
        assert_eq!(call.frame, 7);
        assert_eq!(call.position, Vec2::new(10.0, 20.0));
        assert_eq!(call.origin, Vec2::new(15.0, 20.0));
        assert_eq!(call.tint, Color::RED);
    }

    #[test]
    fn test_sound_component_plays_effect() {
        let entity = test_entity();
        let mut audio = RecordingAudio::default();

        entity.emit_sound(&mut audio);
        assert_eq!(audio.played, vec![SoundEffect::PlayerDeath]);
    }

    #[test]
    fn test_null_sound_is_silent() {
        let mut audio = RecordingAudio::default();
        NullSound.play(&mut audio);
        assert!(audio.played.is_empty());
    }

    #[test]
    fn test_ship_input_fire_edge() {
        let mut input = ShipInput::default();
        let held = InputSnapshot {
            fire: true,
            ..InputSnapshot::default()
        };

        // First press fires
        assert!(input.poll(held).fire);
        // Holding does not autofire
        assert!(!input.poll(held).fire);
        // Release then press fires again
        assert!(!input.poll(InputSnapshot::default()).fire);
        assert!(input.poll(held).fire);
    }

    #[test]
    fn test_ship_input_settle_on_turn_release() {
        let mut input = ShipInput::default();
        let left = InputSnapshot {
            left: true,
            ..InputSnapshot::default()
        };

        let steering = input.poll(left);
        assert!(steering.left);
        assert!(!steering.settle);

        // Releasing the turn key settles the sprite
        let steering = input.poll(InputSnapshot::default());
        assert!(!steering.left);
        assert!(steering.settle);
    }

    #[test]
    fn test_body_rect() {
        let body = Body::new(Vec2::new(10.0, 20.0), 30.0, 40.0);
        assert_eq!(body.rect(), Rect::new(10.0, 20.0, 30.0, 40.0));
        assert_eq!(body.center(), Vec2::new(25.0, 40.0));
    }
}
