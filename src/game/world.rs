//! World and Camera
//!
//! Shared read-only data for managers and AI: world bounds, screen
//! resolution and the scrolling camera. Only the session mutates the
//! camera; everything else just reads.

use serde::{Deserialize, Serialize};

use crate::core::rect::Rect;
use crate::core::vec2::Vec2;
use crate::game::config::GameConfig;
use crate::game::entity::Body;

/// How far the camera scrolls up the world each tick.
pub const SCROLL_SPEED: f32 = 1.5;

/// World bounds, screen resolution and camera position.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameWorld {
    /// Full world rectangle, origin at the top-left.
    pub bounds: Rect,
    /// Visible screen width.
    pub screen_width: f32,
    /// Visible screen height.
    pub screen_height: f32,
    /// Camera position (top-left of the visible region).
    pub camera: Vec2,
}

impl GameWorld {
    /// Build the world from a validated config. The camera starts at the
    /// bottom of the world and scrolls toward the top.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            bounds: Rect::new(0.0, 0.0, config.world_width, config.world_height),
            screen_width: config.screen_width,
            screen_height: config.screen_height,
            camera: Vec2::new(0.0, config.world_height - config.screen_height),
        }
    }

    /// The portion of the world currently visible on screen.
    #[inline]
    pub fn on_screen(&self) -> Rect {
        Rect::new(
            self.camera.x,
            self.camera.y,
            self.screen_width,
            self.screen_height,
        )
    }

    /// Region enemies spawn into: full world width, with the vertical
    /// band capped at `max(0.9 * world height, screen height / 2)`.
    pub fn enemy_spawn_bounds(&self) -> Rect {
        let depth = (self.bounds.height * 0.9).max(self.screen_height / 2.0);
        Rect::new(0.0, 0.0, self.bounds.width, depth)
    }

    /// Region pickups spawn into: the full world.
    #[inline]
    pub fn pickup_spawn_bounds(&self) -> Rect {
        self.bounds
    }

    /// Scroll the camera up the world until it reaches the top.
    pub fn scroll(&mut self) {
        if self.camera.y > self.bounds.y {
            self.camera.y = (self.camera.y - SCROLL_SPEED).max(self.bounds.y);
        }
    }

    /// Clamp a body so its rectangle stays within the visible screen.
    pub fn keep_on_screen(&self, body: &mut Body) {
        let screen = self.on_screen();
        body.position.x = body
            .position
            .x
            .clamp(screen.x, (screen.right() - body.size.x).max(screen.x));
        body.position.y = body
            .position
            .y
            .clamp(screen.y, (screen.bottom() - body.size.y).max(screen.y));
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_world() -> GameWorld {
        GameWorld::new(&GameConfig {
            world_width: 1000.0,
            world_height: 4000.0,
            screen_width: 800.0,
            screen_height: 600.0,
            ..GameConfig::default()
        })
    }

    #[test]
    fn test_camera_starts_at_world_bottom() {
        let world = test_world();
        assert_eq!(world.camera, Vec2::new(0.0, 3400.0));
        assert_eq!(world.on_screen(), Rect::new(0.0, 3400.0, 800.0, 600.0));
    }

    #[test]
    fn test_scroll_stops_at_world_top() {
        let mut world = test_world();
        for _ in 0..10_000 {
            world.scroll();
        }
        assert_eq!(world.camera.y, 0.0);
    }

    #[test]
    fn test_enemy_spawn_bounds_vertical_bias() {
        let world = test_world();
        let bounds = world.enemy_spawn_bounds();
        assert_eq!(bounds.width, 1000.0);
        // 0.9 * 4000 = 3600, larger than 600 / 2
        assert_eq!(bounds.height, 3600.0);
    }

    #[test]
    fn test_enemy_spawn_bounds_short_world() {
        let world = GameWorld::new(&GameConfig {
            world_width: 800.0,
            world_height: 600.0,
            screen_width: 800.0,
            screen_height: 600.0,
            ..GameConfig::default()
        });
        // 0.9 * 600 = 540 still beats 600 / 2 = 300
        assert_eq!(world.enemy_spawn_bounds().height, 540.0);
    }

    #[test]
    fn test_keep_on_screen_clamps() {
        let world = test_world();
        let mut body = Body::new(Vec2::new(-50.0, 10_000.0), 60.0, 130.0);
        world.keep_on_screen(&mut body);

        let screen = world.on_screen();
        assert_eq!(body.position.x, screen.x);
        assert_eq!(body.position.y, screen.bottom() - body.size.y);
    }
}
