//! Enemy AI
//!
//! Per-enemy decision policies, polymorphic over [`EnemyAi`]. An AI never
//! owns its enemy; each tick it reads shared context and writes the
//! enemy's velocity and rotation, leaving integration to the physics
//! component.

use std::f32::consts::FRAC_PI_2;

use crate::core::vec2::Vec2;
use crate::game::entity::Body;
use crate::game::world::GameWorld;

/// Read-only shared data an AI may consult.
pub struct AiContext<'a> {
    /// Center of the player's ship this tick.
    pub ship_position: Vec2,
    /// World bounds and camera.
    pub world: &'a GameWorld,
}

/// A per-enemy behavior policy, run once per live enemy per tick.
pub trait EnemyAi {
    /// Decide this tick's velocity and rotation for `body`.
    fn update(&mut self, body: &mut Body, ctx: &AiContext<'_>);
}

/// Rams the ship: direct vector pursuit at a fixed speed, no pathfinding.
#[derive(Debug)]
pub struct AggressiveAi {
    speed: f32,
}

impl AggressiveAi {
    /// Pursuit at `speed` world units per tick.
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }
}

impl EnemyAi for AggressiveAi {
    fn update(&mut self, body: &mut Body, ctx: &AiContext<'_>) {
        let to_ship = ctx.ship_position - body.center();
        let direction = to_ship.normalize();
        body.velocity = direction.scale(self.speed);
        if direction != Vec2::ZERO {
            // Sprites face up at rotation 0
            body.rotation = direction.angle() + FRAC_PI_2;
        }
    }
}

/// Sweeps horizontally across the world, reversing at the edges. Ignores
/// the ship entirely.
#[derive(Debug)]
pub struct PatrolAi {
    speed: f32,
    heading: f32,
}

impl PatrolAi {
    /// Patrol at `speed`, starting rightward.
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            heading: 1.0,
        }
    }
}

impl EnemyAi for PatrolAi {
    fn update(&mut self, body: &mut Body, ctx: &AiContext<'_>) {
        let bounds = ctx.world.bounds;
        if body.position.x <= bounds.x {
            self.heading = 1.0;
        } else if body.rect().right() >= bounds.right() {
            self.heading = -1.0;
        }
        body.velocity = Vec2::new(self.heading * self.speed, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::GameConfig;

    fn test_world() -> GameWorld {
        GameWorld::new(&GameConfig::default())
    }

    #[test]
    fn test_aggressive_ai_closes_on_ship() {
        let world = test_world();
        let mut body = Body::new(Vec2::new(100.0, 100.0), 50.0, 50.0);
        let mut ai = AggressiveAi::new(4.0);
        let ctx = AiContext {
            ship_position: Vec2::new(600.0, 600.0),
            world: &world,
        };

        let before = body.center().distance(ctx.ship_position);
        ai.update(&mut body, &ctx);
        body.position += body.velocity;
        let after = body.center().distance(ctx.ship_position);

        assert!(after < before);
        assert!((body.velocity.length() - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_aggressive_ai_on_top_of_ship_stops() {
        let world = test_world();
        let mut body = Body::new(Vec2::new(100.0, 100.0), 50.0, 50.0);
        let mut ai = AggressiveAi::new(4.0);
        let ctx = AiContext {
            ship_position: body.center(),
            world: &world,
        };

        ai.update(&mut body, &ctx);
        assert_eq!(body.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_patrol_ai_reverses_at_edges() {
        let world = test_world();
        let ctx = AiContext {
            ship_position: Vec2::ZERO,
            world: &world,
        };
        let mut ai = PatrolAi::new(2.0);

        // Parked against the right edge, the sweep turns around
        let mut body = Body::new(
            Vec2::new(world.bounds.right() - 50.0, 200.0),
            50.0,
            50.0,
        );
        ai.update(&mut body, &ctx);
        assert_eq!(body.velocity, Vec2::new(-2.0, 0.0));

        // And back again at the left edge
        body.position.x = 0.0;
        ai.update(&mut body, &ctx);
        assert_eq!(body.velocity, Vec2::new(2.0, 0.0));
    }
}
