//! Game Configuration
//!
//! Tunable parameters for a play session, validated before the session
//! is built so the runtime never has to deal with a degenerate world.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for one play session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    /// World width in world units
    pub world_width: f32,
    /// World height in world units
    pub world_height: f32,
    /// Visible screen width
    pub screen_width: f32,
    /// Visible screen height
    pub screen_height: f32,
    /// Seed for spawn-placement randomness
    pub rng_seed: u64,
    /// Aggressive fighters spawned at session start
    pub fighter_count: u32,
    /// Patrolling freighters spawned at session start
    pub freighter_count: u32,
    /// Health pickups spawned at session start
    pub health_pickup_count: u32,
    /// Weapon pickups spawned at session start
    pub weapon_pickup_count: u32,
    /// Extra lives beyond the first ship
    pub lives: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: 1280.0,
            world_height: 4096.0,
            screen_width: 1280.0,
            screen_height: 720.0,
            rng_seed: 0,
            fighter_count: 12,
            freighter_count: 4,
            health_pickup_count: 4,
            weapon_pickup_count: 4,
            lives: 2,
        }
    }
}

/// Configuration validation failures.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// World width or height is zero or negative.
    #[error("world dimensions must be positive, got {width}x{height}")]
    NonPositiveWorld {
        /// Configured world width
        width: f32,
        /// Configured world height
        height: f32,
    },

    /// Screen width or height is zero or negative.
    #[error("screen dimensions must be positive, got {width}x{height}")]
    NonPositiveScreen {
        /// Configured screen width
        width: f32,
        /// Configured screen height
        height: f32,
    },

    /// The screen does not fit inside the world.
    #[error("screen {screen_width}x{screen_height} does not fit inside the world {world_width}x{world_height}")]
    ScreenLargerThanWorld {
        /// Configured screen width
        screen_width: f32,
        /// Configured screen height
        screen_height: f32,
        /// Configured world width
        world_width: f32,
        /// Configured world height
        world_height: f32,
    },
}

impl GameConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world_width <= 0.0 || self.world_height <= 0.0 {
            return Err(ConfigError::NonPositiveWorld {
                width: self.world_width,
                height: self.world_height,
            });
        }
        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            return Err(ConfigError::NonPositiveScreen {
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        if self.screen_width > self.world_width || self.screen_height > self.world_height {
            return Err(ConfigError::ScreenLargerThanWorld {
                screen_width: self.screen_width,
                screen_height: self.screen_height,
                world_width: self.world_width,
                world_height: self.world_height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_world() {
        let config = GameConfig {
            world_width: 0.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveWorld { .. })
        ));
    }

    #[test]
    fn test_rejects_screen_larger_than_world() {
        let config = GameConfig {
            world_width: 100.0,
            world_height: 100.0,
            screen_width: 200.0,
            screen_height: 100.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ScreenLargerThanWorld { .. })
        ));
    }
}
