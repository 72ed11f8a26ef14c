use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::ConfigError;

/// Configuration for the game
///
/// Every value is fixed for the lifetime of a [`GameEngine`](super::GameEngine).
/// Intervals are in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Length of the snake after every reset
    pub initial_snake_length: usize,

    // Pacing
    /// Seconds between moves at the start of a run
    pub base_move_interval: f64,
    /// The move interval never drops below this
    pub move_interval_floor: f64,
    /// Subtracted from the move interval for every food eaten
    pub move_interval_decrement: f64,

    // Obstacles
    /// Chance that eating food spawns obstacles
    pub obstacle_spawn_probability: f64,
    /// Fewest obstacles spawned when a spawn triggers
    pub obstacle_count_min: u32,
    /// Most obstacles spawned when a spawn triggers
    pub obstacle_count_max: u32,

    /// Random draws before free-cell placement gives up
    pub placement_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 30,
            grid_height: 24,
            initial_snake_length: 3,
            base_move_interval: 0.12,
            move_interval_floor: 0.04,
            move_interval_decrement: 0.005,
            obstacle_spawn_probability: 0.3,
            obstacle_count_min: 1,
            obstacle_count_max: 3,
            placement_attempts: 1000,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    pub fn base_interval(&self) -> Duration {
        Duration::from_secs_f64(self.base_move_interval)
    }

    /// Validate configuration parameters
    ///
    /// Called by [`GameEngine::new`](super::GameEngine::new), so a bad
    /// configuration is rejected before the first tick rather than mid-game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        if self.grid_width > i32::MAX as usize || self.grid_height > i32::MAX as usize {
            return Err(ConfigError::GridTooLarge {
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        if self.initial_snake_length == 0 {
            return Err(ConfigError::EmptySnake);
        }

        if self.initial_snake_length > self.grid_width {
            return Err(ConfigError::SnakeWiderThanGrid {
                length: self.initial_snake_length,
                width: self.grid_width,
            });
        }

        if self.initial_snake_length >= self.grid_width.saturating_mul(self.grid_height) {
            return Err(ConfigError::NoRoomForFood {
                length: self.initial_snake_length,
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        for (name, value) in [
            ("base_move_interval", self.base_move_interval),
            ("move_interval_floor", self.move_interval_floor),
        ] {
            if value <= 0.0 || Duration::try_from_secs_f64(value).is_err() {
                return Err(ConfigError::InvalidInterval { name, value });
            }
        }

        if self.move_interval_floor > self.base_move_interval {
            return Err(ConfigError::FloorAboveBase {
                floor: self.move_interval_floor,
                base: self.base_move_interval,
            });
        }

        if !self.move_interval_decrement.is_finite() || self.move_interval_decrement < 0.0 {
            return Err(ConfigError::InvalidDecrement(self.move_interval_decrement));
        }

        if !(0.0..=1.0).contains(&self.obstacle_spawn_probability) {
            return Err(ConfigError::InvalidProbability(
                self.obstacle_spawn_probability,
            ));
        }

        if self.obstacle_count_min > self.obstacle_count_max {
            return Err(ConfigError::EmptyObstacleRange {
                min: self.obstacle_count_min,
                max: self.obstacle_count_max,
            });
        }

        if self.placement_attempts == 0 {
            return Err(ConfigError::NoPlacementAttempts);
        }

        Ok(())
    }
}
