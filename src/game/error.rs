use thiserror::Error;

/// Reasons a [`GameConfig`](super::GameConfig) is rejected at construction time.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("grid dimensions {width}x{height} exceed the supported coordinate range")]
    GridTooLarge { width: usize, height: usize },

    #[error("initial_snake_length must be at least 1")]
    EmptySnake,

    #[error("initial_snake_length ({length}) exceeds grid_width ({width})")]
    SnakeWiderThanGrid { length: usize, width: usize },

    #[error("a {width}x{height} grid leaves no free cell for food next to a snake of length {length}")]
    NoRoomForFood {
        length: usize,
        width: usize,
        height: usize,
    },

    #[error("{name} must be a positive number of seconds that fits in a Duration, got {value}")]
    InvalidInterval { name: &'static str, value: f64 },

    #[error("move_interval_floor ({floor}) cannot exceed base_move_interval ({base})")]
    FloorAboveBase { floor: f64, base: f64 },

    #[error("move_interval_decrement must be non-negative and finite, got {0}")]
    InvalidDecrement(f64),

    #[error("obstacle_spawn_probability must be in [0, 1], got {0}")]
    InvalidProbability(f64),

    #[error("obstacle count range is empty: min {min} > max {max}")]
    EmptyObstacleRange { min: u32, max: u32 },

    #[error("placement_attempts must be at least 1")]
    NoPlacementAttempts,
}
