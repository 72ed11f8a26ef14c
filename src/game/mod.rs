//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Drivers call [`GameState::apply_input`] when a key goes down, [`GameEngine::step`]
//! whenever [`MoveTimer`] says a move is due, and draw from [`GameState::snapshot`].

pub mod action;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod placement;
pub mod rng;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use clock::MoveTimer;
pub use config::GameConfig;
pub use engine::{GameEngine, StepResult};
pub use error::ConfigError;
pub use placement::{Placement, PlacementPolicy};
pub use rng::GameRng;
pub use state::{CollisionType, GameState, Occupancy, Position, Snake, Snapshot};
