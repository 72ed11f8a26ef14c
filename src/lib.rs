//! Snake on a wrapping grid with accumulating obstacles
//!
//! This library provides:
//! - Core game logic with no I/O (game module)
//! - Terminal input mapping and rendering (input, render modules)
//! - Session and simulation statistics (metrics module)
//! - Interactive and headless drivers (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod settings;
