//! Core simulation logic for the snake grid
//!
//! This module contains the field, the snake, and the engine that applies
//! moves, without any I/O or rendering dependencies. The session drives it
//! through the `Simulation` trait one step at a time.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::GameConfig;
pub use engine::{GameEngine, Simulation, StepOutcome};
pub use state::{CollisionType, FieldState, Position, Snake};
