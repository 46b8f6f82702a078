//! Core game logic module for Snake
//!
//! This module contains the grid geometry, the snake state and the agent
//! controller that steers along a Hamiltonian cycle, without any I/O or
//! rendering dependencies.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, Move, MoveKind};
pub use config::GameConfig;
pub use engine::{GameEngine, StepResult};
pub use error::GameError;
pub use grid::Grid;
pub use state::{GameState, Position, Snake, SnakeStatus};
