//! Hamilton Snake - a self-playing Snake that follows a Hamiltonian cycle
//!
//! This library provides:
//! - Hamiltonian cycle construction for even grids (path module)
//! - Core game logic and the shortcut controller (game module)
//! - TUI rendering and key handling (render, input modules)
//! - Run statistics (metrics module)
//! - Execution modes (watch, headless)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod path;
pub mod render;
