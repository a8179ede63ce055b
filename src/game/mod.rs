//! Core game logic module
//!
//! Simulation only: no I/O, rendering or pacing dependencies. Usable
//! directly by an agent loop or through the [`crate::env`] wrapper.

pub mod action;
pub mod config;
pub mod engine;
pub mod grid;
pub mod rewards;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, Turn};
pub use config::GameConfig;
pub use engine::{GameEngine, StepInfo, StepResult};
pub use rewards::RewardPolicy;
pub use state::{CollisionKind, GameState, Position, Snake};
