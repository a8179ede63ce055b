//! Snake simulation core for reinforcement learning
//!
//! A deterministic grid-world snake used as an RL environment: the agent
//! supplies a relative one-hot action each tick, the environment advances
//! exactly one step and returns `(reward, terminated, score)`.
//!
//! This library provides:
//! - Core simulation (game module): direction resolution, movement,
//!   collision detection, food placement, rewards, episode termination
//! - RL-facing environment wrapper (env module)
//! - Cross-episode score history for the live overlay (metrics module)
//! - TUI rendering and keyboard control signals (render / input modules)
//! - A demo execution mode (modes module)

pub mod env;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
