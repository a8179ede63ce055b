//! RL-facing environment wrapper
//!
//! Wraps the game engine behind the surface an agent loop consumes: one-hot
//! relative actions in, `(reward, terminated, score)` out, plus the
//! collision probe, the out-of-band score-history feed and a read-only
//! render snapshot. Single-threaded and turn-based: one `step` per decision,
//! no background mutation.

use std::collections::VecDeque;

use anyhow::Result;

use crate::game::{GameConfig, GameEngine, GameState, Position, Turn};
use crate::metrics::ScoreHistory;

/// Presentation-only switches; the simulation never consults them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFlags {
    /// Draw the score-history overlay
    pub show_history: bool,
    /// Draw the extended stats line
    pub show_stats: bool,
}

impl Default for DisplayFlags {
    fn default() -> Self {
        Self {
            show_history: true,
            show_stats: false,
        }
    }
}

/// Read-only view handed to the renderer
pub struct RenderView<'a> {
    /// Body segments, head first
    pub body: &'a VecDeque<Position>,
    pub food: Position,
    pub score: u32,
    pub alive: bool,
    pub paused: bool,
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
    pub flags: DisplayFlags,
    /// Trailing window of episode scores
    pub history: &'a [u32],
    /// `(index into the window, value)` of the running maximum
    pub high_score: (usize, u32),
    /// Episodes recorded over the whole session
    pub episodes: usize,
}

/// Snake environment for reinforcement learning
pub struct SnakeEnv {
    engine: GameEngine,
    state: GameState,
    history: ScoreHistory,
    flags: DisplayFlags,
}

impl SnakeEnv {
    /// Create an environment; fails fast on invalid board geometry
    pub fn new(config: GameConfig) -> Result<Self> {
        let window_len = config.history_window();
        let mut engine = GameEngine::new(config)?;
        let state = engine.reset();
        Ok(Self {
            engine,
            state,
            history: ScoreHistory::new(window_len),
            flags: DisplayFlags::default(),
        })
    }

    /// Environment with a fixed RNG seed, for reproducible runs
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self> {
        let window_len = config.history_window();
        let mut engine = GameEngine::seeded(config, seed)?;
        let state = engine.reset();
        Ok(Self {
            engine,
            state,
            history: ScoreHistory::new(window_len),
            flags: DisplayFlags::default(),
        })
    }

    /// Advance one tick with the agent's one-hot `[straight, right, left]`
    /// action.
    ///
    /// Malformed triples resolve to a left turn (see [`Turn::from_one_hot`]).
    pub fn step(&mut self, action: [u8; 3]) -> (i32, bool, u32) {
        let turn = Turn::from_one_hot(action);
        let result = self.engine.step(&mut self.state, turn);
        (result.reward, result.terminated, result.score)
    }

    /// Reinitialize to a fresh episode. Cross-episode score history and
    /// display flags survive; only the episode state (including the paused
    /// flag) is rebuilt.
    pub fn reset(&mut self) {
        self.state = self.engine.reset();
    }

    /// Probe a hypothetical position (current head when `None`) without
    /// mutating anything
    pub fn is_collision(&self, pos: Option<Position>) -> bool {
        self.engine.is_collision(&self.state, pos)
    }

    /// Feed a finished episode's score into the overlay history
    pub fn record_episode(&mut self, score: u32) {
        self.history.record_episode(score);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn history(&self) -> &ScoreHistory {
        &self.history
    }

    pub fn flags(&self) -> DisplayFlags {
        self.flags
    }

    pub fn toggle_pause(&mut self) {
        self.state.paused = !self.state.paused;
    }

    pub fn toggle_history(&mut self) {
        self.flags.show_history = !self.flags.show_history;
    }

    pub fn toggle_stats(&mut self) {
        self.flags.show_stats = !self.flags.show_stats;
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Assemble the read-only view the renderer consumes
    pub fn snapshot(&self) -> RenderView<'_> {
        RenderView {
            body: &self.state.snake.body,
            food: self.state.food,
            score: self.state.score,
            alive: self.state.alive,
            paused: self.state.paused,
            width: self.state.width,
            height: self.state.height,
            cell_size: self.state.cell_size,
            flags: self.flags,
            history: self.history.window(),
            high_score: self.history.running_max(),
            episodes: self.history.episodes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;

    fn seeded_env() -> SnakeEnv {
        SnakeEnv::seeded(GameConfig::compact(), 42).unwrap()
    }

    #[test]
    fn test_construction_validates_config() {
        assert!(SnakeEnv::new(GameConfig::new(490, 360)).is_err());
        assert!(SnakeEnv::new(GameConfig::compact()).is_ok());
    }

    #[test]
    fn test_step_straight_moves_one_cell() {
        let mut env = seeded_env();
        let head = env.state().snake.head();
        env.state.food = Position::new(0, 0);

        let (reward, terminated, score) = env.step(Turn::Straight.one_hot());

        assert_eq!(reward, 0);
        assert!(!terminated);
        assert_eq!(score, 0);
        assert_eq!(env.state().snake.head(), head.moved_by(20, 0));
    }

    #[test]
    fn test_malformed_action_turns_left() {
        let mut env = seeded_env();
        env.state.food = Position::new(0, 0);
        assert_eq!(env.state().snake.direction, Direction::Right);

        env.step([1, 1, 1]);

        assert_eq!(env.state().snake.direction, Direction::Up);
    }

    #[test]
    fn test_collision_probe_defaults_to_head() {
        let env = seeded_env();
        assert!(!env.is_collision(None));
        assert!(env.is_collision(Some(Position::new(-20, 0))));
        // Repeat probes observe the same state
        assert!(!env.is_collision(None));
    }

    #[test]
    fn test_reset_keeps_history_and_flags() {
        let mut env = seeded_env();
        env.record_episode(7);
        env.toggle_pause();
        env.toggle_stats();
        assert!(env.state().paused);

        env.reset();

        assert!(!env.state().paused);
        assert!(env.flags().show_stats);
        assert_eq!(env.history().episodes(), 1);
        assert_eq!(env.state().score, 0);
        assert_eq!(env.state().frame, 0);
    }

    #[test]
    fn test_snapshot_exposes_history_window() {
        let mut env = seeded_env();
        for score in [3, 5, 5, 2] {
            env.record_episode(score);
        }

        let view = env.snapshot();

        assert_eq!(view.history, &[3, 5, 5, 2]);
        assert_eq!(view.high_score, (2, 5));
        assert_eq!(view.episodes, 4);
        assert_eq!(view.body.len(), 3);
        assert!(view.flags.show_history);
    }

    #[test]
    fn test_window_length_derives_from_width() {
        let env = seeded_env();
        assert_eq!(env.history().window_len(), 240);
    }

    #[test]
    fn test_episode_terminates_against_wall() {
        let mut env = seeded_env();
        env.state.food = Position::new(0, 0);

        let mut outcome = None;
        for _ in 0..100 {
            let (reward, terminated, score) = env.step(Turn::Straight.one_hot());
            if terminated {
                outcome = Some((reward, score));
                break;
            }
        }

        assert_eq!(outcome, Some((-9, 0)));
        assert!(!env.state().alive);
    }
}
