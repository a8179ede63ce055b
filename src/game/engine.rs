use anyhow::{Result, anyhow};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::action::{Direction, Turn};
use super::config::GameConfig;
use super::grid;
use super::rewards::RewardPolicy;
use super::state::{CollisionKind, GameState, Position, Snake};

/// Per-step bookkeeping alongside the reward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Fatal contact, if one ended the episode
    pub collision: Option<CollisionKind>,
    /// Episode was cut off by the runaway frame limit
    pub timed_out: bool,
}

/// Outcome of a single simulation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    pub reward: i32,
    pub terminated: bool,
    pub score: u32,
    pub info: StepInfo,
}

/// The game engine that owns the rules and the food RNG
///
/// State lives in a separate [`GameState`] so callers can hold, clone and
/// inspect episodes independently of the rule set.
pub struct GameEngine {
    config: GameConfig,
    rewards: RewardPolicy,
    rng: SmallRng,
}

impl GameEngine {
    /// Create an engine, failing fast on invalid board geometry
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_rewards(config, RewardPolicy::default())
    }

    /// Create an engine with a custom reward policy
    pub fn with_rewards(config: GameConfig, rewards: RewardPolicy) -> Result<Self> {
        config.validate().map_err(|e| anyhow!(e))?;
        Ok(Self {
            config,
            rewards,
            rng: SmallRng::from_entropy(),
        })
    }

    /// Engine with a fixed RNG seed, for reproducible food placement
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate().map_err(|e| anyhow!(e))?;
        Ok(Self {
            config,
            rewards: RewardPolicy::default(),
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn rewards(&self) -> &RewardPolicy {
        &self.rewards
    }

    /// Start a fresh episode: snake centered on the board heading right,
    /// score and frame counter zeroed, food placed off the body
    pub fn reset(&mut self) -> GameState {
        let head = grid::center(self.config.width, self.config.height, self.config.cell_size);
        let snake = Snake::new(
            head,
            Direction::Right,
            self.config.initial_snake_length,
            self.config.cell_size,
        );
        let food = self.place_food(&snake);

        GameState::new(
            snake,
            food,
            self.config.width,
            self.config.height,
            self.config.cell_size,
        )
    }

    /// Advance the episode by exactly one tick.
    ///
    /// Sequence: count the frame, resolve the heading, prepend the new head,
    /// then either terminate (collision or frame cutoff), eat, or drop the
    /// tail. On termination the body intentionally stays in its grown form
    /// so the final frame renders the head in the fatal cell.
    pub fn step(&mut self, state: &mut GameState, turn: Turn) -> StepResult {
        if !state.alive {
            return StepResult {
                reward: 0,
                terminated: true,
                score: state.score,
                info: StepInfo {
                    ate_food: false,
                    collision: None,
                    timed_out: false,
                },
            };
        }

        state.frame += 1;

        state.snake.direction = state.snake.direction.turn(turn);
        let new_head = state
            .snake
            .head()
            .moved_in(state.snake.direction, state.cell_size);
        state.snake.grow_to(new_head);

        // The freshly pushed front is skipped by the classifier, so this
        // tests the new head against the body as it was before the insert.
        let collision = self.classify(state, new_head);
        let timed_out = state.frame > 100 * state.snake.len() as u32;

        if collision.is_some() || timed_out {
            state.alive = false;
            return StepResult {
                reward: self.rewards.terminal(),
                terminated: true,
                score: state.score,
                info: StepInfo {
                    ate_food: false,
                    collision,
                    timed_out,
                },
            };
        }

        let ate_food = new_head == state.food;
        let reward = if ate_food {
            state.score += 1;
            state.food = self.place_food(&state.snake);
            self.rewards.eaten()
        } else {
            state.snake.drop_tail();
            self.rewards.idle()
        };

        StepResult {
            reward,
            terminated: false,
            score: state.score,
            info: StepInfo {
                ate_food,
                collision: None,
                timed_out: false,
            },
        }
    }

    /// Classify a candidate head position. Wall is checked before self so
    /// the result is deterministic when a position qualifies as both.
    pub fn classify(&self, state: &GameState, pos: Position) -> Option<CollisionKind> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionKind::Wall);
        }
        if state.snake.hits_body(pos) {
            return Some(CollisionKind::SelfHit);
        }
        None
    }

    /// Collision probe for a hypothetical position, defaulting to the
    /// current head. Read-only; agents use this to scan ahead.
    pub fn is_collision(&self, state: &GameState, pos: Option<Position>) -> bool {
        let pos = pos.unwrap_or_else(|| state.snake.head());
        self.classify(state, pos).is_some()
    }

    /// Draw random cells until one misses the snake. Never returns an
    /// occupied cell; a fully saturated board would loop forever and must be
    /// avoided by configuration.
    fn place_food(&mut self, snake: &Snake) -> Position {
        loop {
            let pos = grid::random_cell(
                &mut self.rng,
                self.config.width,
                self.config.height,
                self.config.cell_size,
            );
            if !snake.body.contains(&pos) {
                return pos;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_engine(config: GameConfig) -> GameEngine {
        GameEngine::seeded(config, 42).unwrap()
    }

    #[test]
    fn test_reset_centers_snake_on_default_board() {
        let mut engine = seeded_engine(GameConfig::default());
        let state = engine.reset();

        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.snake.head(), Position::new(640, 380));
        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.score, 0);
        assert_eq!(state.frame, 0);
        assert!(state.alive);
        assert!(!state.paused);
        assert!(!state.is_occupied_by_snake(state.food));
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(GameEngine::new(GameConfig::new(490, 360)).is_err());
        assert!(GameEngine::new(GameConfig::new(40, 40)).is_err());
    }

    #[test]
    fn test_straight_run_ends_at_the_wall() {
        let mut engine = seeded_engine(GameConfig::default());
        let mut state = engine.reset();
        // Keep the food off the snake's row
        state.food = Position::new(0, 0);

        let mut last = None;
        for _ in 0..100 {
            let result = engine.step(&mut state, Turn::Straight);
            if result.terminated {
                last = Some(result);
                break;
            }
        }

        let result = last.expect("run should terminate at the wall");
        assert_eq!(result.reward, engine.rewards().wall_hit);
        assert_eq!(result.score, 0);
        assert_eq!(result.info.collision, Some(CollisionKind::Wall));
        assert!(!result.info.timed_out);
        assert!(!state.alive);
        // 31 safe steps from (640, 380) to x = 1260, the 32nd leaves the board
        assert_eq!(state.frame, 32);
        assert_eq!(state.snake.head(), Position::new(1280, 380));
    }

    #[test]
    fn test_terminal_body_stays_grown() {
        let mut engine = seeded_engine(GameConfig::default());
        let mut state = engine.reset();
        state.food = Position::new(0, 0);

        while !engine.step(&mut state, Turn::Straight).terminated {}

        assert_eq!(state.snake.len(), 4);
    }

    #[test]
    fn test_eating_food_grows_and_rescores() {
        let mut engine = seeded_engine(GameConfig::compact());
        let mut state = engine.reset();

        state.food = state.snake.head().moved_in(Direction::Right, 20);
        let result = engine.step(&mut state, Turn::Straight);

        assert!(!result.terminated);
        assert!(result.info.ate_food);
        assert_eq!(result.reward, engine.rewards().food);
        assert_eq!(result.score, 1);
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.len(), 4);
        assert!(!state.is_occupied_by_snake(state.food));
    }

    #[test]
    fn test_ordinary_move_keeps_length_and_gives_zero_reward() {
        let mut engine = seeded_engine(GameConfig::compact());
        let mut state = engine.reset();
        // Keep the food out of the way
        state.food = Position::new(0, 0);

        let result = engine.step(&mut state, Turn::Straight);

        assert!(!result.terminated);
        assert_eq!(result.reward, 0);
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.frame, 1);
    }

    #[test]
    fn test_self_collision_after_box_turn() {
        let mut config = GameConfig::compact();
        config.initial_snake_length = 5;
        let mut engine = seeded_engine(config);
        let mut state = engine.reset();
        state.food = Position::new(0, 0);

        // Three right turns fold the head back onto the body
        engine.step(&mut state, Turn::Right);
        engine.step(&mut state, Turn::Right);
        let result = engine.step(&mut state, Turn::Right);

        assert!(result.terminated);
        assert_eq!(result.info.collision, Some(CollisionKind::SelfHit));
        // Every terminal branch pays the wall penalty; self_hit is reserved
        assert_eq!(result.reward, engine.rewards().wall_hit);
        assert!(!state.alive);
        assert_eq!(state.snake.len(), 6);
    }

    #[test]
    fn test_frame_cutoff_boundary() {
        let mut engine = seeded_engine(GameConfig::default());

        // Body grows to 4 on insert, so the cutoff trips above 400 frames
        let mut state = engine.reset();
        state.food = Position::new(0, 0);
        state.frame = 400;
        let result = engine.step(&mut state, Turn::Straight);
        assert!(result.terminated);
        assert!(result.info.timed_out);
        assert_eq!(result.info.collision, None);
        assert_eq!(result.reward, engine.rewards().wall_hit);

        let mut state = engine.reset();
        state.food = Position::new(0, 0);
        state.frame = 399;
        let result = engine.step(&mut state, Turn::Straight);
        assert!(!result.terminated);
    }

    #[test]
    fn test_step_after_termination_is_inert() {
        let mut engine = seeded_engine(GameConfig::compact());
        let mut state = engine.reset();
        state.alive = false;
        let frame_before = state.frame;

        let result = engine.step(&mut state, Turn::Straight);

        assert!(result.terminated);
        assert_eq!(result.reward, 0);
        assert_eq!(state.frame, frame_before);
    }

    #[test]
    fn test_classify_partition() {
        let mut engine = seeded_engine(GameConfig::compact());
        let state = engine.reset();
        let head = state.snake.head();

        assert_eq!(
            engine.classify(&state, Position::new(-20, 0)),
            Some(CollisionKind::Wall)
        );
        assert_eq!(
            engine.classify(&state, Position::new(480, 100)),
            Some(CollisionKind::Wall)
        );
        assert_eq!(
            engine.classify(&state, head.moved_in(Direction::Left, 20)),
            Some(CollisionKind::SelfHit)
        );
        assert_eq!(engine.classify(&state, head), None); // head slot excluded
        assert_eq!(engine.classify(&state, Position::new(0, 0)), None);
    }

    #[test]
    fn test_is_collision_is_idempotent() {
        let mut engine = seeded_engine(GameConfig::compact());
        let state = engine.reset();
        let before = state.clone();

        let first = engine.is_collision(&state, None);
        let second = engine.is_collision(&state, None);
        let third = engine.is_collision(&state, Some(Position::new(-20, 0)));

        assert!(!first);
        assert_eq!(first, second);
        assert!(third);
        assert_eq!(state, before);
    }

    #[test]
    fn test_food_never_lands_on_the_snake() {
        let mut engine = seeded_engine(GameConfig::compact());
        let state = engine.reset();

        for _ in 0..1000 {
            let food = engine.place_food(&state.snake);
            assert!(!state.snake.body.contains(&food));
            assert_eq!(food.x % 20, 0);
            assert_eq!(food.y % 20, 0);
            assert!(state.is_in_bounds(food));
        }
    }
}
