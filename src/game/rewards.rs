use serde::{Deserialize, Serialize};

/// Scalar rewards returned from `step`
///
/// Kept apart from the engine so shaping terms can be added without touching
/// the step sequencing. Only `wall_hit` and `food` are wired into the default
/// step path; `self_hit`, `too_slow` and `looping` are reserved shaping hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardPolicy {
    /// Penalty applied on termination
    pub wall_hit: i32,
    /// Reserved: penalty for running into the own body
    pub self_hit: i32,
    /// Reserved: penalty for slow progress toward food
    pub too_slow: i32,
    /// Reserved: penalty for looping in place
    pub looping: i32,
    /// Reward for eating food
    pub food: i32,
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self {
            wall_hit: -9,
            self_hit: -10,
            too_slow: -2,
            looping: -1,
            food: 10,
        }
    }
}

impl RewardPolicy {
    /// Reward for a terminal step. Every cause, including self-collision and
    /// the frame cutoff, maps to the wall penalty; `self_hit` is never
    /// emitted by the default wiring.
    pub fn terminal(&self) -> i32 {
        self.wall_hit
    }

    /// Reward for eating food
    pub fn eaten(&self) -> i32 {
        self.food
    }

    /// Reward for an ordinary move
    pub fn idle(&self) -> i32 {
        0
    }
}
