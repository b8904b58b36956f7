//! MCTS configuration parameters.

use serde::{Deserialize, Serialize};

/// MCTS configuration parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MCTSConfig {
    /// Rollouts per decision (default: 50).
    /// More rollouts give better moves and slower decisions.
    pub n_rollouts: u32,

    /// UCT exploration constant (default: 1.4).
    /// Higher values favor exploration over exploitation.
    pub exploration_constant: f64,

    /// Random seed for the simulation RNG.
    /// Same seed produces deterministic searches.
    pub seed: u64,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            n_rollouts: 50,
            exploration_constant: 1.4,
            seed: 42,
        }
    }
}

impl MCTSConfig {
    /// Create a new config with a custom rollout budget.
    pub fn with_rollouts(mut self, n_rollouts: u32) -> Self {
        self.n_rollouts = n_rollouts;
        self
    }

    /// Create a new config with a custom exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Create a new config with a custom seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
