//! MCTS search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during MCTS search.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Rollouts performed.
    pub rollouts: u32,

    /// States expanded (given a child list in the tree).
    pub nodes_expanded: u32,

    /// Total moves played across all random playouts.
    pub sim_steps: u64,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Calculate rollouts per second.
    #[must_use]
    pub fn rollouts_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.rollouts as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Calculate the average playout length in moves.
    #[must_use]
    pub fn avg_sim_steps(&self) -> f64 {
        if self.rollouts == 0 {
            0.0
        } else {
            self.sim_steps as f64 / self.rollouts as f64
        }
    }
}
