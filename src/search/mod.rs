//! Lookahead searches: minimax, alpha-beta, and expectiminimax.
//!
//! All three walk the game tree recursively through the [`Game`] contract
//! and decide for one fixed player:
//!
//! - [`Minimax`]: exact two-player zero-sum search.
//! - [`AlphaBeta`]: the same decision with window pruning.
//! - [`Expectiminimax`]: N-player, chance-aware search propagating full
//!   per-player utility vectors.
//!
//! Depth limits and heuristic cutoffs are configured through
//! [`SearchLimit`]; each searcher exposes a [`LookaheadStats`] snapshot of
//! its most recent decision.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SearchError};
use crate::core::player::PlayerId;
use crate::game::model::Game;

pub mod alphabeta;
pub mod expectiminimax;
pub mod limit;
pub mod minimax;

pub use alphabeta::AlphaBeta;
pub use expectiminimax::Expectiminimax;
pub use limit::{Heuristic, SearchLimit};
pub use minimax::Minimax;

/// Statistics from the most recent lookahead decision.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LookaheadStats {
    /// States evaluated below the root (one per recursive evaluation entry).
    pub nodes_evaluated: u64,

    /// Subtrees abandoned by the pruning window (always 0 for unpruned
    /// searches).
    pub prunes: u64,

    /// Total time spent deciding (microseconds).
    pub time_us: u64,
}

impl LookaheadStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Calculate node evaluations per second.
    #[must_use]
    pub fn nodes_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.nodes_evaluated as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }
}

/// Construction check shared by the two-player zero-sum searches.
pub(crate) fn ensure_two_player_zero_sum<G: Game>(game: &G) -> Result<()> {
    if game.player_count() != 2 {
        return Err(SearchError::IllegalConfiguration(format!(
            "expected a two-player game, got {} players",
            game.player_count()
        )));
    }
    if !game.zero_sum() {
        return Err(SearchError::IllegalConfiguration(
            "game does not declare itself zero-sum".into(),
        ));
    }
    Ok(())
}

/// Construction check that the searching player exists in the game.
pub(crate) fn ensure_player_in_game<G: Game>(game: &G, player: PlayerId) -> Result<()> {
    if player.index() >= game.player_count() {
        return Err(SearchError::IllegalConfiguration(format!(
            "{} is out of range for a {}-player game",
            player,
            game.player_count()
        )));
    }
    Ok(())
}
