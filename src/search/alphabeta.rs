//! Alpha-beta pruned minimax.
//!
//! Same decision as [`Minimax`](crate::search::Minimax), fewer evaluations.
//! The recursion carries a `(alpha, beta)` window: alpha is the best value
//! the maximizer already has on the path, beta the best the minimizer has.
//! A minimizing node can stop as soon as its running value drops to alpha
//! or below, since the maximizer above would never steer into it; the
//! maximizing case mirrors that against beta.
//!
//! Each root action is still evaluated with a full window of its own, so
//! every root value is exact and the chosen action is identical to plain
//! minimax, tie-breaking included. Pruning only thins the work inside each
//! subtree; [`LookaheadStats::prunes`] counts the abandoned branches.

use std::time::Instant;

use crate::core::error::{Result, SearchError};
use crate::core::player::PlayerId;
use crate::game::agent::Agent;
use crate::game::model::{Game, Mover};
use crate::search::limit::{Cutoff, SearchLimit};
use crate::search::{ensure_player_in_game, ensure_two_player_zero_sum, LookaheadStats};

/// Alpha-beta pruned minimax agent for one side of a two-player zero-sum
/// game.
pub struct AlphaBeta<G: Game> {
    game: G,
    player: PlayerId,
    cutoff: Option<Cutoff<G>>,
    stats: LookaheadStats,
}

impl<G: Game> AlphaBeta<G> {
    /// Build a searcher deciding for `player`.
    ///
    /// Construction rules match [`Minimax::new`](crate::search::Minimax::new):
    /// two players, a zero-sum declaration, a valid player id, and a fully
    /// paired (or fully absent) depth limit.
    pub fn new(game: G, player: PlayerId, limit: SearchLimit<G>) -> Result<Self> {
        ensure_two_player_zero_sum(&game)?;
        ensure_player_in_game(&game, player)?;
        Ok(Self {
            game,
            player,
            cutoff: limit.validate()?,
            stats: LookaheadStats::new(),
        })
    }

    /// Statistics from the most recent decision.
    #[must_use]
    pub fn stats(&self) -> &LookaheadStats {
        &self.stats
    }

    fn min_value(&mut self, state: &G::State, depth: u32, alpha: f64, beta: f64) -> Result<f64> {
        self.stats.nodes_evaluated += 1;

        if self.game.is_terminal(state) {
            return Ok(self.game.utilities(state)[self.player]);
        }
        if let Some(cutoff) = &self.cutoff {
            if cutoff.reached(depth) {
                return Ok(cutoff.evaluate(state)[self.player]);
            }
        }
        self.ensure_player_state(state)?;

        let actions = self.game.actions(state);
        if actions.is_empty() {
            return Err(no_actions());
        }

        let mut value = f64::INFINITY;
        let mut beta = beta;
        for action in &actions {
            let successor = self.game.result(state, action)?;
            value = value.min(self.max_value(&successor, depth + 1, alpha, beta)?);
            if value <= alpha {
                // The maximizer above already has at least alpha elsewhere
                self.stats.prunes += 1;
                return Ok(value);
            }
            beta = beta.min(value);
        }
        Ok(value)
    }

    fn max_value(&mut self, state: &G::State, depth: u32, alpha: f64, beta: f64) -> Result<f64> {
        self.stats.nodes_evaluated += 1;

        if self.game.is_terminal(state) {
            return Ok(self.game.utilities(state)[self.player]);
        }
        if let Some(cutoff) = &self.cutoff {
            if cutoff.reached(depth) {
                return Ok(cutoff.evaluate(state)[self.player]);
            }
        }
        self.ensure_player_state(state)?;

        let actions = self.game.actions(state);
        if actions.is_empty() {
            return Err(no_actions());
        }

        let mut value = f64::NEG_INFINITY;
        let mut alpha = alpha;
        for action in &actions {
            let successor = self.game.result(state, action)?;
            value = value.max(self.min_value(&successor, depth + 1, alpha, beta)?);
            if value >= beta {
                // The minimizer above already holds beta or better elsewhere
                self.stats.prunes += 1;
                return Ok(value);
            }
            alpha = alpha.max(value);
        }
        Ok(value)
    }

    fn ensure_player_state(&self, state: &G::State) -> Result<()> {
        match self.game.mover(state) {
            Mover::Player(_) => Ok(()),
            Mover::Chance => Err(SearchError::PreconditionViolation(
                "chance state encountered in a deterministic search".into(),
            )),
        }
    }
}

impl<G: Game> Agent<G> for AlphaBeta<G> {
    /// Pick the root action with the greatest minimax value. Ties keep the
    /// first action in enumeration order.
    fn choose_action(&mut self, state: &G::State) -> Result<G::Action> {
        let started = Instant::now();
        if self.game.is_terminal(state) {
            return Err(SearchError::PreconditionViolation(
                "search invoked on a terminal state".into(),
            ));
        }
        self.ensure_player_state(state)?;
        self.stats.reset();

        let actions = self.game.actions(state);
        let mut best: Option<(usize, f64)> = None;
        for (index, action) in actions.iter().enumerate() {
            let successor = self.game.result(state, action)?;
            let value = self.min_value(&successor, 1, f64::NEG_INFINITY, f64::INFINITY)?;
            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((index, value));
            }
        }

        self.stats.time_us = started.elapsed().as_micros() as u64;
        log::debug!(
            "alpha-beta evaluated {} nodes ({} prunes) in {}us",
            self.stats.nodes_evaluated,
            self.stats.prunes,
            self.stats.time_us
        );

        match best {
            Some((index, _)) => Ok(actions[index].clone()),
            None => Err(no_actions()),
        }
    }
}

fn no_actions() -> SearchError {
    SearchError::PreconditionViolation("non-terminal state has no legal actions".into())
}
