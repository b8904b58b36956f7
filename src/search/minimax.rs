//! Exact minimax search for two-player zero-sum games.
//!
//! ## Algorithm
//!
//! The searcher evaluates each root action with a fresh recursive descent:
//! the opponent minimizes the searching player's utility on odd plies, the
//! searching player maximizes on even plies, and terminal states report the
//! game's exact utilities. With a [`SearchLimit`] the descent stops at the
//! configured depth and scores the frontier with the paired heuristic.
//!
//! Every value in the tree is the searching player's coordinate, which is
//! why construction insists on a two-player game that declares itself
//! zero-sum: minimizing that single number is only the opponent's best play
//! when the opponent's utility is its negation.

use std::time::Instant;

use crate::core::error::{Result, SearchError};
use crate::core::player::PlayerId;
use crate::game::agent::Agent;
use crate::game::model::{Game, Mover};
use crate::search::limit::{Cutoff, SearchLimit};
use crate::search::{ensure_player_in_game, ensure_two_player_zero_sum, LookaheadStats};

/// Exhaustive minimax decision agent for one side of a two-player zero-sum
/// game.
///
/// ```
/// use turnwise::games::tictactoe::{Board, Cell, TicTacToe};
/// use turnwise::{Agent, Minimax, PlayerId, SearchLimit};
///
/// let mut searcher =
///     Minimax::new(TicTacToe::new(), PlayerId::new(0), SearchLimit::unbounded()).unwrap();
/// let board = Board::parse("XX.OO....", 0);
/// assert_eq!(searcher.choose_action(&board).unwrap(), Cell(2));
/// ```
pub struct Minimax<G: Game> {
    game: G,
    player: PlayerId,
    cutoff: Option<Cutoff<G>>,
    stats: LookaheadStats,
}

impl<G: Game> Minimax<G> {
    /// Build a searcher deciding for `player`.
    ///
    /// Fails with [`SearchError::IllegalConfiguration`] when the game is not
    /// two-player zero-sum, when `player` is out of range, or when `limit`
    /// pairs a depth bound and heuristic inconsistently.
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

    /// Minimizing ply: the opponent picks the successor worst for the
    /// searching player.
    fn min_value(&mut self, state: &G::State, depth: u32) -> Result<f64> {
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
        for action in &actions {
            let successor = self.game.result(state, action)?;
            value = value.min(self.max_value(&successor, depth + 1)?);
        }
        Ok(value)
    }

    /// Maximizing ply: the searching player picks the best successor.
    fn max_value(&mut self, state: &G::State, depth: u32) -> Result<f64> {
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
        for action in &actions {
            let successor = self.game.result(state, action)?;
            value = value.max(self.min_value(&successor, depth + 1)?);
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

impl<G: Game> Agent<G> for Minimax<G> {
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
            let value = self.min_value(&successor, 1)?;
            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((index, value));
            }
        }

        self.stats.time_us = started.elapsed().as_micros() as u64;
        log::debug!(
            "minimax evaluated {} nodes in {}us",
            self.stats.nodes_evaluated,
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::player::PlayerMap;
    use crate::games::tictactoe::{open_lines, Board, Cell, ScrambleTicTacToe, TicTacToe};

    fn exhaustive(player: u8) -> Minimax<TicTacToe> {
        Minimax::new(
            TicTacToe::new(),
            PlayerId::new(player),
            SearchLimit::unbounded(),
        )
        .unwrap()
    }

    #[test]
    fn test_takes_immediate_win() {
        let mut searcher = exhaustive(0);
        let board = Board::parse("XX.OO....", 0);

        assert_eq!(searcher.choose_action(&board).unwrap(), Cell(2));
    }

    #[test]
    fn test_blocks_opponent_win() {
        // X has no win of its own; anything but cell 2 loses to O's reply.
        let mut searcher = exhaustive(0);
        let board = Board::parse("OO.X...X.", 0);

        assert_eq!(searcher.choose_action(&board).unwrap(), Cell(2));
    }

    #[test]
    fn test_ties_keep_first_action() {
        // Cells 1, 3, and 4 all win at once; enumeration order decides.
        let mut searcher = exhaustive(0);
        let board = Board::parse("X.X..OX.O", 0);

        assert_eq!(searcher.choose_action(&board).unwrap(), Cell(1));
    }

    #[test]
    fn test_second_player_perspective() {
        // O completes the bottom row; every other reply lets X win at 8.
        let mut searcher = exhaustive(1);
        let board = Board::parse("XX..X.OO.", 1);

        assert_eq!(searcher.choose_action(&board).unwrap(), Cell(8));
    }

    #[test]
    fn test_depth_limited_prefers_center() {
        let limit = SearchLimit::bounded(2, open_lines);
        let mut searcher = Minimax::new(TicTacToe::new(), PlayerId::new(0), limit).unwrap();

        assert_eq!(searcher.choose_action(&Board::empty()).unwrap(), Cell(4));
    }

    #[test]
    fn test_terminal_root_rejected() {
        let mut searcher = exhaustive(0);
        let board = Board::parse("XXXOO....", 1);

        assert!(matches!(
            searcher.choose_action(&board),
            Err(SearchError::PreconditionViolation(_))
        ));
    }

    #[test]
    fn test_chance_state_rejected() {
        // The scramble variant reaches a chance state two plies in.
        let mut searcher = Minimax::new(
            ScrambleTicTacToe::new(),
            PlayerId::new(0),
            SearchLimit::unbounded(),
        )
        .unwrap();

        assert!(matches!(
            searcher.choose_action(&Board::empty()),
            Err(SearchError::PreconditionViolation(_))
        ));
    }

    #[test]
    fn test_rejects_half_configured_limit() {
        let limit = SearchLimit::unbounded().with_max_depth(3);
        assert!(matches!(
            Minimax::new(TicTacToe::new(), PlayerId::new(0), limit),
            Err(SearchError::IllegalConfiguration(_))
        ));

        let limit = SearchLimit::unbounded().with_heuristic(open_lines);
        assert!(matches!(
            Minimax::new(TicTacToe::new(), PlayerId::new(0), limit),
            Err(SearchError::IllegalConfiguration(_))
        ));
    }

    #[test]
    fn test_rejects_out_of_range_player() {
        assert!(matches!(
            Minimax::new(TicTacToe::new(), PlayerId::new(2), SearchLimit::unbounded()),
            Err(SearchError::IllegalConfiguration(_))
        ));
    }

    #[test]
    fn test_rejects_non_zero_sum_game() {
        // Identical to tic-tac-toe but without the zero-sum declaration.
        #[derive(Clone, Copy)]
        struct Unscored;

        impl Game for Unscored {
            type State = Board;
            type Action = Cell;

            fn player_count(&self) -> usize {
                2
            }
            fn start(&self) -> Board {
                Board::empty()
            }
            fn mover(&self, state: &Board) -> Mover {
                TicTacToe::new().mover(state)
            }
            fn actions(&self, state: &Board) -> Vec<Cell> {
                TicTacToe::new().actions(state)
            }
            fn result(&self, state: &Board, action: &Cell) -> Result<Board> {
                TicTacToe::new().result(state, action)
            }
            fn is_terminal(&self, state: &Board) -> bool {
                TicTacToe::new().is_terminal(state)
            }
            fn utilities(&self, state: &Board) -> PlayerMap<f64> {
                TicTacToe::new().utilities(state)
            }
        }

        assert!(matches!(
            Minimax::new(Unscored, PlayerId::new(0), SearchLimit::unbounded()),
            Err(SearchError::IllegalConfiguration(_))
        ));
    }

    #[test]
    fn test_stats_reset_between_decisions() {
        let mut searcher = exhaustive(0);

        searcher
            .choose_action(&Board::parse("XX.OO....", 0))
            .unwrap();
        let first = searcher.stats().nodes_evaluated;
        assert!(first > 0);

        // A smaller position evaluates fewer nodes after the reset.
        searcher
            .choose_action(&Board::parse("XOXXO.O..", 0))
            .unwrap();
        assert!(searcher.stats().nodes_evaluated < first);
    }
}
