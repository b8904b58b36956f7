//! Expectiminimax: N-player lookahead over stochastic games.
//!
//! ## Algorithm
//!
//! Where minimax folds everything into one number, expectiminimax
//! propagates a full per-player utility vector:
//!
//! - terminal states report the game's utilities,
//! - chance states average the successor vectors coordinate-wise, weighted
//!   by a validated [`ChanceDistribution`],
//! - player states adopt the successor vector whose coordinate for the
//!   player to move is greatest.
//!
//! Every mover maximizes its own coordinate, so opponents are modeled as
//! selfish rather than adversarial. With two zero-sum players the two
//! framings coincide and the search reduces to minimax over player states.
//!
//! Depth cutoffs are checked before the mover dispatch, so a
//! [`SearchLimit`] heuristic stands in for whole chance subtrees too.

use std::time::Instant;

use crate::core::dist::ChanceDistribution;
use crate::core::error::{Result, SearchError};
use crate::core::player::{PlayerId, PlayerMap};
use crate::game::agent::Agent;
use crate::game::model::{Mover, StochasticGame};
use crate::search::limit::{Cutoff, SearchLimit};
use crate::search::{ensure_player_in_game, LookaheadStats};

/// Chance-aware lookahead agent deciding for one player of an N-player
/// stochastic game.
pub struct Expectiminimax<G: StochasticGame> {
    game: G,
    player: PlayerId,
    cutoff: Option<Cutoff<G>>,
    stats: LookaheadStats,
}

impl<G: StochasticGame> Expectiminimax<G> {
    /// Build a searcher deciding for `player`.
    ///
    /// Any player count is accepted and no zero-sum declaration is
    /// required. Fails with [`SearchError::IllegalConfiguration`] when
    /// `player` is out of range or `limit` pairs a depth bound and
    /// heuristic inconsistently.
    pub fn new(game: G, player: PlayerId, limit: SearchLimit<G>) -> Result<Self> {
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

    /// Expected utility vector of `state`, `depth` plies below the root.
    fn expected_utilities(&mut self, state: &G::State, depth: u32) -> Result<PlayerMap<f64>> {
        self.stats.nodes_evaluated += 1;

        if self.game.is_terminal(state) {
            return Ok(self.game.utilities(state));
        }
        if let Some(cutoff) = &self.cutoff {
            if cutoff.reached(depth) {
                return Ok(cutoff.evaluate(state));
            }
        }

        match self.game.mover(state) {
            Mover::Chance => self.chance_value(state, depth),
            Mover::Player(mover) => self.player_value(state, depth, mover),
        }
    }

    /// Probability-weighted average of the successor vectors.
    fn chance_value(&mut self, state: &G::State, depth: u32) -> Result<PlayerMap<f64>> {
        let actions = self.game.actions(state);
        let dist = ChanceDistribution::new(self.game.chance_distribution(state))?;
        dist.check_membership(&actions)?;

        let mut expected = PlayerMap::with_value(self.game.player_count(), 0.0);
        for (action, probability) in dist.iter() {
            let successor = self.game.result(state, action)?;
            let utilities = self.expected_utilities(&successor, depth + 1)?;
            for (player, total) in expected.iter_mut() {
                *total += probability * utilities[player];
            }
        }
        Ok(expected)
    }

    /// The mover adopts the successor vector best for itself. Ties keep the
    /// first action in enumeration order.
    fn player_value(
        &mut self,
        state: &G::State,
        depth: u32,
        mover: PlayerId,
    ) -> Result<PlayerMap<f64>> {
        let actions = self.game.actions(state);

        let mut best: Option<PlayerMap<f64>> = None;
        for action in &actions {
            let successor = self.game.result(state, action)?;
            let utilities = self.expected_utilities(&successor, depth + 1)?;
            let better = match &best {
                Some(current) => utilities[mover] > current[mover],
                None => true,
            };
            if better {
                best = Some(utilities);
            }
        }
        best.ok_or_else(no_actions)
    }
}

impl<G: StochasticGame> Agent<G> for Expectiminimax<G> {
    /// Pick the root action whose expected vector is best in the searching
    /// player's coordinate.
    fn choose_action(&mut self, state: &G::State) -> Result<G::Action> {
        let started = Instant::now();
        if self.game.is_terminal(state) {
            return Err(SearchError::PreconditionViolation(
                "search invoked on a terminal state".into(),
            ));
        }
        if self.game.mover(state).is_chance() {
            return Err(SearchError::PreconditionViolation(
                "choose_action invoked at a chance state".into(),
            ));
        }
        self.stats.reset();

        let actions = self.game.actions(state);
        let mut best: Option<(usize, f64)> = None;
        for (index, action) in actions.iter().enumerate() {
            let successor = self.game.result(state, action)?;
            let value = self.expected_utilities(&successor, 1)?[self.player];
            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((index, value));
            }
        }

        self.stats.time_us = started.elapsed().as_micros() as u64;
        log::debug!(
            "expectiminimax evaluated {} nodes in {}us",
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
    use crate::game::model::Game;
    use crate::games::tictactoe::{Board, Cell, TicTacToe};

    /// One decision against one coin flip. State encoding: 0 root (player 0
    /// to move), 1 safe terminal, 2 chance node, 3 win terminal, 4 loss
    /// terminal. Action 0 plays safe / resolves heads, action 1 gambles /
    /// resolves tails.
    #[derive(Clone)]
    struct Gamble {
        dist: Vec<(u8, f64)>,
    }

    fn gamble(p_win: f64) -> Gamble {
        Gamble {
            dist: vec![(0, p_win), (1, 1.0 - p_win)],
        }
    }

    impl Game for Gamble {
        type State = u8;
        type Action = u8;

        fn player_count(&self) -> usize {
            2
        }

        fn start(&self) -> u8 {
            0
        }

        fn mover(&self, state: &u8) -> Mover {
            if *state == 2 {
                Mover::Chance
            } else {
                Mover::Player(PlayerId::new(0))
            }
        }

        fn actions(&self, _state: &u8) -> Vec<u8> {
            vec![0, 1]
        }

        fn result(&self, state: &u8, action: &u8) -> Result<u8> {
            match (state, action) {
                (0, 0) => Ok(1),
                (0, 1) => Ok(2),
                (2, 0) => Ok(3),
                (2, 1) => Ok(4),
                _ => Err(SearchError::IllegalAction(format!(
                    "action {} in state {}",
                    action, state
                ))),
            }
        }

        fn is_terminal(&self, state: &u8) -> bool {
            matches!(state, 1 | 3 | 4)
        }

        fn utilities(&self, state: &u8) -> PlayerMap<f64> {
            let x = match state {
                1 => 0.5,
                3 => 1.0,
                4 => -1.0,
                _ => 0.0,
            };
            PlayerMap::from_vec(vec![x, -x])
        }
    }

    impl StochasticGame for Gamble {
        fn chance_distribution(&self, _state: &u8) -> Vec<(u8, f64)> {
            self.dist.clone()
        }
    }

    fn searcher(game: Gamble) -> Expectiminimax<Gamble> {
        Expectiminimax::new(game, PlayerId::new(0), SearchLimit::unbounded()).unwrap()
    }

    #[test]
    fn test_gambles_when_odds_are_good() {
        // EV(gamble) = 0.8 - 0.2 = 0.6, beats the safe 0.5
        let mut search = searcher(gamble(0.8));
        assert_eq!(search.choose_action(&0).unwrap(), 1);
    }

    #[test]
    fn test_plays_safe_when_odds_are_bad() {
        // EV(gamble) = 0.3 - 0.7 = -0.4
        let mut search = searcher(gamble(0.3));
        assert_eq!(search.choose_action(&0).unwrap(), 0);
    }

    #[test]
    fn test_fair_coin_loses_to_safe_payout() {
        let mut search = searcher(gamble(0.5));
        assert_eq!(search.choose_action(&0).unwrap(), 0);
    }

    #[test]
    fn test_rejects_unnormalized_distribution() {
        let mut search = searcher(Gamble {
            dist: vec![(0, 0.25), (1, 0.25)],
        });

        assert!(matches!(
            search.choose_action(&0),
            Err(SearchError::InvalidDistribution(_))
        ));
    }

    #[test]
    fn test_rejects_distribution_outside_legal_actions() {
        let mut search = searcher(Gamble {
            dist: vec![(0, 0.5), (7, 0.5)],
        });

        assert!(matches!(
            search.choose_action(&0),
            Err(SearchError::InvalidDistribution(_))
        ));
    }

    #[test]
    fn test_cutoff_covers_chance_nodes() {
        // Depth 1 stops on the chance node itself; the broken distribution
        // below it proves the node is scored, not expanded. The safe branch
        // is terminal at depth 1 and keeps its exact utility.
        let game = Gamble {
            dist: vec![(0, 0.25), (1, 0.25)],
        };
        let heuristic = |state: &u8| {
            let x = if *state == 2 { 0.9 } else { 0.0 };
            PlayerMap::from_vec(vec![x, -x])
        };
        let mut search = Expectiminimax::new(
            game,
            PlayerId::new(0),
            SearchLimit::bounded(1, heuristic),
        )
        .unwrap();

        assert_eq!(search.choose_action(&0).unwrap(), 1);
    }

    #[test]
    fn test_terminal_root_rejected() {
        let mut search = searcher(gamble(0.5));
        assert!(matches!(
            search.choose_action(&3),
            Err(SearchError::PreconditionViolation(_))
        ));
    }

    #[test]
    fn test_chance_root_rejected() {
        let mut search = searcher(gamble(0.5));
        assert!(matches!(
            search.choose_action(&2),
            Err(SearchError::PreconditionViolation(_))
        ));
    }

    /// Three players, no chance. State encoding: 0 root (player 0), 1 safe
    /// terminal [3.5, 0, 0], 2 node where player 1 picks between terminal 3
    /// [4, 1, 0] and terminal 4 [3, 5, 0].
    #[derive(Clone, Copy)]
    struct ThreeWay;

    impl Game for ThreeWay {
        type State = u8;
        type Action = u8;

        fn player_count(&self) -> usize {
            3
        }

        fn start(&self) -> u8 {
            0
        }

        fn mover(&self, state: &u8) -> Mover {
            match state {
                2 => Mover::Player(PlayerId::new(1)),
                _ => Mover::Player(PlayerId::new(0)),
            }
        }

        fn actions(&self, _state: &u8) -> Vec<u8> {
            vec![0, 1]
        }

        fn result(&self, state: &u8, action: &u8) -> Result<u8> {
            match (state, action) {
                (0, 0) => Ok(1),
                (0, 1) => Ok(2),
                (2, 0) => Ok(3),
                (2, 1) => Ok(4),
                _ => Err(SearchError::IllegalAction(format!(
                    "action {} in state {}",
                    action, state
                ))),
            }
        }

        fn is_terminal(&self, state: &u8) -> bool {
            matches!(state, 1 | 3 | 4)
        }

        fn utilities(&self, state: &u8) -> PlayerMap<f64> {
            match state {
                1 => PlayerMap::from_vec(vec![3.5, 0.0, 0.0]),
                3 => PlayerMap::from_vec(vec![4.0, 1.0, 0.0]),
                4 => PlayerMap::from_vec(vec![3.0, 5.0, 0.0]),
                _ => PlayerMap::with_value(3, 0.0),
            }
        }
    }

    impl StochasticGame for ThreeWay {}

    #[test]
    fn test_opponents_maximize_their_own_coordinate() {
        // Player 1 takes [3, 5, 0] over [4, 1, 0], so the gamble is worth
        // only 3.0 to player 0 and the safe 3.5 wins. An adversarial or
        // searcher-centric model of player 1 would pick the other branch.
        let mut search =
            Expectiminimax::new(ThreeWay, PlayerId::new(0), SearchLimit::unbounded()).unwrap();

        assert_eq!(search.choose_action(&0).unwrap(), 0);
    }

    #[test]
    fn test_full_vector_propagates_through_player_nodes() {
        let mut search =
            Expectiminimax::new(ThreeWay, PlayerId::new(0), SearchLimit::unbounded()).unwrap();

        let vector = search.expected_utilities(&2, 1).unwrap();
        assert_eq!(vector, PlayerMap::from_vec(vec![3.0, 5.0, 0.0]));
    }

    #[test]
    fn test_reduces_to_minimax_on_zero_sum_games() {
        let mut search = Expectiminimax::new(
            TicTacToe::new(),
            PlayerId::new(0),
            SearchLimit::unbounded(),
        )
        .unwrap();

        // Immediate win and forced block, same answers as minimax.
        assert_eq!(
            search.choose_action(&Board::parse("XX.OO....", 0)).unwrap(),
            Cell(2)
        );
        assert_eq!(
            search.choose_action(&Board::parse("OO.X...X.", 0)).unwrap(),
            Cell(2)
        );
    }

    #[test]
    fn test_counts_nodes() {
        let mut search = searcher(gamble(0.8));
        search.choose_action(&0).unwrap();

        // Safe terminal, chance node, and its two outcomes.
        assert_eq!(search.stats().nodes_evaluated, 4);
    }
}
