//! # turnwise
//!
//! Search-based decision agents for abstract turn-based games.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: No hardcoded boards, pieces, or move types.
//!    Games implement the [`Game`] trait and the agents never look inside.
//!
//! 2. **Pure Transitions**: `result(state, action)` returns a fresh state
//!    and never mutates its inputs, so searches can fan out from one state
//!    without bookkeeping.
//!
//! 3. **Deterministic Searches**: All randomness flows through a seeded
//!    [`GameRng`]; the same seed reproduces the same decision.
//!
//! ## Architecture
//!
//! - **Lookahead family**: [`Minimax`], [`AlphaBeta`], and
//!   [`Expectiminimax`] walk the game tree exhaustively or to a
//!   [`SearchLimit`] depth with a heuristic frontier.
//!
//! - **Sampling family**: [`MCTS`] estimates action values from random
//!   playouts under UCT selection, with statistics that persist across
//!   decisions.
//!
//! - **Capability split**: deterministic games implement [`Game`]; games
//!   with chance states add [`StochasticGame`] and get a uniform
//!   distribution for free.
//!
//! ## Modules
//!
//! - `core`: player ids, utility vectors, RNG, chance distributions, errors
//! - `game`: the `Game`/`StochasticGame` contracts and the `Agent` trait
//! - `search`: minimax, alpha-beta, expectiminimax, depth limits
//! - `mcts`: Monte Carlo Tree Search
//! - `games`: small complete games for demos and tests
//! - `runner`: plays agents against each other to a finished match
//!
//! ## Quick Start
//!
//! ```
//! use turnwise::games::tictactoe::{Board, Cell, TicTacToe};
//! use turnwise::{Agent, Minimax, PlayerId, SearchLimit};
//!
//! let mut searcher =
//!     Minimax::new(TicTacToe::new(), PlayerId::new(0), SearchLimit::unbounded()).unwrap();
//!
//! // X to move, with two in a row ready to complete.
//! let board = Board::parse("XX.OO....", 0);
//! assert_eq!(searcher.choose_action(&board).unwrap(), Cell(2));
//! ```

pub mod core;
pub mod game;
pub mod games;
pub mod mcts;
pub mod runner;
pub mod search;

// Re-export commonly used types
pub use crate::core::{
    ChanceDistribution, GameRng, PlayerId, PlayerMap, Result, SearchError,
};

pub use crate::game::{Agent, Game, Mover, RandomAgent, StochasticGame};

pub use crate::search::{
    AlphaBeta, Expectiminimax, Heuristic, LookaheadStats, Minimax, SearchLimit,
};

pub use crate::mcts::{MCTSConfig, SearchStats, SearchTree, MCTS};

pub use crate::runner::{run_match, run_stochastic_match, MatchOutcome};
