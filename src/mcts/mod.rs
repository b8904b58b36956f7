//! Monte Carlo Tree Search.
//!
//! ## Overview
//!
//! This module implements UCT search over the abstract [`Game`] contract.
//! Key properties:
//!
//! - **Anytime**: quality scales with the rollout budget, no heuristic
//!   needed
//! - **Persistent**: statistics are keyed by state and survive across
//!   decisions, so the tree warms up as the real game advances
//! - **Deterministic**: a fixed seed reproduces the whole search
//! - **Observable**: per-decision [`SearchStats`] and direct access to the
//!   [`SearchTree`] tables
//!
//! ## Usage
//!
//! ```rust
//! use turnwise::games::tictactoe::TicTacToe;
//! use turnwise::{Agent, Game, MCTSConfig, PlayerId, MCTS};
//!
//! let config = MCTSConfig::default().with_rollouts(200).with_seed(1);
//! let mut search = MCTS::new(TicTacToe::new(), PlayerId::new(0), config).unwrap();
//!
//! let game = TicTacToe::new();
//! let state = game.start();
//! let action = search.choose_action(&state).unwrap();
//! println!("opening move: {:?}", action);
//! println!(
//!     "{} rollouts over {} states",
//!     search.stats().rollouts,
//!     search.tree().len()
//! );
//! ```
//!
//! [`Game`]: crate::game::Game

pub mod config;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use config::MCTSConfig;
pub use search::MCTS;
pub use stats::SearchStats;
pub use tree::SearchTree;
