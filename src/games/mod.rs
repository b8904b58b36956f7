//! Demo games for exercising the searches.
//!
//! These are reference implementations of the game contracts, used by the
//! integration tests and benchmarks. Nothing in the engine depends on them.

pub mod tictactoe;

pub use tictactoe::{Board, Cell, Mark, ScrambleTicTacToe, TicTacToe};
