//! Game and agent contracts.
//!
//! [`model`] defines what a game is; [`agent`] defines what can play one.
//! Searches depend on these traits and nothing else about a game.

pub mod agent;
pub mod model;

pub use agent::{Agent, PerceptAgent, RandomAgent};
pub use model::{Game, Mover, StochasticGame};
