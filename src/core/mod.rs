//! Core building blocks: players, RNG, distributions, errors.
//!
//! This module contains the fundamental types that are game-agnostic.
//! Everything here is consumed by the game contracts and the search
//! components but knows nothing about either.

pub mod dist;
pub mod error;
pub mod player;
pub mod rng;

pub use dist::ChanceDistribution;
pub use error::{Result, SearchError};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
