//! Game model contract: states, actions, transitions, utilities.
//!
//! Games implement [`Game`] to describe their rules as pure functions:
//! - Who moves at each state (a player, or chance)
//! - What actions are legal
//! - How actions map states to successor states
//! - When the game is over and who scored what
//!
//! Games with chance states additionally implement [`StochasticGame`].
//! The searches consume nothing but these two traits.

use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::player::{PlayerId, PlayerMap};

/// Who decides the transition out of a state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mover {
    /// The given player chooses the next action.
    Player(PlayerId),
    /// An exogenous probability distribution chooses the next action.
    Chance,
}

impl Mover {
    /// Check whether chance decides here.
    #[must_use]
    pub fn is_chance(&self) -> bool {
        matches!(self, Mover::Chance)
    }
}

/// Abstract description of a turn-based game.
///
/// Every method is a pure function of its arguments: identical inputs must
/// produce equal outputs with no observable side effects. The searches cache
/// and replay transitions freely; an impure implementation silently breaks
/// tree reuse and pruning correctness.
///
/// ## Implementation Notes
///
/// - `actions`: enumeration order is meaningful — searches break ties by
///   first occurrence, and callers rely on that being stable.
/// - `result`: must reject actions outside `actions(state)` with
///   `SearchError::IllegalAction`.
/// - `utilities`: only meaningful for terminal states; one entry per player.
/// - `mover`: deterministic games never return [`Mover::Chance`].
pub trait Game {
    /// One configuration of the game. Equal states are interchangeable for
    /// all search purposes, which is what makes table reuse sound.
    type State: Clone + Eq + Hash + Debug;

    /// An opaque move token. Equality must be well-defined; no ordering is
    /// assumed beyond the enumeration order of `actions`.
    type Action: Clone + PartialEq + Debug;

    /// Number of participants.
    fn player_count(&self) -> usize;

    /// The initial state.
    fn start(&self) -> Self::State;

    /// Who acts at `state`.
    fn mover(&self, state: &Self::State) -> Mover;

    /// Ordered list of legal actions. Non-empty for every non-terminal
    /// state.
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Successor of `state` under `action`.
    fn result(&self, state: &Self::State, action: &Self::Action) -> Result<Self::State>;

    /// Whether the game is over at `state`.
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Utility vector at a terminal state.
    fn utilities(&self, state: &Self::State) -> PlayerMap<f64>;

    /// Whether the game declares its terminal utilities to sum to zero.
    ///
    /// The declaration is what the two-player searches check at
    /// construction; the sum property itself is an assumption on the game,
    /// not something the engine verifies per state.
    fn zero_sum(&self) -> bool {
        false
    }
}

/// Capability extension for games with chance states.
///
/// When `mover(state)` returns [`Mover::Chance`], the transition is drawn
/// from `chance_distribution(state)` instead of asking a player.
pub trait StochasticGame: Game {
    /// Raw `action -> probability` listing over `actions(state)` at a chance
    /// state.
    ///
    /// The default spreads probability uniformly over the legal actions,
    /// matching chance events with no bias. Consumers validate the listing
    /// through [`crate::core::ChanceDistribution`] before use, so overrides
    /// must keep probabilities non-negative and summing to 1.
    fn chance_distribution(&self, state: &Self::State) -> Vec<(Self::Action, f64)> {
        let actions = self.actions(state);
        let p = 1.0 / actions.len() as f64;
        actions.into_iter().map(|a| (a, p)).collect()
    }
}
