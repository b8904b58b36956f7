//! Agent contract: anything that can choose an action for a state.

use crate::core::error::{Result, SearchError};
use crate::core::rng::GameRng;
use crate::game::model::Game;

/// Anything that can choose an action given a game state.
///
/// The search components are all implementations of this trait, as is the
/// baseline [`RandomAgent`]. Takes `&mut self` because implementations
/// advance internal state while deciding (an RNG stream, persistent search
/// tables).
///
/// Contract: the returned action must be a member of `actions(state)`. The
/// match runner re-checks this and treats a violation as
/// `SearchError::IllegalAction`.
pub trait Agent<G: Game> {
    /// Choose an action for a non-terminal state.
    fn choose_action(&mut self, state: &G::State) -> Result<G::Action>;
}

/// Contract for agents that act on partial observations.
///
/// Games with hidden information hand their agents a percept derived from
/// the state instead of the state itself. Only the shape is defined here;
/// percept construction and any implementations belong to the game.
pub trait PerceptAgent<P, A> {
    /// Choose an action given a percept of the current state.
    fn choose_action(&mut self, percept: &P) -> Result<A>;
}

/// Baseline agent choosing uniformly at random among the legal actions.
pub struct RandomAgent<G: Game> {
    game: G,
    rng: GameRng,
}

impl<G: Game> RandomAgent<G> {
    /// Create a random agent with its own seeded RNG stream.
    pub fn new(game: G, seed: u64) -> Self {
        Self {
            game,
            rng: GameRng::new(seed),
        }
    }
}

impl<G: Game> Agent<G> for RandomAgent<G> {
    fn choose_action(&mut self, state: &G::State) -> Result<G::Action> {
        let actions = self.game.actions(state);
        self.rng.choose(&actions).cloned().ok_or_else(|| {
            SearchError::PreconditionViolation("no legal actions to choose from".into())
        })
    }
}
