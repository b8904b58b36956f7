//! Match runner: drives agents and chance to a finished game.
//!
//! The runner is the referee the search agents are written against: it
//! walks a game from its start state to a terminal one, asking the right
//! agent for a move on player turns and sampling the game's distribution on
//! chance turns. Agent moves are legality-checked before they are applied,
//! so a buggy agent surfaces as an [`SearchError::IllegalAction`] instead
//! of corrupting the match.

use log::{debug, trace};

use crate::core::dist::ChanceDistribution;
use crate::core::error::{Result, SearchError};
use crate::core::player::PlayerMap;
use crate::core::rng::GameRng;
use crate::game::agent::Agent;
use crate::game::model::{Game, Mover, StochasticGame};

/// Final state and scores of one completed match.
#[derive(Debug)]
pub struct MatchOutcome<G: Game> {
    /// The terminal state the match ended in.
    pub final_state: G::State,

    /// Utilities of the terminal state, one per player.
    pub utilities: PlayerMap<f64>,

    /// Moves applied, chance resolutions included.
    pub turns: u32,
}

/// Play one match of a deterministic game to completion.
///
/// `agents` holds one agent per player id, indexed by the mover of each
/// state. Encountering a chance state is a contract violation here;
/// stochastic games go through [`run_stochastic_match`].
pub fn run_match<G: Game>(
    game: &G,
    agents: &mut PlayerMap<&mut dyn Agent<G>>,
) -> Result<MatchOutcome<G>> {
    drive(game, agents, |_, _| {
        Err(SearchError::PreconditionViolation(
            "chance state encountered in a deterministic match".into(),
        ))
    })
}

/// Play one match of a stochastic game to completion, resolving chance
/// states by sampling the game's validated distribution with `rng`.
pub fn run_stochastic_match<G: StochasticGame>(
    game: &G,
    agents: &mut PlayerMap<&mut dyn Agent<G>>,
    rng: &mut GameRng,
) -> Result<MatchOutcome<G>> {
    drive(game, agents, |game, state| {
        let actions = game.actions(state);
        let dist = ChanceDistribution::new(game.chance_distribution(state))?;
        dist.check_membership(&actions)?;
        Ok(dist.sample(rng).clone())
    })
}

fn drive<G: Game>(
    game: &G,
    agents: &mut PlayerMap<&mut dyn Agent<G>>,
    mut resolve_chance: impl FnMut(&G, &G::State) -> Result<G::Action>,
) -> Result<MatchOutcome<G>> {
    let mut state = game.start();
    let mut turns = 0u32;

    while !game.is_terminal(&state) {
        let action = match game.mover(&state) {
            Mover::Chance => resolve_chance(game, &state)?,
            Mover::Player(player) => {
                let action = agents[player].choose_action(&state)?;
                if !game.actions(&state).contains(&action) {
                    return Err(SearchError::IllegalAction(format!(
                        "agent for {} chose {:?}, which is not legal here",
                        player, action
                    )));
                }
                action
            }
        };

        trace!("turn {}: applying {:?}", turns, action);
        state = game.result(&state, &action)?;
        turns += 1;
    }

    let utilities = game.utilities(&state);
    debug!("match finished after {} turns: {:?}", turns, utilities);

    Ok(MatchOutcome {
        final_state: state,
        utilities,
        turns,
    })
}
