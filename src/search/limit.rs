//! Depth limits and heuristic cutoffs.
//!
//! A lookahead search either runs exhaustively to terminal states or stops
//! at a fixed ply depth and scores the frontier with a [`Heuristic`]. The
//! two halves of that bargain come together or not at all: a depth bound
//! without a heuristic would have nothing to say about cutoff states, and a
//! heuristic without a bound would never be consulted. [`SearchLimit`]
//! enforces the pairing when a searcher is built.

use crate::core::error::{Result, SearchError};
use crate::core::player::PlayerMap;
use crate::game::model::Game;

/// Cutoff evaluation for depth-limited search.
///
/// Returns an estimated utility for every player so that the same heuristic
/// serves two-player and N-player searches alike; each searcher reads the
/// coordinates it needs. Estimates should stay within the utility range of
/// the game's terminal states, otherwise cutoff scores can dominate real
/// outcomes.
///
/// Any `Fn(&State) -> PlayerMap<f64>` closure is a heuristic:
///
/// ```
/// use turnwise::core::PlayerMap;
/// use turnwise::games::tictactoe::{open_lines, Board, TicTacToe};
/// use turnwise::search::Heuristic;
///
/// let h = |board: &Board| open_lines(board);
/// let estimate = Heuristic::<TicTacToe>::evaluate(&h, &Board::empty());
/// assert_eq!(estimate[turnwise::core::PlayerId::new(0)], 0.0);
/// # let _: PlayerMap<f64> = estimate;
/// ```
pub trait Heuristic<G: Game> {
    /// Estimated utilities for every player at a cutoff state.
    fn evaluate(&self, state: &G::State) -> PlayerMap<f64>;
}

impl<G, F> Heuristic<G> for F
where
    G: Game,
    F: Fn(&G::State) -> PlayerMap<f64>,
{
    fn evaluate(&self, state: &G::State) -> PlayerMap<f64> {
        self(state)
    }
}

/// Depth bound and cutoff heuristic for a lookahead search.
///
/// [`SearchLimit::unbounded`] searches to terminal states; the caller takes
/// responsibility for the game tree being small enough to exhaust. A
/// depth-limited search needs both a maximum depth and a heuristic, in
/// either builder order:
///
/// ```
/// use turnwise::games::tictactoe::open_lines;
/// use turnwise::games::tictactoe::TicTacToe;
/// use turnwise::search::SearchLimit;
///
/// let limit = SearchLimit::<TicTacToe>::unbounded()
///     .with_max_depth(4)
///     .with_heuristic(open_lines);
/// # let _ = limit;
/// ```
pub struct SearchLimit<G: Game> {
    max_depth: Option<u32>,
    heuristic: Option<Box<dyn Heuristic<G>>>,
}

impl<G: Game> SearchLimit<G> {
    /// Exhaustive search: no depth bound, terminal evaluation only.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            max_depth: None,
            heuristic: None,
        }
    }

    /// Depth-limited search with the given cutoff heuristic.
    #[must_use]
    pub fn bounded(max_depth: u32, heuristic: impl Heuristic<G> + 'static) -> Self {
        Self::unbounded()
            .with_max_depth(max_depth)
            .with_heuristic(heuristic)
    }

    /// Set the depth bound in plies from the root.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Set the cutoff heuristic.
    #[must_use]
    pub fn with_heuristic(mut self, heuristic: impl Heuristic<G> + 'static) -> Self {
        self.heuristic = Some(Box::new(heuristic));
        self
    }

    /// Resolve the limit into an optional cutoff, rejecting half-configured
    /// pairs and zero depth.
    pub(crate) fn validate(self) -> Result<Option<Cutoff<G>>> {
        match (self.max_depth, self.heuristic) {
            (None, None) => Ok(None),
            (Some(0), Some(_)) => Err(SearchError::IllegalConfiguration(
                "max depth must be at least 1".into(),
            )),
            (Some(max_depth), Some(heuristic)) => Ok(Some(Cutoff {
                max_depth,
                heuristic,
            })),
            (Some(_), None) => Err(SearchError::IllegalConfiguration(
                "a depth bound requires a cutoff heuristic".into(),
            )),
            (None, Some(_)) => Err(SearchError::IllegalConfiguration(
                "a cutoff heuristic requires a depth bound".into(),
            )),
        }
    }
}

impl<G: Game> Default for SearchLimit<G> {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// A validated depth bound plus the heuristic that scores its frontier.
pub(crate) struct Cutoff<G: Game> {
    max_depth: u32,
    heuristic: Box<dyn Heuristic<G>>,
}

impl<G: Game> Cutoff<G> {
    /// Whether `depth` plies below the root is at or past the bound.
    pub(crate) fn reached(&self, depth: u32) -> bool {
        depth >= self.max_depth
    }

    /// Score a frontier state.
    pub(crate) fn evaluate(&self, state: &G::State) -> PlayerMap<f64> {
        self.heuristic.evaluate(state)
    }
}
