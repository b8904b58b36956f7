//! State-keyed MCTS statistics tables.
//!
//! Visit counts, accumulated utilities, and expansion records are plain
//! hash maps keyed by game state, not a pointer tree. A state reached along
//! two different move orders shares a single entry, so experience transfers
//! across transpositions for free, and statistics survive from one decision
//! to the next as the real game advances.

use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Search statistics for every state MCTS has touched.
///
/// Three tables share the same key space: `visits` and `rewards` hold the
/// running totals behind the UCT score, `children` records the successor
/// list of each expanded state. A terminal state is expanded to an empty
/// successor list, which is what distinguishes it from an unexpanded one.
///
/// Tables grow for the lifetime of the owning agent; [`SearchTree::clear`]
/// is the only eviction.
#[derive(Clone, Debug)]
pub struct SearchTree<S> {
    visits: FxHashMap<S, u64>,
    rewards: FxHashMap<S, f64>,
    children: FxHashMap<S, Vec<S>>,
}

impl<S: Clone + Eq + Hash> SearchTree<S> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            visits: FxHashMap::default(),
            rewards: FxHashMap::default(),
            children: FxHashMap::default(),
        }
    }

    /// Visit count for a state (0 if never visited).
    #[must_use]
    pub fn visits(&self, state: &S) -> u64 {
        self.visits.get(state).copied().unwrap_or(0)
    }

    /// Accumulated utility for a state (0 if never visited).
    #[must_use]
    pub fn reward(&self, state: &S) -> f64 {
        self.rewards.get(state).copied().unwrap_or(0.0)
    }

    /// Average utility per visit, or `None` for an unvisited state.
    #[must_use]
    pub fn mean_reward(&self, state: &S) -> Option<f64> {
        let visits = self.visits(state);
        if visits == 0 {
            None
        } else {
            Some(self.reward(state) / visits as f64)
        }
    }

    /// Recorded successors of a state, or `None` if it was never expanded.
    /// The slice preserves action enumeration order and is empty for
    /// terminal states.
    #[must_use]
    pub fn children(&self, state: &S) -> Option<&[S]> {
        self.children.get(state).map(Vec::as_slice)
    }

    /// Whether the state has an expansion record.
    #[must_use]
    pub fn is_expanded(&self, state: &S) -> bool {
        self.children.contains_key(state)
    }

    /// Record the successor list of a state.
    pub fn insert_children(&mut self, state: S, children: Vec<S>) {
        self.children.insert(state, children);
    }

    /// Add one visit carrying the given utility.
    pub fn record_visit(&mut self, state: S, utility: f64) {
        *self.rewards.entry(state.clone()).or_insert(0.0) += utility;
        *self.visits.entry(state).or_insert(0) += 1;
    }

    /// Number of states with visit statistics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    /// Whether no state has been visited yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Drop all statistics.
    pub fn clear(&mut self) {
        self.visits.clear();
        self.rewards.clear();
        self.children.clear();
    }
}

impl<S: Clone + Eq + Hash> Default for SearchTree<S> {
    fn default() -> Self {
        Self::new()
    }
}
