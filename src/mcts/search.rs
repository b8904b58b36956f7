//! Core MCTS search algorithm.
//!
//! Implements UCT search over the [`Game`] contract. Each decision runs a
//! fixed budget of rollouts, and each rollout is the classic four-phase
//! loop:
//!
//! 1. **Selection**: descend from the root by UCT score until reaching a
//!    state that is unexpanded, terminal, or has an unexpanded child. Every
//!    child of a state is visited once before any UCT descent through it.
//! 2. **Expansion**: record the successor list of the selected leaf.
//!    Terminal leaves are recorded with an empty list and their legal
//!    actions are never requested.
//! 3. **Simulation**: play uniformly random moves from the leaf to a
//!    terminal state, on a forked RNG stream.
//! 4. **Backpropagation**: credit every state on the selection path with
//!    the simulated utility of the player who moved into it, i.e. the
//!    mover of its parent.
//!
//! The tree is a [`SearchTree`] keyed by state and persists across
//! decisions, so later searches start from earlier statistics.

use std::time::Instant;

use crate::core::error::{Result, SearchError};
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::rng::GameRng;
use crate::game::agent::Agent;
use crate::game::model::{Game, Mover};
use crate::search::{ensure_player_in_game, ensure_two_player_zero_sum};

use super::config::MCTSConfig;
use super::stats::SearchStats;
use super::tree::SearchTree;

/// UCT Monte Carlo Tree Search agent for one side of a two-player zero-sum
/// game.
///
/// ```
/// use turnwise::games::tictactoe::{Board, Cell, TicTacToe};
/// use turnwise::{Agent, MCTSConfig, PlayerId, MCTS};
///
/// let config = MCTSConfig::default().with_rollouts(200);
/// let mut search = MCTS::new(TicTacToe::new(), PlayerId::new(0), config).unwrap();
///
/// let board = Board::parse("XX.OO....", 0);
/// assert_eq!(search.choose_action(&board).unwrap(), Cell(2));
/// ```
pub struct MCTS<G: Game> {
    /// The game being searched.
    game: G,

    /// The player this agent decides for.
    player: PlayerId,

    /// Search configuration.
    config: MCTSConfig,

    /// Persistent search statistics keyed by state.
    tree: SearchTree<G::State>,

    /// RNG for playouts and fallback choices.
    rng: GameRng,

    /// Statistics from the most recent decision.
    stats: SearchStats,
}

impl<G: Game> MCTS<G> {
    /// Create a search agent deciding for `player`.
    ///
    /// Like minimax, the utilities backing UCT are meaningful against an
    /// optimizing opponent only in the two-player zero-sum setting, so the
    /// same configuration checks apply.
    pub fn new(game: G, player: PlayerId, config: MCTSConfig) -> Result<Self> {
        ensure_two_player_zero_sum(&game)?;
        ensure_player_in_game(&game, player)?;
        let rng = GameRng::new(config.seed);

        Ok(Self {
            game,
            player,
            config,
            tree: SearchTree::new(),
            rng,
            stats: SearchStats::new(),
        })
    }

    /// Get search statistics from the most recent decision.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the search tree.
    #[must_use]
    pub fn tree(&self) -> &SearchTree<G::State> {
        &self.tree
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }

    /// The player this agent decides for.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// Drop all accumulated statistics, as after an opponent surprise that
    /// makes the stored subtrees irrelevant.
    pub fn clear_tree(&mut self) {
        self.tree.clear();
    }

    /// Single rollout: select, expand, simulate, backpropagate.
    fn rollout(&mut self, root: &G::State) -> Result<()> {
        let (path, leaf) = self.select(root)?;
        self.expand(&leaf)?;
        let utilities = self.simulate(&leaf)?;
        self.backpropagate(path, &utilities);
        Ok(())
    }

    /// Descend from the root, returning the visited path and its leaf.
    ///
    /// Each path entry carries the player credited for visiting that state:
    /// the mover of its parent, who made the move into it. The root is
    /// credited to its own mover.
    fn select(&self, root: &G::State) -> Result<(Vec<(G::State, PlayerId)>, G::State)> {
        let mut path: Vec<(G::State, PlayerId)> = Vec::new();
        let mut node = root.clone();
        let mut owner = self.state_mover(root)?;

        loop {
            path.push((node.clone(), owner));

            let children = match self.tree.children(&node) {
                // Unexpanded leaf - stop here and let expansion handle it
                None => return Ok((path, node)),
                // Terminal
                Some([]) => return Ok((path, node)),
                Some(children) => children,
            };

            // Visit every child once before descending by score
            if let Some(fresh) = children.iter().find(|c| !self.tree.is_expanded(c)) {
                let child_owner = self.state_mover(&node)?;
                path.push((fresh.clone(), child_owner));
                return Ok((path, fresh.clone()));
            }

            let parent_visits = self.tree.visits(&node);
            let ln_parent = (parent_visits as f64).ln();

            let mut best_index = 0;
            let mut best_score = f64::NEG_INFINITY;
            for (index, child) in children.iter().enumerate() {
                let score = self.uct_score(child, ln_parent);
                if score > best_score {
                    best_index = index;
                    best_score = score;
                }
            }

            owner = self.state_mover(&node)?;
            node = children[best_index].clone();
        }
    }

    /// UCT score of a child: mean reward plus the exploration bonus.
    /// Unvisited children score negative infinity; selection never has to
    /// consider them because unexpanded children stop the descent first.
    fn uct_score(&self, child: &G::State, ln_parent: f64) -> f64 {
        let visits = self.tree.visits(child);
        if visits == 0 {
            return f64::NEG_INFINITY;
        }

        let exploit = self.tree.reward(child) / visits as f64;
        let explore = self.config.exploration_constant * (ln_parent / visits as f64).sqrt();
        exploit + explore
    }

    /// Record the successor list of a leaf, if not already recorded.
    fn expand(&mut self, leaf: &G::State) -> Result<()> {
        if self.tree.is_expanded(leaf) {
            return Ok(());
        }

        let children = if self.game.is_terminal(leaf) {
            Vec::new()
        } else {
            let actions = self.game.actions(leaf);
            if actions.is_empty() {
                return Err(no_actions());
            }
            let mut children = Vec::with_capacity(actions.len());
            for action in &actions {
                children.push(self.game.result(leaf, action)?);
            }
            children
        };

        self.tree.insert_children(leaf.clone(), children);
        self.stats.nodes_expanded += 1;
        Ok(())
    }

    /// Uniform random playout from `from` to a terminal state.
    fn simulate(&mut self, from: &G::State) -> Result<PlayerMap<f64>> {
        let mut rng = self.rng.fork();
        let mut state = from.clone();

        while !self.game.is_terminal(&state) {
            let actions = self.game.actions(&state);
            let action = rng.choose(&actions).ok_or_else(no_actions)?;
            state = self.game.result(&state, action)?;
            self.stats.sim_steps += 1;
        }
        Ok(self.game.utilities(&state))
    }

    /// Credit every state on the path with its owner's utility.
    fn backpropagate(&mut self, path: Vec<(G::State, PlayerId)>, utilities: &PlayerMap<f64>) {
        for (state, owner) in path {
            self.tree.record_visit(state, utilities[owner]);
        }
    }

    fn state_mover(&self, state: &G::State) -> Result<PlayerId> {
        match self.game.mover(state) {
            Mover::Player(player) => Ok(player),
            Mover::Chance => Err(SearchError::PreconditionViolation(
                "chance state encountered in a deterministic search".into(),
            )),
        }
    }

    fn random_action(&mut self, actions: &[G::Action]) -> Result<G::Action> {
        self.rng.choose(actions).cloned().ok_or_else(no_actions)
    }
}

impl<G: Game> Agent<G> for MCTS<G> {
    /// Run the configured rollout budget, then pick the root action whose
    /// successor has the best mean reward. Successors never visited are
    /// skipped; if none were visited, an action is chosen uniformly at
    /// random.
    fn choose_action(&mut self, state: &G::State) -> Result<G::Action> {
        let started = Instant::now();
        if self.game.is_terminal(state) {
            return Err(SearchError::PreconditionViolation(
                "search invoked on a terminal state".into(),
            ));
        }
        self.stats.reset();

        for _ in 0..self.config.n_rollouts {
            self.rollout(state)?;
            self.stats.rollouts += 1;
        }

        self.stats.time_us = started.elapsed().as_micros() as u64;
        log::debug!(
            "mcts ran {} rollouts in {}us ({} states tracked)",
            self.stats.rollouts,
            self.stats.time_us,
            self.tree.len()
        );

        let actions = self.game.actions(state);
        if actions.is_empty() {
            return Err(no_actions());
        }

        if !self.tree.is_expanded(state) {
            // Nothing learned, e.g. a zero-rollout budget
            return self.random_action(&actions);
        }

        let mut best: Option<(usize, f64)> = None;
        for (index, action) in actions.iter().enumerate() {
            let successor = self.game.result(state, action)?;
            let Some(mean) = self.tree.mean_reward(&successor) else {
                continue;
            };
            if best.map_or(true, |(_, best_mean)| mean > best_mean) {
                best = Some((index, mean));
            }
        }

        match best {
            Some((index, _)) => Ok(actions[index].clone()),
            None => self.random_action(&actions),
        }
    }
}

fn no_actions() -> SearchError {
    SearchError::PreconditionViolation("non-terminal state has no legal actions".into())
}
