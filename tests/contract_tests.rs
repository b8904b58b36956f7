//! Game contract property tests.
//!
//! The searches lean on `result` being pure, on `actions` staying
//! non-empty until the terminal, and on declared zero-sum games actually
//! balancing their payouts. These tests pin those assumptions down for
//! the bundled games and check how every search reacts when a game
//! breaks the action contract.

use proptest::prelude::*;
use turnwise::core::ChanceDistribution;
use turnwise::games::tictactoe::{Board, ScrambleTicTacToe, TicTacToe};
use turnwise::{
    Agent, AlphaBeta, Expectiminimax, Game, GameRng, MCTSConfig, Minimax, Mover, PlayerId,
    PlayerMap, SearchError, SearchLimit, StochasticGame, MCTS,
};

// =============================================================================
// Helpers
// =============================================================================

/// Play `plies` uniformly random moves from the empty board, or `None`
/// if the game ends first.
fn random_position(seed: u64, plies: usize) -> Option<Board> {
    let game = TicTacToe::new();
    let mut rng = GameRng::new(seed);
    let mut state = game.start();

    for _ in 0..plies {
        if game.is_terminal(&state) {
            return None;
        }
        let actions = game.actions(&state);
        let action = *rng.choose(&actions)?;
        state = game.result(&state, &action).ok()?;
    }
    if game.is_terminal(&state) {
        None
    } else {
        Some(state)
    }
}

/// Random playout all the way to a terminal state.
fn random_playout(seed: u64) -> Board {
    let game = TicTacToe::new();
    let mut rng = GameRng::new(seed);
    let mut state = game.start();
    while !game.is_terminal(&state) {
        let actions = game.actions(&state);
        let action = *rng.choose(&actions).unwrap();
        state = game.result(&state, &action).unwrap();
    }
    state
}

// =============================================================================
// Purity and shape of the Game contract
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// `result` must not mutate its input and must be deterministic.
    #[test]
    fn prop_result_is_pure(seed in 0u64..10_000, plies in 0usize..8) {
        let game = TicTacToe::new();
        let position = random_position(seed, plies);
        prop_assume!(position.is_some());
        let state = position.unwrap();

        for action in game.actions(&state) {
            let before = state.clone();
            let first = game.result(&state, &action).unwrap();
            prop_assert_eq!(&state, &before, "result mutated its input");
            let second = game.result(&state, &action).unwrap();
            prop_assert_eq!(first, second, "result is not deterministic");
        }
    }

    /// Terminal utilities of the declared zero-sum game balance exactly
    /// and stay within the unit range.
    #[test]
    fn prop_terminal_utilities_zero_sum(seed in 0u64..10_000) {
        let game = TicTacToe::new();
        let terminal = random_playout(seed);

        let utilities = game.utilities(&terminal);
        let total: f64 = utilities.iter().map(|(_, u)| u).sum();
        prop_assert!(total.abs() < 1e-12, "utilities sum to {}", total);
        for (player, &u) in utilities.iter() {
            prop_assert!((-1.0..=1.0).contains(&u), "{} scored {}", player, u);
        }
    }

    /// Live states always offer at least one action, and the mover on the
    /// deterministic variant is always a player.
    #[test]
    fn prop_actions_nonempty_until_terminal(seed in 0u64..10_000, plies in 0usize..9) {
        let game = TicTacToe::new();
        let position = random_position(seed, plies);
        prop_assume!(position.is_some());
        let state = position.unwrap();

        prop_assert!(!game.actions(&state).is_empty());
        prop_assert!(matches!(game.mover(&state), Mover::Player(_)));
    }
}

// =============================================================================
// Chance contract
// =============================================================================

/// The scramble reset advertises a uniform nine-way distribution over
/// every cell, and sampling honors the weights.
#[test]
fn test_scramble_distribution_uniform_and_sampled() {
    let game = ScrambleTicTacToe::new();
    // X at 0, O at 4, reset pending.
    let board = Board::parse("X...O....", 2);
    assert!(game.mover(&board).is_chance());

    let dist = ChanceDistribution::new(game.chance_distribution(&board)).unwrap();
    assert_eq!(dist.len(), 9);
    for (_, p) in dist.iter() {
        assert!((p - 1.0 / 9.0).abs() < 1e-9, "weight {p} is not uniform");
    }
    dist.check_membership(&game.actions(&board)).unwrap();

    let mut rng = GameRng::new(17);
    let mut counts = [0u32; 9];
    for _ in 0..9_000 {
        let cell = dist.sample(&mut rng);
        counts[cell.0 as usize] += 1;
    }
    // Expected 1000 per cell; allow a wide band for sampling noise.
    for (index, &count) in counts.iter().enumerate() {
        assert!(
            (700..=1300).contains(&count),
            "cell {index} drawn {count} times of 9000"
        );
    }
}

// =============================================================================
// Broken contract: a live state with no actions
// =============================================================================

/// A game whose single state claims to be live yet offers no actions.
#[derive(Clone, Copy, Debug)]
struct Stalled;

impl Game for Stalled {
    type State = u8;
    type Action = u8;

    fn player_count(&self) -> usize {
        2
    }

    fn start(&self) -> u8 {
        0
    }

    fn mover(&self, _: &u8) -> Mover {
        Mover::Player(PlayerId::new(0))
    }

    fn actions(&self, _: &u8) -> Vec<u8> {
        Vec::new()
    }

    fn result(&self, _: &u8, action: &u8) -> turnwise::Result<u8> {
        Err(SearchError::IllegalAction(format!(
            "no action {action} exists"
        )))
    }

    fn is_terminal(&self, _: &u8) -> bool {
        false
    }

    fn utilities(&self, _: &u8) -> PlayerMap<f64> {
        PlayerMap::with_value(2, 0.0)
    }

    fn zero_sum(&self) -> bool {
        true
    }
}

impl StochasticGame for Stalled {}

/// Every search maps the broken contract to a precondition error
/// instead of panicking or returning a fabricated action.
#[test]
fn test_searches_reject_actionless_state() {
    let player = PlayerId::new(0);

    let mut minimax = Minimax::new(Stalled, player, SearchLimit::unbounded()).unwrap();
    assert!(matches!(
        minimax.choose_action(&0),
        Err(SearchError::PreconditionViolation(_))
    ));

    let mut alphabeta = AlphaBeta::new(Stalled, player, SearchLimit::unbounded()).unwrap();
    assert!(matches!(
        alphabeta.choose_action(&0),
        Err(SearchError::PreconditionViolation(_))
    ));

    let mut expecti = Expectiminimax::new(Stalled, player, SearchLimit::unbounded()).unwrap();
    assert!(matches!(
        expecti.choose_action(&0),
        Err(SearchError::PreconditionViolation(_))
    ));

    let mut mcts = MCTS::new(Stalled, player, MCTSConfig::default()).unwrap();
    assert!(matches!(
        mcts.choose_action(&0),
        Err(SearchError::PreconditionViolation(_))
    ));
}
