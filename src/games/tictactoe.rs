//! 3x3 tic-tac-toe demo games.
//!
//! [`TicTacToe`] is the deterministic two-player zero-sum classic: player 0
//! plays X, player 1 plays O, three in a line wins. [`ScrambleTicTacToe`] is
//! a stochastic variant where every O move is followed by a chance state
//! that resets one uniformly chosen cell (possibly an empty one) before X
//! moves again.
//!
//! Both games exist to exercise the searches end to end; the engine itself
//! never depends on them.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SearchError};
use crate::core::player::{PlayerId, PlayerMap};
use crate::game::model::{Game, Mover, StochasticGame};

/// A placed mark. X belongs to player 0, O to player 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// The player who owns this mark.
    #[must_use]
    pub fn player(self) -> PlayerId {
        match self {
            Mark::X => PlayerId::new(0),
            Mark::O => PlayerId::new(1),
        }
    }
}

/// A board cell, indexed 0-8 row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell(pub u8);

/// Turn marker for the pending chance phase in [`ScrambleTicTacToe`].
const SCRAMBLE_TURN: u8 = 2;

/// The eight winning lines.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Board state shared by both variants: 9 cells plus whose turn it is.
///
/// `turn` is 0 (X to place), 1 (O to place), or the internal scramble
/// marker while a chance reset is pending.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Option<Mark>; 9],
    turn: u8,
}

impl Board {
    /// The empty starting board, X to move.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            cells: [None; 9],
            turn: 0,
        }
    }

    /// Parse a board from a 9-character string of `X`, `O`, and `.`,
    /// row-major, with the turn supplied explicitly.
    ///
    /// Panics on malformed input; intended for tests and demos.
    ///
    /// ```
    /// use turnwise::games::tictactoe::Board;
    ///
    /// let board = Board::parse("XX.OO....", 0);
    /// assert!(board.cell(2).is_none());
    /// ```
    #[must_use]
    pub fn parse(s: &str, turn: u8) -> Self {
        assert_eq!(s.len(), 9, "board string must have 9 cells");
        let mut cells = [None; 9];
        for (i, c) in s.chars().enumerate() {
            cells[i] = match c {
                'X' => Some(Mark::X),
                'O' => Some(Mark::O),
                '.' => None,
                _ => panic!("unexpected board character {:?}", c),
            };
        }
        Self { cells, turn }
    }

    /// Contents of cell `i`.
    #[must_use]
    pub fn cell(&self, i: usize) -> Option<Mark> {
        self.cells[i]
    }

    /// The mark holding three in a line, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Mark> {
        for line in &LINES {
            if let Some(mark) = self.cells[line[0]] {
                if self.cells[line[1]] == Some(mark) && self.cells[line[2]] == Some(mark) {
                    return Some(mark);
                }
            }
        }
        None
    }

    /// Whether every cell is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    fn empty_cells(&self) -> Vec<Cell> {
        (0..9u8)
            .filter(|&i| self.cells[i as usize].is_none())
            .map(Cell)
            .collect()
    }

    fn place(&self, cell: Cell, mark: Mark, next_turn: u8) -> Result<Board> {
        let i = cell.0 as usize;
        if i >= 9 || self.cells[i].is_some() {
            return Err(SearchError::IllegalAction(format!(
                "cell {} is not open",
                cell.0
            )));
        }
        let mut next = self.clone();
        next.cells[i] = Some(mark);
        next.turn = next_turn;
        Ok(next)
    }

    fn terminal_utilities(&self) -> PlayerMap<f64> {
        match self.winner() {
            Some(Mark::X) => PlayerMap::from_vec(vec![1.0, -1.0]),
            Some(Mark::O) => PlayerMap::from_vec(vec![-1.0, 1.0]),
            None => PlayerMap::with_value(2, 0.0),
        }
    }
}

/// Line-counting heuristic: lines still open to X minus lines still open to
/// O, scaled into `[-1, 1]`. Player 0 receives the score, player 1 its
/// negation.
#[must_use]
pub fn open_lines(board: &Board) -> PlayerMap<f64> {
    let mut score = 0i32;
    for line in &LINES {
        let marks: Vec<Option<Mark>> = line.iter().map(|&i| board.cell(i)).collect();
        if !marks.contains(&Some(Mark::O)) {
            score += 1;
        }
        if !marks.contains(&Some(Mark::X)) {
            score -= 1;
        }
    }
    let x_score = f64::from(score) / 8.0;
    PlayerMap::from_vec(vec![x_score, -x_score])
}

/// Classic deterministic tic-tac-toe.
#[derive(Clone, Copy, Debug, Default)]
pub struct TicTacToe;

impl TicTacToe {
    /// Create the game rules object.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Game for TicTacToe {
    type State = Board;
    type Action = Cell;

    fn player_count(&self) -> usize {
        2
    }

    fn start(&self) -> Board {
        Board::empty()
    }

    fn mover(&self, state: &Board) -> Mover {
        Mover::Player(PlayerId::new(state.turn))
    }

    fn actions(&self, state: &Board) -> Vec<Cell> {
        state.empty_cells()
    }

    fn result(&self, state: &Board, action: &Cell) -> Result<Board> {
        let mark = if state.turn == 0 { Mark::X } else { Mark::O };
        state.place(*action, mark, 1 - state.turn)
    }

    fn is_terminal(&self, state: &Board) -> bool {
        state.winner().is_some() || state.is_full()
    }

    fn utilities(&self, state: &Board) -> PlayerMap<f64> {
        state.terminal_utilities()
    }

    fn zero_sum(&self) -> bool {
        true
    }
}

// No chance states, so the inherited uniform distribution is never
// consulted; the impl only opens the game to chance-aware searches.
impl StochasticGame for TicTacToe {}

/// Tic-tac-toe with a chance reset after every O move.
///
/// Turn cycle: X places, O places, then chance picks one of the nine cells
/// uniformly and clears it (clearing an empty cell changes nothing), and X
/// moves again. Terminality is checked between phases, so a winning O move
/// still ends the game before any reset.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrambleTicTacToe;

impl ScrambleTicTacToe {
    /// Create the game rules object.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Game for ScrambleTicTacToe {
    type State = Board;
    type Action = Cell;

    fn player_count(&self) -> usize {
        2
    }

    fn start(&self) -> Board {
        Board::empty()
    }

    fn mover(&self, state: &Board) -> Mover {
        if state.turn == SCRAMBLE_TURN {
            Mover::Chance
        } else {
            Mover::Player(PlayerId::new(state.turn))
        }
    }

    fn actions(&self, state: &Board) -> Vec<Cell> {
        if state.turn == SCRAMBLE_TURN {
            // Every cell is a reset target, occupied or not
            (0..9u8).map(Cell).collect()
        } else {
            state.empty_cells()
        }
    }

    fn result(&self, state: &Board, action: &Cell) -> Result<Board> {
        match state.turn {
            0 => state.place(*action, Mark::X, 1),
            1 => state.place(*action, Mark::O, SCRAMBLE_TURN),
            _ => {
                let i = action.0 as usize;
                if i >= 9 {
                    return Err(SearchError::IllegalAction(format!(
                        "cell {} is off the board",
                        action.0
                    )));
                }
                let mut next = state.clone();
                next.cells[i] = None;
                next.turn = 0;
                Ok(next)
            }
        }
    }

    fn is_terminal(&self, state: &Board) -> bool {
        state.winner().is_some() || state.is_full()
    }

    fn utilities(&self, state: &Board) -> PlayerMap<f64> {
        state.terminal_utilities()
    }

    fn zero_sum(&self) -> bool {
        true
    }
}

impl StochasticGame for ScrambleTicTacToe {}
