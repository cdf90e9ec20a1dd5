use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::{BOARD_SIZE, NUM_SQUARES};

/// A board coordinate, always on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Result<Self, GameError> {
        if row as usize >= BOARD_SIZE || col as usize >= BOARD_SIZE {
            return Err(GameError::InvalidCoordinate { row, col });
        }
        Ok(Self { row, col })
    }

    /// Row-major square index (0..=63).
    pub fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index < NUM_SQUARES);
        Self {
            row: (index / BOARD_SIZE) as u8,
            col: (index % BOARD_SIZE) as u8,
        }
    }
}

/// Column letter then 1-based row, e.g. `(2, 3)` is `D3`.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'A' + self.col) as char, self.row + 1)
    }
}

/// One of the two sides. Black moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    #[default]
    Black,
    White,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            Player::Black => Cell::Black,
            Player::White => Cell::White,
        }
    }
}

impl std::ops::Not for Player {
    type Output = Self;

    fn not(self) -> Self {
        self.opponent()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Player::Black => "Black",
            Player::White => "White",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    /// Wire encoding used by the front end: 0=empty, 1=black, 2=white.
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Black => 1,
            Cell::White => 2,
        }
    }
}

/// Disc counts per color, derived from the board after every move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scores {
    pub black: u8,
    pub white: u8,
}

impl Scores {
    pub fn empty(self) -> u8 {
        NUM_SQUARES as u8 - self.black - self.white
    }

    pub fn winner(self) -> Winner {
        match self.black.cmp(&self.white) {
            std::cmp::Ordering::Greater => Winner::Black,
            std::cmp::Ordering::Less => Winner::White,
            std::cmp::Ordering::Equal => Winner::Tie,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Black,
    White,
    Tie,
}

/// Result of resolving the turn after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum GameStatus {
    InProgress,
    /// The opponent had no legal move; the wrapped player moves again.
    Passed(Player),
    Over(Winner),
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Over(_))
    }

    /// Text shown to players; `to_move` is only used while in progress.
    pub fn message(self, to_move: Player) -> String {
        match self {
            GameStatus::InProgress => format!("{to_move}'s turn"),
            GameStatus::Passed(next) => {
                format!("{} has no valid moves. {next}'s turn.", next.opponent())
            }
            GameStatus::Over(Winner::Tie) => "Game Over! Tie Game!".to_string(),
            GameStatus::Over(Winner::Black) => "Game Over! Black wins!".to_string(),
            GameStatus::Over(Winner::White) => "Game Over! White wins!".to_string(),
        }
    }
}

/// One applied move. Never modified after it enters the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    pub player: Player,
    pub row: u8,
    pub col: u8,
    /// Flipped discs in direction-then-distance order.
    pub flipped: Vec<Position>,
}

impl MoveRecord {
    pub fn position(&self) -> Position {
        Position {
            row: self.row,
            col: self.col,
        }
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.player, self.position())
    }
}

/// What a move selector decided for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Action {
    Move(Position),
    Pass,
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Row-major cells, see [`Cell::code`].
    pub board: Vec<u8>,
    pub current_player: Player,
    pub black_count: u8,
    pub white_count: u8,
    pub is_active: bool,
    pub status: GameStatus,
    pub message: String,
    /// Discs flipped by the most recent move; empty before the first move.
    pub flipped: Vec<Position>,
    /// Legal moves of `current_player`; empty once the game is over.
    pub legal_moves: Vec<Position>,
    pub move_log: Vec<String>,
}
