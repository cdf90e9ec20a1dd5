//! Othello rules engine with a single-ply computer opponent.
//!
//! [`Game`] owns the board and enforces the rules; [`ai`] picks moves from a
//! read-only [`Board`]. The [`wasm`] module exposes both to a browser front end.

use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod error;
pub mod game;
pub mod types;
pub mod wasm;

pub use ai::{Difficulty, MoveSelector, Opponent, OpponentConfig, select_move};
pub use board::Board;
pub use error::GameError;
pub use game::{Game, Turn};
pub use types::{Action, Cell, GameState, GameStatus, MoveRecord, Player, Position, Scores, Winner};

/// The number of cells on one edge of the board.
pub const BOARD_SIZE: usize = 8;

/// The number of cells on the board.
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
