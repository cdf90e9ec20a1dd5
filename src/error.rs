use thiserror::Error;

use crate::types::Player;

/// Errors returned by the engine when a caller breaks the move contract.
///
/// Passing and game over are regular statuses, never errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("illegal move for {player} at row {row}, col {col}")]
    InvalidMove { row: u8, col: u8, player: Player },

    #[error("row/col out of range: ({row}, {col})")]
    InvalidCoordinate { row: u8, col: u8 },

    #[error("game is already over")]
    GameOver,

    #[error("{0} has a legal move and cannot pass")]
    MustMove(Player),

    #[error("unknown difficulty: {0:?} (expected easy, medium or hard)")]
    UnknownDifficulty(String),
}
