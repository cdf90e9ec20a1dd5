//! Computer opponent: picks one move for the side to move.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::board::Board;
use crate::error::GameError;
use crate::types::{Action, Player};

pub mod greedy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Difficulty {
    /// Uniformly random legal move.
    Easy,
    /// Greedy: most flips this ply.
    #[default]
    Medium,
    /// Same policy as `Medium`; there is no deeper search.
    Hard,
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(GameError::UnknownDifficulty(s.to_string())),
        }
    }
}

impl TryFrom<String> for Difficulty {
    type Error = GameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        })
    }
}

/// Opponent settings as handed over by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct OpponentConfig {
    pub difficulty: Difficulty,
    /// Fixed seed for reproducible easy games; entropy when absent.
    pub seed: Option<u64>,
}

pub trait MoveSelector {
    fn select_move(&mut self, board: &Board, player: Player) -> Action;
}

/// The computer player: a difficulty plus its own random source.
#[derive(Debug, Clone)]
pub struct Opponent {
    difficulty: Difficulty,
    rng: StdRng,
}

impl Opponent {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_config(config: &OpponentConfig) -> Self {
        match config.seed {
            Some(seed) => Self::with_seed(config.difficulty, seed),
            None => Self::new(config.difficulty),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }
}

impl MoveSelector for Opponent {
    fn select_move(&mut self, board: &Board, player: Player) -> Action {
        select_move(board, player, self.difficulty, &mut self.rng)
    }
}

/// Picks a move for `player`, or `Pass` when there is none.
#[instrument(skip(board, rng))]
pub fn select_move<R: Rng + ?Sized>(
    board: &Board,
    player: Player,
    difficulty: Difficulty,
    rng: &mut R,
) -> Action {
    let moves = board.legal_moves(player);

    let choice = match difficulty {
        Difficulty::Easy => moves.choose(rng).copied(),
        Difficulty::Medium | Difficulty::Hard => greedy::best_flip_move(board, player, &moves),
    };

    match choice {
        Some(mv) => {
            debug!(%mv, candidates = moves.len(), "move selected");
            Action::Move(mv)
        }
        None => {
            debug!("no legal move, passing");
            Action::Pass
        }
    }
}
