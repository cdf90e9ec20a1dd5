use tracing::{debug, instrument, trace};

use crate::board::Board;
use crate::error::GameError;
use crate::types::{Cell, GameState, GameStatus, MoveRecord, Player, Position, Scores, Winner};

/// Outcome of [`Game::play`]: what the move flipped and how the turn resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub flipped: Vec<Position>,
    pub status: GameStatus,
}

/// The rules engine. Owns the board, the side to move, scores and history.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    current_player: Player,
    scores: Scores,
    active: bool,
    status: GameStatus,
    history: Vec<MoveRecord>,
}

impl Game {
    pub fn new() -> Self {
        let board = Board::new();
        Self {
            board,
            current_player: Player::Black,
            scores: board.count(),
            active: true,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    /// Starts from an arbitrary position with `to_move` on turn.
    ///
    /// The position is resolved right away: if `to_move` is stuck the
    /// opponent takes the turn (`Passed`), and if neither side can move the
    /// game starts already over.
    pub fn from_board(board: Board, to_move: Player) -> Self {
        let mut game = Self {
            board,
            current_player: to_move,
            scores: board.count(),
            active: true,
            status: GameStatus::InProgress,
            history: Vec::new(),
        };
        if board.is_full() {
            game.finish();
        } else if !board.has_any_legal_move(to_move) {
            if board.has_any_legal_move(!to_move) {
                game.current_player = !to_move;
                game.status = GameStatus::Passed(!to_move);
            } else {
                game.finish();
            }
        }
        game
    }

    /// Back to the starting position with Black to move.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        *self = Self::new();
        debug!("game reset");
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn cell(&self, row: u8, col: u8) -> Result<Cell, GameError> {
        Ok(self.board.cell(Position::new(row, col)?))
    }

    pub fn is_legal_move(&self, row: u8, col: u8, player: Player) -> bool {
        self.board.is_legal_move(row, col, player)
    }

    pub fn has_any_legal_move(&self, player: Player) -> bool {
        self.board.has_any_legal_move(player)
    }

    /// Legal moves of the side to move, row-major. Empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Position> {
        if !self.active {
            return Vec::new();
        }
        self.board.legal_moves(self.current_player)
    }

    /// Discs flipped by the latest move.
    pub fn last_flipped(&self) -> &[Position] {
        self.history
            .last()
            .map(|record| record.flipped.as_slice())
            .unwrap_or_default()
    }

    /// The winner, once the game is over.
    pub fn winner(&self) -> Option<Winner> {
        match self.status {
            GameStatus::Over(winner) => Some(winner),
            _ => None,
        }
    }

    /// History as `Move {n}: {Player} at {Column}{Row}` lines.
    pub fn move_log(&self) -> Vec<String> {
        self.history
            .iter()
            .enumerate()
            .map(|(i, record)| format!("Move {}: {record}", i + 1))
            .collect()
    }

    pub fn status_message(&self) -> String {
        self.status.message(self.current_player)
    }

    /// Places a disc for `player` and flips every sandwiched run.
    ///
    /// The mover becomes the current player; call
    /// [`Game::advance_turn_state`] afterwards to hand the turn over.
    #[instrument(skip(self))]
    pub fn apply_move(
        &mut self,
        row: u8,
        col: u8,
        player: Player,
    ) -> Result<Vec<Position>, GameError> {
        let pos = Position::new(row, col)?;
        if !self.active {
            return Err(GameError::GameOver);
        }

        let flipped = self.board.place(pos, player);
        if flipped.is_empty() {
            return Err(GameError::InvalidMove { row, col, player });
        }

        self.history.push(MoveRecord {
            player,
            row,
            col,
            flipped: flipped.clone(),
        });
        self.scores = self.board.count();
        self.current_player = player;

        debug!(
            %pos,
            flipped = flipped.len(),
            black = self.scores.black,
            white = self.scores.white,
            "move applied"
        );
        Ok(flipped)
    }

    /// Hands the turn to the opponent of the current player, resolving forced
    /// passes and the end of the game.
    #[instrument(skip(self), fields(mover = %self.current_player))]
    pub fn advance_turn_state(&mut self) -> GameStatus {
        if !self.active {
            return self.status;
        }

        let mover = self.current_player;
        let next = !mover;

        self.status = if self.board.is_full() {
            self.finish()
        } else if !self.board.has_any_legal_move(next) {
            if self.board.has_any_legal_move(mover) {
                trace!(%next, "no legal move, passing");
                GameStatus::Passed(mover)
            } else {
                self.finish()
            }
        } else {
            self.current_player = next;
            GameStatus::InProgress
        };

        debug!(status = ?self.status, to_move = %self.current_player, "turn resolved");
        self.status
    }

    /// Forfeits the turn of the side to move, which must have no legal move.
    ///
    /// The opponent takes over with `Passed`, or the game ends when the
    /// opponent is stuck too.
    #[instrument(skip(self), fields(stuck = %self.current_player))]
    pub fn pass_turn(&mut self) -> Result<GameStatus, GameError> {
        if !self.active {
            return Err(GameError::GameOver);
        }

        let stuck = self.current_player;
        if self.board.has_any_legal_move(stuck) {
            return Err(GameError::MustMove(stuck));
        }

        let next = !stuck;
        self.status = if self.board.has_any_legal_move(next) {
            self.current_player = next;
            GameStatus::Passed(next)
        } else {
            self.finish()
        };

        debug!(status = ?self.status, "turn passed");
        Ok(self.status)
    }

    /// Applies a move for the side to move and resolves the turn.
    pub fn play(&mut self, row: u8, col: u8) -> Result<Turn, GameError> {
        let flipped = self.apply_move(row, col, self.current_player)?;
        let status = self.advance_turn_state();
        Ok(Turn { flipped, status })
    }

    pub fn to_game_state(&self) -> GameState {
        GameState {
            board: self.board.to_array().to_vec(),
            current_player: self.current_player,
            black_count: self.scores.black,
            white_count: self.scores.white,
            is_active: self.active,
            status: self.status,
            message: self.status_message(),
            flipped: self.last_flipped().to_vec(),
            legal_moves: self.legal_moves(),
            move_log: self.move_log(),
        }
    }

    fn finish(&mut self) -> GameStatus {
        self.active = false;
        self.status = GameStatus::Over(self.scores.winner());
        debug!(
            black = self.scores.black,
            white = self.scores.white,
            "game over"
        );
        self.status
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
