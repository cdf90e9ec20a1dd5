//! JavaScript bindings. The browser front end owns rendering, input and the
//! delay before the computer replies; everything else goes through here.

use tracing::debug;
use wasm_bindgen::prelude::*;

use crate::ai::{Difficulty, MoveSelector, Opponent, OpponentConfig};
use crate::error::GameError;
use crate::game::Game;
use crate::types::Action;

#[wasm_bindgen]
pub struct ReversiGame {
    game: Game,
    opponent: Opponent,
}

#[wasm_bindgen]
impl ReversiGame {
    /// `config` is `undefined` or `{ difficulty?: "easy" | "medium" | "hard", seed?: number }`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<ReversiGame, JsError> {
        let config: OpponentConfig = if config.is_undefined() || config.is_null() {
            OpponentConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(|err| JsError::new(&err.to_string()))?
        };

        Ok(Self {
            game: Game::new(),
            opponent: Opponent::from_config(&config),
        })
    }

    pub fn reset(&mut self) {
        self.game.reset();
    }

    /// Whether the side to move may play at (row, col); used for highlighting.
    pub fn is_legal_move(&self, row: u8, col: u8) -> bool {
        self.game.is_active() && self.game.is_legal_move(row, col, self.game.current_player())
    }

    /// Plays a move for the side to move and returns the new state.
    pub fn play(&mut self, row: u8, col: u8) -> Result<JsValue, JsError> {
        self.game.play(row, col)?;
        self.state()
    }

    /// Lets the computer move for the side to move and returns the new state.
    pub fn ai_move(&mut self) -> Result<JsValue, JsError> {
        if !self.game.is_active() {
            return Err(GameError::GameOver.into());
        }

        let player = self.game.current_player();
        match self.opponent.select_move(self.game.board(), player) {
            Action::Move(mv) => {
                self.game.play(mv.row, mv.col)?;
            }
            Action::Pass => {
                debug!(%player, "computer has no move");
                self.game.pass_turn()?;
            }
        }
        self.state()
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.game.to_game_state())
            .map_err(|err| JsError::new(&err.to_string()))
    }

    pub fn difficulty(&self) -> String {
        self.opponent.difficulty().to_string()
    }

    pub fn set_difficulty(&mut self, name: &str) -> Result<(), JsError> {
        let difficulty: Difficulty = name.parse()?;
        self.opponent.set_difficulty(difficulty);
        Ok(())
    }
}
