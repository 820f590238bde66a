use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::{GameConfig, OpponentMode};
use crate::error::GameError;
use crate::event::GameEvent;
use crate::game::Game;
use crate::types::Position;

/// JavaScript handle on one game session.
///
/// Events raised while a call runs are queued and handed out by
/// `drainEvents`.
#[wasm_bindgen]
pub struct WasmGame {
    game: Game,
    events: Rc<RefCell<Vec<GameEvent>>>,
}

#[wasm_bindgen]
impl WasmGame {
    /// `config` is a partial `GameConfig` object, or `undefined` for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmGame, JsError> {
        let config: GameConfig = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };

        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let mut game = Game::new(config);
        game.set_observer(move |event: &GameEvent| sink.borrow_mut().push(event.clone()));

        Ok(WasmGame { game, events })
    }

    pub fn start(&mut self, player_first: bool) -> Result<(), JsError> {
        Ok(self.game.start_game(player_first)?)
    }

    /// Accepts `"human"`, `"greedy"`, `"lookahead"` and the
    /// `"player"`/`"beginner"`/`"professional"` aliases.
    #[wasm_bindgen(js_name = setOpponent)]
    pub fn set_opponent(&mut self, mode: &str) -> Result<(), JsError> {
        let mode: OpponentMode = mode.parse().map_err(|msg: String| JsError::new(&msg))?;
        Ok(self.game.set_opponent_mode(mode)?)
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsError> {
        to_js(self.game.legal_moves())
    }

    #[wasm_bindgen(js_name = chooseMove)]
    pub fn choose_move(&mut self, x: u8, y: u8) -> Result<(), JsError> {
        let pos = Position::new(x, y).ok_or(GameError::OutOfBounds(Position { x, y }))?;
        Ok(self.game.choose_move(pos)?)
    }

    #[wasm_bindgen(js_name = playComputerMove)]
    pub fn play_computer_move(&mut self) -> Result<(), JsError> {
        Ok(self.game.play_computer_move()?)
    }

    pub fn undo(&mut self) -> Result<(), JsError> {
        Ok(self.game.undo_last_exchange()?)
    }

    pub fn score(&self) -> Result<JsValue, JsError> {
        to_js(&self.game.score())
    }

    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        to_js(&self.game.snapshot())
    }

    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> Result<JsValue, JsError> {
        let events: Vec<GameEvent> = self.events.borrow_mut().drain(..).collect();
        to_js(&events)
    }
}

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// Routes `log` output to the browser console. Safe to call more than once.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let level = level.parse().unwrap_or(log::Level::Info);
        let _ = console_log::init_with_level(level);
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = level;
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    Ok(serde_wasm_bindgen::to_value(value)?)
}
