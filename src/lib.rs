//! Rules engine and computer opponents for 8x8 Reversi.
//!
//! [`game::Game`] owns the only board of a session; presentation code reads
//! it through queries, snapshots and [`event::GameEvent`] notifications.

pub mod ai;
pub mod board;
pub mod config;
pub mod error;
pub mod event;
pub mod game;
pub mod history;
pub mod types;
pub mod wasm;

pub use board::Board;
pub use config::{GameConfig, OpponentMode};
pub use error::{GameError, GameResult};
pub use event::{GameEvent, GameObserver};
pub use game::Game;
pub use types::{CellState, Color, GameSnapshot, GameState, MoveRecord, Position, Score};
