use serde::Serialize;

use crate::types::{Color, MoveRecord, Position, Score};

/// Notifications raised by [`crate::game::Game`] toward the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GameEvent {
    /// A human side is to move and may pick one of `moves`.
    MoveOffered { color: Color, moves: Vec<Position> },
    MoveApplied { color: Color, record: MoveRecord },
    /// `record` was taken back; `color` is the side that had played it.
    MoveUndone { color: Color, record: MoveRecord },
    GameOver { score: Score },
}

pub trait GameObserver {
    fn notify(&mut self, event: &GameEvent);
}

impl<F> GameObserver for F
where
    F: FnMut(&GameEvent),
{
    fn notify(&mut self, event: &GameEvent) {
        self(event)
    }
}
