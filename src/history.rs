use serde::Serialize;

use crate::error::{GameError, GameResult};
use crate::types::{Color, MoveRecord};

/// Most plies a game can hold: 64 cells minus the 4 opening discs.
pub const MAX_PLIES: usize = 60;

/// One applied move and the side that made it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ply {
    pub color: Color,
    pub record: MoveRecord,
}

/// Stack of applied moves, newest last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    plies: Vec<Ply>,
}

impl History {
    pub fn new() -> Self {
        Self {
            plies: Vec::with_capacity(MAX_PLIES),
        }
    }

    pub fn push(&mut self, ply: Ply) -> GameResult<()> {
        if self.plies.len() >= MAX_PLIES {
            return Err(GameError::InvariantViolation(format!(
                "history already holds {MAX_PLIES} plies"
            )));
        }
        self.plies.push(ply);
        Ok(())
    }

    pub fn pop(&mut self) -> GameResult<Ply> {
        self.plies.pop().ok_or(GameError::EmptyHistory)
    }

    pub fn last(&self) -> Option<&Ply> {
        self.plies.last()
    }

    pub fn len(&self) -> usize {
        self.plies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plies.is_empty()
    }

    pub fn clear(&mut self) {
        self.plies.clear();
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Ply> + '_ {
        self.plies.iter()
    }
}
