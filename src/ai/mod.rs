pub mod greedy;
pub mod lookahead;

use crate::board::Board;
use crate::config::OpponentMode;
use crate::error::GameResult;
use crate::types::{Color, Position};

/// Chooses a move for the computer-controlled side.
///
/// Implementations may mutate `board` while thinking but must hand it back
/// exactly as they received it. `Ok(None)` means `color` has no legal move.
pub trait MoveSelector: Send + Sync {
    fn select_move(&self, board: &mut Board, color: Color) -> GameResult<Option<Position>>;
}

/// Single-step heuristic ("beginner").
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedySelector;

impl MoveSelector for GreedySelector {
    fn select_move(&self, board: &mut Board, color: Color) -> GameResult<Option<Position>> {
        let moves = board.legal_moves(color);
        greedy::simple_move(board, color, &moves)
    }
}

/// One-ply lookahead ("professional").
#[derive(Debug, Default, Clone, Copy)]
pub struct LookaheadSelector;

impl MoveSelector for LookaheadSelector {
    fn select_move(&self, board: &mut Board, color: Color) -> GameResult<Option<Position>> {
        lookahead::smart_move(board, color)
    }
}

/// The built-in selector for a computer opponent mode; `None` for `Human`.
pub fn selector_for(mode: OpponentMode) -> Option<Box<dyn MoveSelector>> {
    match mode {
        OpponentMode::Human => None,
        OpponentMode::Greedy => Some(Box::new(GreedySelector)),
        OpponentMode::Lookahead => Some(Box::new(LookaheadSelector)),
    }
}
