use crate::board::Board;
use crate::error::GameResult;
use crate::types::{Color, MoveRecord, Position};

/// Extra weight for a placed disc on the left/right or top/bottom edge.
pub const PLACED_EDGE_BONUS: f32 = 0.4;

/// Heuristic value of a move: one point per disc placed or flipped, one more
/// for each of those on an edge, plus [`PLACED_EDGE_BONUS`] per edge axis of
/// the placed disc. Corners collect every bonus.
pub fn record_score(record: &MoveRecord) -> f32 {
    let mut score: f32 = record
        .cells()
        .map(|cell| if cell.is_edge() { 2.0 } else { 1.0 })
        .sum();
    if record.placed.is_edge_x() {
        score += PLACED_EDGE_BONUS;
    }
    if record.placed.is_edge_y() {
        score += PLACED_EDGE_BONUS;
    }
    score
}

/// Scores `pos` for `color` without touching the board.
pub fn move_score(board: &Board, pos: Position, color: Color) -> GameResult<f32> {
    board.flip_set(pos, color).map(|record| record_score(&record))
}

/// Picks the highest-scoring entry of `moves`; equal scores keep the earlier
/// move.
pub fn simple_move(board: &Board, color: Color, moves: &[Position]) -> GameResult<Option<Position>> {
    let mut best: Option<(Position, f32)> = None;
    for &mv in moves {
        let score = move_score(board, mv, color)?;
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((mv, score));
        }
    }
    Ok(best.map(|(mv, _)| mv))
}
