use log::trace;

use crate::ai::greedy::record_score;
use crate::board::Board;
use crate::error::GameResult;
use crate::types::{Color, Position};

/// One-ply lookahead.
///
/// Every candidate is played on `board`, the opponent's replies are scored
/// with the greedy heuristic, and the move is undone again. The candidate with
/// the greatest `own score - reply score` over all of its replies wins; equal
/// values keep the earlier candidate. The first legal move is the fallback, so
/// a candidate that leaves the opponent without a reply is still selectable.
///
/// `board` is identical to the input when this returns, including on error.
pub fn smart_move(board: &mut Board, color: Color) -> GameResult<Option<Position>> {
    let moves = board.legal_moves(color);
    let Some(&first) = moves.first() else {
        return Ok(None);
    };

    let mut best_move = first;
    let mut best_diff = f32::NEG_INFINITY;

    for mv in moves {
        let record = board.flip_set(mv, color)?;
        let own_score = record_score(&record);

        board.apply(&record, color)?;
        let replies = reply_scores(board, color.opponent());
        board.revert(&record, color)?;

        for reply_score in replies? {
            let diff = own_score - reply_score;
            if diff > best_diff {
                best_diff = diff;
                best_move = mv;
            }
        }
        trace!("lookahead candidate {mv} own={own_score} best={best_move}/{best_diff}");
    }

    Ok(Some(best_move))
}

fn reply_scores(board: &Board, color: Color) -> GameResult<Vec<f32>> {
    board
        .legal_moves(color)
        .into_iter()
        .map(|reply| board.flip_set(reply, color).map(|record| record_score(&record)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: u8, y: u8) -> Position {
        Position { x, y }
    }

    #[test]
    fn only_move_that_ends_the_game_is_selected() {
        let mut board = Board::from_layout([
            ".BWWWWWW", "WWWWWWWW", "WWWWWWWW", "WWWWWWWW", "WWWWWWWW", "WWWWWWWW", "WWWWWWWW",
            "WWWWWWWW",
        ])
        .unwrap();
        let before = board;

        assert_eq!(smart_move(&mut board, Color::White), Ok(Some(pos(0, 0))));
        assert_eq!(board, before);
    }

    #[test]
    fn candidates_without_replies_fall_back_to_first_move() {
        // Either White move fills the board, so no candidate sees a reply.
        let mut board = Board::from_layout([
            ".BWWWWWW", "WWWWWWWW", "WWWWWWWW", "WWWWWWWW", "WWWWWWWW", "WWWWWWWW", "WWWWWWWW",
            "WWWWWWB.",
        ])
        .unwrap();

        assert_eq!(board.legal_moves(Color::White), vec![pos(0, 0), pos(7, 7)]);
        assert_eq!(smart_move(&mut board, Color::White), Ok(Some(pos(0, 0))));
    }

    #[test]
    fn prefers_the_larger_margin_over_the_weakest_reply() {
        let mut board = Board::from_layout([
            "........", //
            "........", //
            "........", //
            ".....BW.", //
            "........", //
            "..BWW...", //
            "........", //
            "........", //
        ])
        .unwrap();
        let before = board;

        // (5,5): 3.0 against a 2.0 reply; (7,3): 3.4 against a 2.0 reply.
        assert_eq!(smart_move(&mut board, Color::Black), Ok(Some(pos(7, 3))));
        assert_eq!(board, before);
    }

    #[test]
    fn board_is_restored_for_repeated_searches() {
        let mut board = Board::new();
        board.play(pos(2, 3), Color::Black).unwrap();
        let before = board;

        let first = smart_move(&mut board, Color::White).unwrap();
        assert_eq!(board, before);
        assert_eq!(board.legal_moves(Color::White), before.legal_moves(Color::White));
        assert_eq!(smart_move(&mut board, Color::White).unwrap(), first);
    }

    #[test]
    fn no_legal_moves_selects_nothing() {
        let mut board = Board::from_layout([
            "WWWWWWWW", "WWWWWWWW", "WWWWWWWW", "WWWWWWWW", "WWWWWWWW", "WWWWWWWW", "WWWWWWWW",
            "WWWWWWW.",
        ])
        .unwrap();

        assert_eq!(smart_move(&mut board, Color::Black), Ok(None));
    }
}
