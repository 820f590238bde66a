use std::fmt;

use crate::error::{GameError, GameResult};
use crate::types::{CellState, Color, MoveRecord, Position, Score};

const BOARD_SIZE: usize = 8;
const PADDED_SIZE: usize = BOARD_SIZE + 2;
const PADDED_CELLS: usize = PADDED_SIZE * PADDED_SIZE;
const PADDED_WIDTH: isize = PADDED_SIZE as isize;

/// Scan order of the capture lines, as `(dx, dy)`.
pub const DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Reversi board on a 10x10 grid whose outer ring is a permanent `Empty`
/// border, so capture-line walks stop without bounds checks.
///
/// The padding never leaves this module: callers only see `0..8` positions.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [CellState; PADDED_CELLS],
}

impl Board {
    /// Creates the opening position:
    /// (3,3)=white, (4,3)=black, (3,4)=black, (4,4)=white.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.set(Position { x: 3, y: 3 }, CellState::White);
        board.set(Position { x: 4, y: 3 }, CellState::Black);
        board.set(Position { x: 3, y: 4 }, CellState::Black);
        board.set(Position { x: 4, y: 4 }, CellState::White);
        board
    }

    pub fn empty() -> Self {
        Self {
            cells: [CellState::Empty; PADDED_CELLS],
        }
    }

    /// Builds a board from eight rows of eight cells, top row (`y = 0`) first.
    /// `B`/`X` mark black, `W`/`O` white, `.`/`-` empty; spaces are ignored.
    pub fn from_layout(rows: [&str; BOARD_SIZE]) -> GameResult<Self> {
        let mut board = Self::empty();
        for (y, row) in rows.iter().enumerate() {
            let cells: Vec<char> = row.chars().filter(|c| !c.is_whitespace()).collect();
            if cells.len() != BOARD_SIZE {
                return Err(GameError::InvalidLayout(format!(
                    "row {y} has {} cells, expected {BOARD_SIZE}",
                    cells.len()
                )));
            }
            for (x, ch) in cells.into_iter().enumerate() {
                let state = match ch {
                    'B' | 'b' | 'X' | 'x' => CellState::Black,
                    'W' | 'w' | 'O' | 'o' => CellState::White,
                    '.' | '-' => CellState::Empty,
                    other => {
                        return Err(GameError::InvalidLayout(format!(
                            "unexpected cell {other:?} at row {y}"
                        )));
                    }
                };
                board.set(
                    Position {
                        x: x as u8,
                        y: y as u8,
                    },
                    state,
                );
            }
        }
        Ok(board)
    }

    /// Returns `None` for positions off the board.
    pub fn cell(&self, pos: Position) -> Option<CellState> {
        pos.is_on_board().then(|| self.cells[padded_index(pos)])
    }

    /// Legal moves for `color`, column by column (`x` outer, `y` inner).
    pub fn legal_moves(&self, color: Color) -> Vec<Position> {
        let mut moves = Vec::new();
        for x in 0..BOARD_SIZE as u8 {
            for y in 0..BOARD_SIZE as u8 {
                let pos = Position { x, y };
                if self.is_legal(pos, color) {
                    moves.push(pos);
                }
            }
        }
        moves
    }

    pub fn has_legal_move(&self, color: Color) -> bool {
        (0..BOARD_SIZE as u8)
            .flat_map(|x| (0..BOARD_SIZE as u8).map(move |y| Position { x, y }))
            .any(|pos| self.is_legal(pos, color))
    }

    /// A move is legal when the cell is empty and at least one capture line
    /// starts there.
    pub fn is_legal(&self, pos: Position, color: Color) -> bool {
        if !pos.is_on_board() {
            return false;
        }
        let start = padded_index(pos);
        if self.cells[start] != CellState::Empty {
            return false;
        }
        DIRECTIONS
            .iter()
            .any(|&dir| self.capture_anchor(start, step_of(dir), color).is_some())
    }

    /// Computes what playing `pos` for `color` would change, without touching
    /// the board.
    pub fn flip_set(&self, pos: Position, color: Color) -> GameResult<MoveRecord> {
        if !pos.is_on_board() {
            return Err(GameError::OutOfBounds(pos));
        }
        let start = padded_index(pos);
        if self.cells[start] != CellState::Empty {
            return Err(GameError::InvariantViolation(format!(
                "flip set requested for occupied cell {pos}"
            )));
        }

        let mut flipped = Vec::new();
        for dir in DIRECTIONS {
            let step = step_of(dir);
            if let Some(anchor) = self.capture_anchor(start, step, color) {
                let mut idx = offset(anchor, -step);
                while idx != start {
                    flipped.push(position_of(idx));
                    idx = offset(idx, -step);
                }
            }
        }

        if flipped.is_empty() {
            return Err(GameError::IllegalMove(pos));
        }
        Ok(MoveRecord {
            placed: pos,
            flipped,
        })
    }

    /// Writes a move computed by [`Board::flip_set`].
    ///
    /// The record is checked against the board first; on mismatch nothing is
    /// written.
    pub fn apply(&mut self, record: &MoveRecord, color: Color) -> GameResult<()> {
        self.expect_cell(record.placed, CellState::Empty, "placed")?;
        for &pos in &record.flipped {
            self.expect_cell(pos, color.opponent().into(), "flipped")?;
        }

        let own = CellState::from(color);
        for pos in record.cells() {
            self.set(pos, own);
        }
        Ok(())
    }

    /// Reverses [`Board::apply`]: clears the placed disc and hands every
    /// flipped disc back to the opponent of `color`.
    pub fn revert(&mut self, record: &MoveRecord, color: Color) -> GameResult<()> {
        let own = CellState::from(color);
        for pos in record.cells() {
            self.expect_cell(pos, own, "reverted")?;
        }

        self.set(record.placed, CellState::Empty);
        let previous = CellState::from(color.opponent());
        for &pos in &record.flipped {
            self.set(pos, previous);
        }
        Ok(())
    }

    /// `flip_set` followed by `apply`.
    pub fn play(&mut self, pos: Position, color: Color) -> GameResult<MoveRecord> {
        let record = self.flip_set(pos, color)?;
        self.apply(&record, color)?;
        Ok(record)
    }

    pub fn score(&self) -> Score {
        let mut score = Score::default();
        for cell in self.playable_cells() {
            match cell {
                CellState::White => score.white += 1,
                CellState::Black => score.black += 1,
                CellState::Empty => {}
            }
        }
        score
    }

    pub fn empty_count(&self) -> u8 {
        (BOARD_SIZE * BOARD_SIZE) as u8 - self.score().total()
    }

    /// Row-major `[u8; 64]` (`index = y * 8 + x`) where 0=empty, 1=black,
    /// 2=white.
    pub fn to_array(&self) -> [u8; BOARD_SIZE * BOARD_SIZE] {
        let mut out = [0u8; BOARD_SIZE * BOARD_SIZE];
        for (slot, cell) in out.iter_mut().zip(self.playable_cells()) {
            *slot = cell.code();
        }
        out
    }

    fn playable_cells(&self) -> impl Iterator<Item = CellState> + '_ {
        (0..BOARD_SIZE as u8).flat_map(move |y| {
            (0..BOARD_SIZE as u8).map(move |x| self.cells[padded_index(Position { x, y })])
        })
    }

    /// Walks from `start` along `step`. Returns the index of the own disc that
    /// closes a run of at least one opponent disc.
    fn capture_anchor(&self, start: usize, step: isize, color: Color) -> Option<usize> {
        let own = CellState::from(color);
        let opp = CellState::from(color.opponent());

        let mut idx = offset(start, step);
        if self.cells[idx] != opp {
            return None;
        }
        while self.cells[idx] == opp {
            idx = offset(idx, step);
        }
        (self.cells[idx] == own).then_some(idx)
    }

    fn expect_cell(&self, pos: Position, expected: CellState, role: &str) -> GameResult<()> {
        match self.cell(pos) {
            Some(found) if found == expected => Ok(()),
            Some(found) => Err(GameError::InvariantViolation(format!(
                "{role} cell {pos} holds {found:?}, expected {expected:?}"
            ))),
            None => Err(GameError::OutOfBounds(pos)),
        }
    }

    fn set(&mut self, pos: Position, state: CellState) {
        debug_assert!(pos.is_on_board(), "border cells are never written");
        self.cells[padded_index(pos)] = state;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..BOARD_SIZE as u8 {
            for x in 0..BOARD_SIZE as u8 {
                let ch = match self.cells[padded_index(Position { x, y })] {
                    CellState::Empty => '.',
                    CellState::Black => 'B',
                    CellState::White => 'W',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board")?;
        fmt::Display::fmt(self, f)
    }
}

fn padded_index(pos: Position) -> usize {
    (pos.y as usize + 1) * PADDED_SIZE + pos.x as usize + 1
}

fn position_of(idx: usize) -> Position {
    Position {
        x: (idx % PADDED_SIZE - 1) as u8,
        y: (idx / PADDED_SIZE - 1) as u8,
    }
}

fn step_of((dx, dy): (i8, i8)) -> isize {
    dy as isize * PADDED_WIDTH + dx as isize
}

fn offset(idx: usize, step: isize) -> usize {
    idx.wrapping_add_signed(step)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: u8, y: u8) -> Position {
        Position { x, y }
    }

    #[test]
    fn initial_black_legal_moves_are_four_expected_squares() {
        let board = Board::new();

        assert_eq!(
            board.legal_moves(Color::Black),
            vec![pos(2, 3), pos(3, 2), pos(4, 5), pos(5, 4)]
        );
        assert_eq!(board.legal_moves(Color::White).len(), 4);
    }

    #[test]
    fn opening_move_flips_the_single_bracketed_disc() {
        let mut board = Board::new();

        let record = board.play(pos(2, 3), Color::Black).unwrap();

        assert_eq!(record.placed, pos(2, 3));
        assert_eq!(record.flipped, vec![pos(3, 3)]);
        assert_eq!(board.score(), Score { white: 1, black: 4 });
        assert_eq!(board.empty_count(), 59);

        let cells = board.to_array();
        assert_eq!(cells[3 * 8 + 2], 1);
        assert_eq!(cells[3 * 8 + 3], 1);
        assert_eq!(cells[4 * 8 + 4], 2);
    }

    #[test]
    fn flip_set_only_collects_closed_lines() {
        let board = Board::from_layout([
            "........", //
            "........", //
            "...B....", //
            "...W....", //
            "...W.WB.", //
            "...B....", //
            "........", //
            "........", //
        ])
        .unwrap();

        // Only the row line is closed by an own disc; the diagonal and the
        // left run end on empty cells.
        let record = board.flip_set(pos(4, 4), Color::Black).unwrap();
        assert_eq!(record.flipped, vec![pos(5, 4)]);

        assert_eq!(
            board.flip_set(pos(3, 6), Color::Black),
            Err(GameError::IllegalMove(pos(3, 6)))
        );
    }

    #[test]
    fn flip_set_walks_back_from_anchor_in_each_direction() {
        let board = Board::from_layout([
            "B.......", //
            ".W......", //
            "..W.....", //
            "....WB..", //
            "........", //
            "........", //
            "........", //
            "........", //
        ])
        .unwrap();

        let record = board.flip_set(pos(3, 3), Color::Black).unwrap();
        // (1,0) captures (4,3); (-1,-1) captures (1,1) then (2,2).
        assert_eq!(record.flipped, vec![pos(4, 3), pos(1, 1), pos(2, 2)]);
    }

    #[test]
    fn illegal_and_occupied_targets_are_rejected_without_changes() {
        let mut board = Board::new();
        let before = board;

        assert_eq!(
            board.play(pos(0, 0), Color::Black),
            Err(GameError::IllegalMove(pos(0, 0)))
        );
        assert!(matches!(
            board.play(pos(3, 3), Color::Black),
            Err(GameError::InvariantViolation(_))
        ));
        assert_eq!(
            board.play(pos(8, 1), Color::Black),
            Err(GameError::OutOfBounds(pos(8, 1)))
        );
        assert_eq!(board, before);
    }

    #[test]
    fn revert_restores_board_exactly() {
        let mut board = Board::new();
        let black = board.play(pos(2, 3), Color::Black).unwrap();
        let after_black = board;
        let white = board.play(pos(2, 2), Color::White).unwrap();

        board.revert(&white, Color::White).unwrap();
        assert_eq!(board, after_black);
        board.revert(&black, Color::Black).unwrap();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn revert_with_wrong_color_fails_loudly() {
        let mut board = Board::new();
        let record = board.play(pos(2, 3), Color::Black).unwrap();
        let after = board;

        assert!(matches!(
            board.revert(&record, Color::White),
            Err(GameError::InvariantViolation(_))
        ));
        assert_eq!(board, after);
    }

    #[test]
    fn apply_rejects_stale_record() {
        let mut board = Board::new();
        let record = board.flip_set(pos(2, 3), Color::Black).unwrap();
        board.apply(&record, Color::Black).unwrap();
        let after = board;

        assert!(matches!(
            board.apply(&record, Color::Black),
            Err(GameError::InvariantViolation(_))
        ));
        assert_eq!(board, after);
    }

    #[test]
    fn runs_ending_at_the_border_capture_nothing() {
        let board = Board::from_layout([
            "WWWW....", //
            "........", //
            "........", //
            "........", //
            "........", //
            "........", //
            "........", //
            ".......B", //
        ])
        .unwrap();

        assert!(!board.is_legal(pos(1, 1), Color::Black));
        assert!(board.legal_moves(Color::Black).is_empty());
        assert!(!board.has_legal_move(Color::White));
        assert_eq!(board.cell(pos(8, 0)), None);
        assert_eq!(board.cell(pos(0, 0)), Some(CellState::White));
    }

    #[test]
    fn layout_parse_errors_are_reported() {
        let short = Board::from_layout([
            "........", "........", "........", "...", "........", "........", "........",
            "........",
        ]);
        assert!(matches!(short, Err(GameError::InvalidLayout(_))));

        let bad = Board::from_layout([
            "........", "........", "........", "...?....", "........", "........", "........",
            "........",
        ]);
        assert!(matches!(bad, Err(GameError::InvalidLayout(_))));
    }

    #[test]
    fn display_prints_rows_top_down() {
        let text = Board::new().to_string();
        let rows: Vec<&str> = text.lines().collect();

        assert_eq!(rows.len(), 8);
        assert_eq!(rows[3], "...WB...");
        assert_eq!(rows[4], "...BW...");
    }
}
