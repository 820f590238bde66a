use std::fmt;

use serde::Serialize;

pub const BOARD_SIZE: u8 = 8;

/// Contents of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CellState {
    Empty,
    White,
    Black,
}

impl CellState {
    /// Wire encoding used by snapshots: 0=empty, 1=black, 2=white.
    pub fn code(self) -> u8 {
        match self {
            CellState::Empty => 0,
            CellState::Black => 1,
            CellState::White => 2,
        }
    }
}

/// One of the two sides. Black always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
}

impl From<Color> for CellState {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => CellState::Black,
            Color::White => CellState::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => f.write_str("black"),
            Color::White => f.write_str("white"),
        }
    }
}

/// A board coordinate: `x` is the column, `y` the row, both `0..8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub x: u8,
    pub y: u8,
}

impl Position {
    /// Returns `None` for coordinates off the 8x8 board.
    pub fn new(x: u8, y: u8) -> Option<Self> {
        if x < BOARD_SIZE && y < BOARD_SIZE {
            Some(Self { x, y })
        } else {
            None
        }
    }

    pub fn is_on_board(self) -> bool {
        self.x < BOARD_SIZE && self.y < BOARD_SIZE
    }

    pub fn is_edge_x(self) -> bool {
        self.x == 0 || self.x == BOARD_SIZE - 1
    }

    pub fn is_edge_y(self) -> bool {
        self.y == 0 || self.y == BOARD_SIZE - 1
    }

    pub fn is_edge(self) -> bool {
        self.is_edge_x() || self.is_edge_y()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_on_board() {
            write!(f, "{}{}", (b'a' + self.x) as char, self.y + 1)
        } else {
            write!(f, "({}, {})", self.x, self.y)
        }
    }
}

/// Everything a single move changed.
///
/// `placed` is the newly occupied cell; `flipped` lists the captured discs in
/// direction-then-distance scan order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    pub placed: Position,
    pub flipped: Vec<Position>,
}

impl MoveRecord {
    /// The flat sequence `[placed, flipped...]`.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        std::iter::once(self.placed).chain(self.flipped.iter().copied())
    }

    pub fn cell_count(&self) -> usize {
        1 + self.flipped.len()
    }
}

/// Disc counts, derived from the board on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Score {
    pub white: u8,
    pub black: u8,
}

impl Score {
    pub fn total(self) -> u8 {
        self.white + self.black
    }

    /// `None` on a draw.
    pub fn winner(self) -> Option<Color> {
        match self.black.cmp(&self.white) {
            std::cmp::Ordering::Greater => Some(Color::Black),
            std::cmp::Ordering::Less => Some(Color::White),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Controller state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "color", rename_all = "camelCase")]
pub enum GameState {
    /// No game has been started yet.
    Idle,
    /// Waiting for `choose_move` from the human side.
    AwaitingMove(Color),
    /// The computer side is to move; only observable with paced computer moves.
    ComputerThinking(Color),
    GameOver,
}

/// Serialisable view of a running game for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// Row-major cells, 0=empty, 1=black, 2=white.
    pub board: Vec<u8>,
    pub state: GameState,
    pub side_to_move: Color,
    pub player_color: Color,
    pub legal_moves: Vec<Position>,
    pub score: Score,
    pub ply_count: usize,
}
