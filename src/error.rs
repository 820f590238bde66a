use crate::types::Position;

/// Errors returned by engine operations.
///
/// Passes and game over are ordinary state transitions and never show up here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The position is not in the current legal-move set.
    #[error("illegal move at {0}")]
    IllegalMove(Position),

    #[error("position {0} is off the board")]
    OutOfBounds(Position),

    /// Undo requested with nothing (undoable) in the history.
    #[error("no move to undo")]
    EmptyHistory,

    #[error("computer move requested while no computer is to move")]
    NotComputerTurn,

    #[error("invalid board layout: {0}")]
    InvalidLayout(String),

    /// Engine or caller bug; the board was left untouched.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

pub type GameResult<T> = Result<T, GameError>;
