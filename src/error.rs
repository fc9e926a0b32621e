use thiserror::Error;

use crate::moves::{Location, Move};

/// Reasons a selection or move is refused by `GameState`.
///
/// Selecting an empty or enemy square is ordinary play variation; callers
/// driving a UI usually treat those variants as a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("location {0} is off the board")]
    OutOfBounds(Location),

    #[error("no piece at {0}")]
    EmptySquare(Location),

    #[error("piece at {0} belongs to the other player")]
    NotYourPiece(Location),

    #[error("move {0} is not among the offered moves")]
    NotOffered(Move),

    #[error("a capture is available and must be taken")]
    CaptureRequired,

    #[error("a capture chain is in progress")]
    ChainInProgress,

    #[error("a move was already made this turn")]
    AlreadyMoved,
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("row {row}: expected {expected} cells, found {found}")]
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {row}, col {col}: unknown cell {label:?}")]
    UnknownCell {
        row: usize,
        col: usize,
        label: String,
    },

    #[error("invalid layout JSON: {0}")]
    Json(#[from] serde_json::Error),
}
