//! Error types for local board-state mutation.

use super::{BoardId, OrderingError};
use thiserror::Error;

/// Errors returned by [`BoardState`](crate::services::BoardState)
/// operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardStateError {
    /// A column index did not resolve to any board in the current ordering.
    #[error("no board at column index {0}")]
    UnknownBoardIndex(usize),

    /// A board identifier is not present in local state.
    #[error("unknown board: {0}")]
    UnknownBoard(BoardId),

    /// A task index did not address an element of its board's task list.
    #[error("task index {index} out of range for board {board_id} holding {len} tasks")]
    TaskIndexOutOfRange {
        /// Board whose task list was addressed.
        board_id: BoardId,
        /// The offending index.
        index: usize,
        /// Task count of the board at the time of the operation.
        len: usize,
    },

    /// An ordered-collection operation rejected its indices.
    #[error(transparent)]
    Ordering(#[from] OrderingError),
}
