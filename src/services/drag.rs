//! Drag-end interpretation: drop-outside vs. no-op vs. reorder vs. move.

use super::state::{BoardState, MutationIntent};
use crate::domain::{BoardId, BoardStateError, TaskId};
use thiserror::Error;

/// Container/item coordinates reported by the gesture library.
///
/// Container indices are the small integers assigned to columns in
/// rendering order; they carry no identity of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropPosition {
    /// Column index in rendering order.
    pub container: usize,
    /// Item index within the column.
    pub index: usize,
}

impl DropPosition {
    /// Creates a drop position.
    #[must_use]
    pub const fn new(container: usize, index: usize) -> Self {
        Self { container, index }
    }
}

/// A completed drag gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropEvent {
    /// Where the drag started.
    pub source: DropPosition,
    /// Where the item was released; `None` when the drag ended outside any
    /// valid drop target.
    pub destination: Option<DropPosition>,
    /// Identifier of the dragged task.
    pub dragged_id: TaskId,
}

/// Result of interpreting a drop event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Released outside any drop target; no state change, no intent.
    Outside,
    /// Source and destination coincide; no state change, no intent.
    NoOp,
    /// A same-board reorder was applied locally.
    Reordered(MutationIntent),
    /// A cross-board move was applied locally.
    Moved(MutationIntent),
}

impl DropOutcome {
    /// Returns the move intent to dispatch, when the drop changed local
    /// state.
    #[must_use]
    pub const fn intent(&self) -> Option<&MutationIntent> {
        match self {
            Self::Outside | Self::NoOp => None,
            Self::Reordered(intent) | Self::Moved(intent) => Some(intent),
        }
    }
}

/// Errors returned while interpreting a drop event.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DragError {
    /// A container index did not resolve to a board in the captured order.
    #[error("no board at container index {0}")]
    UnknownContainer(usize),

    /// The local mutation was rejected.
    #[error(transparent)]
    State(#[from] BoardStateError),
}

/// Applies a completed drag gesture to local state.
///
/// `order` must be the index-to-identity projection captured when the
/// event's container indices were assigned, i.e. at render time; resolving
/// against a newer ordering risks desynchronizing indices from identities
/// mid-drag. Both mutating outcomes carry a move-task intent addressed to
/// the task's final resting board and slot.
///
/// # Errors
///
/// Returns [`DragError::UnknownContainer`] when a container index is not
/// covered by `order`, or [`DragError::State`] when an item index does not
/// resolve against the addressed board.
pub fn handle_drop(
    state: &mut BoardState,
    order: &[BoardId],
    event: &DropEvent,
) -> Result<DropOutcome, DragError> {
    let Some(destination) = event.destination else {
        return Ok(DropOutcome::Outside);
    };

    let source_board = order
        .get(event.source.container)
        .ok_or(DragError::UnknownContainer(event.source.container))?;
    let destination_board = order
        .get(destination.container)
        .ok_or(DragError::UnknownContainer(destination.container))?;

    if source_board == destination_board && event.source.index == destination.index {
        return Ok(DropOutcome::NoOp);
    }

    let intent = MutationIntent::MoveTask {
        board_id: destination_board.clone(),
        task_id: event.dragged_id.clone(),
        position: destination.index,
    };

    if source_board == destination_board {
        state.reorder_task(source_board, event.source.index, destination.index)?;
        Ok(DropOutcome::Reordered(intent))
    } else {
        state.transfer_task(
            source_board,
            destination_board,
            event.source.index,
            destination.index,
        )?;
        Ok(DropOutcome::Moved(intent))
    }
}
