//! Task entity owned by exactly one board.

use super::{BoardId, EntityOrigin, TaskId};
use serde::{Deserialize, Serialize};

/// A single task card.
///
/// `position` is the dense ordering key supplied by the remote store. It is
/// consulted only when a snapshot is normalized and when a move intent needs
/// an absolute slot; after normalization the effective order of a task is
/// its index within its board's task sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Task identifier; a placeholder until the server confirms creation.
    pub id: TaskId,
    /// Identifier of the owning board.
    pub board_id: BoardId,
    /// Task description shown on the card.
    pub description: String,
    /// Optional free-form label.
    pub badge: Option<String>,
    /// Ordering key within the owning board at snapshot time.
    pub position: usize,
    /// Confirmation state; not part of the wire representation.
    #[serde(skip)]
    pub origin: EntityOrigin,
}

impl Task {
    /// Creates a pending task appended locally before remote confirmation.
    #[must_use]
    pub fn pending(
        board_id: BoardId,
        description: impl Into<String>,
        badge: Option<String>,
        position: usize,
    ) -> Self {
        Self {
            id: TaskId::placeholder(),
            board_id,
            description: description.into(),
            badge,
            position,
            origin: EntityOrigin::PendingCreation,
        }
    }
}
