//! Wire-shaped snapshot types as returned by the remote store.

use super::{BoardId, SnapshotToken, TaskId};
use serde::{Deserialize, Serialize};

/// Task as it appears nested inside a snapshot board.
///
/// The snapshot does not repeat the owning board's identifier on each task;
/// normalization derives it from the enclosing [`BoardRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Server-assigned task identifier.
    pub id: TaskId,
    /// Task description.
    pub description: String,
    /// Optional free-form label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    /// Ordering key within the owning board.
    pub position: usize,
}

/// Board as it appears in a snapshot, with nested unsorted tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardRecord {
    /// Server-assigned board identifier.
    pub id: BoardId,
    /// Column title.
    pub title: String,
    /// Tasks owned by the board, in no particular order.
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
}

/// An authoritative read of all boards and tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Freshness token; differs between any two authoritative reads.
    pub timestamp: SnapshotToken,
    /// All boards in stable column order.
    pub boards: Vec<BoardRecord>,
}
