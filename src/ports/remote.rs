//! Remote-store port: snapshot fetch plus the four mutation operations.

use crate::domain::{BoardId, Snapshot, TaskId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for remote-store operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// The five remote operations, used for error reporting and failure
/// injection in test adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteOperation {
    /// Authoritative snapshot read.
    FetchSnapshot,
    /// Board creation.
    CreateBoard,
    /// Task creation.
    CreateTask,
    /// Task move (reorder or cross-board).
    MoveTask,
    /// Task deletion.
    DeleteTask,
}

impl RemoteOperation {
    /// Returns the operation name in canonical wire format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FetchSnapshot => "fetchSnapshot",
            Self::CreateBoard => "createBoard",
            Self::CreateTask => "createTask",
            Self::MoveTask => "moveTask",
            Self::DeleteTask => "deleteTask",
        }
    }
}

impl fmt::Display for RemoteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Echo returned by a successful board creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedBoard {
    /// Server-assigned board identifier.
    pub id: BoardId,
    /// Title the board was created with.
    pub title: String,
}

/// Echo returned by a successful task creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedTask {
    /// Server-assigned task identifier.
    pub id: TaskId,
    /// Task description.
    pub description: String,
    /// Optional free-form label.
    pub badge: Option<String>,
    /// Slot the task was appended at.
    pub position: usize,
    /// Identifier of the owning board.
    pub board_id: BoardId,
}

/// Echo returned by a successful task move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovedTask {
    /// Task identifier.
    pub id: TaskId,
    /// Task description.
    pub description: String,
    /// Optional free-form label.
    pub badge: Option<String>,
    /// Slot the task now occupies in its destination board.
    pub position: usize,
}

/// Echo returned by a successful task deletion.
///
/// Deliberately partial: the remote echoes neither position nor owning
/// board for a deleted task, and no caller reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedTask {
    /// Task identifier.
    pub id: TaskId,
    /// Task description.
    pub description: String,
    /// Optional free-form label.
    pub badge: Option<String>,
}

/// Remote-store contract consumed by the sync coordinator.
///
/// Calls may be in flight concurrently; the coordinator tolerates
/// out-of-order completion by reconciling against the next authoritative
/// snapshot rather than by serializing requests.
#[async_trait]
pub trait BoardRemote: Send + Sync {
    /// Reads the authoritative snapshot of all boards and tasks.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] when the read fails; fetch failures are not
    /// retried automatically.
    async fn fetch_snapshot(&self) -> RemoteResult<Snapshot>;

    /// Creates a board with the given title.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] when the remote rejects the creation.
    async fn create_board(&self, title: &str) -> RemoteResult<CreatedBoard>;

    /// Creates a task appended to the given board.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::UnknownBoard`] when the board does not exist
    /// or another [`RemoteError`] when the remote rejects the creation.
    async fn create_task(
        &self,
        board_id: &BoardId,
        description: &str,
        badge: Option<&str>,
    ) -> RemoteResult<CreatedTask>;

    /// Moves a task to an absolute slot in the given board.
    ///
    /// The destination board is the task's final resting board regardless
    /// of whether the move was a same-board reorder.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::UnknownBoard`] or
    /// [`RemoteError::UnknownTask`] when either party is missing, or
    /// another [`RemoteError`] when the remote rejects the move.
    async fn move_task(
        &self,
        board_id: &BoardId,
        task_id: &TaskId,
        position: usize,
    ) -> RemoteResult<MovedTask>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::UnknownTask`] when the task does not exist
    /// or another [`RemoteError`] when the remote rejects the deletion.
    async fn delete_task(&self, task_id: &TaskId) -> RemoteResult<DeletedTask>;
}

/// Errors returned by remote-store implementations.
#[derive(Debug, Clone, Error)]
pub enum RemoteError {
    /// The referenced board does not exist remotely.
    #[error("unknown board: {0}")]
    UnknownBoard(BoardId),

    /// The referenced task does not exist remotely.
    #[error("unknown task: {0}")]
    UnknownTask(TaskId),

    /// The remote store rejected the operation.
    #[error("remote rejected {operation}: {reason}")]
    Rejected {
        /// Operation that was rejected.
        operation: RemoteOperation,
        /// Remote-supplied reason.
        reason: String,
    },

    /// Transport-layer failure.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl RemoteError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
