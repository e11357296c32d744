//! In-memory remote store standing in for the board server.

use async_trait::async_trait;
use mockable::Clock;
use std::collections::HashSet;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::domain::{BoardId, BoardRecord, Snapshot, SnapshotToken, TaskId, TaskRecord};
use crate::ports::{
    BoardRemote, CreatedBoard, CreatedTask, DeletedTask, MovedTask, RemoteError, RemoteOperation,
    RemoteResult,
};

#[derive(Debug, Clone)]
struct StoredTask {
    id: TaskId,
    description: String,
    badge: Option<String>,
}

#[derive(Debug, Clone)]
struct StoredBoard {
    id: BoardId,
    title: String,
    // List order is the source of truth; positions are derived from it
    // when a snapshot is read.
    tasks: Vec<StoredTask>,
}

#[derive(Debug, Default)]
struct RemoteState {
    boards: Vec<StoredBoard>,
    fetches: u64,
    failures: HashSet<RemoteOperation>,
}

/// Thread-safe in-memory board remote.
///
/// Behaves like the real store: task creation appends at the end of a
/// board, moves re-home the task and renumber positions densely, deletion
/// echoes only identity, description, and badge, and every snapshot read
/// carries a fresh freshness token. One-shot failure injection per
/// operation lets tests exercise mutation rejection and fetch failure.
#[derive(Debug, Clone)]
pub struct InMemoryBoardRemote<C> {
    state: Arc<RwLock<RemoteState>>,
    clock: Arc<C>,
}

impl<C> InMemoryBoardRemote<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty in-memory remote.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(RemoteState::default())),
            clock,
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, RemoteState>, RemoteError> {
        self.state
            .read()
            .map_err(|err| RemoteError::transport(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, RemoteState>, RemoteError> {
        self.state
            .write()
            .map_err(|err| RemoteError::transport(std::io::Error::other(err.to_string())))
    }

    /// Inserts or replaces a board with its tasks, honouring `position`
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Transport`] when the store lock is poisoned.
    pub fn seed_board(&self, record: &BoardRecord) -> RemoteResult<()> {
        let mut state = self.write()?;
        let mut ordered: Vec<TaskRecord> = record.tasks.clone();
        ordered.sort_by_key(|task| task.position);
        let stored = StoredBoard {
            id: record.id.clone(),
            title: record.title.clone(),
            tasks: ordered
                .into_iter()
                .map(|task| StoredTask {
                    id: task.id,
                    description: task.description,
                    badge: task.badge,
                })
                .collect(),
        };
        let existing = state.boards.iter_mut().find(|board| board.id == record.id);
        match existing {
            Some(slot) => *slot = stored,
            None => state.boards.push(stored),
        }
        Ok(())
    }

    /// Makes the next call of the given operation fail with a rejection.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Transport`] when the store lock is poisoned.
    pub fn inject_failure(&self, operation: RemoteOperation) -> RemoteResult<()> {
        let mut state = self.write()?;
        state.failures.insert(operation);
        Ok(())
    }

    /// Returns a board's task identifiers in stored order.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::UnknownBoard`] when the board does not exist
    /// or [`RemoteError::Transport`] when the store lock is poisoned.
    pub fn task_order(&self, board_id: &BoardId) -> RemoteResult<Vec<TaskId>> {
        let state = self.read()?;
        state
            .boards
            .iter()
            .find(|board| board.id == *board_id)
            .map(|board| board.tasks.iter().map(|task| task.id.clone()).collect())
            .ok_or_else(|| RemoteError::UnknownBoard(board_id.clone()))
    }

    fn take_failure(state: &mut RemoteState, operation: RemoteOperation) -> RemoteResult<()> {
        if state.failures.remove(&operation) {
            return Err(RemoteError::Rejected {
                operation,
                reason: "injected failure".to_owned(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl<C> BoardRemote for InMemoryBoardRemote<C>
where
    C: Clock + Send + Sync,
{
    async fn fetch_snapshot(&self) -> RemoteResult<Snapshot> {
        let mut state = self.write()?;
        Self::take_failure(&mut state, RemoteOperation::FetchSnapshot)?;
        state.fetches += 1;
        let timestamp = SnapshotToken::new(format!(
            "{}:{}",
            state.fetches,
            self.clock.utc().to_rfc3339()
        ));
        let boards = state
            .boards
            .iter()
            .map(|board| BoardRecord {
                id: board.id.clone(),
                title: board.title.clone(),
                tasks: board
                    .tasks
                    .iter()
                    .enumerate()
                    .map(|(position, task)| TaskRecord {
                        id: task.id.clone(),
                        description: task.description.clone(),
                        badge: task.badge.clone(),
                        position,
                    })
                    .collect(),
            })
            .collect();
        Ok(Snapshot { timestamp, boards })
    }

    async fn create_board(&self, title: &str) -> RemoteResult<CreatedBoard> {
        let mut state = self.write()?;
        Self::take_failure(&mut state, RemoteOperation::CreateBoard)?;
        let id = BoardId::new(Uuid::new_v4().to_string());
        state.boards.push(StoredBoard {
            id: id.clone(),
            title: title.to_owned(),
            tasks: Vec::new(),
        });
        Ok(CreatedBoard {
            id,
            title: title.to_owned(),
        })
    }

    async fn create_task(
        &self,
        board_id: &BoardId,
        description: &str,
        badge: Option<&str>,
    ) -> RemoteResult<CreatedTask> {
        let mut state = self.write()?;
        Self::take_failure(&mut state, RemoteOperation::CreateTask)?;
        let board = state
            .boards
            .iter_mut()
            .find(|board| board.id == *board_id)
            .ok_or_else(|| RemoteError::UnknownBoard(board_id.clone()))?;
        let id = TaskId::new(Uuid::new_v4().to_string());
        let position = board.tasks.len();
        board.tasks.push(StoredTask {
            id: id.clone(),
            description: description.to_owned(),
            badge: badge.map(str::to_owned),
        });
        Ok(CreatedTask {
            id,
            description: description.to_owned(),
            badge: badge.map(str::to_owned),
            position,
            board_id: board_id.clone(),
        })
    }

    async fn move_task(
        &self,
        board_id: &BoardId,
        task_id: &TaskId,
        position: usize,
    ) -> RemoteResult<MovedTask> {
        let mut state = self.write()?;
        Self::take_failure(&mut state, RemoteOperation::MoveTask)?;
        if !state.boards.iter().any(|board| board.id == *board_id) {
            return Err(RemoteError::UnknownBoard(board_id.clone()));
        }
        let mut removed = None;
        for board in &mut state.boards {
            if let Some(index) = board.tasks.iter().position(|task| task.id == *task_id) {
                removed = Some(board.tasks.remove(index));
                break;
            }
        }
        let task = removed.ok_or_else(|| RemoteError::UnknownTask(task_id.clone()))?;
        let destination = state
            .boards
            .iter_mut()
            .find(|board| board.id == *board_id)
            .ok_or_else(|| RemoteError::UnknownBoard(board_id.clone()))?;
        let slot = position.min(destination.tasks.len());
        let echo = MovedTask {
            id: task.id.clone(),
            description: task.description.clone(),
            badge: task.badge.clone(),
            position: slot,
        };
        destination.tasks.insert(slot, task);
        Ok(echo)
    }

    async fn delete_task(&self, task_id: &TaskId) -> RemoteResult<DeletedTask> {
        let mut state = self.write()?;
        Self::take_failure(&mut state, RemoteOperation::DeleteTask)?;
        for board in &mut state.boards {
            if let Some(index) = board.tasks.iter().position(|task| task.id == *task_id) {
                let task = board.tasks.remove(index);
                return Ok(DeletedTask {
                    id: task.id,
                    description: task.description,
                    badge: task.badge,
                });
            }
        }
        Err(RemoteError::UnknownTask(task_id.clone()))
    }
}
