//! Local optimistic board state and the mutation intents it emits.

use crate::domain::{
    Board, BoardId, BoardStateError, Snapshot, Task, TaskId, normalize, reorder, transfer,
};
use indexmap::IndexMap;

/// The four remote mutation kinds, used for in-flight and error tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    /// Board creation.
    CreateBoard,
    /// Task creation.
    CreateTask,
    /// Task move (reorder or cross-board).
    MoveTask,
    /// Task deletion.
    DeleteTask,
}

impl MutationKind {
    /// Returns the mutation name in canonical wire format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateBoard => "createBoard",
            Self::CreateTask => "createTask",
            Self::MoveTask => "moveTask",
            Self::DeleteTask => "deleteTask",
        }
    }
}

/// A remote mutation requested by an optimistic local edit.
///
/// [`BoardState`] applies the local edit synchronously and returns the
/// intent; the sync coordinator dispatches it to the remote port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationIntent {
    /// Create a board with the given title.
    CreateBoard {
        /// Title of the new board.
        title: String,
    },
    /// Create a task appended to a board.
    CreateTask {
        /// Owning board.
        board_id: BoardId,
        /// Task description.
        description: String,
        /// Optional free-form label.
        badge: Option<String>,
    },
    /// Move a task to an absolute slot in its final resting board.
    MoveTask {
        /// Destination board.
        board_id: BoardId,
        /// The dragged task.
        task_id: TaskId,
        /// Destination slot.
        position: usize,
    },
    /// Delete a task.
    DeleteTask {
        /// The task to delete.
        task_id: TaskId,
    },
}

impl MutationIntent {
    /// Returns which of the four mutation kinds this intent is.
    #[must_use]
    pub const fn kind(&self) -> MutationKind {
        match self {
            Self::CreateBoard { .. } => MutationKind::CreateBoard,
            Self::CreateTask { .. } => MutationKind::CreateTask,
            Self::MoveTask { .. } => MutationKind::MoveTask,
            Self::DeleteTask { .. } => MutationKind::DeleteTask,
        }
    }
}

/// Local source of truth for rendering: boards keyed by identity plus each
/// board's tasks in effective order.
///
/// All mutation goes through the operations below; each applies its local
/// edit synchronously and unconditionally, then returns the intent for the
/// matching remote mutation. Nothing here rolls back: a diverged optimistic
/// edit is corrected only by rebuilding from the next authoritative
/// snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardState {
    boards: IndexMap<BoardId, Board>,
    tasks: IndexMap<BoardId, Vec<Task>>,
}

impl BoardState {
    /// Builds local state from an authoritative snapshot, replacing
    /// everything held before.
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let normalized = normalize(&snapshot.boards);
        Self {
            boards: normalized.boards_by_id,
            tasks: normalized.tasks_by_board,
        }
    }

    /// Iterates boards in stable column order.
    pub fn boards(&self) -> impl Iterator<Item = &Board> {
        self.boards.values()
    }

    /// Looks up a board by identifier.
    #[must_use]
    pub fn board(&self, board_id: &BoardId) -> Option<&Board> {
        self.boards.get(board_id)
    }

    /// Returns a board's tasks in effective order.
    #[must_use]
    pub fn tasks(&self, board_id: &BoardId) -> Option<&[Task]> {
        self.tasks.get(board_id).map(Vec::as_slice)
    }

    /// Number of boards currently held.
    #[must_use]
    pub fn board_count(&self) -> usize {
        self.boards.len()
    }

    /// Returns the index-to-identity projection for the current column
    /// ordering.
    ///
    /// Recompute this on every render; insertion order changes when boards
    /// are added, so a projection captured before a rebuild must never be
    /// reused afterwards.
    #[must_use]
    pub fn board_order(&self) -> Vec<BoardId> {
        self.boards.keys().cloned().collect()
    }

    /// Appends a pending task to a board and returns the matching
    /// create-task intent.
    ///
    /// The task's `position` is the board's current task count.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStateError::UnknownBoard`] when the board is not
    /// present locally.
    pub fn add_task(
        &mut self,
        board_id: &BoardId,
        description: &str,
        badge: Option<String>,
    ) -> Result<MutationIntent, BoardStateError> {
        let list = self
            .tasks
            .get_mut(board_id)
            .ok_or_else(|| BoardStateError::UnknownBoard(board_id.clone()))?;
        let position = list.len();
        list.push(Task::pending(
            board_id.clone(),
            description,
            badge.clone(),
            position,
        ));
        Ok(MutationIntent::CreateTask {
            board_id: board_id.clone(),
            description: description.to_owned(),
            badge,
        })
    }

    /// Removes the task at `task_index` within the board at `board_index`
    /// (resolved through the stable column ordering) and returns the
    /// matching delete-task intent.
    ///
    /// The caller supplies indices consistent with the currently rendered
    /// state; `task_id` identifies the task for the remote, which does not
    /// address by position.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStateError::UnknownBoardIndex`] or
    /// [`BoardStateError::TaskIndexOutOfRange`] when an index does not
    /// resolve against current state.
    pub fn remove_task(
        &mut self,
        board_index: usize,
        task_index: usize,
        task_id: &TaskId,
    ) -> Result<MutationIntent, BoardStateError> {
        let board_id = self
            .boards
            .get_index(board_index)
            .map(|(id, _)| id.clone())
            .ok_or(BoardStateError::UnknownBoardIndex(board_index))?;
        let list = self
            .tasks
            .get_mut(&board_id)
            .ok_or_else(|| BoardStateError::UnknownBoard(board_id.clone()))?;
        let len = list.len();
        if task_index >= len {
            return Err(BoardStateError::TaskIndexOutOfRange {
                board_id,
                index: task_index,
                len,
            });
        }
        list.remove(task_index);
        Ok(MutationIntent::DeleteTask {
            task_id: task_id.clone(),
        })
    }

    /// Inserts a pending board named `board-<N>` (N = current board count)
    /// with an empty task list and returns the matching create-board
    /// intent.
    ///
    /// Boards are never deleted, so the synthesized identity cannot collide
    /// with an earlier one.
    pub fn add_board(&mut self) -> MutationIntent {
        let title = format!("board-{}", self.boards.len());
        let id = BoardId::new(title.clone());
        self.tasks.insert(id.clone(), Vec::new());
        self.boards
            .insert(id.clone(), Board::pending(id, title.clone()));
        MutationIntent::CreateBoard { title }
    }

    /// Reorders a task within one board's task list.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStateError::UnknownBoard`] when the board is missing
    /// or [`BoardStateError::Ordering`] when an index is out of range.
    pub fn reorder_task(
        &mut self,
        board_id: &BoardId,
        from: usize,
        to: usize,
    ) -> Result<(), BoardStateError> {
        let list = self
            .tasks
            .get_mut(board_id)
            .ok_or_else(|| BoardStateError::UnknownBoard(board_id.clone()))?;
        reorder(list, from, to)?;
        Ok(())
    }

    /// Transfers a task between two boards, re-homing its `board_id` to the
    /// destination.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStateError::UnknownBoard`] when either board is
    /// missing or [`BoardStateError::Ordering`] when an index is out of
    /// range; a rejected transfer leaves both lists unchanged.
    pub fn transfer_task(
        &mut self,
        source: &BoardId,
        destination: &BoardId,
        from: usize,
        to: usize,
    ) -> Result<(), BoardStateError> {
        if source == destination {
            return self.reorder_task(source, from, to);
        }
        let mut source_list = self
            .tasks
            .get_mut(source)
            .map(std::mem::take)
            .ok_or_else(|| BoardStateError::UnknownBoard(source.clone()))?;
        let outcome = self.tasks.get_mut(destination).map_or_else(
            || Err(BoardStateError::UnknownBoard(destination.clone())),
            |destination_list| {
                transfer(&mut source_list, destination_list, from, to)?;
                if let Some(task) = destination_list.get_mut(to) {
                    task.board_id = destination.clone();
                }
                Ok(())
            },
        );
        if let Some(slot) = self.tasks.get_mut(source) {
            *slot = source_list;
        }
        outcome
    }
}
