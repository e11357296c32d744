//! Snapshot normalization into locally indexable structures.

use super::{Board, BoardId, BoardRecord, EntityOrigin, Task};
use indexmap::IndexMap;

/// Normalized view of a snapshot: boards keyed by identity plus each
/// board's tasks in effective order.
///
/// Both maps preserve insertion order, which follows the snapshot's board
/// sequence and serves as the stable column ordering for rendering and for
/// mapping drag container indices back to board identities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedBoards {
    /// Boards keyed by identifier, stripped of their nested tasks.
    pub boards_by_id: IndexMap<BoardId, Board>,
    /// Each board's tasks sorted ascending by `position` (stable for ties).
    pub tasks_by_board: IndexMap<BoardId, Vec<Task>>,
}

/// Converts snapshot boards into keyed, order-preserving structures.
///
/// Every board and task present in the input appears in the output; tasks
/// are sorted ascending by `position` with ties preserving source order.
/// Normalizing the same input twice yields structurally equal output.
#[must_use]
pub fn normalize(boards: &[BoardRecord]) -> NormalizedBoards {
    let mut boards_by_id = IndexMap::with_capacity(boards.len());
    let mut tasks_by_board = IndexMap::with_capacity(boards.len());

    for record in boards {
        let mut tasks: Vec<Task> = record
            .tasks
            .iter()
            .map(|task| Task {
                id: task.id.clone(),
                board_id: record.id.clone(),
                description: task.description.clone(),
                badge: task.badge.clone(),
                position: task.position,
                origin: EntityOrigin::Confirmed,
            })
            .collect();
        tasks.sort_by_key(|task| task.position);

        boards_by_id.insert(
            record.id.clone(),
            Board::new(record.id.clone(), record.title.clone()),
        );
        tasks_by_board.insert(record.id.clone(), tasks);
    }

    NormalizedBoards {
        boards_by_id,
        tasks_by_board,
    }
}
