//! Behavioural integration tests for [`SyncCoordinator`] over the
//! in-memory remote.
//!
//! These tests exercise the full reconciliation loop: optimistic local
//! edits, remote mutations, mutation-triggered refetches, and recovery
//! when the remote rejects a mutation.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use std::sync::Arc;

use corkboard::adapters::memory::InMemoryBoardRemote;
use corkboard::domain::{BoardId, BoardRecord, EntityOrigin, TaskId, TaskRecord};
use corkboard::ports::RemoteOperation;
use corkboard::services::{
    BoardState, DropEvent, DropOutcome, DropPosition, MutationKind, SyncCoordinator, SyncError,
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestRemote = InMemoryBoardRemote<DefaultClock>;

fn record(id: &str, title: &str, tasks: &[(&str, &str)]) -> BoardRecord {
    BoardRecord {
        id: BoardId::new(id),
        title: title.to_owned(),
        tasks: tasks
            .iter()
            .enumerate()
            .map(|(position, (task_id, description))| TaskRecord {
                id: TaskId::new(*task_id),
                description: (*description).to_owned(),
                badge: None,
                position,
            })
            .collect(),
    }
}

/// Remote seeded with b1 = [t1, t2] and b2 = [t3].
#[fixture]
fn remote() -> Arc<TestRemote> {
    let remote = Arc::new(InMemoryBoardRemote::new(Arc::new(DefaultClock)));
    remote
        .seed_board(&record("b1", "Todo", &[("t1", "A"), ("t2", "B")]))
        .expect("seeding succeeds");
    remote
        .seed_board(&record("b2", "Doing", &[("t3", "C")]))
        .expect("seeding succeeds");
    remote
}

async fn loaded(remote: &Arc<TestRemote>) -> SyncCoordinator<TestRemote> {
    let coordinator = SyncCoordinator::new(Arc::clone(remote));
    coordinator.refetch().await.expect("initial fetch succeeds");
    coordinator
}

fn local_task_ids(state: &BoardState, board_id: &str) -> Vec<String> {
    state
        .tasks(&BoardId::new(board_id))
        .map(|tasks| tasks.iter().map(|task| task.id.to_string()).collect())
        .unwrap_or_default()
}

fn current_state(coordinator: &SyncCoordinator<TestRemote>) -> BoardState {
    coordinator
        .board_state()
        .expect("state lock is healthy")
        .expect("snapshot is loaded")
}

fn remote_task_ids(remote: &Arc<TestRemote>, board_id: &str) -> Vec<String> {
    remote
        .task_order(&BoardId::new(board_id))
        .expect("board exists remotely")
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn initial_fetch_builds_ordered_local_state(remote: Arc<TestRemote>) {
    let coordinator = loaded(&remote).await;

    let state = current_state(&coordinator);
    assert_eq!(local_task_ids(&state, "b1"), vec!["t1", "t2"]);
    assert_eq!(local_task_ids(&state, "b2"), vec!["t3"]);
    let order: Vec<String> = state
        .board_order()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(order, vec!["b1", "b2"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mutations_before_first_snapshot_are_rejected(remote: Arc<TestRemote>) {
    let coordinator = SyncCoordinator::new(Arc::clone(&remote));
    let result = coordinator.add_board().await;
    assert!(matches!(result, Err(SyncError::NotLoaded)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_is_confirmed_by_the_follow_up_refetch(remote: Arc<TestRemote>) {
    let coordinator = loaded(&remote).await;

    coordinator
        .add_task(&BoardId::new("b1"), "New task", None)
        .await
        .expect("creation settles");

    let state = current_state(&coordinator);
    let tasks = state.tasks(&BoardId::new("b1")).expect("b1 is present");
    assert_eq!(tasks.len(), 3);
    let confirmed = tasks.last().expect("appended task");
    // The placeholder was superseded by the server-assigned identity.
    assert_ne!(confirmed.id, TaskId::placeholder());
    assert_eq!(confirmed.origin, EntityOrigin::Confirmed);
    assert_eq!(confirmed.description, "New task");
    assert!(
        !coordinator
            .any_mutation_loading()
            .expect("state lock is healthy")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn same_board_drop_is_applied_locally_and_remotely(remote: Arc<TestRemote>) {
    let coordinator = loaded(&remote).await;
    let event = DropEvent {
        source: DropPosition::new(0, 0),
        destination: Some(DropPosition::new(0, 1)),
        dragged_id: TaskId::new("t1"),
    };

    let outcome = coordinator.handle_drop(&event).await.expect("drop settles");

    assert!(matches!(outcome, DropOutcome::Reordered(_)));
    assert_eq!(remote_task_ids(&remote, "b1"), vec!["t2", "t1"]);
    let state = current_state(&coordinator);
    assert_eq!(local_task_ids(&state, "b1"), vec!["t2", "t1"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cross_board_drop_transfers_ownership_remotely(remote: Arc<TestRemote>) {
    let coordinator = loaded(&remote).await;
    let event = DropEvent {
        source: DropPosition::new(0, 0),
        destination: Some(DropPosition::new(1, 0)),
        dragged_id: TaskId::new("t1"),
    };

    let outcome = coordinator.handle_drop(&event).await.expect("drop settles");

    assert!(matches!(outcome, DropOutcome::Moved(_)));
    assert_eq!(remote_task_ids(&remote, "b1"), vec!["t2"]);
    assert_eq!(remote_task_ids(&remote, "b2"), vec!["t1", "t3"]);
    let state = current_state(&coordinator);
    assert_eq!(local_task_ids(&state, "b2"), vec!["t1", "t3"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn no_op_drop_issues_no_remote_call(remote: Arc<TestRemote>) {
    let coordinator = loaded(&remote).await;
    let token_before = coordinator
        .snapshot_token()
        .expect("state lock is healthy");
    let event = DropEvent {
        source: DropPosition::new(0, 0),
        destination: Some(DropPosition::new(0, 0)),
        dragged_id: TaskId::new("t1"),
    };

    let outcome = coordinator.handle_drop(&event).await.expect("no-op settles");

    assert_eq!(outcome, DropOutcome::NoOp);
    // No mutation means no mutation-triggered refetch either.
    assert_eq!(
        coordinator.snapshot_token().expect("state lock is healthy"),
        token_before
    );
    assert_eq!(remote_task_ids(&remote, "b1"), vec!["t1", "t2"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn drop_without_destination_issues_no_remote_call(remote: Arc<TestRemote>) {
    let coordinator = loaded(&remote).await;
    let token_before = coordinator
        .snapshot_token()
        .expect("state lock is healthy");
    let event = DropEvent {
        source: DropPosition::new(0, 0),
        destination: None,
        dragged_id: TaskId::new("t1"),
    };

    let outcome = coordinator
        .handle_drop(&event)
        .await
        .expect("outside drop settles");

    assert_eq!(outcome, DropOutcome::Outside);
    assert_eq!(
        coordinator.snapshot_token().expect("state lock is healthy"),
        token_before
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removed_task_disappears_locally_and_remotely(remote: Arc<TestRemote>) {
    let coordinator = loaded(&remote).await;

    coordinator
        .remove_task(0, 1, &TaskId::new("t2"))
        .await
        .expect("deletion settles");

    assert_eq!(remote_task_ids(&remote, "b1"), vec!["t1"]);
    let state = current_state(&coordinator);
    assert_eq!(local_task_ids(&state, "b1"), vec!["t1"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn added_board_is_created_remotely_with_synthesized_title(remote: Arc<TestRemote>) {
    let coordinator = loaded(&remote).await;

    coordinator.add_board().await.expect("creation settles");

    let state = current_state(&coordinator);
    assert_eq!(state.board_count(), 3);
    let titles: Vec<String> = state.boards().map(|board| board.title.clone()).collect();
    assert_eq!(titles, vec!["Todo", "Doing", "board-2"]);
    // The refetched board carries a server-assigned identity, not the
    // synthesized local one.
    let added = state
        .boards()
        .find(|board| board.title == "board-2")
        .expect("created board present");
    assert_ne!(added.id, BoardId::new("board-2"));
    assert_eq!(added.origin, EntityOrigin::Confirmed);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_move_is_rolled_back_by_the_automatic_refetch(remote: Arc<TestRemote>) {
    let coordinator = loaded(&remote).await;
    remote
        .inject_failure(RemoteOperation::MoveTask)
        .expect("injection succeeds");
    let event = DropEvent {
        source: DropPosition::new(0, 0),
        destination: Some(DropPosition::new(0, 1)),
        dragged_id: TaskId::new("t1"),
    };

    let result = coordinator.handle_drop(&event).await;

    assert!(matches!(result, Err(SyncError::Remote(_))));
    // The optimistic reorder diverged from the remote, and the automatic
    // refetch restored server truth.
    assert_eq!(remote_task_ids(&remote, "b1"), vec!["t1", "t2"]);
    let state = current_state(&coordinator);
    assert_eq!(local_task_ids(&state, "b1"), vec!["t1", "t2"]);
    assert!(
        coordinator
            .any_mutation_error()
            .expect("state lock is healthy")
    );
    assert!(
        coordinator
            .mutation_error(MutationKind::MoveTask)
            .expect("state lock is healthy")
            .is_some()
    );
    assert!(
        coordinator
            .error_banner_visible()
            .expect("state lock is healthy")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn error_banner_is_sticky_until_dismissed_and_returns_on_new_failure(
    remote: Arc<TestRemote>,
) {
    let coordinator = loaded(&remote).await;
    remote
        .inject_failure(RemoteOperation::DeleteTask)
        .expect("injection succeeds");
    let failed = coordinator.remove_task(1, 0, &TaskId::new("t3")).await;
    assert!(failed.is_err());
    assert!(
        coordinator
            .error_banner_visible()
            .expect("state lock is healthy")
    );

    coordinator
        .dismiss_error_banner()
        .expect("state lock is healthy");
    assert!(
        !coordinator
            .error_banner_visible()
            .expect("state lock is healthy")
    );
    // The live error record is independent of the banner.
    assert!(
        coordinator
            .any_mutation_error()
            .expect("state lock is healthy")
    );

    remote
        .inject_failure(RemoteOperation::CreateBoard)
        .expect("injection succeeds");
    let failed_again = coordinator.add_board().await;
    assert!(failed_again.is_err());
    assert!(
        coordinator
            .error_banner_visible()
            .expect("state lock is healthy")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn successful_mutation_clears_its_previous_error_record(remote: Arc<TestRemote>) {
    let coordinator = loaded(&remote).await;
    remote
        .inject_failure(RemoteOperation::CreateTask)
        .expect("injection succeeds");
    let failed = coordinator
        .add_task(&BoardId::new("b1"), "doomed", None)
        .await;
    assert!(failed.is_err());

    coordinator
        .add_task(&BoardId::new("b1"), "retried", None)
        .await
        .expect("second attempt settles");

    assert!(
        coordinator
            .mutation_error(MutationKind::CreateTask)
            .expect("state lock is healthy")
            .is_none()
    );
    assert!(
        !coordinator
            .any_mutation_error()
            .expect("state lock is healthy")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn fetch_failure_is_fatal_until_manually_retried(remote: Arc<TestRemote>) {
    let coordinator = SyncCoordinator::new(Arc::clone(&remote));
    remote
        .inject_failure(RemoteOperation::FetchSnapshot)
        .expect("injection succeeds");

    let result = coordinator.refetch().await;

    assert!(matches!(result, Err(SyncError::Remote(_))));
    assert!(
        coordinator
            .fetch_error()
            .expect("state lock is healthy")
            .is_some()
    );
    assert!(
        coordinator
            .board_state()
            .expect("state lock is healthy")
            .is_none()
    );

    coordinator.retry_fetch().await.expect("retry succeeds");

    assert!(
        coordinator
            .fetch_error()
            .expect("state lock is healthy")
            .is_none()
    );
    let state = current_state(&coordinator);
    assert_eq!(local_task_ids(&state, "b1"), vec!["t1", "t2"]);
}
