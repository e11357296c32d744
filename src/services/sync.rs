//! Sync coordinator: authoritative fetch, optimistic mutations, and
//! reconciliation.

use super::drag::{self, DragError, DropEvent, DropOutcome};
use super::state::{BoardState, MutationIntent, MutationKind};
use crate::domain::{BoardId, BoardStateError, Snapshot, SnapshotToken, TaskId};
use crate::ports::{BoardRemote, RemoteError};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors returned by sync coordinator operations.
#[derive(Debug, Clone, Error)]
pub enum SyncError {
    /// No snapshot has been loaded yet.
    #[error("no snapshot loaded")]
    NotLoaded,

    /// A local optimistic mutation was rejected.
    #[error(transparent)]
    State(#[from] BoardStateError),

    /// Drop interpretation failed.
    #[error(transparent)]
    Drag(#[from] DragError),

    /// A remote call failed.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// The coordinator state lock was poisoned.
    #[error("state lock poisoned: {0}")]
    LockPoisoned(String),
}

#[derive(Debug, Default)]
struct SyncState {
    board_state: Option<BoardState>,
    token: Option<SnapshotToken>,
    fetch_error: Option<RemoteError>,
    in_flight: HashMap<MutationKind, usize>,
    mutation_errors: HashMap<MutationKind, RemoteError>,
    banner_visible: bool,
}

impl SyncState {
    /// Installs a fetched snapshot, rebuilding local state when the
    /// freshness token changed. Optimistic edits are discarded, not
    /// merged.
    fn install_snapshot(&mut self, snapshot: &Snapshot) {
        self.fetch_error = None;
        if self.token.as_ref() == Some(&snapshot.timestamp) {
            return;
        }
        debug!(
            boards = snapshot.boards.len(),
            token = %snapshot.timestamp,
            "installing authoritative snapshot"
        );
        self.board_state = Some(BoardState::from_snapshot(snapshot));
        self.token = Some(snapshot.timestamp.clone());
    }
}

/// Coordinates local optimistic state with the authoritative remote store.
///
/// Every mutation applies its local edit synchronously, dispatches the
/// matching remote call, and on settle (success or failure) awaits a
/// refetch of the authoritative snapshot. Overlapping in-flight mutations
/// are tolerated; reconciliation is last-snapshot-wins.
#[derive(Clone)]
pub struct SyncCoordinator<R> {
    remote: Arc<R>,
    inner: Arc<RwLock<SyncState>>,
}

impl<R> SyncCoordinator<R>
where
    R: BoardRemote,
{
    /// Creates a coordinator over the given remote port.
    #[must_use]
    pub fn new(remote: Arc<R>) -> Self {
        Self {
            remote,
            inner: Arc::new(RwLock::new(SyncState::default())),
        }
    }

    fn read_state<T>(&self, f: impl FnOnce(&SyncState) -> T) -> Result<T, SyncError> {
        self.inner
            .read()
            .map(|guard| f(&guard))
            .map_err(|err| SyncError::LockPoisoned(err.to_string()))
    }

    fn write_state<T>(&self, f: impl FnOnce(&mut SyncState) -> T) -> Result<T, SyncError> {
        self.inner
            .write()
            .map(|mut guard| f(&mut guard))
            .map_err(|err| SyncError::LockPoisoned(err.to_string()))
    }

    /// Fetches the authoritative snapshot and rebuilds local state when its
    /// freshness token changed.
    ///
    /// This is the reconciliation mechanism: optimistic local edits,
    /// including any that diverged because a remote mutation failed, are
    /// discarded wholesale in favour of server truth.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Remote`] when the fetch fails. Fetch failures
    /// are recorded as fatal to rendering and are not retried
    /// automatically; see [`Self::retry_fetch`].
    pub async fn refetch(&self) -> Result<(), SyncError> {
        match self.remote.fetch_snapshot().await {
            Ok(snapshot) => self.write_state(|state| state.install_snapshot(&snapshot)),
            Err(err) => {
                warn!(error = %err, "snapshot fetch failed");
                self.write_state(|state| state.fetch_error = Some(err.clone()))?;
                Err(SyncError::Remote(err))
            }
        }
    }

    /// Re-issues the snapshot fetch: the manual retry affordance exposed
    /// after a fetch failure.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Remote`] when the retried fetch fails again.
    pub async fn retry_fetch(&self) -> Result<(), SyncError> {
        self.refetch().await
    }

    /// Appends a task to a board optimistically and requests remote
    /// creation.
    ///
    /// The local list grows immediately; no rollback occurs if the remote
    /// rejects the creation. The mutation-triggered refetch restores
    /// server truth instead.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::NotLoaded`] before the first snapshot,
    /// [`SyncError::State`] when the board is unknown locally, or
    /// [`SyncError::Remote`] when the remote call or the follow-up refetch
    /// fails.
    pub async fn add_task(
        &self,
        board_id: &BoardId,
        description: &str,
        badge: Option<String>,
    ) -> Result<(), SyncError> {
        let intent = self.write_state(|state| {
            let board_state = state.board_state.as_mut().ok_or(SyncError::NotLoaded)?;
            Ok::<_, SyncError>(board_state.add_task(board_id, description, badge)?)
        })??;
        self.dispatch(&intent).await
    }

    /// Removes a task optimistically and requests remote deletion.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::NotLoaded`] before the first snapshot,
    /// [`SyncError::State`] when an index does not resolve against current
    /// state, or [`SyncError::Remote`] when the remote call or the
    /// follow-up refetch fails.
    pub async fn remove_task(
        &self,
        board_index: usize,
        task_index: usize,
        task_id: &TaskId,
    ) -> Result<(), SyncError> {
        let intent = self.write_state(|state| {
            let board_state = state.board_state.as_mut().ok_or(SyncError::NotLoaded)?;
            Ok::<_, SyncError>(board_state.remove_task(board_index, task_index, task_id)?)
        })??;
        self.dispatch(&intent).await
    }

    /// Inserts a pending board optimistically and requests remote
    /// creation.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::NotLoaded`] before the first snapshot or
    /// [`SyncError::Remote`] when the remote call or the follow-up refetch
    /// fails.
    pub async fn add_board(&self) -> Result<(), SyncError> {
        let intent = self.write_state(|state| {
            state
                .board_state
                .as_mut()
                .map(BoardState::add_board)
                .ok_or(SyncError::NotLoaded)
        })??;
        self.dispatch(&intent).await
    }

    /// Interprets a completed drag gesture against the current column
    /// ordering and dispatches a move intent when the drop changed local
    /// state.
    ///
    /// Drops outside any target and no-op drops return without touching
    /// state or the remote.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::NotLoaded`] before the first snapshot,
    /// [`SyncError::Drag`] when the event does not resolve against current
    /// state, or [`SyncError::Remote`] when the remote call or the
    /// follow-up refetch fails.
    pub async fn handle_drop(&self, event: &DropEvent) -> Result<DropOutcome, SyncError> {
        let outcome = self.write_state(|state| {
            let board_state = state.board_state.as_mut().ok_or(SyncError::NotLoaded)?;
            let order = board_state.board_order();
            Ok::<_, SyncError>(drag::handle_drop(board_state, &order, event)?)
        })??;
        if let Some(intent) = outcome.intent() {
            self.dispatch(intent).await?;
        }
        Ok(outcome)
    }

    /// Returns a clone of the current local board state, if loaded.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::LockPoisoned`] when the state lock is
    /// poisoned.
    pub fn board_state(&self) -> Result<Option<BoardState>, SyncError> {
        self.read_state(|state| state.board_state.clone())
    }

    /// Returns the freshness token of the last installed snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::LockPoisoned`] when the state lock is
    /// poisoned.
    pub fn snapshot_token(&self) -> Result<Option<SnapshotToken>, SyncError> {
        self.read_state(|state| state.token.clone())
    }

    /// Returns the recorded snapshot-fetch failure, if any.
    ///
    /// A fetch failure is fatal to rendering the board view until
    /// [`Self::retry_fetch`] succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::LockPoisoned`] when the state lock is
    /// poisoned.
    pub fn fetch_error(&self) -> Result<Option<RemoteError>, SyncError> {
        self.read_state(|state| state.fetch_error.clone())
    }

    /// Whether a mutation of the given kind is in flight.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::LockPoisoned`] when the state lock is
    /// poisoned.
    pub fn mutation_loading(&self, kind: MutationKind) -> Result<bool, SyncError> {
        self.read_state(|state| state.in_flight.get(&kind).is_some_and(|count| *count > 0))
    }

    /// Returns the last recorded failure for the given mutation kind.
    ///
    /// The record is cleared when a new mutation of the same kind starts.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::LockPoisoned`] when the state lock is
    /// poisoned.
    pub fn mutation_error(&self, kind: MutationKind) -> Result<Option<RemoteError>, SyncError> {
        self.read_state(|state| state.mutation_errors.get(&kind).cloned())
    }

    /// Whether any of the four mutation kinds is in flight.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::LockPoisoned`] when the state lock is
    /// poisoned.
    pub fn any_mutation_loading(&self) -> Result<bool, SyncError> {
        self.read_state(|state| state.in_flight.values().any(|count| *count > 0))
    }

    /// Whether any of the four mutation kinds has a recorded failure.
    ///
    /// Per-operation attribution is deliberately collapsed into this one
    /// signal for the error banner.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::LockPoisoned`] when the state lock is
    /// poisoned.
    pub fn any_mutation_error(&self) -> Result<bool, SyncError> {
        self.read_state(|state| !state.mutation_errors.is_empty())
    }

    /// Whether the mutation error banner should be shown.
    ///
    /// The banner stays visible until dismissed, even if the live error
    /// state has since cleared; each new failure makes it visible again.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::LockPoisoned`] when the state lock is
    /// poisoned.
    pub fn error_banner_visible(&self) -> Result<bool, SyncError> {
        self.read_state(|state| state.banner_visible)
    }

    /// Hides the mutation error banner until the next failure.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::LockPoisoned`] when the state lock is
    /// poisoned.
    pub fn dismiss_error_banner(&self) -> Result<(), SyncError> {
        self.write_state(|state| state.banner_visible = false)
    }

    /// Sends an intent to the remote, records per-kind loading and error
    /// state, and awaits the reconciling refetch before settling.
    async fn dispatch(&self, intent: &MutationIntent) -> Result<(), SyncError> {
        let kind = intent.kind();
        self.write_state(|state| {
            state.mutation_errors.remove(&kind);
            *state.in_flight.entry(kind).or_insert(0) += 1;
        })?;

        debug!(mutation = kind.as_str(), "dispatching mutation");
        let result = match intent {
            MutationIntent::CreateBoard { title } => {
                self.remote.create_board(title).await.map(|_| ())
            }
            MutationIntent::CreateTask {
                board_id,
                description,
                badge,
            } => self
                .remote
                .create_task(board_id, description, badge.as_deref())
                .await
                .map(|_| ()),
            MutationIntent::MoveTask {
                board_id,
                task_id,
                position,
            } => self
                .remote
                .move_task(board_id, task_id, *position)
                .await
                .map(|_| ()),
            MutationIntent::DeleteTask { task_id } => {
                self.remote.delete_task(task_id).await.map(|_| ())
            }
        };

        if let Err(err) = &result {
            warn!(mutation = kind.as_str(), error = %err, "mutation failed");
            self.write_state(|state| {
                state.mutation_errors.insert(kind, err.clone());
                state.banner_visible = true;
            })?;
        }

        // Reconcile against server truth regardless of the outcome; the
        // mutation does not count as settled until the refetch completes.
        let refetch_result = self.refetch().await;

        self.write_state(|state| {
            let remaining = state.in_flight.get_mut(&kind).map(|count| {
                *count = count.saturating_sub(1);
                *count
            });
            if remaining == Some(0) {
                state.in_flight.remove(&kind);
            }
        })?;

        result?;
        refetch_result
    }
}
