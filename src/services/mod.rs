//! Orchestration services: local optimistic state, drag interpretation,
//! and snapshot reconciliation.

pub mod drag;
pub mod state;
pub mod sync;

pub use drag::{DragError, DropEvent, DropOutcome, DropPosition, handle_drop};
pub use state::{BoardState, MutationIntent, MutationKind};
pub use sync::{SyncCoordinator, SyncError};
