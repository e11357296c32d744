//! Domain model for the board reconciliation engine.
//!
//! Pure types and pure logic only: identifiers, entities, wire-shaped
//! snapshot records, ordered-collection utilities, and snapshot
//! normalization. Infrastructure concerns stay outside the domain boundary.

mod board;
mod error;
mod ids;
mod normalize;
mod ordering;
mod snapshot;
mod task;

pub use board::Board;
pub use error::BoardStateError;
pub use ids::{BoardId, EntityOrigin, SnapshotToken, TaskId};
pub use normalize::{NormalizedBoards, normalize};
pub use ordering::{OrderingError, reorder, transfer};
pub use snapshot::{BoardRecord, Snapshot, TaskRecord};
pub use task::Task;
