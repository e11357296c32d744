//! Board entity: a named column owning an ordered list of tasks.

use super::{BoardId, EntityOrigin};
use serde::{Deserialize, Serialize};

/// A board column.
///
/// Task ownership is tracked separately (see
/// [`NormalizedBoards`](super::NormalizedBoards)); the board record itself
/// carries only identity and title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Board identifier.
    pub id: BoardId,
    /// Column title.
    pub title: String,
    /// Confirmation state; not part of the wire representation.
    #[serde(skip)]
    pub origin: EntityOrigin,
}

impl Board {
    /// Creates a confirmed board record.
    #[must_use]
    pub fn new(id: BoardId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            origin: EntityOrigin::Confirmed,
        }
    }

    /// Creates a pending board inserted locally before remote confirmation.
    #[must_use]
    pub fn pending(id: BoardId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            origin: EntityOrigin::PendingCreation,
        }
    }
}
