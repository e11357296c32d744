//! Identifier and token types for the board domain.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque board identifier.
///
/// Confirmed boards carry a server-assigned value. A board created locally
/// uses a synthesized `board-<N>` identity until the next authoritative
/// snapshot replaces it; see [`EntityOrigin`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardId(String);

impl BoardId {
    /// Creates a board identifier from its opaque string form.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for BoardId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque task identifier, server-assigned once the task is confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Value rendered for tasks that have no server identity yet.
    const PLACEHOLDER: &'static str = "__";

    /// Creates a task identifier from its opaque string form.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the placeholder identifier for a locally created task.
    ///
    /// Pending-ness is tracked by [`EntityOrigin::PendingCreation`], never
    /// by comparing an identifier against this value.
    #[must_use]
    pub fn placeholder() -> Self {
        Self(Self::PLACEHOLDER.to_owned())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque freshness token identifying an authoritative snapshot.
///
/// Local state is rebuilt whenever a fetched snapshot carries a token that
/// differs from the one currently held.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotToken(String);

impl SnapshotToken {
    /// Creates a token from its opaque string form.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the token as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SnapshotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether an entity has been confirmed by the remote store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityOrigin {
    /// Present in an authoritative snapshot.
    #[default]
    Confirmed,
    /// Created locally; discarded and replaced wholesale when the next
    /// authoritative snapshot arrives.
    PendingCreation,
}

impl EntityOrigin {
    /// Returns `true` for entities awaiting remote confirmation.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::PendingCreation)
    }
}
