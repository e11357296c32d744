//! Corkboard: optimistic kanban board state with snapshot reconciliation.
//!
//! This crate implements the client-side ordered-collection engine behind a
//! kanban-style task board: normalizing authoritative snapshots into
//! order-preserving local structures, applying drag-and-drop reorders and
//! cross-board moves as synchronous optimistic edits, and reconciling local
//! state with an eventually-confirming remote store, including recovery
//! when a mutation is rejected.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure types and pure logic with no infrastructure
//!   dependencies
//! - **Ports**: Abstract trait interfaces for the remote store
//! - **Adapters**: Concrete port implementations (in-memory store)
//! - **Services**: Local board state, drag interpretation, and the sync
//!   coordinator
//!
//! Local state is a cache invalidated wholesale by the next authoritative
//! read: mutations apply locally first, the remote is informed, and every
//! settled mutation triggers a refetch whose snapshot replaces local state
//! last-snapshot-wins.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
