//! Port contracts for the board reconciliation engine.
//!
//! Ports define infrastructure-agnostic interfaces used by the sync
//! coordinator.

pub mod remote;

pub use remote::{
    BoardRemote, CreatedBoard, CreatedTask, DeletedTask, MovedTask, RemoteError, RemoteOperation,
    RemoteResult,
};
