//! In-memory adapter implementations.

mod remote;

pub use remote::InMemoryBoardRemote;
