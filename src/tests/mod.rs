//! Unit tests for the board reconciliation engine.
//!
//! Tests are organised by component, covering happy paths, error cases,
//! and edge cases for all public APIs.

mod ordering_tests;
