//! Adapter tests
//!
//! Tests for I/O adapter implementations:
//! - GitHub REST client (against a local fake server)

#![cfg(feature = "github")]

mod github_test;
