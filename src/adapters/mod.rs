//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `github/` - GitHub REST API (`RepositoryHost`)
//!
//! Console reporting (`ReportSink`) lives in [`crate::output`].

#[cfg(feature = "github")]
pub mod github;
