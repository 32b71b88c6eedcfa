//! arborist - prune stale branches consistently across a fleet of repositories
//!
//! A branch name is kept in every repository as soon as one repository has
//! commits on it that its default branch lacks. Branch names that are behind
//! (or even) everywhere are deleted, except where exclusion patterns or
//! per-repository noop flags say otherwise.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod config;
pub mod core;
pub mod error;
pub mod output;

pub use error::{ArboristError, ConfigError, PatternError, UpstreamError};
