//! Business logic services
//!
//! Orchestration logic that operates on domain models. Host access goes
//! through the [`RepositoryHost`](crate::core::ports::RepositoryHost) port;
//! classification and filtering are pure.
//!
//! - [`snapshot`] - Build per-repository branch snapshots
//! - [`classifier`] - Decide safe or prunable per branch name
//! - [`noop_filter`] - Drop candidates in noop repositories
//! - [`pruner`] - Delete (or report) the remaining refs
//! - [`pipeline`] - Run the phases in order

pub mod classifier;
pub mod noop_filter;
pub mod pipeline;
pub mod pruner;
pub mod snapshot;

pub use classifier::classify;
pub use noop_filter::filter_noop;
pub use pipeline::{RunOptions, run};
pub use pruner::{PruneReport, head_ref, prune};
pub use snapshot::{build_fleet, build_snapshot, report_snapshot};
