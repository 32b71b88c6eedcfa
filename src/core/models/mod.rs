//! Domain models for arborist
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`RepositoryIdentity`] - `org/name` key of a repository
//! - [`RepoSnapshot`] - Default branch plus divergence of every other branch
//! - [`FleetVerdict`] - Safe or prunable, per branch name
//! - [`FleetPolicy`] - Noop flags and exclusion patterns
//! - [`ReportEvent`] - What the run tells the reporting sink

mod policy;
mod report;
mod repository;
mod snapshot;
mod verdict;

pub use policy::{ExcludePattern, ExcludeRules, FleetPolicy, GlobalPolicy};
pub use report::{DecisionReason, ReportEvent};
pub use repository::{RepositoryIdentity, RepositoryPolicy};
pub use snapshot::{BranchStatus, RepoSnapshot};
pub use verdict::{BranchVerdict, FleetVerdict};
