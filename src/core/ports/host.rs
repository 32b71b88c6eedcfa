//! Repository host port
//!
//! Defines the interface for talking to the service hosting the repositories.

use crate::core::models::RepositoryIdentity;
use crate::error::UpstreamError;

/// Result of comparing two refs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Comparison {
    /// Commits reachable from head but not base
    pub ahead_by: u32,
    /// Commits reachable from base but not head
    pub behind_by: u32,
}

/// Repository hosting API
///
/// Implementations own transport, authentication and rate limiting. Every
/// failure is reported as an [`UpstreamError`] and is fatal to the run.
pub trait RepositoryHost: Send + Sync {
    /// Name of the repository's default branch
    fn default_branch(&self, repo: &RepositoryIdentity) -> Result<String, UpstreamError>;

    /// Names of every branch in the repository, default branch included
    fn list_branches(&self, repo: &RepositoryIdentity) -> Result<Vec<String>, UpstreamError>;

    /// Compare `head` against `base`
    fn compare(
        &self,
        repo: &RepositoryIdentity,
        base: &str,
        head: &str,
    ) -> Result<Comparison, UpstreamError>;

    /// Delete a ref such as `heads/feature-x`
    fn delete_ref(&self, repo: &RepositoryIdentity, reference: &str) -> Result<(), UpstreamError>;
}
