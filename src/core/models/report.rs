//! Events delivered to the reporting sink

use std::collections::BTreeSet;

use serde::Serialize;

use super::RepositoryIdentity;

/// Why the classifier decided what it did about one branch occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DecisionReason {
    /// Already proven safe by an earlier occurrence
    KnownSafe {
        /// Repositories where the branch is ahead
        ahead_in: BTreeSet<RepositoryIdentity>,
    },

    /// Ahead of the default branch in this repository
    Ahead,

    /// Ahead of the default branch in another repository
    AheadElsewhere {
        /// Repositories where the branch is ahead
        ahead_in: BTreeSet<RepositoryIdentity>,
    },

    /// Name matched an exclusion pattern
    Excluded {
        /// The matching pattern
        pattern: String,
    },

    /// Not ahead anywhere; scheduled for deletion
    Prunable,

    /// Prunable, but the repository has noop set
    NoopSkipped,
}

/// Something the run wants reported
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReportEvent {
    /// A repository's default branch
    DefaultBranch {
        /// Repository
        repo: RepositoryIdentity,
        /// Default branch name
        branch: String,
    },

    /// Divergence of one branch
    BranchStatus {
        /// Repository
        repo: RepositoryIdentity,
        /// Branch name
        branch: String,
        /// Commits ahead of the default branch
        ahead_by: u32,
        /// Commits behind the default branch
        behind_by: u32,
    },

    /// A classification decision for one occurrence
    Decision {
        /// Repository owning the occurrence
        repo: RepositoryIdentity,
        /// Branch name
        branch: String,
        /// Why
        #[serde(flatten)]
        reason: DecisionReason,
    },

    /// How much will be (or would be) pruned
    Summary {
        /// Distinct branch names
        branches: usize,
        /// `(branch, repository)` pairs
        refs: usize,
        /// Report-only run
        noop: bool,
    },

    /// A ref that would be deleted if noop were off
    WouldDelete {
        /// Repository
        repo: RepositoryIdentity,
        /// Branch name
        branch: String,
    },

    /// A ref that was deleted
    Deleted {
        /// Repository
        repo: RepositoryIdentity,
        /// Branch name
        branch: String,
    },
}

impl ReportEvent {
    /// Shorthand for a decision event
    #[must_use]
    pub fn decision(repo: &RepositoryIdentity, branch: &str, reason: DecisionReason) -> Self {
        Self::Decision {
            repo: repo.clone(),
            branch: branch.to_string(),
            reason,
        }
    }
}
