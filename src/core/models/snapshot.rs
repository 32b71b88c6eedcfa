//! Per-repository branch divergence snapshot

use std::collections::BTreeMap;

use serde::Serialize;

use super::RepositoryIdentity;

/// Divergence of one branch from its repository's default branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchStatus {
    /// Branch name
    pub name: String,

    /// Commits on the branch that are not on the default branch
    pub ahead_by: u32,

    /// Commits on the default branch that are not on the branch
    pub behind_by: u32,

    /// Key of the owning snapshot
    pub repo: RepositoryIdentity,
}

impl BranchStatus {
    /// Whether the branch carries work not on the default branch
    #[must_use]
    pub const fn is_ahead(&self) -> bool {
        self.ahead_by != 0
    }
}

/// A repository's default branch and the status of every other branch
///
/// Immutable once built; one per repository per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSnapshot {
    identity: RepositoryIdentity,
    default_branch: String,
    branches: BTreeMap<String, BranchStatus>,
}

impl RepoSnapshot {
    /// Build a snapshot from `(name, ahead_by, behind_by)` triples
    ///
    /// An entry for the default branch itself is dropped.
    #[must_use]
    pub fn new(
        identity: RepositoryIdentity,
        default_branch: impl Into<String>,
        branches: impl IntoIterator<Item = (String, u32, u32)>,
    ) -> Self {
        let default_branch = default_branch.into();
        let branches = branches
            .into_iter()
            .filter(|(name, _, _)| *name != default_branch)
            .map(|(name, ahead_by, behind_by)| {
                let status = BranchStatus {
                    name: name.clone(),
                    ahead_by,
                    behind_by,
                    repo: identity.clone(),
                };
                (name, status)
            })
            .collect();

        Self {
            identity,
            default_branch,
            branches,
        }
    }

    /// The repository this snapshot describes
    #[must_use]
    pub const fn identity(&self) -> &RepositoryIdentity {
        &self.identity
    }

    /// The repository's default branch
    #[must_use]
    pub fn default_branch(&self) -> &str {
        &self.default_branch
    }

    /// Status of a non-default branch
    #[must_use]
    pub fn branch(&self, name: &str) -> Option<&BranchStatus> {
        self.branches.get(name)
    }

    /// All non-default branches in name order
    pub fn branches(&self) -> impl Iterator<Item = &BranchStatus> {
        self.branches.values()
    }

    /// Number of non-default branches
    #[must_use]
    pub fn len(&self) -> usize {
        self.branches.len()
    }

    /// Whether the repository has no branch besides the default
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }
}
