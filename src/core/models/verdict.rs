//! Fleet-wide classification result

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::RepositoryIdentity;

/// Classification of a single branch name across the fleet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum BranchVerdict {
    /// Keep everywhere: the branch is ahead of the default branch somewhere
    Safe {
        /// Every repository where a non-excluded occurrence is ahead
        ahead_in: BTreeSet<RepositoryIdentity>,
    },

    /// Delete from the listed repositories
    Prunable {
        /// Repositories whose occurrence may be deleted
        repos: BTreeSet<RepositoryIdentity>,
    },
}

/// Verdict for every branch name seen in the fleet
///
/// Keyed by branch name, so a name is either safe or prunable, never both.
/// Names whose every occurrence was excluded do not appear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FleetVerdict {
    branches: BTreeMap<String, BranchVerdict>,
}

impl FleetVerdict {
    /// Create an empty verdict
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Classification for `branch`
    #[must_use]
    pub fn get(&self, branch: &str) -> Option<&BranchVerdict> {
        self.branches.get(branch)
    }

    /// Whether `branch` is safe fleet-wide
    #[must_use]
    pub fn is_safe(&self, branch: &str) -> bool {
        matches!(self.branches.get(branch), Some(BranchVerdict::Safe { .. }))
    }

    /// Repositories `branch` may be deleted from
    #[must_use]
    pub fn prunable_in(&self, branch: &str) -> Option<&BTreeSet<RepositoryIdentity>> {
        match self.branches.get(branch) {
            Some(BranchVerdict::Prunable { repos }) => Some(repos),
            _ => None,
        }
    }

    /// Repositories proving `branch` safe
    #[must_use]
    pub fn safe_because_of(&self, branch: &str) -> Option<&BTreeSet<RepositoryIdentity>> {
        match self.branches.get(branch) {
            Some(BranchVerdict::Safe { ahead_in }) => Some(ahead_in),
            _ => None,
        }
    }

    /// Mark `branch` safe, replacing any previous classification
    pub fn mark_safe(&mut self, branch: &str, ahead_in: BTreeSet<RepositoryIdentity>) {
        self.branches
            .insert(branch.to_string(), BranchVerdict::Safe { ahead_in });
    }

    /// Add repositories to the prune set of `branch`
    ///
    /// Returns `false` without changing anything when `branch` is already safe.
    pub fn add_prunable(
        &mut self,
        branch: &str,
        repos: impl IntoIterator<Item = RepositoryIdentity>,
    ) -> bool {
        let entry = self
            .branches
            .entry(branch.to_string())
            .or_insert_with(|| BranchVerdict::Prunable {
                repos: BTreeSet::new(),
            });
        match entry {
            BranchVerdict::Prunable { repos: owners } => {
                owners.extend(repos);
                true
            },
            BranchVerdict::Safe { .. } => false,
        }
    }

    /// Keep only the prunable repositories for which `keep` returns true
    ///
    /// Names left without repositories are removed. Safe entries are untouched.
    pub fn retain_prunable(&mut self, mut keep: impl FnMut(&str, &RepositoryIdentity) -> bool) {
        self.branches.retain(|name, verdict| match verdict {
            BranchVerdict::Safe { .. } => true,
            BranchVerdict::Prunable { repos } => {
                repos.retain(|repo| keep(name, repo));
                !repos.is_empty()
            },
        });
    }

    /// Safe branch names in name order
    pub fn safe(&self) -> impl Iterator<Item = (&str, &BTreeSet<RepositoryIdentity>)> {
        self.branches.iter().filter_map(|(name, verdict)| match verdict {
            BranchVerdict::Safe { ahead_in } => Some((name.as_str(), ahead_in)),
            BranchVerdict::Prunable { .. } => None,
        })
    }

    /// Prunable branch names in name order
    pub fn prunable(&self) -> impl Iterator<Item = (&str, &BTreeSet<RepositoryIdentity>)> {
        self.branches.iter().filter_map(|(name, verdict)| match verdict {
            BranchVerdict::Prunable { repos } => Some((name.as_str(), repos)),
            BranchVerdict::Safe { .. } => None,
        })
    }

    /// Every `(branch, repository)` pair to delete, by name then repository
    pub fn prune_targets(&self) -> impl Iterator<Item = (&str, &RepositoryIdentity)> {
        self.prunable()
            .flat_map(|(name, repos)| repos.iter().map(move |repo| (name, repo)))
    }

    /// Number of prunable branch names
    #[must_use]
    pub fn prunable_count(&self) -> usize {
        self.prunable().count()
    }

    /// Number of safe branch names
    #[must_use]
    pub fn safe_count(&self) -> usize {
        self.safe().count()
    }
}
