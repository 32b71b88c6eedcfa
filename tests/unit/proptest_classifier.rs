//! Property-based tests for the classifier
//!
//! Uses proptest to check that the verdict is a function of the fleet's
//! occurrences alone.

use std::collections::{BTreeMap, BTreeSet};

use arborist::core::models::{FleetPolicy, RepoSnapshot, RepositoryIdentity};
use arborist::core::ports::NullSink;
use arborist::core::services::{classify, filter_noop};
use proptest::prelude::*;

use crate::common::fixtures::PolicyBuilder;

/// 1-5 repositories, each with up to 5 branches drawn from a small pool so
/// names collide across repositories. Ahead counts are mostly zero.
fn fleet() -> impl Strategy<Value = Vec<RepoSnapshot>> {
    let branches = prop::collection::btree_map(
        "(feature-[ab]|old|release-[12])",
        prop_oneof![3 => Just(0u32), 1 => 1u32..4],
        0..5,
    );
    prop::collection::vec(branches, 1..6).prop_map(|repos| {
        repos
            .into_iter()
            .enumerate()
            .map(|(i, branches)| {
                RepoSnapshot::new(
                    RepositoryIdentity::new("org", format!("r{i}")),
                    "main",
                    branches.into_iter().map(|(name, ahead)| (name, ahead, 1)),
                )
            })
            .collect()
    })
}

/// `r0` excludes release branches locally; nothing is excluded globally
fn policy() -> FleetPolicy {
    PolicyBuilder::new().repo("r0", false, &["^release-"]).build()
}

fn excluded(policy: &FleetPolicy, repo: &RepositoryIdentity, name: &str) -> bool {
    policy.excluded_by(repo, name).is_some()
}

proptest! {
    /// Reordering repositories never changes the verdict
    #[test]
    fn order_of_repositories_is_irrelevant(
        (original, shuffled) in fleet().prop_flat_map(|f| (Just(f.clone()), Just(f).prop_shuffle()))
    ) {
        let policy = policy();
        let a = classify(&original, &policy, &mut NullSink);
        let b = classify(&shuffled, &policy, &mut NullSink);
        prop_assert_eq!(a, b);
    }

    /// Reversing branch insertion order builds the same snapshots and verdict
    #[test]
    fn order_of_branches_is_irrelevant(snapshots in fleet()) {
        let reversed: Vec<RepoSnapshot> = snapshots
            .iter()
            .map(|s| {
                let mut branches: Vec<_> = s
                    .branches()
                    .map(|b| (b.name.clone(), b.ahead_by, b.behind_by))
                    .collect();
                branches.reverse();
                RepoSnapshot::new(s.identity().clone(), s.default_branch(), branches)
            })
            .collect();
        let policy = policy();
        prop_assert_eq!(
            classify(&snapshots, &policy, &mut NullSink),
            classify(&reversed, &policy, &mut NullSink)
        );
    }

    /// Safe exactly when some non-excluded occurrence is ahead; otherwise
    /// prunable in exactly the non-excluded owners
    #[test]
    fn verdict_matches_occurrences(snapshots in fleet()) {
        let policy = policy();
        let verdict = classify(&snapshots, &policy, &mut NullSink);

        let mut occurrences: BTreeMap<String, Vec<(RepositoryIdentity, bool)>> = BTreeMap::new();
        for snapshot in &snapshots {
            for branch in snapshot.branches() {
                if !excluded(&policy, snapshot.identity(), &branch.name) {
                    occurrences
                        .entry(branch.name.clone())
                        .or_default()
                        .push((branch.repo.clone(), branch.is_ahead()));
                }
            }
        }

        for (name, owners) in &occurrences {
            let ahead: BTreeSet<_> = owners.iter().filter(|(_, a)| *a).map(|(r, _)| r.clone()).collect();
            if ahead.is_empty() {
                let all: BTreeSet<_> = owners.iter().map(|(r, _)| r.clone()).collect();
                prop_assert_eq!(verdict.prunable_in(name), Some(&all));
            } else {
                prop_assert_eq!(verdict.safe_because_of(name), Some(&ahead));
            }
        }

        let classified = verdict.safe_count() + verdict.prunable_count();
        prop_assert_eq!(classified, occurrences.len());
    }

    /// Classifying the same fleet twice gives the same verdict
    #[test]
    fn classification_is_idempotent(snapshots in fleet()) {
        let policy = policy();
        prop_assert_eq!(
            classify(&snapshots, &policy, &mut NullSink),
            classify(&snapshots, &policy, &mut NullSink)
        );
    }

    /// Noop removes exactly the noop repositories from prune sets
    #[test]
    fn noop_filter_removes_only_noop_repos(snapshots in fleet(), noop_mask in prop::collection::vec(any::<bool>(), 6)) {
        let mut builder = PolicyBuilder::new();
        for (i, noop) in noop_mask.iter().enumerate().take(snapshots.len()) {
            builder = builder.repo(&format!("r{i}"), *noop, &[]);
        }
        let policy = builder.build();

        let before = classify(&snapshots, &policy, &mut NullSink);
        let after = filter_noop(before.clone(), &policy, &mut NullSink);

        for (name, repos) in before.prunable() {
            let kept: BTreeSet<_> = repos.iter().filter(|r| !policy.is_noop(r)).cloned().collect();
            if kept.is_empty() {
                prop_assert!(after.get(name).is_none());
            } else {
                prop_assert_eq!(after.prunable_in(name), Some(&kept));
            }
        }
        for (name, ahead_in) in before.safe() {
            prop_assert_eq!(after.safe_because_of(name), Some(ahead_in));
        }
    }
}
