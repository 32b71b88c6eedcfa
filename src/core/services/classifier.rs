//! Branch classifier - decides a fleet-wide verdict per branch name
//!
//! A branch name is safe everywhere as soon as one non-excluded occurrence is
//! ahead of its repository's default branch. Otherwise every non-excluded
//! occurrence is prunable. Excluded occurrences are skipped: they are never
//! deleted and never count as evidence that a name is safe.
//!
//! The verdict depends only on the set of occurrences, not on the order
//! repositories or branches are visited in.

use std::collections::BTreeSet;

use crate::core::models::{
    BranchStatus, DecisionReason, FleetPolicy, FleetVerdict, RepoSnapshot, ReportEvent,
    RepositoryIdentity,
};
use crate::core::ports::ReportSink;

/// Classify every branch name in the fleet
///
/// Each occurrence produces exactly one [`ReportEvent::Decision`].
#[must_use]
pub fn classify(
    snapshots: &[RepoSnapshot],
    policy: &FleetPolicy,
    sink: &mut dyn ReportSink,
) -> FleetVerdict {
    let mut verdict = FleetVerdict::new();

    for (index, snapshot) in snapshots.iter().enumerate() {
        let repo = snapshot.identity();

        for branch in snapshot.branches() {
            let name = branch.name.as_str();

            if let Some(ahead_in) = verdict.safe_because_of(name) {
                let reason = DecisionReason::KnownSafe {
                    ahead_in: ahead_in.clone(),
                };
                sink.record(ReportEvent::decision(repo, name, reason));
                continue;
            }

            if let Some(pattern) = policy.excluded_by(repo, name) {
                let reason = DecisionReason::Excluded {
                    pattern: pattern.as_str().to_string(),
                };
                sink.record(ReportEvent::decision(repo, name, reason));
                continue;
            }

            if branch.is_ahead() {
                verdict.mark_safe(name, ahead_everywhere(snapshots, policy, name));
                sink.record(ReportEvent::decision(repo, name, DecisionReason::Ahead));
                continue;
            }

            let siblings = siblings(snapshots, index, policy, name);
            if siblings.iter().any(|s| s.is_ahead()) {
                let ahead_in = ahead_everywhere(snapshots, policy, name);
                verdict.mark_safe(name, ahead_in.clone());
                let reason = DecisionReason::AheadElsewhere { ahead_in };
                sink.record(ReportEvent::decision(repo, name, reason));
                continue;
            }

            let owners = std::iter::once(repo.clone()).chain(siblings.iter().map(|s| s.repo.clone()));
            verdict.add_prunable(name, owners);
            sink.record(ReportEvent::decision(repo, name, DecisionReason::Prunable));
        }
    }

    verdict
}

/// Non-excluded occurrences of `name` in every snapshot but `skip`
fn siblings<'a>(
    snapshots: &'a [RepoSnapshot],
    skip: usize,
    policy: &FleetPolicy,
    name: &str,
) -> Vec<&'a BranchStatus> {
    snapshots
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != skip)
        .filter_map(|(_, s)| s.branch(name))
        .filter(|b| policy.excluded_by(&b.repo, name).is_none())
        .collect()
}

/// Repositories where a non-excluded occurrence of `name` is ahead
fn ahead_everywhere(
    snapshots: &[RepoSnapshot],
    policy: &FleetPolicy,
    name: &str,
) -> BTreeSet<RepositoryIdentity> {
    snapshots
        .iter()
        .filter_map(|s| s.branch(name))
        .filter(|b| b.is_ahead() && policy.excluded_by(&b.repo, name).is_none())
        .map(|b| b.repo.clone())
        .collect()
}
