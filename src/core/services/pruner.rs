//! Pruner - deletes the refs left in the verdict
//!
//! Deletion is one-way. The first failure aborts the run; re-running after
//! fixing the cause is the recovery path.

use serde::Serialize;

use crate::core::models::{FleetVerdict, ReportEvent};
use crate::core::ports::{ReportSink, RepositoryHost};
use crate::error::UpstreamError;

/// Outcome of a prune pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PruneReport {
    /// Distinct branch names pruned (or that would be)
    pub branches: usize,
    /// `(branch, repository)` pairs pruned (or that would be)
    pub refs: usize,
    /// Refs actually deleted
    pub deleted: usize,
    /// Report-only run
    pub noop: bool,
}

/// The ref path deleted for `branch`
#[must_use]
pub fn head_ref(branch: &str) -> String {
    format!("heads/{branch}")
}

/// Delete every prunable ref, or only report them when `global_noop` is set
pub fn prune(
    verdict: &FleetVerdict,
    global_noop: bool,
    host: &dyn RepositoryHost,
    sink: &mut dyn ReportSink,
) -> Result<PruneReport, UpstreamError> {
    let mut report = PruneReport {
        branches: verdict.prunable_count(),
        refs: verdict.prune_targets().count(),
        deleted: 0,
        noop: global_noop,
    };
    sink.record(ReportEvent::Summary {
        branches: report.branches,
        refs: report.refs,
        noop: global_noop,
    });

    for (branch, repo) in verdict.prune_targets() {
        if global_noop {
            sink.record(ReportEvent::WouldDelete {
                repo: repo.clone(),
                branch: branch.to_string(),
            });
            continue;
        }

        log::debug!("deleting {repo}:{branch}");
        host.delete_ref(repo, &head_ref(branch))?;
        report.deleted += 1;
        sink.record(ReportEvent::Deleted {
            repo: repo.clone(),
            branch: branch.to_string(),
        });
    }

    Ok(report)
}
