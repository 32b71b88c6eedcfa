//! Run pipeline: snapshot → classify → noop filter → prune

use crate::core::models::{FleetPolicy, RepositoryIdentity};
use crate::core::ports::{ReportSink, RepositoryHost};
use crate::error::ArboristError;

use super::{PruneReport, build_fleet, classify, filter_noop, prune, report_snapshot};

/// Knobs for a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Report only; overrides nothing in the policy when `false`
    pub global_noop: bool,
    /// Repositories snapshotted concurrently
    pub jobs: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            global_noop: true,
            jobs: 1,
        }
    }
}

/// Execute one full run against `host`
///
/// All classification state is created here and dropped on return, so
/// repeated runs in one process never see each other's results.
pub fn run(
    host: &dyn RepositoryHost,
    repos: &[RepositoryIdentity],
    policy: &FleetPolicy,
    options: RunOptions,
    sink: &mut dyn ReportSink,
) -> Result<PruneReport, ArboristError> {
    log::info!("snapshotting {} repositories", repos.len());
    let snapshots = build_fleet(host, repos, options.jobs)?;
    for snapshot in &snapshots {
        report_snapshot(snapshot, sink);
    }

    let verdict = classify(&snapshots, policy, sink);
    log::debug!(
        "classified: {} safe, {} prunable before noop filter",
        verdict.safe_count(),
        verdict.prunable_count()
    );

    let verdict = filter_noop(verdict, policy, sink);
    let report = prune(&verdict, options.global_noop, host, sink)?;
    log::info!(
        "{} refs across {} branches {}",
        report.refs,
        report.branches,
        if report.noop { "would be pruned" } else { "pruned" }
    );
    Ok(report)
}
