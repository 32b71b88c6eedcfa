//! Fleet snapshot builder
//!
//! Reads each repository's default branch and the divergence of every other
//! branch from it. This is the only phase that talks to the host before
//! deletion, and the only one worth parallelizing.

use rayon::prelude::*;

use crate::core::models::{RepoSnapshot, ReportEvent, RepositoryIdentity};
use crate::core::ports::{ReportSink, RepositoryHost};
use crate::error::UpstreamError;

/// Snapshot a single repository
///
/// The default branch is never compared against itself.
pub fn build_snapshot(
    host: &dyn RepositoryHost,
    repo: &RepositoryIdentity,
) -> Result<RepoSnapshot, UpstreamError> {
    let default_branch = host.default_branch(repo)?;
    log::debug!("{repo} default branch is {default_branch}");

    let names = host.list_branches(repo)?;
    let mut branches = Vec::with_capacity(names.len());
    for name in names {
        if name == default_branch {
            continue;
        }
        let comparison = host.compare(repo, &default_branch, &name)?;
        branches.push((name, comparison.ahead_by, comparison.behind_by));
    }

    Ok(RepoSnapshot::new(repo.clone(), default_branch, branches))
}

/// Snapshot every repository, returning snapshots in input order
///
/// With `jobs > 1` repositories are fetched on a pool of `jobs` threads. The
/// first error aborts the build; no partial fleet is returned.
pub fn build_fleet(
    host: &dyn RepositoryHost,
    repos: &[RepositoryIdentity],
    jobs: usize,
) -> Result<Vec<RepoSnapshot>, UpstreamError> {
    if jobs <= 1 || repos.len() <= 1 {
        return repos.iter().map(|repo| build_snapshot(host, repo)).collect();
    }

    match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
        Ok(pool) => pool.install(|| {
            repos
                .par_iter()
                .map(|repo| build_snapshot(host, repo))
                .collect()
        }),
        Err(err) => {
            log::warn!("cannot start {jobs} snapshot workers ({err}), fetching sequentially");
            repos.iter().map(|repo| build_snapshot(host, repo)).collect()
        },
    }
}

/// Report a snapshot's default branch and branch divergence
pub fn report_snapshot(snapshot: &RepoSnapshot, sink: &mut dyn ReportSink) {
    sink.record(ReportEvent::DefaultBranch {
        repo: snapshot.identity().clone(),
        branch: snapshot.default_branch().to_string(),
    });
    for status in snapshot.branches() {
        sink.record(ReportEvent::BranchStatus {
            repo: status.repo.clone(),
            branch: status.name.clone(),
            ahead_by: status.ahead_by,
            behind_by: status.behind_by,
        });
    }
}
