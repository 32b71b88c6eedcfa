//! Noop filter - drops prune candidates in repositories that must not be touched

use crate::core::models::{DecisionReason, FleetPolicy, FleetVerdict, ReportEvent};
use crate::core::ports::ReportSink;

/// Remove every prunable repository whose policy has `noop` set
///
/// Branch names left without repositories disappear from the verdict.
/// Safe entries are untouched.
#[must_use]
pub fn filter_noop(
    mut verdict: FleetVerdict,
    policy: &FleetPolicy,
    sink: &mut dyn ReportSink,
) -> FleetVerdict {
    verdict.retain_prunable(|branch, repo| {
        if policy.is_noop(repo) {
            sink.record(ReportEvent::decision(repo, branch, DecisionReason::NoopSkipped));
            false
        } else {
            true
        }
    });
    verdict
}
