//! Output formatting for human and JSON modes
//!
//! Human mode prints each report event as it happens. JSON mode collects the
//! events and prints a single document once the run is over.

use std::collections::BTreeSet;

use colored::Colorize;
use serde::Serialize;

use crate::core::models::{DecisionReason, ReportEvent, RepositoryIdentity};
use crate::core::ports::ReportSink;
use crate::core::services::PruneReport;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Complete record of a run, as printed in JSON mode
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RunResult<'a> {
    /// Every event in the order it was reported
    pub events: &'a [ReportEvent],
    /// Final counts
    pub summary: PruneReport,
}

/// Record of a run that aborted, as printed in JSON mode
///
/// Events include any deletions made before the failure.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RunFailure<'a> {
    /// Every event reported before the failure
    pub events: &'a [ReportEvent],
    /// The error that stopped the run
    pub error: &'a str,
}

/// [`ReportSink`] writing to stdout
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    mode: OutputMode,
    events: Vec<ReportEvent>,
}

impl ConsoleReporter {
    /// Create a reporter for `mode`
    #[must_use]
    pub const fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            events: Vec::new(),
        }
    }

    /// Events collected so far (JSON mode only)
    #[must_use]
    pub fn events(&self) -> &[ReportEvent] {
        &self.events
    }

    /// Print whatever is pending once the run is over
    pub fn finish(&self, summary: PruneReport) -> anyhow::Result<()> {
        if self.mode == OutputMode::Json {
            let result = RunResult {
                events: &self.events,
                summary,
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Ok(())
    }

    /// Print what was collected before `error` stopped the run
    ///
    /// Human mode has already printed every event, so only JSON mode writes.
    pub fn abort(&self, error: &str) -> anyhow::Result<()> {
        if self.mode == OutputMode::Json {
            let failure = RunFailure {
                events: &self.events,
                error,
            };
            println!("{}", serde_json::to_string_pretty(&failure)?);
        }
        Ok(())
    }
}

impl ReportSink for ConsoleReporter {
    fn record(&mut self, event: ReportEvent) {
        match self.mode {
            OutputMode::Human => println!("{}", render_human(&event)),
            OutputMode::Json => self.events.push(event),
        }
    }
}

/// One human-readable line for an event
#[must_use]
pub fn render_human(event: &ReportEvent) -> String {
    match event {
        ReportEvent::DefaultBranch { repo, branch } => {
            format!("{repo} default branch is: {}", branch.bold())
        },
        ReportEvent::BranchStatus {
            repo,
            branch,
            ahead_by,
            behind_by,
        } => format!("{repo}:{branch} -- ahead: {ahead_by}, behind: {behind_by}"),
        ReportEvent::Decision {
            repo,
            branch,
            reason,
        } => render_decision(repo, branch, reason),
        ReportEvent::Summary {
            branches,
            refs,
            noop,
        } => {
            let line = if *noop {
                format!("Branches that would be pruned if noop=false: {branches} ({refs} refs)")
            } else {
                format!("Branches to be pruned: {branches} ({refs} refs)")
            };
            line.bold().to_string()
        },
        ReportEvent::WouldDelete { repo, branch } => format!("would delete {repo}:{branch}"),
        ReportEvent::Deleted { repo, branch } => {
            format!("{} {repo}:{branch}", "deleted".red())
        },
    }
}

fn render_decision(repo: &RepositoryIdentity, branch: &str, reason: &DecisionReason) -> String {
    match reason {
        DecisionReason::KnownSafe { ahead_in } => format!(
            "ignoring branch: {branch} because it is known to be ahead in {}",
            join(ahead_in)
        ),
        DecisionReason::Ahead => {
            format!("ignoring branch: {branch} because it is {} in {repo}", "ahead".green())
        },
        DecisionReason::AheadElsewhere { ahead_in } => format!(
            "ignoring branch: {branch} because it is {} in {}",
            "ahead".green(),
            join(ahead_in)
        ),
        DecisionReason::Excluded { pattern } => format!(
            "ignoring branch: {branch} in {repo} because it matched exclude_pattern: {pattern}"
        ),
        DecisionReason::Prunable => {
            format!("{repo}:{branch} is {} everywhere", "not ahead".yellow())
        },
        DecisionReason::NoopSkipped => {
            format!("ignoring {repo}:{branch} as the repo has noop=true")
        },
    }
}

fn join(repos: &BTreeSet<RepositoryIdentity>) -> String {
    repos.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}
