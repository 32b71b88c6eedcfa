//! Prune command - snapshot, classify, filter and delete

use std::path::Path;

use anyhow::Context;

use crate::cli::app::PruneArgs;
use arborist::adapters::github::GitHubClient;
use arborist::config::ArboristConfig;
use arborist::core::services::{self, RunOptions};
use arborist::error::ConfigError;
use arborist::output::{ConsoleReporter, OutputMode};

/// Run one pruning pass over the configured fleet
pub fn prune(conf: &Path, args: &PruneArgs, output_mode: OutputMode) -> anyhow::Result<()> {
    let config = ArboristConfig::load(conf)?;
    let repos = config.identities()?;
    let policy = config.fleet_policy()?;

    let token = args
        .github_token
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .ok_or(ConfigError::MissingToken)?;
    let api_url = args.api_url.as_deref().unwrap_or_else(|| config.api_url());
    let client = GitHubClient::new(api_url, token)?;

    if repos.is_empty() {
        log::warn!("no repositories configured in {}", conf.display());
    }
    if args.noop && !policy.global.global_noop {
        log::info!("--noop given, deletions suppressed");
    }

    let options = RunOptions {
        global_noop: policy.global.global_noop || args.noop,
        jobs: usize::from(args.jobs),
    };

    let mut reporter = ConsoleReporter::new(output_mode);
    let report = match services::run(&client, &repos, &policy, options, &mut reporter) {
        Ok(report) => report,
        Err(err) => {
            reporter.abort(&err.to_string())?;
            return Err(err).with_context(|| format!("run aborted for fleet in {}", conf.display()));
        },
    };
    reporter.finish(report)
}
