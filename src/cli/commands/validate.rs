//! Validate command - check the config without touching GitHub

use std::path::Path;

use arborist::config::ArboristConfig;
use arborist::core::models::{ExcludePattern, FleetPolicy, RepositoryIdentity};
use arborist::output::OutputMode;

/// Load the config, compile every pattern and print what a run would use
pub fn validate(conf: &Path, output_mode: OutputMode) -> anyhow::Result<()> {
    let config = ArboristConfig::load(conf)?;
    let repos = config.identities()?;
    let policy = config.fleet_policy()?;

    if output_mode == OutputMode::Json {
        let repos: Vec<_> = repos
            .iter()
            .map(|repo| {
                serde_json::json!({
                    "repo": repo,
                    "noop": policy.is_noop(repo),
                    "exclude_patterns": local_patterns(&policy, repo),
                })
            })
            .collect();
        let json = serde_json::json!({
            "valid": true,
            "noop": policy.global.global_noop,
            "api_url": config.api_url(),
            "exclude_patterns": config.exclude_patterns,
            "repos": repos,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    println!("{}: ok", conf.display());
    println!("noop: {}", policy.global.global_noop);
    println!("api_url: {}", config.api_url());
    if config.exclude_patterns.is_empty() {
        println!("exclude_patterns: none");
    } else {
        println!("exclude_patterns:");
        for pattern in policy.global.exclude.iter() {
            println!("  • {}", pattern.as_str());
        }
    }
    println!("repos: {}", repos.len());
    for repo in &repos {
        let noop = if policy.is_noop(repo) { " (noop)" } else { "" };
        println!("  • {repo}{noop}");
        let patterns = local_patterns(&policy, repo);
        if !patterns.is_empty() {
            println!("      exclude_patterns: {}", patterns.join(", "));
        }
    }

    Ok(())
}

/// Patterns that apply to `repo` only, in configuration order
fn local_patterns<'a>(policy: &'a FleetPolicy, repo: &RepositoryIdentity) -> Vec<&'a str> {
    policy
        .repos
        .get(repo)
        .map(|p| p.exclude.iter().map(ExcludePattern::as_str).collect())
        .unwrap_or_default()
}
