//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::commands;
use arborist::config::DEFAULT_CONFIG_FILE;
use arborist::output::OutputMode;

/// arborist - prune stale branches across a fleet of GitHub repositories
#[derive(Parser, Debug)]
#[command(
    name = "arborist",
    version,
    about = "Prune stale branches across a fleet of GitHub repositories",
    long_about = "Compare every branch of every configured repository with its default branch.\n\n\
                  A branch name ahead of the default branch in any repository is kept everywhere.\n\
                  Branch names that are not ahead anywhere are deleted, unless excluded by pattern\n\
                  or suppressed by noop (the default)."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to config file
    #[arg(short, long = "conf", global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub conf: PathBuf,

    #[command(flatten)]
    pub prune: PruneArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify branches and delete the prunable ones (default)
    Prune,

    /// Load the config and compile exclude patterns without contacting GitHub
    Validate,

    /// Show version
    Version,
}

/// Options for a prune run
///
/// Global so they are accepted before or after the `prune` subcommand.
#[derive(Args, Debug, Clone)]
pub struct PruneArgs {
    /// GitHub API token
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// GitHub API endpoint (overrides `api_url` in the config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Repositories snapshotted concurrently
    #[arg(short, long, global = true, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..=64))]
    pub jobs: u16,

    /// Report only, regardless of the config's noop settings
    #[arg(long, global = true)]
    pub noop: bool,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match cli.command {
        None | Some(Command::Prune) => commands::prune(&cli.conf, &cli.prune, output_mode),
        Some(Command::Validate) => commands::validate(&cli.conf, output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION")
                    })
                );
            } else {
                println!("arborist v{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(())
        },
    }
}
