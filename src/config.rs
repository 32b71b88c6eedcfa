//! Run configuration
//!
//! Loaded from `.arborist.yaml` by default. A path ending in `.toml` is read
//! as TOML instead; both formats share one schema:
//!
//! ```yaml
//! noop: false
//! exclude_patterns:
//!   - ^release-
//! repos:
//!   - repo: lsst/afw
//!     noop: false
//!   - repo: lsst/daf_butler
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::core::models::{
    ExcludeRules, FleetPolicy, GlobalPolicy, RepositoryIdentity, RepositoryPolicy,
};
use crate::error::{ArboristError, ConfigError};

/// Default config file name
pub const DEFAULT_CONFIG_FILE: &str = ".arborist.yaml";

/// Default GitHub API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Top-level configuration file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArboristConfig {
    /// Repositories in the fleet, in processing order
    #[serde(default)]
    pub repos: Vec<RepoConfig>,

    /// Regular expressions excluding branch names in every repository
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// Report only; never delete
    #[serde(default = "default_noop")]
    pub noop: bool,

    /// Host API endpoint (GitHub Enterprise installs)
    #[serde(default)]
    pub api_url: Option<String>,
}

/// One repository entry
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepoConfig {
    /// `org/name`
    #[serde(rename = "repo")]
    pub full_name: String,

    /// Suppress deletions in this repository
    #[serde(default = "default_noop")]
    pub noop: bool,

    /// Patterns excluding branch names in this repository only
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

const fn default_noop() -> bool {
    true
}

impl Default for ArboristConfig {
    fn default() -> Self {
        Self {
            repos: Vec::new(),
            exclude_patterns: Vec::new(),
            noop: default_noop(),
            api_url: None,
        }
    }
}

impl ArboristConfig {
    /// Load a config file, choosing the format from its extension
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let parsed = if path.extension().is_some_and(|ext| ext == "toml") {
            Self::from_toml_str(&content)
        } else {
            Self::from_yaml_str(&content)
        };
        parsed.map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse YAML content
    pub fn from_yaml_str(content: &str) -> Result<Self, String> {
        // An empty YAML document deserializes as unit, not as an empty map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }

    /// Parse TOML content
    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Configured API endpoint, or the public GitHub API
    #[must_use]
    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    /// Repository identities in configuration order
    ///
    /// Fails on a malformed or duplicated entry. GitHub names are
    /// case-insensitive, so `org/a` and `ORG/a` are duplicates.
    pub fn identities(&self) -> Result<Vec<RepositoryIdentity>, ConfigError> {
        let mut seen = std::collections::BTreeSet::new();
        self.repos
            .iter()
            .map(|repo| {
                let identity: RepositoryIdentity = repo.full_name.parse()?;
                if !seen.insert(identity.to_string().to_ascii_lowercase()) {
                    return Err(ConfigError::DuplicateRepository(identity.to_string()));
                }
                Ok(identity)
            })
            .collect()
    }

    /// Compile the fleet policy
    ///
    /// Every exclusion pattern is compiled here, before any host call.
    pub fn fleet_policy(&self) -> Result<FleetPolicy, ArboristError> {
        let global = GlobalPolicy {
            global_noop: self.noop,
            exclude: ExcludeRules::compile(&self.exclude_patterns)?,
        };

        let mut repos = BTreeMap::new();
        for (identity, repo) in self.identities()?.into_iter().zip(&self.repos) {
            let policy = RepositoryPolicy {
                noop: repo.noop,
                exclude: ExcludeRules::compile(&repo.exclude_patterns)?,
            };
            repos.insert(identity, policy);
        }

        Ok(FleetPolicy::new(global, repos))
    }
}
