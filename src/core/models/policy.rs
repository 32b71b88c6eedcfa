//! Exclusion rules and fleet-wide policy

use std::collections::BTreeMap;

use regex::Regex;

use super::{RepositoryIdentity, RepositoryPolicy};
use crate::error::PatternError;

/// A compiled exclusion pattern
#[derive(Debug, Clone)]
pub struct ExcludePattern {
    /// Pattern as written in the configuration
    pattern: String,

    /// Compiled regex, matched unanchored
    regex: Regex,
}

impl PartialEq for ExcludePattern {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Eq for ExcludePattern {}

impl ExcludePattern {
    /// Compile a pattern
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let regex = Regex::new(pattern).map_err(|source| PatternError {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// The pattern source
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Whether the pattern matches anywhere in `branch`
    #[must_use]
    pub fn is_match(&self, branch: &str) -> bool {
        self.regex.is_match(branch)
    }
}

/// An ordered list of exclusion patterns
///
/// A branch is excluded when any pattern matches; order only decides which
/// pattern gets reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludeRules(Vec<ExcludePattern>);

impl ExcludeRules {
    /// Compile all patterns, failing on the first invalid one
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Self, PatternError> {
        patterns
            .iter()
            .map(|p| ExcludePattern::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// First pattern matching `branch`, if any
    #[must_use]
    pub fn first_match(&self, branch: &str) -> Option<&ExcludePattern> {
        self.0.iter().find(|p| p.is_match(branch))
    }

    /// Whether there are no patterns
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the patterns in configuration order
    pub fn iter(&self) -> impl Iterator<Item = &ExcludePattern> {
        self.0.iter()
    }
}

/// Policy shared by every repository in the fleet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalPolicy {
    /// Report only; never call the ref-deletion endpoint
    pub global_noop: bool,

    /// Patterns excluding branch names in every repository
    pub exclude: ExcludeRules,
}

impl Default for GlobalPolicy {
    fn default() -> Self {
        Self {
            global_noop: true,
            exclude: ExcludeRules::default(),
        }
    }
}

/// Global policy plus the per-repository policies of the fleet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FleetPolicy {
    /// Fleet-wide settings
    pub global: GlobalPolicy,

    /// Per-repository settings; absent repositories get the safe default
    pub repos: BTreeMap<RepositoryIdentity, RepositoryPolicy>,
}

impl FleetPolicy {
    /// Create a policy from its parts
    #[must_use]
    pub const fn new(
        global: GlobalPolicy,
        repos: BTreeMap<RepositoryIdentity, RepositoryPolicy>,
    ) -> Self {
        Self { global, repos }
    }

    /// Whether deletions in `repo` are suppressed
    ///
    /// Unknown repositories are treated as noop.
    #[must_use]
    pub fn is_noop(&self, repo: &RepositoryIdentity) -> bool {
        self.repos.get(repo).is_none_or(|p| p.noop)
    }

    /// The pattern excluding `branch` in `repo`, global patterns first
    #[must_use]
    pub fn excluded_by(&self, repo: &RepositoryIdentity, branch: &str) -> Option<&ExcludePattern> {
        self.global
            .exclude
            .first_match(branch)
            .or_else(|| self.repos.get(repo).and_then(|p| p.exclude.first_match(branch)))
    }
}
