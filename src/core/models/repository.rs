//! Repository identity and per-repository policy

use serde::{Serialize, Serializer};

use super::ExcludeRules;
use crate::error::ConfigError;

/// The `(organization, name)` pair that uniquely identifies a repository
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RepositoryIdentity {
    organization: String,
    name: String,
}

impl RepositoryIdentity {
    /// Create an identity from its two components
    #[must_use]
    pub fn new(organization: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            name: name.into(),
        }
    }

    /// Organization (or user) owning the repository
    #[must_use]
    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// Repository name within the organization
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::str::FromStr for RepositoryIdentity {
    type Err = ConfigError;

    /// Parse `"org/name"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidRepository(s.to_string());

        let (organization, name) = s.split_once('/').ok_or_else(invalid)?;
        let valid_part = |part: &str| !part.is_empty() && !part.contains(['/', ' ', '\t']);
        if !valid_part(organization) || !valid_part(name) {
            return Err(invalid());
        }

        Ok(Self::new(organization, name))
    }
}

impl std::fmt::Display for RepositoryIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.organization, self.name)
    }
}

impl Serialize for RepositoryIdentity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Policy applied to a single repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryPolicy {
    /// Suppress deletions in this repository even when the global policy allows them
    pub noop: bool,

    /// Patterns excluding branch names in this repository only
    pub exclude: ExcludeRules,
}

impl Default for RepositoryPolicy {
    fn default() -> Self {
        Self {
            noop: true,
            exclude: ExcludeRules::default(),
        }
    }
}

impl RepositoryPolicy {
    /// Policy with the given noop flag and no repository-local patterns
    #[must_use]
    pub fn with_noop(noop: bool) -> Self {
        Self {
            noop,
            exclude: ExcludeRules::default(),
        }
    }
}
