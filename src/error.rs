//! Error taxonomy for arborist
//!
//! Every error is terminal for the current run. Configuration problems stop
//! the run before any host call is made; upstream failures abort it because
//! a partial fleet snapshot cannot be classified safely.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::models::RepositoryIdentity;

/// Any error that terminates a run
#[derive(Debug, Error)]
pub enum ArboristError {
    /// Malformed or missing configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A repository host call failed
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// An exclusion pattern is not a valid regular expression
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("cannot read config file {path}: {source}")]
    Read {
        /// Path that was read
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// The config file is not valid YAML/TOML for the expected schema
    #[error("cannot parse config file {path}: {message}")]
    Parse {
        /// Path that was parsed
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// A repository entry is not of the form `org/name`
    #[error("invalid repository {0:?}, expected \"org/name\"")]
    InvalidRepository(String),

    /// The same repository is configured twice
    #[error("repository {0} is configured more than once")]
    DuplicateRepository(String),

    /// No API token was supplied
    #[error("GITHUB_TOKEN env var is not defined and --github-token was not given")]
    MissingToken,
}

/// An exclusion pattern that failed to compile
#[derive(Debug, Error)]
#[error("invalid exclude pattern {pattern:?}: {source}")]
pub struct PatternError {
    /// The offending pattern as configured
    pub pattern: String,
    /// Compiler error from the regex crate
    pub source: regex::Error,
}

/// Host API operations, used to name the failing call in errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOperation {
    /// Fetch repository metadata (default branch)
    DefaultBranch,
    /// List the repository's branches
    ListBranches,
    /// Compare two refs
    Compare,
    /// Delete a ref
    DeleteRef,
}

impl std::fmt::Display for HostOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DefaultBranch => write!(f, "get default branch"),
            Self::ListBranches => write!(f, "list branches"),
            Self::Compare => write!(f, "compare refs"),
            Self::DeleteRef => write!(f, "delete ref"),
        }
    }
}

/// Why a host call failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamErrorKind {
    /// Repository or ref does not exist
    #[error("not found")]
    NotFound,

    /// Token rejected or lacks permission
    #[error("unauthorized")]
    Unauthorized,

    /// Rate limit still exhausted after waiting
    #[error("rate limit exceeded")]
    RateLimited,

    /// Connection-level failure
    #[error("transport error: {0}")]
    Transport(String),

    /// Response body could not be decoded
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// Any other non-success status
    #[error("unexpected status {status}: {message}")]
    Unexpected {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },
}

/// A failed repository host call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} failed for {repo}: {kind}")]
pub struct UpstreamError {
    /// The call that failed
    pub operation: HostOperation,
    /// Repository the call targeted
    pub repo: RepositoryIdentity,
    /// Failure classification
    pub kind: UpstreamErrorKind,
}

impl UpstreamError {
    /// Create an upstream error
    #[must_use]
    pub const fn new(
        operation: HostOperation,
        repo: RepositoryIdentity,
        kind: UpstreamErrorKind,
    ) -> Self {
        Self {
            operation,
            repo,
            kind,
        }
    }

    /// Whether the failure means the repository or ref does not exist
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.kind, UpstreamErrorKind::NotFound)
    }
}
