//! GitHub adapter
//!
//! - `client` - [`GitHubClient`], the [`RepositoryHost`](crate::core::ports::RepositoryHost)
//!   implementation over the REST API
//! - `rate_limit` - Backoff on rate-limit responses, shared across threads

mod client;
pub mod rate_limit;

pub use client::{GitHubClient, MAX_ATTEMPTS, PAGE_SIZE};
