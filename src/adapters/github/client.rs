//! Blocking GitHub REST client implementing [`RepositoryHost`]

use std::time::{Duration, SystemTime};

use anyhow::{Context, bail};
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::rate_limit::{RateLimitGate, RateLimitHeaders};
use crate::core::models::RepositoryIdentity;
use crate::core::ports::{Comparison, RepositoryHost};
use crate::error::{HostOperation, UpstreamError, UpstreamErrorKind};

/// Attempts per request while rate limited
pub const MAX_ATTEMPTS: u32 = 5;

/// Branches requested per page
pub const PAGE_SIZE: usize = 100;

const API_VERSION: &str = "2022-11-28";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct RepositoryResponse {
    default_branch: String,
}

#[derive(Debug, Deserialize)]
struct BranchResponse {
    name: String,
}

#[derive(Debug, Deserialize)]
struct CompareResponse {
    ahead_by: u32,
    behind_by: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

/// GitHub API client
///
/// Safe to share between threads; all requests go through one rate-limit gate.
#[derive(Debug)]
pub struct GitHubClient {
    http: Client,
    base_url: Url,
    token: String,
    gate: RateLimitGate,
}

impl GitHubClient {
    /// Create a client for `api_url` authenticating with `token`
    pub fn new(api_url: &str, token: impl Into<String>) -> anyhow::Result<Self> {
        let base_url =
            Url::parse(api_url).with_context(|| format!("invalid API URL {api_url:?}"))?;
        if base_url.cannot_be_a_base() {
            bail!("invalid API URL {api_url:?}");
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));

        let http = Client::builder()
            .user_agent(concat!("arborist/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url,
            token: token.into(),
            gate: RateLimitGate::new(),
        })
    }

    /// The API endpoint this client talks to
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/repos/{org}/{name}/{path...}`
    ///
    /// `path` is split on `/` and each segment percent-encoded, so branch
    /// names containing slashes keep them as separators.
    fn endpoint(&self, repo: &RepositoryIdentity, path: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push("repos")
                .push(repo.organization())
                .push(repo.name());
            if !path.is_empty() {
                segments.extend(path.split('/'));
            }
        }
        url
    }

    fn send(
        &self,
        operation: HostOperation,
        repo: &RepositoryIdentity,
        method: &Method,
        url: &Url,
    ) -> Result<Response, UpstreamError> {
        let fail = |kind| UpstreamError::new(operation, repo.clone(), kind);

        for attempt in 1..=MAX_ATTEMPTS {
            self.gate.wait();
            log::debug!("{method} {url}");

            let response = self
                .http
                .request(method.clone(), url.clone())
                .bearer_auth(&self.token)
                .send()
                .map_err(|e| fail(UpstreamErrorKind::Transport(e.to_string())))?;

            let status = response.status();
            if status.is_success() {
                return Ok(response);
            }

            let limits = RateLimitHeaders::from_headers(response.headers());
            if let Some(wait) = limits.backoff(status.as_u16(), SystemTime::now()) {
                if attempt == MAX_ATTEMPTS {
                    break;
                }
                log::warn!(
                    "rate limited during {operation} for {repo}, waiting {}s until {} (attempt {attempt}/{MAX_ATTEMPTS})",
                    wait.as_secs(),
                    resume_time(wait)
                );
                self.gate.pause_for(wait);
                continue;
            }

            return Err(fail(error_kind(status, response)));
        }

        Err(fail(UpstreamErrorKind::RateLimited))
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        operation: HostOperation,
        repo: &RepositoryIdentity,
        url: &Url,
    ) -> Result<T, UpstreamError> {
        self.send(operation, repo, &Method::GET, url)?.json().map_err(|e| {
            UpstreamError::new(operation, repo.clone(), UpstreamErrorKind::Decode(e.to_string()))
        })
    }
}

impl RepositoryHost for GitHubClient {
    fn default_branch(&self, repo: &RepositoryIdentity) -> Result<String, UpstreamError> {
        let url = self.endpoint(repo, "");
        let response: RepositoryResponse =
            self.get_json(HostOperation::DefaultBranch, repo, &url)?;
        Ok(response.default_branch)
    }

    fn list_branches(&self, repo: &RepositoryIdentity) -> Result<Vec<String>, UpstreamError> {
        let mut names = Vec::new();
        for page in 1.. {
            let mut url = self.endpoint(repo, "branches");
            url.query_pairs_mut()
                .append_pair("per_page", &PAGE_SIZE.to_string())
                .append_pair("page", &page.to_string());

            let batch: Vec<BranchResponse> =
                self.get_json(HostOperation::ListBranches, repo, &url)?;
            let last = batch.len() < PAGE_SIZE;
            names.extend(batch.into_iter().map(|b| b.name));
            if last {
                break;
            }
        }
        Ok(names)
    }

    fn compare(
        &self,
        repo: &RepositoryIdentity,
        base: &str,
        head: &str,
    ) -> Result<Comparison, UpstreamError> {
        let url = self.endpoint(repo, &format!("compare/{base}...{head}"));
        let response: CompareResponse = self.get_json(HostOperation::Compare, repo, &url)?;
        Ok(Comparison {
            ahead_by: response.ahead_by,
            behind_by: response.behind_by,
        })
    }

    fn delete_ref(&self, repo: &RepositoryIdentity, reference: &str) -> Result<(), UpstreamError> {
        let url = self.endpoint(repo, &format!("git/refs/{reference}"));
        self.send(HostOperation::DeleteRef, repo, &Method::DELETE, &url)?;
        Ok(())
    }
}

fn error_kind(status: StatusCode, response: Response) -> UpstreamErrorKind {
    match status {
        StatusCode::NOT_FOUND => UpstreamErrorKind::NotFound,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => UpstreamErrorKind::Unauthorized,
        _ => {
            let body = response.text().unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            UpstreamErrorKind::Unexpected {
                status: status.as_u16(),
                message,
            }
        },
    }
}

fn resume_time(wait: Duration) -> String {
    chrono::Duration::from_std(wait).map_or_else(
        |_| "later".to_string(),
        |delta| (chrono::Local::now() + delta).format("%H:%M:%S").to_string(),
    )
}
