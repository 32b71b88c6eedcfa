//! GitHub rate-limit handling
//!
//! Every request made by one [`GitHubClient`](super::GitHubClient) passes
//! through a single [`RateLimitGate`]. When a response says the quota is
//! exhausted, the gate closes until the reset time and all callers wait.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use reqwest::header::HeaderMap;

/// Longest single wait honoured; GitHub resets primary quotas hourly
pub const MAX_WAIT: Duration = Duration::from_secs(60 * 60);

/// Wait used when a limit response carries no usable timing headers
pub const FALLBACK_WAIT: Duration = Duration::from_secs(60);

/// Rate-limit related response headers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimitHeaders {
    /// `retry-after`, seconds
    pub retry_after: Option<u64>,
    /// `x-ratelimit-remaining`
    pub remaining: Option<u64>,
    /// `x-ratelimit-reset`, unix seconds
    pub reset: Option<u64>,
}

impl RateLimitHeaders {
    /// Extract the headers from a response
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let number = |name: &str| -> Option<u64> {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok())
        };
        Self {
            retry_after: number("retry-after"),
            remaining: number("x-ratelimit-remaining"),
            reset: number("x-ratelimit-reset"),
        }
    }

    /// How long to wait before retrying, if `status` is a rate-limit response
    ///
    /// Primary limits are 403/429 with `x-ratelimit-remaining: 0`; secondary
    /// limits carry `retry-after`. Any other 403 is a permission problem.
    #[must_use]
    pub fn backoff(&self, status: u16, now: SystemTime) -> Option<Duration> {
        if status != 403 && status != 429 {
            return None;
        }

        if let Some(seconds) = self.retry_after {
            return Some(Duration::from_secs(seconds).min(MAX_WAIT));
        }

        if self.remaining == Some(0) {
            let wait = self.reset.map_or(FALLBACK_WAIT, |reset| {
                let now = now.duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();
                // One extra second so the retry lands after the reset
                Duration::from_secs(reset.saturating_sub(now) + 1)
            });
            return Some(wait.min(MAX_WAIT));
        }

        (status == 429).then_some(FALLBACK_WAIT)
    }
}

/// Shared pause point for all requests of one client
#[derive(Debug, Default)]
pub struct RateLimitGate {
    resume_at: Mutex<Option<Instant>>,
}

impl RateLimitGate {
    /// Create an open gate
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the gate for at least `wait`
    pub fn pause_for(&self, wait: Duration) {
        let until = Instant::now() + wait;
        let mut resume_at = self.resume_at.lock().unwrap_or_else(PoisonError::into_inner);
        if resume_at.is_none_or(|current| current < until) {
            *resume_at = Some(until);
        }
    }

    /// Time left until the gate opens
    #[must_use]
    pub fn remaining(&self) -> Duration {
        let resume_at = self.resume_at.lock().unwrap_or_else(PoisonError::into_inner);
        resume_at.map_or(Duration::ZERO, |until| until.saturating_duration_since(Instant::now()))
    }

    /// Block until the gate is open
    pub fn wait(&self) {
        let remaining = self.remaining();
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
    }
}
