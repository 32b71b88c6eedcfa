//! Tests for the GitHub REST adapter against a local fake

use arborist::adapters::github::{GitHubClient, MAX_ATTEMPTS, PAGE_SIZE};
use arborist::core::models::RepositoryIdentity;
use arborist::core::ports::{Comparison, NullSink, RepositoryHost};
use arborist::core::services::{RunOptions, run};
use arborist::error::{HostOperation, UpstreamErrorKind};
use serde_json::json;
use tiny_http::Method;

use crate::fake_github::{FakeGitHub, Reply};

fn repo() -> RepositoryIdentity {
    RepositoryIdentity::new("org", "repo")
}

fn client(fake: &FakeGitHub) -> GitHubClient {
    GitHubClient::new(&fake.url(), "s3cret").unwrap()
}

// =============================================================================
// ENDPOINTS
// =============================================================================

#[test]
fn test_default_branch_from_repository() {
    let fake = FakeGitHub::start(|_, url, _| match url {
        "/repos/org/repo" => Reply::json(json!({"name": "repo", "default_branch": "develop"})),
        _ => Reply::status(404, r#"{"message": "Not Found"}"#),
    });

    let branch = client(&fake).default_branch(&repo()).unwrap();

    assert_eq!(branch, "develop");
}

#[test]
fn test_requests_are_authenticated() {
    let fake = FakeGitHub::start(|_, _, _| Reply::json(json!({"default_branch": "main"})));

    client(&fake).default_branch(&repo()).unwrap();

    let seen = fake.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].authorization.as_deref(), Some("Bearer s3cret"));
}

#[test]
fn test_list_branches_follows_pages() {
    let fake = FakeGitHub::start(|_, url, _| {
        let names: Vec<_> = if url.ends_with("page=1") {
            (0..PAGE_SIZE).map(|i| json!({"name": format!("b{i}")})).collect()
        } else if url.ends_with("page=2") {
            vec![json!({"name": "tail"}), json!({"name": "main"})]
        } else {
            Vec::new()
        };
        Reply::json(json!(names))
    });

    let names = client(&fake).list_branches(&repo()).unwrap();

    assert_eq!(names.len(), PAGE_SIZE + 2);
    assert_eq!(names.last().map(String::as_str), Some("main"));
    let urls: Vec<_> = fake.seen().into_iter().map(|s| s.url).collect();
    assert_eq!(
        urls,
        [
            "/repos/org/repo/branches?per_page=100&page=1",
            "/repos/org/repo/branches?per_page=100&page=2",
        ]
    );
}

#[test]
fn test_compare_keeps_branch_slashes() {
    let fake = FakeGitHub::start(|_, url, _| match url {
        "/repos/org/repo/compare/main...tickets/DM-1" => {
            Reply::json(json!({"status": "diverged", "ahead_by": 2, "behind_by": 7}))
        },
        _ => Reply::status(404, "{}"),
    });

    let comparison = client(&fake).compare(&repo(), "main", "tickets/DM-1").unwrap();

    assert_eq!(
        comparison,
        Comparison {
            ahead_by: 2,
            behind_by: 7
        }
    );
}

#[test]
fn test_delete_ref() {
    let fake = FakeGitHub::start(|method, url, _| {
        if *method == Method::Delete && url == "/repos/org/repo/git/refs/heads/old" {
            Reply::status(204, "")
        } else {
            Reply::status(404, "{}")
        }
    });

    client(&fake).delete_ref(&repo(), "heads/old").unwrap();

    assert_eq!(fake.seen()[0].method, "DELETE");
}

// =============================================================================
// ERRORS
// =============================================================================

#[test]
fn test_missing_repository_is_not_found() {
    let fake = FakeGitHub::start(|_, _, _| Reply::status(404, r#"{"message": "Not Found"}"#));

    let err = client(&fake).default_branch(&repo()).unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.operation, HostOperation::DefaultBranch);
}

#[test]
fn test_forbidden_without_limit_headers_is_unauthorized() {
    let fake = FakeGitHub::start(|_, _, _| {
        Reply::status(403, r#"{"message": "Resource not accessible"}"#)
            .header("x-ratelimit-remaining", 4000)
    });

    let err = client(&fake).delete_ref(&repo(), "heads/old").unwrap_err();

    assert_eq!(err.kind, UpstreamErrorKind::Unauthorized);
    assert_eq!(fake.seen().len(), 1);
}

#[test]
fn test_server_error_carries_message() {
    let fake = FakeGitHub::start(|_, _, _| Reply::status(502, r#"{"message": "Server Error"}"#));

    let err = client(&fake).list_branches(&repo()).unwrap_err();

    assert_eq!(
        err.kind,
        UpstreamErrorKind::Unexpected {
            status: 502,
            message: "Server Error".to_string()
        }
    );
}

#[test]
fn test_malformed_body_is_decode_error() {
    let fake = FakeGitHub::start(|_, _, _| Reply::status(200, "<html>"));

    let err = client(&fake).default_branch(&repo()).unwrap_err();

    assert!(matches!(err.kind, UpstreamErrorKind::Decode(_)));
}

#[test]
fn test_unreachable_host_is_transport_error() {
    let url = {
        let fake = FakeGitHub::start(|_, _, _| Reply::status(200, "{}"));
        fake.url()
    };
    let gh = GitHubClient::new(&url, "token").unwrap();

    let err = gh.default_branch(&repo()).unwrap_err();

    assert!(matches!(err.kind, UpstreamErrorKind::Transport(_)));
}

// =============================================================================
// RATE LIMITING
// =============================================================================

#[test]
fn test_rate_limit_is_retried() {
    let fake = FakeGitHub::start(|_, _, attempt| {
        if attempt == 1 {
            Reply::status(429, r#"{"message": "slow down"}"#).header("retry-after", 0)
        } else {
            Reply::json(json!({"default_branch": "main"}))
        }
    });

    let branch = client(&fake).default_branch(&repo()).unwrap();

    assert_eq!(branch, "main");
    assert_eq!(fake.seen().len(), 2);
}

#[test]
fn test_primary_limit_waits_for_reset() {
    let fake = FakeGitHub::start(|_, _, attempt| {
        if attempt == 1 {
            let now = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_secs();
            Reply::status(403, r#"{"message": "API rate limit exceeded"}"#)
                .header("x-ratelimit-remaining", 0)
                .header("x-ratelimit-reset", now - 5)
        } else {
            Reply::json(json!({"default_branch": "main"}))
        }
    });

    assert_eq!(client(&fake).default_branch(&repo()).unwrap(), "main");
}

#[test]
fn test_rate_limit_gives_up() {
    let fake = FakeGitHub::start(|_, _, _| Reply::status(429, "{}").header("retry-after", 0));

    let err = client(&fake).default_branch(&repo()).unwrap_err();

    assert_eq!(err.kind, UpstreamErrorKind::RateLimited);
    assert_eq!(fake.seen().len(), MAX_ATTEMPTS as usize);
}

// =============================================================================
// FULL RUN
// =============================================================================

#[test]
fn test_run_against_fake_fleet() {
    let fake = FakeGitHub::start(|method, url, _| {
        let path = url.split('?').next().unwrap_or(url);
        match (method, path) {
            (Method::Get, "/repos/org/a" | "/repos/org/b") => {
                Reply::json(json!({"default_branch": "main"}))
            },
            (Method::Get, "/repos/org/a/branches") => {
                Reply::json(json!([{"name": "main"}, {"name": "old"}, {"name": "live"}]))
            },
            (Method::Get, "/repos/org/b/branches") => {
                Reply::json(json!([{"name": "main"}, {"name": "old"}, {"name": "live"}]))
            },
            (Method::Get, "/repos/org/b/compare/main...live") => {
                Reply::json(json!({"ahead_by": 3, "behind_by": 0}))
            },
            (Method::Get, p) if p.contains("/compare/") => {
                Reply::json(json!({"ahead_by": 0, "behind_by": 4}))
            },
            (Method::Delete, "/repos/org/a/git/refs/heads/old" | "/repos/org/b/git/refs/heads/old") => {
                Reply::status(204, "")
            },
            _ => Reply::status(404, "{}"),
        }
    });
    let gh = client(&fake);
    let policy = arborist::config::ArboristConfig::from_yaml_str(
        "noop: false\nrepos:\n  - repo: org/a\n    noop: false\n  - repo: org/b\n    noop: false\n",
    )
    .unwrap()
    .fleet_policy()
    .unwrap();
    let options = RunOptions {
        global_noop: false,
        jobs: 2,
    };

    let report = run(
        &gh,
        &[RepositoryIdentity::new("org", "a"), RepositoryIdentity::new("org", "b")],
        &policy,
        options,
        &mut NullSink,
    )
    .unwrap();

    assert_eq!((report.branches, report.refs, report.deleted), (1, 2, 2));
    let deletes: Vec<_> = fake
        .seen()
        .into_iter()
        .filter(|s| s.method == "DELETE")
        .map(|s| s.url)
        .collect();
    assert_eq!(
        deletes,
        ["/repos/org/a/git/refs/heads/old", "/repos/org/b/git/refs/heads/old"]
    );
}
