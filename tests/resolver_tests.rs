//! Account resolution against a mock GitHub API.

mod common;

use common::*;
use github_env_audit::{AccountKind, AccountResolver, GitHubClient, RepositoryName, Stage};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_organization_uses_org_listing() {
    let server = MockServer::start().await;
    mount_json(&server, "/orgs/acme", 200, json!({ "login": "acme", "id": 1 })).await;
    mount_page(&server, "/orgs/acme/repos", 1, 200, repo_page("acme", 0, 2)).await;
    mount_page(&server, "/orgs/acme/repos", 2, 200, json!([])).await;
    Mock::given(method("GET"))
        .and(path("/users/acme/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let resolution = AccountResolver::new(&client).resolve("acme").await;

    assert_eq!(resolution.kind, AccountKind::Organization);
    assert_eq!(
        resolution.repositories,
        vec![RepositoryName::new("acme/repo-000"), RepositoryName::new("acme/repo-001")]
    );
    assert!(resolution.probe_failure.is_none());
    assert!(resolution.stopped_by.is_none());
}

#[tokio::test]
async fn test_failed_org_probe_falls_back_to_user() {
    let server = MockServer::start().await;
    mount_json(&server, "/orgs/octocat", 404, error_body("Not Found")).await;
    mount_page(&server, "/users/octocat/repos", 1, 200, repo_page("octocat", 0, 1)).await;
    mount_page(&server, "/users/octocat/repos", 2, 200, json!([])).await;
    Mock::given(method("GET"))
        .and(path("/orgs/octocat/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let resolution = AccountResolver::new(&client).resolve("octocat").await;

    assert_eq!(resolution.kind, AccountKind::User);
    assert_eq!(resolution.repositories, vec![RepositoryName::new("octocat/repo-000")]);
    let probe = resolution.probe_failure.expect("probe failure recorded");
    assert_eq!(probe.stage, Stage::OrganizationProbe);
    assert_eq!(probe.status(), Some(404));
    assert_eq!(probe.subject, "octocat");
    assert!(probe.error.body().unwrap_or_default().contains("Not Found"));
}

#[tokio::test]
async fn test_server_error_on_probe_is_not_an_organization() {
    let server = MockServer::start().await;
    mount_json(&server, "/orgs/flaky", 500, error_body("Server Error")).await;
    mount_page(&server, "/users/flaky/repos", 1, 200, json!([])).await;

    let client = client_for(&server);
    let (kind, reason) = AccountResolver::new(&client).detect_kind("flaky").await;

    assert_eq!(kind, AccountKind::User);
    assert_eq!(reason.and_then(|r| r.status()), Some(500));
}

#[tokio::test]
async fn test_full_pages_until_empty_page() {
    let server = MockServer::start().await;
    mount_json(&server, "/orgs/acme", 200, json!({ "login": "acme" })).await;
    mount_page(&server, "/orgs/acme/repos", 1, 200, repo_page("acme", 0, 100)).await;
    mount_page(&server, "/orgs/acme/repos", 2, 200, repo_page("acme", 100, 100)).await;
    mount_page(&server, "/orgs/acme/repos", 3, 200, json!([])).await;

    let client = client_for(&server);
    let resolution = AccountResolver::new(&client).resolve("acme").await;

    assert_eq!(resolution.repositories.len(), 200);
    assert_eq!(resolution.pages_fetched, 2);
    let expected: Vec<RepositoryName> = (0..200)
        .map(|i| RepositoryName::new(format!("acme/repo-{i:03}")))
        .collect();
    assert_eq!(resolution.repositories, expected);
    assert!(resolution.stopped_by.is_none());
}

#[tokio::test]
async fn test_failed_page_keeps_earlier_pages() {
    let server = MockServer::start().await;
    mount_json(&server, "/orgs/acme", 200, json!({ "login": "acme" })).await;
    mount_page(&server, "/orgs/acme/repos", 1, 200, repo_page("acme", 0, 100)).await;
    mount_page(&server, "/orgs/acme/repos", 2, 502, error_body("Bad Gateway")).await;

    let client = client_for(&server);
    let resolution = AccountResolver::new(&client).resolve("acme").await;

    assert_eq!(resolution.repositories.len(), 100);
    assert_eq!(resolution.repositories[99], RepositoryName::new("acme/repo-099"));
    let stopped = resolution.stopped_by.expect("listing failure recorded");
    assert_eq!(stopped.stage, Stage::RepositoryListing);
    assert_eq!(stopped.status(), Some(502));
    assert!(stopped.error.body().unwrap_or_default().contains("Bad Gateway"));
}

#[tokio::test]
async fn test_unknown_account_resolves_to_nothing() {
    // Nothing mounted: every request is answered with 404.
    let server = MockServer::start().await;

    let client = client_for(&server);
    let resolution = AccountResolver::new(&client).resolve("ghost").await;

    assert_eq!(resolution.kind, AccountKind::User);
    assert!(resolution.repositories.is_empty());
    assert_eq!(resolution.stopped_by.and_then(|r| r.status()), Some(404));
}

#[tokio::test]
async fn test_transport_failure_is_treated_like_an_error_status() {
    // Nothing listens on port 9; requests fail before any response.
    let client = GitHubClient::builder()
        .pat(TOKEN)
        .base_url("http://127.0.0.1:9")
        .build()
        .unwrap();

    let resolution = AccountResolver::new(&client).resolve("acme").await;

    assert_eq!(resolution.kind, AccountKind::User);
    assert!(resolution.repositories.is_empty());
    let stopped = resolution.stopped_by.expect("transport failure recorded");
    assert!(stopped.error.is_transport());
    assert_eq!(stopped.status(), None);
}
