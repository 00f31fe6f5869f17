//! End-to-end runs writing a CSV file.

mod common;

use common::*;
use github_env_audit::output::read_rows;
use github_env_audit::runner::{run, run_with_auth};
use github_env_audit::{
    AccountKind, AuditError, AuthMethod, EnvCredentialProvider, OutputRow, RepositoryName,
    RunConfig,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::MockServer;

async fn mount_account(server: &MockServer) {
    mount_json(server, "/orgs/acme", 200, json!({ "login": "acme" })).await;
    mount_page(
        server,
        "/orgs/acme/repos",
        1,
        200,
        json!([{ "full_name": "acme/api" }, { "full_name": "acme/web" }, { "full_name": "acme/docs" }]),
    )
    .await;
    mount_page(server, "/orgs/acme/repos", 2, 200, json!([])).await;

    mount_json(server, "/repos/acme/api/environments", 200, environments(&["production"])).await;
    mount_json(
        server,
        "/repos/acme/api/environments/production/secrets",
        200,
        secrets(&["DB_PASSWORD"]),
    )
    .await;
    mount_json(
        server,
        "/repos/acme/api/environments/production/variables",
        200,
        variables(&[("REGION", "eu-west-1")]),
    )
    .await;

    // acme/web has no access to environments; acme/docs has none.
    mount_json(server, "/repos/acme/web/environments", 403, error_body("Forbidden")).await;
    mount_json(server, "/repos/acme/docs/environments", 200, environments(&[])).await;
}

#[tokio::test]
async fn test_run_writes_all_repositories() {
    let server = MockServer::start().await;
    mount_account(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("audit.csv");
    let config = RunConfig::new("acme", &output).with_base_url(server.uri());

    let summary = run_with_auth(&config, AuthMethod::pat(TOKEN)).await.unwrap();

    assert_eq!(summary.kind, AccountKind::Organization);
    assert_eq!(summary.repositories, 3);
    assert_eq!(summary.rows_written, 2);
    assert_eq!(summary.skipped_calls, 1);
    assert_eq!(summary.requests.requests_failed, 1);

    let contents = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        contents,
        "SECRET,acme/api,production,DB_PASSWORD\r\nVARIABLE,acme/api,production,REGION,eu-west-1\r\n"
    );

    let api = RepositoryName::new("acme/api");
    assert_eq!(
        read_rows(contents.as_bytes()).unwrap(),
        vec![
            OutputRow::secret(&api, "production", "DB_PASSWORD"),
            OutputRow::variable(&api, "production", "REGION", "eu-west-1"),
        ]
    );
}

#[tokio::test]
async fn test_run_truncates_existing_output() {
    let server = MockServer::start().await;
    mount_json(&server, "/orgs/empty", 200, json!({ "login": "empty" })).await;
    mount_page(&server, "/orgs/empty/repos", 1, 200, json!([])).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("audit.csv");
    std::fs::write(&output, "SECRET,old/repo,prod,STALE\r\n").unwrap();

    let config = RunConfig::new("empty", &output).with_base_url(server.uri());
    let summary = run_with_auth(&config, AuthMethod::pat(TOKEN)).await.unwrap();

    assert_eq!(summary.repositories, 0);
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "");
}

#[tokio::test]
async fn test_missing_credential_touches_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("audit.csv");
    // Unreachable on purpose: the run must stop before any request.
    let config = RunConfig::new("acme", &output).with_base_url("http://127.0.0.1:9");
    let credentials = EnvCredentialProvider::from_env_var("GITHUB_ENV_AUDIT_RUNNER_TEST_UNSET");

    let err = run(&config, &credentials).await.unwrap_err();

    assert!(matches!(err, AuditError::MissingCredential(ref var) if var == "GITHUB_ENV_AUDIT_RUNNER_TEST_UNSET"));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_unwritable_output_is_fatal() {
    let server = MockServer::start().await;
    mount_json(&server, "/orgs/acme", 200, json!({ "login": "acme" })).await;
    mount_page(&server, "/orgs/acme/repos", 1, 200, json!([])).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("missing").join("audit.csv");
    let config = RunConfig::new("acme", &output).with_base_url(server.uri());

    let err = run_with_auth(&config, AuthMethod::pat(TOKEN)).await.unwrap_err();

    assert!(matches!(err, AuditError::OpenOutput { .. }));
}

#[tokio::test]
async fn test_invalid_base_url_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = RunConfig::new("acme", dir.path().join("audit.csv")).with_base_url("ftp://example.com");

    let err = run_with_auth(&config, AuthMethod::pat(TOKEN)).await.unwrap_err();

    assert!(matches!(err, AuditError::Configuration(_)));
}
