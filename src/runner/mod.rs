//! Drives one audit run: resolve the account, then audit each repository in order.

use crate::audit::{AccountResolver, EnvironmentAuditor};
use crate::auth::{AuthMethod, EnvCredentialProvider};
use crate::client::GitHubClient;
use crate::config::RunConfig;
use crate::errors::AuditError;
use crate::observability::MetricsSnapshot;
use crate::output::{CsvSink, RowSink};
use crate::types::AccountKind;
use tracing::info;

/// What a completed run did.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Account that was scanned.
    pub account: String,
    /// Detected account kind.
    pub kind: AccountKind,
    /// Repositories audited.
    pub repositories: usize,
    /// Rows written to the output.
    pub rows_written: usize,
    /// API calls that failed and were skipped, excluding the organization probe.
    pub skipped_calls: usize,
    /// Request counters.
    pub requests: MetricsSnapshot,
}

/// Reads the credential once, then runs the audit.
///
/// A missing credential fails before any request is made and before the
/// output file is created.
pub async fn run(
    config: &RunConfig,
    credentials: &EnvCredentialProvider,
) -> Result<RunSummary, AuditError> {
    let auth = credentials
        .get_auth()
        .map_err(|_| AuditError::MissingCredential(credentials.var_name().to_string()))?;
    run_with_auth(config, auth).await
}

/// Runs the audit with an already resolved credential.
pub async fn run_with_auth(config: &RunConfig, auth: AuthMethod) -> Result<RunSummary, AuditError> {
    info!(
        account = %config.account,
        output = %config.output.display(),
        api = %config.base_url,
        token = auth.token_prefix(),
        "Starting environment audit"
    );

    let client =
        GitHubClient::new(config.client_config(auth)).map_err(AuditError::Configuration)?;

    let resolution = AccountResolver::new(&client).resolve(&config.account).await;

    let mut sink = CsvSink::create(&config.output)?;
    let auditor = EnvironmentAuditor::new(&client);
    let mut skipped_calls = usize::from(resolution.stopped_by.is_some());

    for repository in &resolution.repositories {
        let audit = auditor.audit(repository, &mut sink).await?;
        skipped_calls += audit.skips.len();
    }
    sink.flush()?;

    let summary = RunSummary {
        account: resolution.account,
        kind: resolution.kind,
        repositories: resolution.repositories.len(),
        rows_written: sink.rows_written(),
        skipped_calls,
        requests: client.metrics(),
    };

    info!(
        account = %summary.account,
        kind = %summary.kind,
        repositories = summary.repositories,
        rows = summary.rows_written,
        skipped = summary.skipped_calls,
        requests = summary.requests.requests_total,
        failed_requests = summary.requests.requests_failed,
        "Environment audit finished"
    );

    Ok(summary)
}
