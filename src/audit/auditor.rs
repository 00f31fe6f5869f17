use super::{Fetch, SkipReason, Stage};
use crate::client::GitHubClient;
use crate::errors::AuditError;
use crate::output::{OutputRow, RowSink};
use crate::types::{RepositoryName, Secret, Variable};
use tracing::info;

/// Secrets and variables fetched for one environment.
#[derive(Debug)]
pub struct EnvironmentAudit {
    /// Environment name.
    pub name: String,
    /// Secret listing outcome.
    pub secrets: Fetch<Vec<Secret>>,
    /// Variable listing outcome.
    pub variables: Fetch<Vec<Variable>>,
}

impl EnvironmentAudit {
    /// Rows for this environment: secrets first, then variables, each in API order.
    pub fn rows(&self, repository: &RepositoryName) -> Vec<OutputRow> {
        let secrets = self.secrets.fetched().into_iter().flatten();
        let variables = self.variables.fetched().into_iter().flatten();

        secrets
            .map(|secret| OutputRow::secret(repository, &self.name, &secret.name))
            .chain(variables.map(|variable| {
                OutputRow::variable(
                    repository,
                    &self.name,
                    &variable.name,
                    variable.value_or_default(),
                )
            }))
            .collect()
    }

    /// Consumes the audit and returns its skip reasons.
    fn into_skips(self) -> impl Iterator<Item = SkipReason> {
        let secrets = match self.secrets {
            Fetch::Skipped(reason) => Some(reason),
            Fetch::Fetched(_) => None,
        };
        let variables = match self.variables {
            Fetch::Skipped(reason) => Some(reason),
            Fetch::Fetched(_) => None,
        };
        secrets.into_iter().chain(variables)
    }
}

/// Everything recorded while auditing one repository.
#[derive(Debug)]
pub struct RepositoryAudit {
    /// Repository that was audited.
    pub repository: RepositoryName,
    /// Environment names in listing order.
    pub environments: Vec<String>,
    /// Rows in output order.
    pub rows: Vec<OutputRow>,
    /// Calls that failed and were skipped.
    pub skips: Vec<SkipReason>,
}

impl RepositoryAudit {
    /// Number of secret rows.
    pub fn secret_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| matches!(row, OutputRow::Secret { .. }))
            .count()
    }

    /// Number of variable rows.
    pub fn variable_count(&self) -> usize {
        self.rows.len() - self.secret_count()
    }
}

/// Lists the secrets and variables of every deployment environment of a repository.
pub struct EnvironmentAuditor<'a> {
    client: &'a GitHubClient,
}

impl<'a> EnvironmentAuditor<'a> {
    /// Creates an auditor using `client` and its credential.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Fetches secrets and variables of one environment. The variables call
    /// is made whether or not the secrets call succeeded.
    pub async fn audit_environment(
        &self,
        repository: &RepositoryName,
        environment: &str,
    ) -> EnvironmentAudit {
        let environments = self.client.environments();
        let subject = format!("{}/{}", repository, environment);

        let secrets = Fetch::from_result(
            Stage::Secrets,
            subject.clone(),
            environments.list_secrets(repository, environment).await,
        );
        let variables = Fetch::from_result(
            Stage::Variables,
            subject,
            environments.list_variables(repository, environment).await,
        );

        EnvironmentAudit {
            name: environment.to_string(),
            secrets,
            variables,
        }
    }

    /// Audits a repository without writing anything.
    ///
    /// A failed environment listing yields an audit with no environments,
    /// no rows and one skip.
    pub async fn collect(&self, repository: &RepositoryName) -> RepositoryAudit {
        info!(repository = %repository, "Attempting to dump config");

        let mut audit = RepositoryAudit {
            repository: repository.clone(),
            environments: Vec::new(),
            rows: Vec::new(),
            skips: Vec::new(),
        };

        let listing = Fetch::from_result(
            Stage::Environments,
            repository.as_str(),
            self.client.environments().list(repository).await,
        );
        let environments = match listing {
            Fetch::Fetched(environments) => environments,
            Fetch::Skipped(reason) => {
                audit.skips.push(reason);
                return audit;
            }
        };

        for environment in environments {
            let environment_audit = self.audit_environment(repository, &environment.name).await;
            audit.rows.extend(environment_audit.rows(repository));
            audit.skips.extend(environment_audit.into_skips());
            audit.environments.push(environment.name);
        }

        audit
    }

    /// Audits a repository and appends its rows to `sink`, in order.
    ///
    /// API failures never fail this call; only a sink write error does.
    pub async fn audit(
        &self,
        repository: &RepositoryName,
        sink: &mut dyn RowSink,
    ) -> Result<RepositoryAudit, AuditError> {
        let audit = self.collect(repository).await;

        for row in &audit.rows {
            sink.write_row(row)?;
        }
        sink.flush()?;

        info!(
            repository = %repository,
            environments = audit.environments.len(),
            secrets = audit.secret_count(),
            variables = audit.variable_count(),
            skipped = audit.skips.len(),
            "Results added to output"
        );

        Ok(audit)
    }
}
