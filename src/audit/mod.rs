//! Account resolution and environment auditing.
//!
//! Every API call made here follows the same policy: a failure (HTTP
//! status or transport) is logged, recorded as a [`SkipReason`], and
//! treated as "no results" for that item. Nothing is retried.

mod auditor;
mod resolver;

pub use auditor::{EnvironmentAudit, EnvironmentAuditor, RepositoryAudit};
pub use resolver::{AccountResolver, Resolution};

use crate::errors::GitHubError;
use std::fmt;
use tracing::warn;

/// The kind of call that was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// `GET /orgs/{account}`.
    OrganizationProbe,
    /// `GET /{orgs|users}/{account}/repos`.
    RepositoryListing,
    /// `GET /repos/{repo}/environments`.
    Environments,
    /// `GET /repos/{repo}/environments/{env}/secrets`.
    Secrets,
    /// `GET /repos/{repo}/environments/{env}/variables`.
    Variables,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OrganizationProbe => "organization probe",
            Self::RepositoryListing => "repositories",
            Self::Environments => "environments",
            Self::Secrets => "secrets",
            Self::Variables => "variables",
        };
        f.write_str(name)
    }
}

/// An API call whose failure was turned into an empty result.
#[derive(Debug)]
pub struct SkipReason {
    /// What was being fetched.
    pub stage: Stage,
    /// Account, repository, or `repository/environment` the call was for.
    pub subject: String,
    /// The failure.
    pub error: GitHubError,
}

impl SkipReason {
    /// Creates a skip reason.
    pub fn new(stage: Stage, subject: impl Into<String>, error: GitHubError) -> Self {
        Self {
            stage,
            subject: subject.into(),
            error,
        }
    }

    /// HTTP status of the failed call, if a response was received.
    pub fn status(&self) -> Option<u16> {
        self.error.status_code()
    }

    /// Logs the skip with its status code and response body.
    pub fn log(&self) {
        warn!(
            stage = %self.stage,
            subject = %self.subject,
            status = ?self.status(),
            body = self.error.body().unwrap_or_default(),
            error = %self.error,
            "Error retrieving {}", self.stage
        );
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} for {}: {}", self.stage, self.subject, self.error)
    }
}

/// Outcome of one listing call.
#[derive(Debug)]
pub enum Fetch<T> {
    /// The call succeeded.
    Fetched(T),
    /// The call failed and was skipped.
    Skipped(SkipReason),
}

impl<T> Fetch<T> {
    /// Converts a call result, logging the failure if there is one.
    pub fn from_result(
        stage: Stage,
        subject: impl Into<String>,
        result: Result<T, GitHubError>,
    ) -> Self {
        match result {
            Ok(value) => Self::Fetched(value),
            Err(error) => {
                let reason = SkipReason::new(stage, subject, error);
                reason.log();
                Self::Skipped(reason)
            }
        }
    }

    /// The fetched value, if any.
    pub fn fetched(&self) -> Option<&T> {
        match self {
            Self::Fetched(value) => Some(value),
            Self::Skipped(_) => None,
        }
    }

    /// The skip reason, if the call failed.
    pub fn skipped(&self) -> Option<&SkipReason> {
        match self {
            Self::Fetched(_) => None,
            Self::Skipped(reason) => Some(reason),
        }
    }
}
