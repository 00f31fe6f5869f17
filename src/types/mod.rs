//! Response models for the endpoints the audit reads.
//!
//! Only the fields the audit needs are required; everything else the API
//! may or may not send is optional so that unexpected omissions degrade to
//! defaults instead of failing deserialization.

use crate::pagination::CountedList;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether an account is an organization or a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// Organization account.
    Organization,
    /// Individual user account.
    User,
}

impl AccountKind {
    /// Path prefix of this kind's REST resources (`orgs` or `users`).
    pub fn path_prefix(&self) -> &'static str {
        match self {
            Self::Organization => "orgs",
            Self::User => "users",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Organization => f.write_str("organization"),
            Self::User => f.write_str("user"),
        }
    }
}

/// Repository full name (`owner/name`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepositoryName(String);

impl RepositoryName {
    /// Wraps a full name as returned by the API.
    pub fn new(full_name: impl Into<String>) -> Self {
        Self(full_name.into())
    }

    /// The full name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path segments of the full name (`["owner", "name"]`).
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }
}

impl fmt::Display for RepositoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RepositoryName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Repository entry of a repository listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    /// Full name (owner/repo).
    pub full_name: RepositoryName,
    /// Repository ID.
    #[serde(default)]
    pub id: Option<u64>,
    /// Repository name.
    #[serde(default)]
    pub name: Option<String>,
    /// Whether the repository is private.
    #[serde(default)]
    pub private: Option<bool>,
    /// Whether the repository is archived.
    #[serde(default)]
    pub archived: Option<bool>,
}

/// Deployment environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    /// Environment name.
    pub name: String,
    /// Environment ID.
    #[serde(default)]
    pub id: Option<u64>,
    /// HTML URL.
    #[serde(default)]
    pub html_url: Option<String>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Response of the environment listing.
#[derive(Debug, Clone, Deserialize)]
pub struct EnvironmentsResponse {
    /// Total count.
    #[serde(default)]
    pub total_count: u64,
    /// Environments.
    #[serde(default)]
    pub environments: Vec<Environment>,
}

impl CountedList for EnvironmentsResponse {
    type Item = Environment;

    fn total_count(&self) -> u64 {
        self.total_count
    }

    fn into_items(self) -> Vec<Environment> {
        self.environments
    }
}

/// An environment secret (metadata only; values are never readable).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Secret {
    /// Secret name.
    pub name: String,
    /// Created at.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Updated at.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Response containing secrets.
#[derive(Debug, Clone, Deserialize)]
pub struct SecretsResponse {
    /// Total count.
    #[serde(default)]
    pub total_count: u64,
    /// Secrets.
    #[serde(default)]
    pub secrets: Vec<Secret>,
}

impl CountedList for SecretsResponse {
    type Item = Secret;

    fn total_count(&self) -> u64 {
        self.total_count
    }

    fn into_items(self) -> Vec<Secret> {
        self.secrets
    }
}

/// An environment variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variable {
    /// Variable name.
    pub name: String,
    /// Variable value; absent values read as empty.
    #[serde(default)]
    pub value: Option<String>,
    /// Created at.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Updated at.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Variable {
    /// The value, or `""` when the API omitted it.
    pub fn value_or_default(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }
}

/// Response containing variables.
#[derive(Debug, Clone, Deserialize)]
pub struct VariablesResponse {
    /// Total count.
    #[serde(default)]
    pub total_count: u64,
    /// Variables.
    #[serde(default)]
    pub variables: Vec<Variable>,
}

impl CountedList for VariablesResponse {
    type Item = Variable;

    fn total_count(&self) -> u64 {
        self.total_count
    }

    fn into_items(self) -> Vec<Variable> {
        self.variables
    }
}
