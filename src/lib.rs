//! # GitHub environment audit
//!
//! Lists which secrets and variables are configured on the deployment
//! environments of every repository owned by a GitHub organization or user,
//! and writes them to a CSV file:
//!
//! ```text
//! SECRET,<repo_full_name>,<environment_name>,<secret_name>
//! VARIABLE,<repo_full_name>,<environment_name>,<variable_name>,<variable_value>
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use github_env_audit::{AccountResolver, EnvironmentAuditor, GitHubClient};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GitHubClient::builder().pat("ghp_xxxxxxxxxxxx").build()?;
//!
//!     let resolution = AccountResolver::new(&client).resolve("octocat").await;
//!     let auditor = EnvironmentAuditor::new(&client);
//!     for repo in &resolution.repositories {
//!         let audit = auditor.collect(repo).await;
//!         for row in &audit.rows {
//!             println!("{}", row.fields().join(","));
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod config;
pub mod errors;
pub mod types;

// Authentication
pub mod auth;

// HTTP client and transport
pub mod client;

// Pagination handling
pub mod pagination;

// API Services
pub mod services;

// Resolution and auditing
pub mod audit;

// Output rows and sinks
pub mod output;

// Entry point wiring
pub mod cli;
pub mod runner;

// Observability
pub mod observability;

// Re-exports for convenience
pub use audit::{AccountResolver, EnvironmentAuditor, Fetch, RepositoryAudit, Resolution, SkipReason, Stage};
pub use auth::{AuthMethod, EnvCredentialProvider};
pub use client::{GitHubClient, GitHubClientBuilder};
pub use config::{GitHubConfig, RunConfig};
pub use errors::{AuditError, GitHubError, GitHubErrorKind, GitHubResult};
pub use output::{CsvSink, OutputRow, RowSink};
pub use types::*;
