//! Command-line interface.

use crate::config::{RunConfig, DEFAULT_BASE_URL};
use crate::observability::{LogFormat, LogLevel, LoggingConfig};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Lists the secrets and variables of every deployment environment of every
/// repository owned by a GitHub organization or user.
///
/// The API token is read from the GITHUB_TOKEN environment variable.
#[derive(Debug, Parser)]
#[command(name = "github-env-audit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Organization (or user) name
    #[arg(short = 'o', long = "org")]
    pub org: String,

    /// Path to the CSV file to write; created or truncated
    #[arg(short = 'c', long = "csv")]
    pub csv: PathBuf,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub timeout: u64,

    /// Minimum log level (RUST_LOG directives apply on top)
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log output format
    #[arg(long, value_enum, default_value = "pretty")]
    pub log_format: LogFormat,
}

impl Cli {
    /// Run settings described by these arguments.
    pub fn run_config(&self) -> RunConfig {
        RunConfig::new(self.org.clone(), self.csv.clone())
            .with_base_url(self.api_url.clone())
            .with_timeout(Duration::from_secs(self.timeout))
    }

    /// Logging settings described by these arguments.
    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig::new()
            .with_level(self.log_level)
            .with_format(self.log_format)
    }
}
