//! Credentials for the GitHub REST API.

use crate::config::TOKEN_ENV_VAR;
use crate::errors::{GitHubError, GitHubErrorKind, GitHubResult};
use secrecy::{ExposeSecret, SecretString};

/// Authentication method for GitHub API.
#[derive(Debug, Clone)]
pub enum AuthMethod {
    /// Bearer token: a personal access token (classic or fine-grained) or
    /// the installation token a workflow exposes as GITHUB_TOKEN.
    Pat(SecretString),
}

impl AuthMethod {
    /// Creates a PAT authentication method.
    pub fn pat(token: impl Into<String>) -> Self {
        Self::Pat(SecretString::new(token.into()))
    }

    /// Gets the token prefix for logging.
    pub fn token_prefix(&self) -> &'static str {
        let Self::Pat(token) = self;
        let exposed = token.expose_secret();
        if exposed.starts_with("ghp_") {
            "ghp_***"
        } else if exposed.starts_with("github_pat_") {
            "github_pat_***"
        } else if exposed.starts_with("ghs_") {
            "ghs_***"
        } else {
            "***"
        }
    }

    /// Authorization header value.
    pub fn header_value(&self) -> String {
        let Self::Pat(token) = self;
        format!("Bearer {}", token.expose_secret())
    }
}

/// Reads the API token from a single environment variable.
///
/// The variable is read when [`get_auth`](Self::get_auth) is called; callers
/// resolve it once at startup and pass the resulting [`AuthMethod`] on.
#[derive(Debug, Clone)]
pub struct EnvCredentialProvider {
    token_var: String,
}

impl EnvCredentialProvider {
    /// Creates a provider from the GITHUB_TOKEN environment variable.
    pub fn from_github_token() -> Self {
        Self::from_env_var(TOKEN_ENV_VAR)
    }

    /// Creates a provider from a custom environment variable.
    pub fn from_env_var(var_name: impl Into<String>) -> Self {
        Self {
            token_var: var_name.into(),
        }
    }

    /// Name of the variable this provider reads.
    pub fn var_name(&self) -> &str {
        &self.token_var
    }

    /// Gets the authentication method. An empty value counts as unset.
    pub fn get_auth(&self) -> GitHubResult<AuthMethod> {
        match std::env::var(&self.token_var) {
            Ok(token) if !token.is_empty() => Ok(AuthMethod::pat(token)),
            _ => Err(GitHubError::new(
                GitHubErrorKind::MissingAuth,
                format!("Environment variable {} not set", self.token_var),
            )),
        }
    }
}
