//! Settings for the REST client and for one audit run.

use crate::auth::AuthMethod;
use crate::errors::{GitHubError, GitHubErrorKind};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Public GitHub REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Value sent in `X-GitHub-Api-Version`.
pub const DEFAULT_API_VERSION: &str = "2022-11-28";

/// Per-request timeout unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Time allowed to establish a connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// `User-Agent` sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("github-env-audit/", env!("CARGO_PKG_VERSION"));

/// Environment variable holding the API token.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Largest page size the REST API accepts.
pub const MAX_PER_PAGE: u32 = 100;

/// REST client settings.
///
/// Built with [`Default`] and the `with_*` setters; checked once by
/// [`api_url`](Self::api_url) when the client is created.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// REST endpoint; GitHub Enterprise Server uses `https://<host>/api/v3`.
    pub base_url: String,
    /// `X-GitHub-Api-Version` header value.
    pub api_version: String,
    /// Credential sent as `Authorization: Bearer`.
    pub auth: Option<AuthMethod>,
    /// Whole-request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            auth: None,
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl GitHubConfig {
    /// Default settings authenticated with `auth`.
    pub fn new(auth: AuthMethod) -> Self {
        Self::default().with_auth(auth)
    }

    /// Sets the REST endpoint.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the credential.
    pub fn with_auth(mut self, auth: AuthMethod) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Sets the whole-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the `User-Agent` header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Parses the REST endpoint after checking the other settings.
    ///
    /// # Errors
    ///
    /// `InvalidBaseUrl` unless the endpoint is an absolute `http(s)` URL
    /// that can take path segments; `InvalidConfiguration` for an empty
    /// `User-Agent` or a zero timeout.
    pub fn api_url(&self) -> Result<Url, GitHubError> {
        if self.user_agent.is_empty() {
            return Err(GitHubError::configuration("User-Agent must not be empty"));
        }
        if self.timeout.is_zero() {
            return Err(GitHubError::configuration("Timeout must be greater than zero"));
        }

        let invalid = |reason: String| {
            GitHubError::new(
                GitHubErrorKind::InvalidBaseUrl,
                format!("Invalid base URL {:?}: {}", self.base_url, reason),
            )
        };
        let url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" if !url.cannot_be_a_base() => Ok(url),
            "http" | "https" => Err(invalid("cannot carry a path".to_string())),
            scheme => Err(invalid(format!("unsupported scheme {}", scheme))),
        }
    }
}

/// Settings for one audit run, as collected from the command line.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Account (organization or user) to scan.
    pub account: String,
    /// Output CSV path; created or truncated.
    pub output: PathBuf,
    /// REST API base URL.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl RunConfig {
    /// Creates run settings with default API settings.
    pub fn new(account: impl Into<String>, output: impl Into<PathBuf>) -> Self {
        Self {
            account: account.into(),
            output: output.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the REST API base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Client settings for this run, authenticated with `auth`.
    pub fn client_config(&self, auth: AuthMethod) -> GitHubConfig {
        GitHubConfig::new(auth)
            .with_base_url(self.base_url.clone())
            .with_timeout(self.timeout)
    }
}
