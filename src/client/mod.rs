//! GitHub API client implementation.

use crate::auth::AuthMethod;
use crate::config::GitHubConfig;
use crate::errors::{GitHubError, GitHubErrorKind, GitHubResult};
use crate::observability::{Metrics, MetricsSnapshot, RequestTimer, TracingHooks};
use crate::pagination::{wants_next_page, CountedList, Page, PaginationParams};
use crate::services::{EnvironmentsService, OrganizationsService, RepositoriesService};
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use url::Url;

/// GitHub error response format.
#[derive(Debug, serde::Deserialize)]
struct GitHubErrorResponse {
    message: String,
}

/// GitHub API client.
///
/// The client owns the credential; every service borrowed from it sends
/// the same `Authorization` header. Requests are issued one at a time by
/// whoever awaits them.
pub struct GitHubClient {
    /// HTTP client.
    http: Client,
    /// Configuration.
    config: GitHubConfig,
    /// Credential used for every request.
    auth: AuthMethod,
    /// Parsed base URL.
    base_url: Url,
    /// Request counters.
    metrics: Arc<Metrics>,
}

impl GitHubClient {
    /// Creates a new GitHub client.
    pub fn new(config: GitHubConfig) -> GitHubResult<Self> {
        let base_url = config.api_url()?;

        let auth = config.auth.clone().ok_or_else(|| {
            GitHubError::new(GitHubErrorKind::MissingAuth, "Authentication required")
        })?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| {
                GitHubError::new(
                    GitHubErrorKind::InvalidConfiguration,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            http,
            config,
            auth,
            base_url,
            metrics: Arc::new(Metrics::new()),
        })
    }

    /// Creates a new client builder.
    pub fn builder() -> GitHubClientBuilder {
        GitHubClientBuilder::new()
    }

    /// Gets the base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Gets the authentication method.
    pub fn auth(&self) -> &AuthMethod {
        &self.auth
    }

    /// Snapshot of the request counters.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    // Service accessors

    /// Gets the organizations service.
    pub fn organizations(&self) -> OrganizationsService<'_> {
        OrganizationsService::new(self)
    }

    /// Gets the repositories service.
    pub fn repositories(&self) -> RepositoriesService<'_> {
        RepositoriesService::new(self)
    }

    /// Gets the deployment environments service.
    pub fn environments(&self) -> EnvironmentsService<'_> {
        EnvironmentsService::new(self)
    }

    // HTTP methods

    /// Makes a GET request with query parameters.
    pub async fn get_with_params<T: DeserializeOwned, P: Serialize>(
        &self,
        segments: &[&str],
        params: &P,
    ) -> GitHubResult<T> {
        let query = serde_urlencoded::to_string(params).map_err(|e| {
            GitHubError::new(
                GitHubErrorKind::InvalidParameter,
                format!("Failed to serialize parameters: {}", e),
            )
        })?;
        let url = self.build_url(segments, Some(&query))?;
        let response = self.execute_request(url).await?;
        Self::parse_json(response).await
    }

    /// Fetches one page of an array-returning list endpoint.
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        pagination: &PaginationParams,
    ) -> GitHubResult<Page<T>> {
        let query = serde_urlencoded::to_string(pagination).map_err(|e| {
            GitHubError::new(
                GitHubErrorKind::InvalidParameter,
                format!("Failed to serialize parameters: {}", e),
            )
        })?;
        let url = self.build_url(segments, Some(&query))?;
        let response = self.execute_request(url).await?;
        let headers = response.headers().clone();
        let items: Vec<T> = Self::parse_json(response).await?;

        Ok(Page::new(items, pagination.page.unwrap_or(1)).with_links(&headers))
    }

    /// Fetches every page of a `total_count` envelope endpoint and returns
    /// the items in API order. A failure on any page fails the whole list.
    pub async fn list_counted<R: CountedList>(
        &self,
        segments: &[&str],
    ) -> GitHubResult<Vec<R::Item>> {
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            let envelope: R = self
                .get_with_params(segments, &PaginationParams::full_page(page))
                .await?;
            let total_count = envelope.total_count();
            let batch = envelope.into_items();
            let received = batch.len();
            items.extend(batch);

            if !wants_next_page(received, items.len(), total_count) {
                return Ok(items);
            }
            page += 1;
        }
    }

    /// Issues a GET and only reports whether it succeeded; the body is discarded.
    pub async fn probe(&self, segments: &[&str]) -> GitHubResult<()> {
        let url = self.build_url(segments, None)?;
        self.execute_request(url).await.map(|_| ())
    }

    // Internal methods

    async fn execute_request(&self, url: Url) -> GitHubResult<Response> {
        let method = "GET";
        TracingHooks::on_request_start(method, url.as_str());
        let timer = RequestTimer::start(self.metrics.clone());

        let sent = self
            .http
            .get(url.clone())
            .header(AUTHORIZATION, self.auth.header_value())
            .header(USER_AGENT, &self.config.user_agent)
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", &self.config.api_version)
            .send()
            .await;

        let response = match sent {
            Ok(response) => response,
            Err(e) => {
                timer.failure();
                let error = Self::transport_error(e);
                TracingHooks::on_request_error(method, url.as_str(), &error.to_string());
                return Err(error);
            }
        };

        let status = response.status();
        if !status.is_success() {
            timer.failure();
            let error = Self::handle_error_response(response).await;
            TracingHooks::on_request_error(method, url.as_str(), &error.to_string());
            return Err(error);
        }

        let elapsed = timer.success();
        TracingHooks::on_request_complete(method, url.as_str(), status.as_u16(), elapsed);
        Ok(response)
    }

    /// Joins `segments` onto the base URL, percent-encoding each one as a
    /// single path segment.
    fn build_url(&self, segments: &[&str], query: Option<&str>) -> GitHubResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                GitHubError::new(GitHubErrorKind::InvalidBaseUrl, "Base URL cannot carry a path")
            })?
            .pop_if_empty()
            .extend(segments);
        url.set_query(query.filter(|q| !q.is_empty()));
        Ok(url)
    }

    async fn parse_json<T: DeserializeOwned>(response: Response) -> GitHubResult<T> {
        response.json().await.map_err(|e| {
            GitHubError::deserialization(format!("Failed to deserialize response: {}", e))
                .with_cause(e)
        })
    }

    fn transport_error(e: reqwest::Error) -> GitHubError {
        let error = if e.is_timeout() {
            GitHubError::timeout(format!("Request timed out: {}", e))
        } else if e.is_connect() {
            GitHubError::new(
                GitHubErrorKind::ConnectionFailed,
                format!("Connection failed: {}", e),
            )
        } else {
            GitHubError::new(GitHubErrorKind::Unknown, format!("Request failed: {}", e))
        };
        error.with_cause(e)
    }

    async fn handle_error_response(response: Response) -> GitHubError {
        let status = response.status();
        let request_id = response
            .headers()
            .get("x-github-request-id")
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let body = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<GitHubErrorResponse>(&body)
            .map(|e| e.message)
            .unwrap_or_else(|_| format!("HTTP {} error", status.as_u16()));

        GitHubError::from_response(status.as_u16(), message, body, request_id)
    }
}

/// Builder for GitHubClient.
#[derive(Debug, Default)]
pub struct GitHubClientBuilder {
    config: GitHubConfig,
}

impl GitHubClientBuilder {
    /// Creates a builder with default settings and no credential.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the REST endpoint.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config = self.config.with_base_url(url);
        self
    }

    /// Sets the authentication method.
    pub fn auth(mut self, auth: AuthMethod) -> Self {
        self.config = self.config.with_auth(auth);
        self
    }

    /// Sets a personal access token.
    pub fn pat(self, token: impl Into<String>) -> Self {
        self.auth(AuthMethod::pat(token))
    }

    /// Sets the whole-request timeout.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Sets the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config = self.config.with_user_agent(ua);
        self
    }

    /// Builds the client.
    pub fn build(self) -> GitHubResult<GitHubClient> {
        GitHubClient::new(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(base: &str) -> GitHubClient {
        GitHubClient::builder().pat("test").base_url(base).build().unwrap()
    }

    #[test]
    fn test_build_url() {
        let client = client_for("https://api.github.com");

        assert_eq!(
            client.build_url(&["repos", "owner", "repo"], None).unwrap().as_str(),
            "https://api.github.com/repos/owner/repo"
        );
        assert_eq!(
            client
                .build_url(&["orgs", "acme", "repos"], Some("page=2&per_page=100"))
                .unwrap()
                .as_str(),
            "https://api.github.com/orgs/acme/repos?page=2&per_page=100"
        );
    }

    #[test]
    fn test_build_url_keeps_base_path() {
        let client = client_for("https://github.example.com/api/v3/");
        assert_eq!(
            client.build_url(&["orgs", "acme"], None).unwrap().as_str(),
            "https://github.example.com/api/v3/orgs/acme"
        );
    }

    #[test]
    fn test_build_url_encodes_segments() {
        let client = client_for("https://api.github.com");
        let url = client
            .build_url(&["repos", "acme", "api", "environments", "eu west/1", "secrets"], None)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/acme/api/environments/eu%20west%2F1/secrets"
        );
    }

    #[test]
    fn test_client_requires_auth() {
        let result = GitHubClient::builder().build();
        assert_eq!(*result.err().unwrap().kind(), GitHubErrorKind::MissingAuth);
    }

    #[test]
    fn test_client_builder() {
        let client = GitHubClient::builder()
            .pat("ghp_xxxx")
            .user_agent("test-client/1.0")
            .build()
            .unwrap();

        assert_eq!(client.base_url(), "https://api.github.com");
        assert_eq!(client.auth().token_prefix(), "ghp_***");
        assert_eq!(client.metrics().requests_total, 0);
    }
}
