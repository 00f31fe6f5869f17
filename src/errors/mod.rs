//! Error types for the GitHub client and the audit run.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for GitHub operations.
pub type GitHubResult<T> = Result<T, GitHubError>;

/// Error kinds for categorizing GitHub errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitHubErrorKind {
    // Configuration errors
    /// Missing authentication configuration.
    MissingAuth,
    /// Invalid base URL.
    InvalidBaseUrl,
    /// Invalid configuration.
    InvalidConfiguration,

    // Authentication and authorization errors
    /// Bad credentials (401).
    BadCredentials,
    /// Access forbidden (403).
    Forbidden,

    // Request errors
    /// Request validation failed (400).
    ValidationError,
    /// Invalid parameter.
    InvalidParameter,
    /// Unprocessable entity (422).
    UnprocessableEntity,

    // Resource errors
    /// Resource not found (404).
    NotFound,
    /// Resource is gone (410).
    Gone,

    /// Too many requests (429).
    TooManyRequests,

    // Network errors
    /// Connection failed.
    ConnectionFailed,
    /// Request timeout.
    Timeout,

    // Server errors
    /// Internal server error (500).
    InternalError,
    /// Bad gateway (502).
    BadGateway,
    /// Service unavailable (503).
    ServiceUnavailable,

    /// Failed to deserialize response.
    DeserializationError,

    /// Unknown error.
    Unknown,
}

impl fmt::Display for GitHubErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MissingAuth => "missing_auth",
            Self::InvalidBaseUrl => "invalid_base_url",
            Self::InvalidConfiguration => "invalid_configuration",
            Self::BadCredentials => "bad_credentials",
            Self::Forbidden => "forbidden",
            Self::ValidationError => "validation_error",
            Self::InvalidParameter => "invalid_parameter",
            Self::UnprocessableEntity => "unprocessable_entity",
            Self::NotFound => "not_found",
            Self::Gone => "gone",
            Self::TooManyRequests => "too_many_requests",
            Self::ConnectionFailed => "connection_failed",
            Self::Timeout => "timeout",
            Self::InternalError => "internal_error",
            Self::BadGateway => "bad_gateway",
            Self::ServiceUnavailable => "service_unavailable",
            Self::DeserializationError => "deserialization_error",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// GitHub API error with the details needed to log a skipped call.
#[derive(Error, Debug)]
pub struct GitHubError {
    /// Error kind.
    kind: GitHubErrorKind,
    /// Error message.
    message: String,
    /// HTTP status code.
    status_code: Option<u16>,
    /// Raw response body, as returned by the API.
    body: Option<String>,
    /// GitHub request ID.
    request_id: Option<String>,
    /// Underlying cause.
    #[source]
    cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for GitHubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(code) = self.status_code {
            write!(f, " (HTTP {})", code)?;
        }
        if let Some(ref id) = self.request_id {
            write!(f, " [request_id: {}]", id)?;
        }
        Ok(())
    }
}

impl GitHubError {
    /// Creates a new GitHub error.
    pub fn new(kind: GitHubErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code: None,
            body: None,
            request_id: None,
            cause: None,
        }
    }

    /// Sets the HTTP status code.
    pub fn with_status(mut self, code: u16) -> Self {
        self.status_code = Some(code);
        self
    }

    /// Sets the raw response body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the GitHub request ID.
    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    /// Sets the underlying cause.
    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Gets the error kind.
    pub fn kind(&self) -> &GitHubErrorKind {
        &self.kind
    }

    /// Gets the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Gets the HTTP status code.
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// Gets the raw response body.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Gets the request ID.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Returns true if the error came from the transport rather than an HTTP response.
    pub fn is_transport(&self) -> bool {
        self.status_code.is_none()
            && matches!(
                self.kind,
                GitHubErrorKind::ConnectionFailed | GitHubErrorKind::Timeout | GitHubErrorKind::Unknown
            )
    }

    /// Creates an error from a non-success HTTP response.
    pub fn from_response(
        status: u16,
        message: String,
        body: String,
        request_id: Option<String>,
    ) -> Self {
        let kind = Self::kind_from_status(status);
        let mut error = Self::new(kind, message).with_status(status).with_body(body);

        if let Some(id) = request_id {
            error = error.with_request_id(id);
        }

        error
    }

    /// Maps HTTP status code to error kind.
    fn kind_from_status(status: u16) -> GitHubErrorKind {
        match status {
            400 => GitHubErrorKind::ValidationError,
            401 => GitHubErrorKind::BadCredentials,
            403 => GitHubErrorKind::Forbidden,
            404 => GitHubErrorKind::NotFound,
            410 => GitHubErrorKind::Gone,
            422 => GitHubErrorKind::UnprocessableEntity,
            429 => GitHubErrorKind::TooManyRequests,
            500 => GitHubErrorKind::InternalError,
            502 => GitHubErrorKind::BadGateway,
            503 => GitHubErrorKind::ServiceUnavailable,
            _ => GitHubErrorKind::Unknown,
        }
    }

    // Convenience constructors

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(GitHubErrorKind::InvalidConfiguration, message)
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(GitHubErrorKind::Timeout, message)
    }

    /// Creates a deserialization error.
    pub fn deserialization(message: impl Into<String>) -> Self {
        Self::new(GitHubErrorKind::DeserializationError, message)
    }
}

/// Errors that abort an audit run.
///
/// API failures never show up here; they are logged and recorded as
/// [`SkipReason`](crate::audit::SkipReason)s instead.
#[derive(Error, Debug)]
pub enum AuditError {
    /// The credential environment variable is unset or empty.
    #[error("Please set {0} environment variable")]
    MissingCredential(String),

    /// The client could not be built from the given settings.
    #[error("invalid configuration: {0}")]
    Configuration(#[source] GitHubError),

    /// The output file could not be created.
    #[error("failed to open output file {}: {source}", .path.display())]
    OpenOutput {
        /// Path that was being opened.
        path: PathBuf,
        /// Underlying CSV/IO error.
        #[source]
        source: csv::Error,
    },

    /// A row could not be written to the output.
    #[error("failed to write output: {0}")]
    Sink(#[from] csv::Error),
}
