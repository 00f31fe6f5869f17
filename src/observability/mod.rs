//! Observability: logging setup, request hooks and request counters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    /// Trace level (most verbose).
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    Info,
    /// Warning level.
    Warn,
    /// Error level (least verbose).
    Error,
}

impl From<LogLevel> for tracing::level_filters::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors.
    Pretty,
    /// JSON lines.
    Json,
    /// Compact single-line format.
    Compact,
}

/// Logging configuration. Output goes to stderr so it never mixes with data.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level to emit.
    pub level: LogLevel,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
        }
    }
}

impl LoggingConfig {
    /// Creates a new logging configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the log level.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the log format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Installs the global subscriber. `RUST_LOG` directives are honoured on top of `level`.
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed.
    pub fn init(self) -> Result<(), tracing_subscriber::util::TryInitError> {
        let filter = EnvFilter::builder()
            .with_default_directive(tracing::level_filters::LevelFilter::from(self.level).into())
            .from_env_lossy();

        let registry = tracing_subscriber::registry().with(filter);
        match self.format {
            LogFormat::Pretty => registry
                .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
                .try_init(),
            LogFormat::Json => registry
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .try_init(),
            LogFormat::Compact => registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .try_init(),
        }
    }
}

/// Request counters for one client.
#[derive(Debug, Default)]
pub struct Metrics {
    requests_total: AtomicU64,
    requests_success: AtomicU64,
    requests_failed: AtomicU64,
    latency_total_us: AtomicU64,
}

impl Metrics {
    /// Creates a new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a request.
    pub fn record_request(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a successful request.
    pub fn record_success(&self) {
        self.requests_success.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a failed request.
    pub fn record_failure(&self) {
        self.requests_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Records request latency.
    pub fn record_latency(&self, duration: Duration) {
        let us = duration.as_micros() as u64;
        self.latency_total_us.fetch_add(us, Ordering::Relaxed);
    }

    /// Gets a snapshot of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let total = self.requests_total.load(Ordering::Relaxed);
        let latency = self.latency_total_us.load(Ordering::Relaxed);
        MetricsSnapshot {
            requests_total: total,
            requests_success: self.requests_success.load(Ordering::Relaxed),
            requests_failed: self.requests_failed.load(Ordering::Relaxed),
            average_latency_us: if total == 0 { 0 } else { latency / total },
        }
    }
}

/// A snapshot of metrics at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Total requests.
    pub requests_total: u64,
    /// Requests answered with a 2xx status.
    pub requests_success: u64,
    /// Requests that failed (non-2xx or transport error).
    pub requests_failed: u64,
    /// Average latency in microseconds.
    pub average_latency_us: u64,
}

/// Request timer for measuring latency.
pub struct RequestTimer {
    start: Instant,
    metrics: Arc<Metrics>,
}

impl RequestTimer {
    /// Starts timing a request and counts it.
    pub fn start(metrics: Arc<Metrics>) -> Self {
        metrics.record_request();
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    /// Records success and latency.
    pub fn success(self) -> Duration {
        let elapsed = self.start.elapsed();
        self.metrics.record_success();
        self.metrics.record_latency(elapsed);
        elapsed
    }

    /// Records failure and latency.
    pub fn failure(self) -> Duration {
        let elapsed = self.start.elapsed();
        self.metrics.record_failure();
        self.metrics.record_latency(elapsed);
        elapsed
    }
}

/// Tracing hooks for GitHub API requests.
pub struct TracingHooks;

impl TracingHooks {
    /// Logs the start of an API request.
    pub fn on_request_start(method: &str, url: &str) {
        debug!(method = %method, url = %url, "GitHub API request started");
    }

    /// Logs the completion of an API request.
    pub fn on_request_complete(method: &str, url: &str, status: u16, duration: Duration) {
        debug!(
            method = %method,
            url = %url,
            status = status,
            duration_ms = duration.as_millis() as u64,
            "GitHub API request completed"
        );
    }

    /// Logs a request that did not produce a usable response.
    pub fn on_request_error(method: &str, url: &str, error: &str) {
        debug!(method = %method, url = %url, error = %error, "GitHub API request failed");
    }
}
