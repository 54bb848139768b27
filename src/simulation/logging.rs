//! Logging and tracing configuration
//!
//! Diagnostics go to stderr so that reports and event streams on stdout stay
//! machine readable. Optional daily-rolling JSON log files are written through
//! a non-blocking appender whose flush guards live in [`LoggingGuard`].

use std::io;
use tracing::{debug, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Console output style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line human readable output
    Pretty,
    /// Single-line human readable output
    Compact,
    /// One JSON object per line
    Json,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level for this crate when `RUST_LOG` is not set
    pub level: Level,
    /// Console output style
    pub format: LogFormat,
    /// Directory for rolling JSON log files, if file logging is enabled
    pub log_directory: Option<String>,
    /// Log file prefix
    pub log_file_prefix: String,
    /// Whether span open/close events are logged
    pub enable_span_events: bool,
    /// Whether ANSI colors are used on the console
    pub enable_ansi: bool,
    /// Filter directive overriding both `level` and `RUST_LOG`
    pub env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            format: LogFormat::Compact,
            log_directory: None,
            log_file_prefix: env!("CARGO_PKG_NAME").to_string(),
            enable_span_events: false,
            enable_ansi: true,
            env_filter: None,
        }
    }
}

/// Keeps the non-blocking writers flushing until dropped
#[derive(Debug, Default)]
pub struct LoggingGuard {
    _guards: Vec<WorkerGuard>,
}

impl LoggingConfig {
    /// Create a new logging configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration matching the `--verbose` and `--debug` command line flags
    pub fn for_cli(verbose: bool, debug: bool) -> Self {
        if debug {
            Self::new().with_level(Level::DEBUG).with_format(LogFormat::Pretty).with_span_events()
        } else if verbose {
            Self::new().with_level(Level::INFO).with_span_events()
        } else {
            Self::new()
        }
    }

    /// Raise the level to at least INFO so round narration is not filtered out
    pub fn with_visualization(mut self, visualize: bool) -> Self {
        if visualize && (self.level == Level::WARN || self.level == Level::ERROR) {
            self.level = Level::INFO;
        }
        self
    }

    /// Set the log level
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set the console output style
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Enable file logging
    pub fn with_file_logging(mut self, directory: impl Into<String>) -> Self {
        self.log_directory = Some(directory.into());
        self
    }

    /// Set log file prefix
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.log_file_prefix = prefix.into();
        self
    }

    /// Enable span events
    pub fn with_span_events(mut self) -> Self {
        self.enable_span_events = true;
        self
    }

    /// Disable ANSI colors
    pub fn without_ansi(mut self) -> Self {
        self.enable_ansi = false;
        self
    }

    /// Set custom environment filter
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Filter directive used when neither `env_filter` nor `RUST_LOG` is set
    pub fn default_directive(&self) -> String {
        format!("{}={}", env!("CARGO_PKG_NAME").replace('-', "_"), self.level)
    }

    fn span_events(&self) -> FmtSpan {
        if self.enable_span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    fn build_filter(&self) -> Result<EnvFilter, Box<dyn std::error::Error + Send + Sync>> {
        match &self.env_filter {
            Some(filter) => Ok(EnvFilter::try_new(filter)?),
            None => Ok(EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(self.default_directive()))),
        }
    }

    /// Install the global tracing subscriber.
    ///
    /// The returned guard must be held for as long as file logs should be
    /// written.
    pub fn init(self) -> Result<LoggingGuard, Box<dyn std::error::Error + Send + Sync>> {
        let mut guard = LoggingGuard::default();

        let console_layer = match self.format {
            LogFormat::Json => fmt::layer()
                .json()
                .with_writer(io::stderr)
                .with_span_events(self.span_events())
                .boxed(),
            LogFormat::Pretty => fmt::layer()
                .pretty()
                .with_writer(io::stderr)
                .with_ansi(self.enable_ansi)
                .with_span_events(self.span_events())
                .boxed(),
            LogFormat::Compact => fmt::layer()
                .compact()
                .with_writer(io::stderr)
                .with_ansi(self.enable_ansi)
                .with_target(false)
                .with_span_events(self.span_events())
                .boxed(),
        };

        let file_layer = match &self.log_directory {
            Some(directory) => {
                let appender = rolling::daily(directory, &self.log_file_prefix);
                let (writer, worker_guard) = non_blocking(appender);
                guard._guards.push(worker_guard);
                Some(
                    fmt::layer()
                        .json()
                        .with_writer(writer)
                        .with_span_events(self.span_events())
                        .boxed(),
                )
            }
            None => None,
        };

        Registry::default()
            .with(self.build_filter()?)
            .with(console_layer)
            .with(file_layer)
            .try_init()?;

        debug!(config = ?self, "Logging initialized");
        Ok(guard)
    }

    /// Initialize verbose logging (INFO level with span events)
    pub fn init_verbose() -> Result<LoggingGuard, Box<dyn std::error::Error + Send + Sync>> {
        Self::for_cli(true, false).init()
    }

    /// Initialize debug logging (DEBUG level with span events)
    pub fn init_debug() -> Result<LoggingGuard, Box<dyn std::error::Error + Send + Sync>> {
        Self::for_cli(false, true).init()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_defaults() {
        let config = LoggingConfig::new();
        assert_eq!(config.level, Level::WARN);
        assert_eq!(config.format, LogFormat::Compact);
        assert!(config.log_directory.is_none());
        assert_eq!(config.log_file_prefix, "elevator-simulator");
        assert!(!config.enable_span_events);
        assert!(config.enable_ansi);
        assert!(config.env_filter.is_none());
    }

    #[test]
    fn test_logging_config_builder_pattern() {
        let config = LoggingConfig::new()
            .with_level(Level::DEBUG)
            .with_format(LogFormat::Json)
            .with_file_logging("test_logs")
            .with_file_prefix("test_prefix")
            .with_span_events()
            .without_ansi()
            .with_env_filter("debug");

        assert_eq!(config.level, Level::DEBUG);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.log_directory, Some("test_logs".to_string()));
        assert_eq!(config.log_file_prefix, "test_prefix");
        assert!(config.enable_span_events);
        assert!(!config.enable_ansi);
        assert_eq!(config.env_filter, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_presets() {
        assert_eq!(LoggingConfig::for_cli(false, false).level, Level::WARN);
        let verbose = LoggingConfig::for_cli(true, false);
        assert_eq!(verbose.level, Level::INFO);
        assert_eq!(verbose.format, LogFormat::Compact);
        assert!(verbose.enable_span_events);

        let debug = LoggingConfig::for_cli(true, true);
        assert_eq!(debug.level, Level::DEBUG);
        assert_eq!(debug.format, LogFormat::Pretty);
        assert!(debug.enable_span_events);
    }

    #[test]
    fn test_visualization_enables_info() {
        let quiet = LoggingConfig::for_cli(false, false).with_visualization(true);
        assert_eq!(quiet.level, Level::INFO);
        assert_eq!(quiet.default_directive(), "elevator_simulator=INFO");

        assert_eq!(LoggingConfig::for_cli(false, false).with_visualization(false).level, Level::WARN);
        // Never lowers a more detailed level
        assert_eq!(LoggingConfig::for_cli(false, true).with_visualization(true).level, Level::DEBUG);
        assert_eq!(
            LoggingConfig::new().with_level(Level::ERROR).with_visualization(true).level,
            Level::INFO
        );
    }

    #[test]
    fn test_default_directive_targets_crate() {
        let config = LoggingConfig::new().with_level(Level::INFO);
        assert_eq!(config.default_directive(), "elevator_simulator=INFO");
    }
}
