//! Logging subsystem for AirTrack
//!
//! This module provides a unified logging interface using the `tracing` crate.
//! User-facing notices (the "toast" messages of the tracker) are emitted as
//! `info`/`warn` events, so the configured subscriber decides where they go.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

mod error;
mod level;

pub use error::LoggingError;
pub use level::LogLevel;

/// Configuration for the logging subsystem
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// The minimum log level to display
    pub level: LogLevel,
    /// Whether to include timestamps
    pub with_timestamp: bool,
    /// Whether to include target module information
    pub with_target: bool,
    /// Whether to use JSON formatting
    pub json_format: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            with_timestamp: true,
            with_target: true,
            json_format: false,
        }
    }
}

impl LogConfig {
    /// Create a new LogConfig with specified level
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Set whether to include timestamps
    pub fn with_timestamp(mut self, enabled: bool) -> Self {
        self.with_timestamp = enabled;
        self
    }

    /// Set whether to include target information
    pub fn with_target(mut self, enabled: bool) -> Self {
        self.with_target = enabled;
        self
    }

    /// Set whether to use JSON formatting
    pub fn json_format(mut self, enabled: bool) -> Self {
        self.json_format = enabled;
        self
    }

    /// Build a log config from the `[logging]` section of the app config
    pub fn from_settings(settings: &crate::config::LoggingConfig) -> Self {
        Self::new(settings.level)
            .with_timestamp(settings.with_timestamp)
            .with_target(settings.with_target)
            .json_format(settings.json_format)
    }
}

/// Initialize the logging subsystem with default configuration
///
/// # Example
/// ```
/// use airtrack_core::logging::init_logging;
///
/// init_logging().expect("Failed to initialize logging");
/// ```
pub fn init_logging() -> Result<(), LoggingError> {
    init_logging_with_config(LogConfig::default())
}

/// Initialize the logging subsystem with custom configuration
///
/// Output goes to stderr so command output on stdout stays machine-readable.
///
/// # Example
/// ```
/// use airtrack_core::logging::{init_logging_with_config, LogConfig, LogLevel};
///
/// let config = LogConfig::new(LogLevel::Debug)
///     .with_timestamp(true)
///     .with_target(false);
///
/// init_logging_with_config(config).expect("Failed to initialize logging");
/// ```
pub fn init_logging_with_config(config: LogConfig) -> Result<(), LoggingError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::default().add_directive(LevelFilter::from_level(config.level.into()).into())
    });

    let fmt_layer = match (config.json_format, config.with_timestamp) {
        (true, true) => fmt::layer()
            .json()
            .with_target(config.with_target)
            .with_writer(std::io::stderr)
            .boxed(),
        (true, false) => fmt::layer()
            .json()
            .without_time()
            .with_target(config.with_target)
            .with_writer(std::io::stderr)
            .boxed(),
        (false, true) => fmt::layer()
            .with_target(config.with_target)
            .with_writer(std::io::stderr)
            .boxed(),
        (false, false) => fmt::layer()
            .without_time()
            .with_target(config.with_target)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()
        .map_err(|e| LoggingError::InitializationFailed(e.to_string()))?;

    Ok(())
}
