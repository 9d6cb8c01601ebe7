//! Configuration management for AirTrack
//!
//! Environment- and file-based configuration with defaults and validation.
//! The `[auth]` section holds the placeholder credentials of the mock
//! identity system: the shared invite code and the reserved administrator.

use serde::{Deserialize, Serialize};
use std::env;
use crate::logging::{LogLevel, LoggingError};
use std::path::{Path, PathBuf};
use std::str::ParseBoolError;
use std::time::Duration;

mod error;

pub use error::ConfigError;

/// Invite code accepted by registration unless overridden
pub const DEFAULT_INVITE_CODE: &str = "ishowcryptoairdrops";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Store configuration
    pub store: StoreConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Authentication configuration
    pub auth: AuthConfig,
}

/// Store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding one JSON file per persisted key
    pub data_dir: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum level; `RUST_LOG` takes precedence when set
    pub level: LogLevel,

    /// Enable JSON formatting
    pub json_format: bool,

    /// Include timestamps
    pub with_timestamp: bool,

    /// Include target module
    pub with_target: bool,
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Registration succeeds only with this exact code
    pub invite_code: String,

    /// Email of the built-in administrator
    pub admin_email: String,

    /// Password of the built-in administrator
    pub admin_password: String,

    /// Display name of the built-in administrator
    pub admin_username: String,

    /// Artificial delay before login/registration complete
    #[serde(with = "humantime_serde")]
    pub simulated_latency: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            json_format: false,
            with_timestamp: true,
            with_target: true,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            invite_code: DEFAULT_INVITE_CODE.to_string(),
            admin_email: "admin@airtrack.local".to_string(),
            admin_password: "change-me-admin".to_string(),
            admin_username: "AirTrackAdmin".to_string(),
            simulated_latency: Duration::from_millis(800),
        }
    }
}

impl Config {
    /// Load configuration from environment variables on top of the defaults
    ///
    /// Environment variables follow the pattern: AIRTRACK_<SECTION>_<KEY>
    /// Example: AIRTRACK_STORE_DATA_DIR=/var/lib/airtrack
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from `AIRTRACK_*` environment variables
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        // Store config
        if let Ok(data_dir) = env::var("AIRTRACK_STORE_DATA_DIR") {
            self.store.data_dir = PathBuf::from(data_dir);
        }

        // Logging config
        if let Ok(level) = env::var("AIRTRACK_LOG_LEVEL") {
            self.logging.level = level.parse().map_err(|e: LoggingError| ConfigError::Env {
                var: "AIRTRACK_LOG_LEVEL",
                reason: e.to_string(),
            })?;
        }
        if let Ok(json) = env::var("AIRTRACK_LOG_JSON") {
            self.logging.json_format = json.parse().map_err(|e: ParseBoolError| ConfigError::Env {
                var: "AIRTRACK_LOG_JSON",
                reason: e.to_string(),
            })?;
        }

        // Auth config
        if let Ok(code) = env::var("AIRTRACK_AUTH_INVITE_CODE") {
            self.auth.invite_code = code;
        }
        if let Ok(email) = env::var("AIRTRACK_AUTH_ADMIN_EMAIL") {
            self.auth.admin_email = email;
        }
        if let Ok(password) = env::var("AIRTRACK_AUTH_ADMIN_PASSWORD") {
            self.auth.admin_password = password;
        }
        if let Ok(latency) = env::var("AIRTRACK_AUTH_LATENCY") {
            self.auth.simulated_latency = humantime_serde::re::humantime::parse_duration(&latency)
                .map_err(|e| ConfigError::Env {
                    var: "AIRTRACK_AUTH_LATENCY",
                    reason: e.to_string(),
                })?;
        }

        Ok(())
    }

    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::invalid("store.data_dir", "must not be empty"));
        }

        if self.auth.invite_code.trim().is_empty() {
            return Err(ConfigError::invalid("auth.invite_code", "must not be empty"));
        }

        if self.auth.admin_email.trim().is_empty() {
            return Err(ConfigError::invalid("auth.admin_email", "is required"));
        }

        if self.auth.admin_password.is_empty() {
            return Err(ConfigError::invalid("auth.admin_password", "is required"));
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = toml::to_string_pretty(self)?;

        std::fs::write(path, contents).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(())
    }
}
