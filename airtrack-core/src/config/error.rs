//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// An `AIRTRACK_*` variable held a value of the wrong shape
    #[error("invalid value for {var}: {reason}")]
    Env { var: &'static str, reason: String },

    /// A loaded config breaks a rule; `field` is the dotted TOML path
    #[error("invalid config field {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_source() {
        let err = ConfigError::Env {
            var: "AIRTRACK_AUTH_LATENCY",
            reason: "expected number at 0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value for AIRTRACK_AUTH_LATENCY: expected number at 0"
        );

        let err = ConfigError::invalid("auth.invite_code", "must not be empty");
        assert_eq!(
            err.to_string(),
            "invalid config field auth.invite_code: must not be empty"
        );
    }
}
