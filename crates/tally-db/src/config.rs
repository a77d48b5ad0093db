//! # Environment Configuration
//!
//! Loads [`DbConfig`] from environment variables with fallback to defaults.
//!
//! | Variable                          | Default      |
//! |-----------------------------------|--------------|
//! | `TALLY_DATABASE_PATH`             | `tally.db`   |
//! | `TALLY_DB_MAX_CONNECTIONS`        | `5`          |
//! | `TALLY_DB_CONNECT_TIMEOUT_SECS`   | `30`         |
//! | `TALLY_DB_OPERATION_TIMEOUT_SECS` | `10`         |

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::pool::DbConfig;

pub const DATABASE_PATH_VAR: &str = "TALLY_DATABASE_PATH";
pub const MAX_CONNECTIONS_VAR: &str = "TALLY_DB_MAX_CONNECTIONS";
pub const CONNECT_TIMEOUT_VAR: &str = "TALLY_DB_CONNECT_TIMEOUT_SECS";
pub const OPERATION_TIMEOUT_VAR: &str = "TALLY_DB_OPERATION_TIMEOUT_SECS";

const DEFAULT_DATABASE_PATH: &str = "tally.db";

impl DbConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = lookup(DATABASE_PATH_VAR).unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string());
        if path.trim().is_empty() {
            return Err(ConfigError::MissingRequired(DATABASE_PATH_VAR.to_string()));
        }

        let mut config = DbConfig::new(path);

        if let Some(max) = parse_var::<u32>(&lookup, MAX_CONNECTIONS_VAR)? {
            if max == 0 {
                return Err(ConfigError::InvalidValue(MAX_CONNECTIONS_VAR.to_string()));
            }
            let min = config.min_connections.min(max);
            config = config.max_connections(max).min_connections(min);
        }
        if let Some(secs) = parse_var::<u64>(&lookup, CONNECT_TIMEOUT_VAR)? {
            config = config.connect_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = parse_var::<u64>(&lookup, OPERATION_TIMEOUT_VAR)? {
            if secs == 0 {
                return Err(ConfigError::InvalidValue(OPERATION_TIMEOUT_VAR.to_string()));
            }
            config = config.operation_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
