//! Process configuration read from environment variables.
//!
//! | variable | default | meaning |
//! |---|---|---|
//! | `BIND_ADDR` | `0.0.0.0:8080` | listen address |
//! | `DATABASE_URL` | unset | `sqlite:` or `postgres:` URL; unset keeps suppliers in memory |
//! | `EXPOSE_STORAGE_ERRORS` | `false` | include storage error text in form messages |
//! | `LOG_FORMAT` | `json` | `json` or `pretty` |
//!
//! `RUST_LOG` is read separately by the tracing subscriber.

use std::net::SocketAddr;

use thiserror::Error;
use victory_observability::LogFormat;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("BIND_ADDR {value:?} is not a socket address: {reason}")]
    InvalidBindAddr { value: String, reason: String },

    #[error("{key} must be a boolean (true/false/1/0), got {value:?}")]
    InvalidBool { key: &'static str, value: String },

    #[error("LOG_FORMAT: {0}")]
    InvalidLogFormat(String),

    #[error("DATABASE_URL {0:?} has an unsupported scheme (expected sqlite: or postgres:)")]
    UnsupportedDatabaseUrl(String),
}

/// Where supplier records are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    InMemory,
    Sqlite(String),
    Postgres(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: Option<String>,
    pub expose_storage_errors: bool,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            database_url: None,
            expose_storage_errors: false,
            log_format: LogFormat::Json,
        }
    }
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_value = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_value
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidBindAddr {
                value: bind_value.clone(),
                reason: e.to_string(),
            })?;

        let expose_storage_errors = match get("EXPOSE_STORAGE_ERRORS") {
            Some(v) => parse_bool("EXPOSE_STORAGE_ERRORS", &v)?,
            None => false,
        };

        let log_format = match get("LOG_FORMAT") {
            Some(v) => v.parse().map_err(ConfigError::InvalidLogFormat)?,
            None => LogFormat::default(),
        };

        let config = Self {
            bind_addr,
            database_url: get("DATABASE_URL").map(|v| v.trim().to_string()),
            expose_storage_errors,
            log_format,
        };
        config.storage_backend()?;
        Ok(config)
    }

    /// Classify `database_url` by its scheme.
    pub fn storage_backend(&self) -> Result<StorageBackend, ConfigError> {
        let Some(url) = self.database_url.as_deref() else {
            return Ok(StorageBackend::InMemory);
        };

        if url.starts_with("sqlite:") {
            Ok(StorageBackend::Sqlite(url.to_string()))
        } else if url.starts_with("postgres:") || url.starts_with("postgresql:") {
            Ok(StorageBackend::Postgres(url.to_string()))
        } else {
            Err(ConfigError::UnsupportedDatabaseUrl(url.to_string()))
        }
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key,
            value: value.to_string(),
        }),
    }
}
