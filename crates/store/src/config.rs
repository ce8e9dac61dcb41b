//! Store configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CLEMENTINE_DATABASE_URL` - `SQLite` connection string
//!   (e.g. `sqlite:clementine.db?mode=rwc`)
//!
//! ## Optional
//! - `CLEMENTINE_MAX_CONNECTIONS` - Connection pool size (default: 10)
//! - `CLEMENTINE_ACQUIRE_TIMEOUT_SECS` - Pool acquire timeout in seconds
//!   (default: 10)

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// `SQLite` database connection URL
    pub database_url: String,
    /// Maximum number of pooled connections
    pub max_connections: u32,
    /// How long to wait for a free connection before failing
    pub acquire_timeout: Duration,
}

impl StoreConfig {
    /// Load configuration from the environment, reading a local `.env`
    /// file first if one exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `CLEMENTINE_DATABASE_URL` is
    /// unset, or `ConfigError::InvalidEnvVar` if an optional variable is
    /// set but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("CLEMENTINE_DATABASE_URL")
            .map_err(|_| ConfigError::MissingEnvVar("CLEMENTINE_DATABASE_URL".to_owned()))?;

        let max_connections =
            parse_or_default("CLEMENTINE_MAX_CONNECTIONS", env_opt("CLEMENTINE_MAX_CONNECTIONS"), 10)?;
        let acquire_timeout_secs: u64 = parse_or_default(
            "CLEMENTINE_ACQUIRE_TIMEOUT_SECS",
            env_opt("CLEMENTINE_ACQUIRE_TIMEOUT_SECS"),
            10,
        )?;

        Ok(Self {
            database_url,
            max_connections,
            acquire_timeout: Duration::from_secs(acquire_timeout_secs),
        })
    }
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn parse_or_default<T>(name: &str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(name.to_owned(), e.to_string())),
    }
}
