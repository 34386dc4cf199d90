//! Database configuration from process environment
//!
//! Credentials are startup-time configuration: a missing required variable
//! aborts process initialization before any request is accepted.

use sqlx::postgres::PgConnectOptions;

/// Default pool floor
const DEFAULT_MIN_CONNECTIONS: u32 = 1;

/// Default pool ceiling
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Configuration error raised while reading the environment
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("required environment variable {name} is not set")]
    Missing { name: &'static str },

    #[error("environment variable {name} is not a valid {expected}")]
    Invalid { name: &'static str, expected: &'static str },
}

/// Connection settings for the task datastore.
#[derive(Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub min_connections: u32,
    pub max_connections: u32,
}

impl DbConfig {
    /// Read configuration from the process environment.
    ///
    /// Variables: `DB_HOST` (default localhost), `DB_PORT` (default 5432),
    /// `DB_USER`, `DB_PASSWORD`, `DB_NAME` (required), `DB_POOL_MIN`
    /// (default 1), `DB_POOL_MAX` (default 10).
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: optional("DB_HOST").unwrap_or_else(|| "localhost".to_owned()),
            port: parsed("DB_PORT", "port number", 5432)?,
            user: required("DB_USER")?,
            password: required("DB_PASSWORD")?,
            database: required("DB_NAME")?,
            min_connections: parsed("DB_POOL_MIN", "pool size", DEFAULT_MIN_CONNECTIONS)?,
            max_connections: parsed("DB_POOL_MAX", "pool size", DEFAULT_MAX_CONNECTIONS)?,
        })
    }

    /// Build sqlx connect options (no URL string, so credentials need no
    /// percent-escaping).
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

fn optional(name: &'static str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::Missing { name })
}

fn parsed<T: std::str::FromStr>(
    name: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match optional(name) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid { name, expected }),
        None => Ok(default),
    }
}
