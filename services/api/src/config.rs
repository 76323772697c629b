//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use tracing::Level;

/// `DATABASE_URL` value that selects the in-process store instead of Postgres.
pub const IN_MEMORY_DATABASE: &str = "memory";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub database_url: String,
    pub database_max_connections: u32,
    pub log_level: Level,
    /// Header carrying the user id resolved by the upstream session layer.
    pub user_id_header: String,
    pub cors_allowed_origin: String,
    pub body_limit_bytes: usize,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Server and Database Settings ---
        let bind_address_str = lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingVar("DATABASE_URL".to_string()))?;

        let database_max_connections = parse_or("DATABASE_MAX_CONNECTIONS", &lookup, 5)?;

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Request Handling ---
        let user_id_header = lookup("USER_ID_HEADER")
            .map(|h| h.trim().to_ascii_lowercase())
            .unwrap_or_else(|| "x-user-id".to_string());
        if axum::http::HeaderName::from_bytes(user_id_header.as_bytes()).is_err() {
            return Err(ConfigError::InvalidValue(
                "USER_ID_HEADER".to_string(),
                format!("'{}' is not a valid header name", user_id_header),
            ));
        }

        let cors_allowed_origin = lookup("CORS_ALLOWED_ORIGIN")
            .map(|o| o.trim().to_string())
            .unwrap_or_else(|| "http://localhost:3000".to_string());
        // Credentials are always allowed, which rules out the wildcard origin.
        if cors_allowed_origin == "*" {
            return Err(ConfigError::InvalidValue(
                "CORS_ALLOWED_ORIGIN".to_string(),
                "'*' cannot be combined with credentialed requests".to_string(),
            ));
        }
        if axum::http::HeaderValue::from_str(&cors_allowed_origin).is_err() {
            return Err(ConfigError::InvalidValue(
                "CORS_ALLOWED_ORIGIN".to_string(),
                format!("'{}' is not a valid origin", cors_allowed_origin),
            ));
        }

        let body_limit_bytes = parse_or("BODY_LIMIT_BYTES", &lookup, 1024 * 1024)?;

        Ok(Self {
            bind_address,
            database_url,
            database_max_connections,
            log_level,
            user_id_header,
            cors_allowed_origin,
            body_limit_bytes,
        })
    }

    pub fn uses_in_memory_database(&self) -> bool {
        self.database_url == IN_MEMORY_DATABASE
    }
}

fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidValue(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}
