//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use quill_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `None` runs against the in-memory store.
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| {
            let defaults = DatabaseConfig::default();

            DatabaseConfig {
                url,
                max_connections: parse_var("DB_MAX_CONNECTIONS")
                    .unwrap_or(defaults.max_connections),
                min_connections: parse_var("DB_MIN_CONNECTIONS")
                    .unwrap_or(defaults.min_connections),
                connect_timeout: parse_var("DB_CONNECT_TIMEOUT_SECS")
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.connect_timeout),
                idle_timeout: parse_var("DB_IDLE_TIMEOUT_SECS")
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.idle_timeout),
                sqlx_logging: env::var("DB_LOG_STATEMENTS")
                    .map(|v| v == "true" || v == "1")
                    .unwrap_or(defaults.sqlx_logging),
            }
        });

        Self { database }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}
