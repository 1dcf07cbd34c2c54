//! Runtime configuration.
//!
//! Environment-driven settings with sensible defaults, mirroring the
//! deployment model of the ingestion side: one shared PostgreSQL store, one
//! pool per process.

use crate::error::{Result, TourneyError};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct TourneyConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_ms: u64,
}

impl Default for TourneyConfig {
    fn default() -> Self {
        Self {
            database_url: "postgresql://localhost/tourney_development".to_string(),
            max_connections: 10,
            acquire_timeout_ms: 30_000,
        }
    }
}

impl TourneyConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(db_url) = std::env::var("DATABASE_URL") {
            config.database_url = db_url;
        }

        if let Ok(max_connections) = std::env::var("TOURNEY_MAX_CONNECTIONS") {
            config.max_connections = max_connections.parse().map_err(|e| {
                TourneyError::Configuration(format!("Invalid max_connections: {e}"))
            })?;
        }

        if let Ok(acquire_timeout) = std::env::var("TOURNEY_ACQUIRE_TIMEOUT_MS") {
            config.acquire_timeout_ms = acquire_timeout.parse().map_err(|e| {
                TourneyError::Configuration(format!("Invalid acquire_timeout_ms: {e}"))
            })?;
        }

        Ok(config)
    }

    /// Build a connection pool from this configuration.
    pub async fn connect(&self) -> Result<PgPool> {
        let pool = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(Duration::from_millis(self.acquire_timeout_ms))
            .connect(&self.database_url)
            .await?;
        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let config = TourneyConfig::default();
        assert_eq!(config.max_connections, 10);
        assert!(config.database_url.starts_with("postgresql://"));
    }

    #[test]
    fn bad_env_value_is_a_configuration_error() {
        std::env::set_var("TOURNEY_MAX_CONNECTIONS", "not-a-number");
        let result = TourneyConfig::from_env();
        std::env::remove_var("TOURNEY_MAX_CONNECTIONS");
        assert!(matches!(result, Err(TourneyError::Configuration(_))));
    }
}
