//! Database connection management.

use crate::config::TourneyConfig;
use crate::error::Result;
use sqlx::{PgPool, Row};

/// Owned handle to the shared tournament store.
pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Connect using environment configuration.
    pub async fn new() -> Result<Self> {
        Self::from_config(&TourneyConfig::from_env()?).await
    }

    pub async fn from_config(config: &TourneyConfig) -> Result<Self> {
        let pool = config.connect().await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<bool> {
        let row = sqlx::query("SELECT 1 as health")
            .fetch_one(&self.pool)
            .await?;

        let health: i32 = row.get("health");
        Ok(health == 1)
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}
