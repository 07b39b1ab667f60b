use std::time::Duration;

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

use crate::config::{optional_var, parse_var};
use crate::core::{AppError, Result};

/// MySQL connection settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    /// Idle connections kept open (`DATABASE_POOL_SIZE`)
    pub min_connections: u32,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        let url = optional_var("DATABASE_URL")
            .ok_or_else(|| AppError::Configuration("DATABASE_URL not set".to_string()))?;
        let max_connections = parse_var("DATABASE_MAX_CONNECTIONS", 20)?;
        let min_connections = parse_var("DATABASE_POOL_SIZE", 10u32)?.min(max_connections);

        Ok(Self {
            url,
            min_connections,
            max_connections,
        })
    }

    pub async fn create_pool(&self) -> Result<MySqlPool> {
        let pool = MySqlPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .test_before_acquire(true)
            .connect(&self.url)
            .await?;

        tracing::debug!(
            min = self.min_connections,
            max = self.max_connections,
            "MySQL pool ready"
        );
        Ok(pool)
    }

    /// Apply pending schema migrations from `migrations/`
    pub async fn run_migrations(pool: &MySqlPool) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .map_err(|e| AppError::Configuration(format!("Migration failed: {}", e)))
    }
}
