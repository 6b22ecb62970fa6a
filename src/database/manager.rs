use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the backing store
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error("Unexpected row shape from {table}: {message}")]
    RowShape { table: &'static str, message: String },

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Owns the process-wide connection pool.
///
/// Created once at startup and handed to the stores that need it; `close`
/// drains it on shutdown.
#[derive(Clone)]
pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let options = Self::connect_options(config)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_with(options)
            .await?;

        info!(
            "Connected to PostgreSQL (max_connections={}, ssl={})",
            config.max_connections, config.ssl
        );
        Ok(Self { pool })
    }

    fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions, DatabaseError> {
        let options = match &config.url {
            Some(url) => PgConnectOptions::from_str(url)
                .map_err(|e| DatabaseError::InvalidDatabaseUrl(e.to_string()))?,
            None => PgConnectOptions::new()
                .host(&config.host)
                .port(config.port)
                .username(&config.user)
                .password(&config.password)
                .database(&config.name),
        };
        Ok(options.ssl_mode(Self::ssl_mode(config.ssl)))
    }

    /// TLS is required but the server certificate is not verified when enabled
    fn ssl_mode(enabled: bool) -> PgSslMode {
        if enabled {
            PgSslMode::Require
        } else {
            PgSslMode::Disable
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to be returned
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }
}
