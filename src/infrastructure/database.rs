use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;

use crate::config::DatabaseConfig;

/// The persistent store could not be reached at startup
#[derive(Debug, Error)]
#[error("failed to connect to database: {0}")]
pub struct StorageError(#[from] pub sqlx::Error);

/// Opens the process-wide connection pool
///
/// Connects eagerly so that an unreachable database aborts startup instead of
/// surfacing on the first request. There is no retry.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, StorageError> {
    tracing::info!("Connecting to database...");

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.url)
        .await?;

    tracing::info!("Database connected successfully");
    Ok(pool)
}
