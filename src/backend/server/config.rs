/**
 * Server Configuration
 *
 * This module handles the PostgreSQL side of startup: opening the pool and
 * running migrations.
 *
 * # Error Handling
 *
 * A configured database that cannot be reached stops startup; silently
 * falling back to the in-memory stores would lose every write. A failed
 * migration is logged and startup continues, since the schema may already
 * be in place.
 */

use sqlx::PgPool;
use thiserror::Error;

use crate::backend::error::BackendError;
use crate::shared::ConfigError;

/// Failures that prevent the server from starting
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    /// Seeding default users failed
    #[error("Startup task failed: {0}")]
    Backend(#[from] BackendError),
}

/// Connect to PostgreSQL and run migrations
///
/// This function:
/// 1. Creates a PostgreSQL connection pool
/// 2. Runs the migrations in `migrations/`
///
/// # Example
///
/// ```rust,no_run
/// use contacthub::backend::server::config::load_database;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = load_database("postgres://localhost/contacthub").await?;
/// # Ok(())
/// # }
/// ```
pub async fn load_database(database_url: &str) -> Result<PgPool, StartupError> {
    tracing::info!("[Startup] Connecting to database...");

    let pool = PgPool::connect(database_url).await.map_err(|e| {
        tracing::error!("[Startup] Failed to create database connection pool: {:?}", e);
        e
    })?;

    tracing::info!("[Startup] Database connection pool created successfully");

    tracing::info!("[Startup] Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => {
            tracing::info!("[Startup] Database migrations completed successfully");
        }
        Err(e) => {
            tracing::error!("[Startup] Failed to run database migrations: {}", e);
            tracing::warn!("[Startup] Continuing without migrations - database might not be up to date");
        }
    }

    Ok(pool)
}
