//! CLI command implementations.

pub mod migrate;
pub mod user;

use sqlx::PgPool;
use thiserror::Error;

use ecommerce_api::config::{ConfigError, database_url_from_env};
use ecommerce_api::db::{RepositoryError, create_pool};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Database settings could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Repository operation failed.
    #[error("{0}")]
    Repository(#[from] RepositoryError),

    /// Invalid command input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Connect to the API database using the same variables as the server.
async fn connect() -> Result<PgPool, CommandError> {
    let database_url = database_url_from_env()?;

    tracing::info!("Connecting to database...");
    let pool = create_pool(&database_url, 2).await?;
    Ok(pool)
}
