//! Database migration command.
//!
//! Applies the migrations embedded from `crates/api/migrations/`.
//!
//! # Environment Variables
//!
//! - `ECOMMERCE_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string

use super::{CommandError, connect};

/// Run all pending migrations.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    ecommerce_api::MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
