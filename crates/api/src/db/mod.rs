//! Database operations for the ecommerce `PostgreSQL` store.
//!
//! ## Tables
//!
//! - `users` - Registered users (created via the API or `ecom-cli user create`)
//! - `orders` - One row per order; at most one `pending` order per user
//! - `cart_items` - Line items, each attached to exactly one order
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p ecommerce-cli -- migrate
//! ```
//!
//! # Transactions
//!
//! Every mutating repository method runs in a single transaction and starts by
//! locking the owning user's row, so concurrent writes for one user are
//! serialised. The business decision itself is made by the pure rules in
//! [`ecommerce_core::lifecycle`].

pub mod cart_items;
pub mod orders;
pub mod users;

pub use cart_items::CartItemRepository;
pub use orders::OrderRepository;
pub use users::UserRepository;

use std::time::Duration;

use ecommerce_core::{LifecycleError, UserId};
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgConnection, PgPool};
use thiserror::Error;

/// Name of the partial unique index allowing one pending order per user.
pub const ONE_PENDING_ORDER_INDEX: &str = "orders_one_pending_per_user";

/// Primary key constraint of the `orders` table.
pub const ORDER_PRIMARY_KEY: &str = "orders_pkey";

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("{0}")]
    NotFound(String),

    /// A business rule rejected the operation.
    #[error(transparent)]
    Rejected(#[from] LifecycleError),
}

/// Create a `PostgreSQL` connection pool.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Lock a user's row for the rest of the transaction.
///
/// Returns `false` if the user does not exist.
async fn lock_user(conn: &mut PgConnection, user_id: UserId) -> Result<bool, sqlx::Error> {
    let row: Option<(UserId,)> =
        sqlx::query_as("SELECT user_id FROM users WHERE user_id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(conn)
            .await?;
    Ok(row.is_some())
}

/// Whether `err` is a unique violation of the named constraint.
fn violates(err: &sqlx::Error, constraint: &str) -> bool {
    if let sqlx::Error::Database(db_err) = err
        && db_err.is_unique_violation()
    {
        return db_err.constraint() == Some(constraint);
    }
    false
}

/// Whether `err` is a violation of the one-pending-order index.
fn is_pending_order_conflict(err: &sqlx::Error) -> bool {
    violates(err, ONE_PENDING_ORDER_INDEX)
}

/// Whether `err` is an insert of an order id that another transaction
/// committed first.
fn is_order_id_conflict(err: &sqlx::Error) -> bool {
    violates(err, ORDER_PRIMARY_KEY)
}

/// Whether `err` is a primary-key (or other unique) violation.
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
