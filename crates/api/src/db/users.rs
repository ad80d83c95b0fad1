//! User repository for database operations.

use sqlx::PgPool;
use tracing::{info, warn};

use ecommerce_core::lifecycle::check_add_user;
use ecommerce_core::{LifecycleError, UserId};

use super::{RepositoryError, is_unique_violation};
use crate::models::User;

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by their ID, if they exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r"
            SELECT user_id, name, created_at
            FROM users
            WHERE user_id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user does not exist.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<User, RepositoryError> {
        self.find(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound("User does not exist.".to_owned()))
    }

    /// Create a new user with a client-supplied ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Rejected` if the ID is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add(&self, id: UserId, name: &str) -> Result<User, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let exists: Option<(UserId,)> =
            sqlx::query_as("SELECT user_id FROM users WHERE user_id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        if let Err(rule) = check_add_user(exists.is_some()) {
            warn!(user_id = %id, "{rule}");
            return Err(rule.into());
        }

        let user = sqlx::query_as::<_, User>(
            r"
            INSERT INTO users (user_id, name)
            VALUES ($1, $2)
            RETURNING user_id, name, created_at
            ",
        )
        .bind(id)
        .bind(name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            // Lost a race with a concurrent insert of the same id.
            if is_unique_violation(&e) {
                return RepositoryError::Rejected(LifecycleError::UserExists);
            }
            RepositoryError::Database(e)
        })?;

        tx.commit().await?;

        info!(user_id = %user.id, "User added");
        Ok(user)
    }
}
