//! User domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ecommerce_core::UserId;

/// A registered user (domain type).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    #[sqlx(rename = "user_id")]
    pub id: UserId,
    /// Display name, never blank.
    pub name: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

/// The authenticated caller, resolved from the `x-user-id` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: UserId,
    pub name: String,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
        }
    }
}

/// User as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub user_id: UserId,
    pub name: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            name: user.name,
        }
    }
}

/// Body of `POST /users`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserRequest {
    pub user_id: UserId,
    pub name: Option<String>,
}
