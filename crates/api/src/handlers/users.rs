//! User commands and queries.

use sqlx::PgPool;

use ecommerce_core::UserId;

use crate::db::UserRepository;
use crate::error::Result;
use crate::models::{UserDto, UserRequest};
use crate::validation;

/// Get one user by ID.
///
/// # Errors
///
/// Validation failure for a nil id, `NotFound` for an unknown user.
pub async fn get_user(pool: &PgPool, user_id: UserId) -> Result<UserDto> {
    let user_id = validation::get_user(user_id)?;
    let user = UserRepository::new(pool).get_by_id(user_id).await?;
    Ok(user.into())
}

/// Register a new user under a client-chosen ID.
///
/// # Errors
///
/// Validation failure for a nil id or blank name, `BadRequest` if the id is
/// taken.
pub async fn add_user(pool: &PgPool, request: &UserRequest) -> Result<UserDto> {
    let (user_id, name) = validation::add_user(request)?;
    let user = UserRepository::new(pool).add(user_id, &name).await?;
    Ok(user.into())
}
