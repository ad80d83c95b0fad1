//! User bootstrap commands.
//!
//! Every API route identifies its caller through `x-user-id`, so at least one
//! user has to be created out of band before the API is usable.

use uuid::Uuid;

use ecommerce_api::db::UserRepository;
use ecommerce_api::models::UserRequest;
use ecommerce_api::validation;
use ecommerce_core::UserId;

use super::{CommandError, connect};

/// Create a user and print its ID.
pub async fn create(name: &str, id: Option<Uuid>) -> Result<UserId, CommandError> {
    let request = UserRequest {
        user_id: id.map_or_else(UserId::generate, UserId::new),
        name: Some(name.to_owned()),
    };
    let (user_id, name) = validation::add_user(&request).map_err(|errors| {
        let detail = errors
            .fields()
            .values()
            .cloned()
            .collect::<Vec<_>>()
            .join(" ");
        CommandError::InvalidInput(detail)
    })?;

    let pool = connect().await?;
    let user = UserRepository::new(&pool).add(user_id, &name).await?;

    tracing::info!(user_id = %user.id, "User created");

    #[allow(clippy::print_stdout)]
    {
        println!("{}", user.id);
    }
    Ok(user.id)
}

/// Print an existing user.
pub async fn show(id: Uuid) -> Result<(), CommandError> {
    let pool = connect().await?;
    let user = UserRepository::new(&pool).get_by_id(UserId::new(id)).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("{}\t{}\t{}", user.id, user.name, user.created_at.to_rfc3339());
    }
    Ok(())
}
