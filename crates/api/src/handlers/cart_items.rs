//! Cart item commands and queries.

use sqlx::PgPool;

use ecommerce_core::CartItemId;

use crate::db::CartItemRepository;
use crate::error::{AppError, Result};
use crate::models::{CartItemDto, CartItemRequest, CurrentUser};
use crate::validation;

/// List the items in the caller's pending order.
///
/// # Errors
///
/// `BadRequest` if the caller has no pending order.
pub async fn list_cart_items(pool: &PgPool, caller: &CurrentUser) -> Result<Vec<CartItemDto>> {
    let items = CartItemRepository::new(pool)
        .list_for_pending_order(caller.id)
        .await?;
    Ok(items.into_iter().map(CartItemDto::from).collect())
}

/// Add an item, opening a pending order for the user if needed.
///
/// # Errors
///
/// Validation failure for malformed input, `BadRequest` when a lifecycle
/// rule refuses the add.
pub async fn add_cart_item(pool: &PgPool, request: &CartItemRequest) -> Result<CartItemDto> {
    let item = validation::cart_item(request)?;
    let added = CartItemRepository::new(pool).add(&item).await?;
    Ok(added.into())
}

/// Overwrite an existing item's label and price.
///
/// # Errors
///
/// Validation failure for malformed input, `BadRequest` when a lifecycle
/// rule refuses the update.
pub async fn update_cart_item(pool: &PgPool, request: &CartItemRequest) -> Result<CartItemDto> {
    let item = validation::cart_item(request)?;
    let updated = CartItemRepository::new(pool).update(&item).await?;
    Ok(updated.into())
}

/// Delete an item by ID.
///
/// # Errors
///
/// Validation failure for a nil id, `BadRequest` for an unknown item.
pub async fn delete_cart_item(pool: &PgPool, cart_item_id: CartItemId) -> Result<()> {
    let cart_item_id = validation::delete_cart_item(cart_item_id)?;
    CartItemRepository::new(pool)
        .delete(cart_item_id)
        .await
        .map_err(AppError::from_delete)?;
    Ok(())
}
