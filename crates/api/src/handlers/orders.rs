//! Order commands and queries.

use sqlx::PgPool;

use ecommerce_core::OrderId;

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::models::{CurrentUser, OrderDto, OrderRequest};
use crate::validation;

/// List every order of the caller.
///
/// # Errors
///
/// `NotFound` if the caller has no orders.
pub async fn list_orders(pool: &PgPool, caller: &CurrentUser) -> Result<Vec<OrderDto>> {
    let orders = OrderRepository::new(pool).list_by_user(caller.id).await?;
    Ok(orders.into_iter().map(OrderDto::from).collect())
}

/// Get one order by ID.
///
/// # Errors
///
/// Validation failure for a nil id, `NotFound` for an unknown order.
pub async fn get_order(pool: &PgPool, order_id: OrderId) -> Result<OrderDto> {
    let order_id = validation::order_id(order_id)?;
    let order = OrderRepository::new(pool).get_by_id(order_id).await?;
    Ok(order.into())
}

/// Cancel a pending order.
///
/// # Errors
///
/// Validation failure for malformed input, `BadRequest` when the order
/// cannot be cancelled.
pub async fn cancel_order(pool: &PgPool, request: &OrderRequest) -> Result<OrderDto> {
    let (order_id, user_id) = validation::order_transition(request)?;
    let order = OrderRepository::new(pool).cancel(order_id, user_id).await?;
    Ok(order.into())
}

/// Check out a pending order with at least one item.
///
/// # Errors
///
/// Validation failure for malformed input, `BadRequest` when the order
/// cannot be checked out.
pub async fn checkout_order(pool: &PgPool, request: &OrderRequest) -> Result<OrderDto> {
    let (order_id, user_id) = validation::order_transition(request)?;
    let order = OrderRepository::new(pool).checkout(order_id, user_id).await?;
    Ok(order.into())
}

/// Delete an order and its items.
///
/// # Errors
///
/// Validation failure for a nil id, `BadRequest` for an unknown order.
pub async fn delete_order(pool: &PgPool, order_id: OrderId) -> Result<()> {
    let order_id = validation::order_id(order_id)?;
    OrderRepository::new(pool)
        .delete(order_id)
        .await
        .map_err(AppError::from_delete)?;
    Ok(())
}
