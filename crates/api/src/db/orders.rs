//! Order repository for database operations.

use sqlx::{PgConnection, PgPool};
use tracing::{debug, info, warn};

use ecommerce_core::lifecycle::{
    CheckoutFacts, Operation, TransitionFacts, plan_cancel, plan_checkout,
};
use ecommerce_core::{LifecycleError, OrderId, OrderStatus, UserId};

use super::{RepositoryError, lock_user};
use crate::models::Order;

const ORDER_COLUMNS: &str = "order_id, user_id, status, created_at, updated_at";

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every order belonging to a user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user has no orders.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_at, order_id"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        if orders.is_empty() {
            return Err(RepositoryError::NotFound(
                "User does not have any order.".to_owned(),
            ));
        }

        debug!(user_id = %user_id, count = orders.len(), "Orders retrieved");
        Ok(orders)
    }

    /// Get an order by its ID, regardless of owner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, order_id: OrderId) -> Result<Order, RepositoryError> {
        sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE order_id = $1"
        ))
        .bind(order_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound("Order does not exist.".to_owned()))
    }

    /// Cancel a user's pending order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Rejected` if the user is unknown, the order
    /// is not theirs, or it is no longer pending.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn cancel(
        &self,
        order_id: OrderId,
        user_id: UserId,
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let user_exists = lock_user(&mut tx, user_id).await?;
        let order = find_owned_for_update(&mut tx, order_id, user_id).await?;

        let facts = TransitionFacts {
            user_exists,
            order: order.as_ref().map(Order::view),
        };
        let next = plan_cancel(&facts).inspect_err(|rule| {
            warn!(order_id = %order_id, user_id = %user_id, "{rule}");
        })?;

        let order = set_status(&mut tx, order_id, next, Operation::CancelOrder).await?;
        tx.commit().await?;

        info!(order_id = %order_id, user_id = %user_id, "Order cancelled");
        Ok(order)
    }

    /// Check out a user's pending order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Rejected` if the user is unknown, the order
    /// is not theirs, it is no longer pending, or it has no cart items.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn checkout(
        &self,
        order_id: OrderId,
        user_id: UserId,
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let user_exists = lock_user(&mut tx, user_id).await?;
        let order = find_owned_for_update(&mut tx, order_id, user_id).await?;
        let (cart_item_count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM cart_items WHERE order_id = $1")
                .bind(order_id)
                .fetch_one(&mut *tx)
                .await?;

        let facts = CheckoutFacts {
            user_exists,
            order: order.as_ref().map(Order::view),
            cart_item_count,
        };
        let next = plan_checkout(&facts).inspect_err(|rule| {
            warn!(order_id = %order_id, user_id = %user_id, "{rule}");
        })?;

        let order = set_status(&mut tx, order_id, next, Operation::CheckoutOrder).await?;
        tx.commit().await?;

        info!(order_id = %order_id, user_id = %user_id, cart_item_count, "Order checked out");
        Ok(order)
    }

    /// Delete an order. Its cart items are removed with it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, order_id: OrderId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM orders WHERE order_id = $1")
            .bind(order_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            warn!(order_id = %order_id, "Delete of unknown order");
            return Err(RepositoryError::NotFound(
                "Cannot delete order. Order does not exist.".to_owned(),
            ));
        }

        info!(order_id = %order_id, "Order deleted");
        Ok(())
    }
}

// =============================================================================
// Transaction helpers (shared with the cart item repository)
// =============================================================================

/// Load an order by ID (any owner) and lock it.
pub(super) async fn find_for_update(
    conn: &mut PgConnection,
    order_id: OrderId,
) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as::<_, Order>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE order_id = $1 FOR UPDATE"
    ))
    .bind(order_id)
    .fetch_optional(conn)
    .await
}

/// Load an order only if it belongs to `user_id`, and lock it.
pub(super) async fn find_owned_for_update(
    conn: &mut PgConnection,
    order_id: OrderId,
    user_id: UserId,
) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as::<_, Order>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE order_id = $1 AND user_id = $2 FOR UPDATE"
    ))
    .bind(order_id)
    .bind(user_id)
    .fetch_optional(conn)
    .await
}

/// The user's pending order, if any.
pub(super) async fn find_pending(
    conn: &mut PgConnection,
    user_id: UserId,
) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as::<_, Order>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 AND status = 'pending'"
    ))
    .bind(user_id)
    .fetch_optional(conn)
    .await
}

/// Move a pending order to `next`.
///
/// The update only matches a pending row, so a transition that lost a race
/// is reported as the order no longer being pending.
async fn set_status(
    conn: &mut PgConnection,
    order_id: OrderId,
    next: OrderStatus,
    op: Operation,
) -> Result<Order, RepositoryError> {
    let updated = sqlx::query_as::<_, Order>(&format!(
        r"
        UPDATE orders
        SET status = $1, updated_at = now()
        WHERE order_id = $2 AND status = 'pending'
        RETURNING {ORDER_COLUMNS}
        "
    ))
    .bind(next)
    .bind(order_id)
    .fetch_optional(conn)
    .await?;

    updated.ok_or(RepositoryError::Rejected(LifecycleError::OrderNotPending(op)))
}
