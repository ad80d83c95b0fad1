//! Cart item repository for database operations.

use sqlx::{PgConnection, PgPool};
use tracing::{debug, info, warn};

use ecommerce_core::lifecycle::{
    AddCartItemFacts, AddCartItemPlan, UpdateCartItemFacts, check_update_cart_item,
    plan_add_cart_item, require_pending_order,
};
use ecommerce_core::{CartItemId, LifecycleError, OrderId, UserId};

use super::orders::{find_for_update, find_owned_for_update, find_pending};
use super::{
    RepositoryError, is_order_id_conflict, is_pending_order_conflict, is_unique_violation,
    lock_user,
};
use crate::models::{CartItem, Order};

const CART_ITEM_COLUMNS: &str = "cart_item_id, order_id, user_id, item, price";

/// Repository for cart item database operations.
pub struct CartItemRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartItemRepository<'a> {
    /// Create a new cart item repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the items of the user's pending order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Rejected` if the user has no pending order.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_pending_order(
        &self,
        user_id: UserId,
    ) -> Result<Vec<CartItem>, RepositoryError> {
        let mut conn = self.pool.acquire().await?;

        let pending = find_pending(&mut conn, user_id).await?;
        let order_id = require_pending_order(pending.map(|o| o.id)).inspect_err(|rule| {
            warn!(user_id = %user_id, "{rule}");
        })?;

        let items = sqlx::query_as::<_, CartItem>(&format!(
            "SELECT {CART_ITEM_COLUMNS} FROM cart_items WHERE order_id = $1 ORDER BY created_at, cart_item_id"
        ))
        .bind(order_id)
        .fetch_all(&mut *conn)
        .await?;

        debug!(
            user_id = %user_id,
            order_id = %order_id,
            count = items.len(),
            "Cart items retrieved"
        );
        Ok(items)
    }

    /// Add an item, opening its order as pending if the order does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Rejected` when a lifecycle rule refuses the add.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add(&self, item: &CartItem) -> Result<CartItem, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let user_exists = lock_user(&mut tx, item.user_id).await?;
        let target_order = find_for_update(&mut tx, item.order_id).await?;
        let pending_order = find_pending(&mut tx, item.user_id).await?;
        let cart_item_exists = cart_item_exists(&mut tx, item.id).await?;

        let facts = AddCartItemFacts {
            user_exists,
            target_order: target_order.as_ref().map(Order::view),
            pending_order: pending_order.map(|o| o.id),
            cart_item_exists,
        };
        let plan = plan_add_cart_item(item.user_id, &facts).inspect_err(|rule| {
            warn!(
                cart_item_id = %item.id,
                order_id = %item.order_id,
                user_id = %item.user_id,
                "{rule}"
            );
        })?;

        if plan == AddCartItemPlan::OpenOrder {
            open_order(&mut tx, item.order_id, item.user_id).await?;
            info!(order_id = %item.order_id, user_id = %item.user_id, "Pending order opened");
        }

        let added = sqlx::query_as::<_, CartItem>(&format!(
            r"
            INSERT INTO cart_items (cart_item_id, order_id, user_id, item, price)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {CART_ITEM_COLUMNS}
            "
        ))
        .bind(item.id)
        .bind(item.order_id)
        .bind(item.user_id)
        .bind(&item.item)
        .bind(item.price)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return RepositoryError::Rejected(LifecycleError::CartItemExists);
            }
            RepositoryError::Database(e)
        })?;

        tx.commit().await?;

        info!(cart_item_id = %added.id, order_id = %added.order_id, "Cart item added");
        Ok(added)
    }

    /// Overwrite the label and price of an item in the user's pending order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Rejected` when a lifecycle rule refuses the update.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, item: &CartItem) -> Result<CartItem, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let user_exists = lock_user(&mut tx, item.user_id).await?;
        let order = find_owned_for_update(&mut tx, item.order_id, item.user_id).await?;
        let (cart_item_in_order,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM cart_items WHERE cart_item_id = $1 AND order_id = $2)",
        )
        .bind(item.id)
        .bind(item.order_id)
        .fetch_one(&mut *tx)
        .await?;

        let facts = UpdateCartItemFacts {
            user_exists,
            order: order.as_ref().map(Order::view),
            cart_item_in_order,
        };
        check_update_cart_item(&facts).inspect_err(|rule| {
            warn!(
                cart_item_id = %item.id,
                order_id = %item.order_id,
                user_id = %item.user_id,
                "{rule}"
            );
        })?;

        let updated = sqlx::query_as::<_, CartItem>(&format!(
            r"
            UPDATE cart_items
            SET item = $1, price = $2, updated_at = now()
            WHERE cart_item_id = $3
            RETURNING {CART_ITEM_COLUMNS}
            "
        ))
        .bind(&item.item)
        .bind(item.price)
        .bind(item.id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(cart_item_id = %updated.id, "Cart item updated");
        Ok(updated)
    }

    /// Delete a cart item by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item does not exist.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: CartItemId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE cart_item_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            warn!(cart_item_id = %id, "Delete of unknown cart item");
            return Err(RepositoryError::NotFound(
                "Cannot delete cart item. Cart item is not found.".to_owned(),
            ));
        }

        info!(cart_item_id = %id, "Cart item deleted");
        Ok(())
    }
}

async fn cart_item_exists(conn: &mut PgConnection, id: CartItemId) -> Result<bool, sqlx::Error> {
    let (exists,): (bool,) =
        sqlx::query_as("SELECT EXISTS (SELECT 1 FROM cart_items WHERE cart_item_id = $1)")
            .bind(id)
            .fetch_one(conn)
            .await?;
    Ok(exists)
}

/// Insert a new pending order.
///
/// Only the user's own row is locked, so another user may insert the same
/// order id concurrently. Losing that race means the order now belongs to
/// someone else.
async fn open_order(
    conn: &mut PgConnection,
    order_id: OrderId,
    user_id: UserId,
) -> Result<(), RepositoryError> {
    sqlx::query("INSERT INTO orders (order_id, user_id, status) VALUES ($1, $2, 'pending')")
        .bind(order_id)
        .bind(user_id)
        .execute(conn)
        .await
        .map_err(|e| {
            if is_pending_order_conflict(&e) {
                return RepositoryError::Rejected(LifecycleError::PendingOrderExists);
            }
            if is_order_id_conflict(&e) {
                return RepositoryError::Rejected(LifecycleError::OrderOwnedByAnotherUser);
            }
            RepositoryError::Database(e)
        })?;
    Ok(())
}
