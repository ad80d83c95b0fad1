//! Cart item domain types.

use serde::{Deserialize, Serialize};

use ecommerce_core::{CartItemId, OrderId, Price, UserId};

/// A line item attached to an order (domain type).
///
/// `user_id` always equals the owning order's `user_id`.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CartItem {
    #[sqlx(rename = "cart_item_id")]
    pub id: CartItemId,
    pub order_id: OrderId,
    pub user_id: UserId,
    pub item: String,
    pub price: Price,
}

/// Cart item as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemDto {
    pub cart_item_id: CartItemId,
    pub order_id: OrderId,
    pub user_id: UserId,
    pub item: String,
    pub price: Price,
}

impl From<CartItem> for CartItemDto {
    fn from(item: CartItem) -> Self {
        Self {
            cart_item_id: item.id,
            order_id: item.order_id,
            user_id: item.user_id,
            item: item.item,
            price: item.price,
        }
    }
}

/// Body of `POST /cart-items` and `PUT /cart-items`.
///
/// `price` is read as `i64` so out-of-range values reach validation instead
/// of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CartItemRequest {
    pub cart_item_id: CartItemId,
    pub order_id: OrderId,
    pub user_id: UserId,
    pub item: Option<String>,
    pub price: Option<i64>,
}
