//! Order domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ecommerce_core::lifecycle::OrderView;
use ecommerce_core::{OrderId, OrderStatus, UserId};

/// A stored order (domain type).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Order {
    #[sqlx(rename = "order_id")]
    pub id: OrderId,
    pub user_id: UserId,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// The subset of this order the lifecycle rules look at.
    #[must_use]
    pub const fn view(&self) -> OrderView {
        OrderView {
            id: self.id,
            user_id: self.user_id,
            status: self.status,
        }
    }
}

/// Order as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub status: OrderStatus,
}

impl From<Order> for OrderDto {
    fn from(order: Order) -> Self {
        Self {
            order_id: order.id,
            user_id: order.user_id,
            status: order.status,
        }
    }
}

/// Body of `PUT /orders` (cancel) and `POST /checkout`.
///
/// `status` is only checked for membership; the target status is implied by
/// the endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderRequest {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub status: Option<String>,
}
