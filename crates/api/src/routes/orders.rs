//! Order routes.

use axum::{
    Extension, Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    routing::get,
};

use ecommerce_core::OrderId;

use super::{ApiVersion, MessageResponse, json_body, path_param};
use crate::error::Result;
use crate::handlers::orders;
use crate::middleware::RequireUser;
use crate::models::{OrderDto, OrderRequest};
use crate::state::AppState;

type PathResult = std::result::Result<Path<OrderId>, PathRejection>;

/// `GET /orders`
async fn list(
    State(state): State<AppState>,
    Extension(version): Extension<ApiVersion>,
    RequireUser(caller): RequireUser,
) -> Result<Json<Vec<OrderDto>>> {
    let result = orders::list_orders(state.pool(), &caller).await;
    version.log_outcome("list orders", &result);
    result.map(Json)
}

/// `GET /orders/{orderId}`
async fn show(
    State(state): State<AppState>,
    Extension(version): Extension<ApiVersion>,
    RequireUser(_caller): RequireUser,
    path: PathResult,
) -> Result<Json<OrderDto>> {
    let result = async {
        let order_id = path_param(path)?;
        orders::get_order(state.pool(), order_id).await
    }
    .await;
    version.log_outcome("get order", &result);
    result.map(Json)
}

/// `PUT /orders` cancels the order named in the body.
async fn cancel(
    State(state): State<AppState>,
    Extension(version): Extension<ApiVersion>,
    RequireUser(_caller): RequireUser,
    body: std::result::Result<Json<OrderRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let result = async {
        let request = json_body(body)?;
        orders::cancel_order(state.pool(), &request).await
    }
    .await;
    version.log_outcome("cancel order", &result);
    result.map(|_| MessageResponse::new("Order updated successfully."))
}

/// `DELETE /orders/{orderId}`
async fn remove(
    State(state): State<AppState>,
    Extension(version): Extension<ApiVersion>,
    RequireUser(_caller): RequireUser,
    path: PathResult,
) -> Result<Json<MessageResponse>> {
    let result = async {
        let order_id = path_param(path)?;
        orders::delete_order(state.pool(), order_id).await
    }
    .await;
    version.log_outcome("delete order", &result);
    result.map(|()| MessageResponse::new("Order deleted successfully."))
}

/// Create the order routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list).put(cancel))
        .route("/orders/{order_id}", get(show).delete(remove))
}
