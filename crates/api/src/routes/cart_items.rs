//! Cart item routes.

use axum::{
    Extension, Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    routing::{delete, get},
};

use ecommerce_core::CartItemId;

use super::{ApiVersion, MessageResponse, json_body, path_param};
use crate::error::Result;
use crate::handlers::cart_items;
use crate::middleware::RequireUser;
use crate::models::{CartItemDto, CartItemRequest};
use crate::state::AppState;

type JsonResult<T> = std::result::Result<Json<T>, JsonRejection>;

/// `GET /cart-items`
async fn list(
    State(state): State<AppState>,
    Extension(version): Extension<ApiVersion>,
    RequireUser(caller): RequireUser,
) -> Result<Json<Vec<CartItemDto>>> {
    let result = cart_items::list_cart_items(state.pool(), &caller).await;
    version.log_outcome("list cart items", &result);
    result.map(Json)
}

/// `POST /cart-items`
async fn add(
    State(state): State<AppState>,
    Extension(version): Extension<ApiVersion>,
    RequireUser(_caller): RequireUser,
    body: JsonResult<CartItemRequest>,
) -> Result<Json<MessageResponse>> {
    let result = async {
        let request = json_body(body)?;
        cart_items::add_cart_item(state.pool(), &request).await
    }
    .await;
    version.log_outcome("add cart item", &result);
    result.map(|_| MessageResponse::new("Cart item added successfully."))
}

/// `PUT /cart-items`
async fn update(
    State(state): State<AppState>,
    Extension(version): Extension<ApiVersion>,
    RequireUser(_caller): RequireUser,
    body: JsonResult<CartItemRequest>,
) -> Result<Json<MessageResponse>> {
    let result = async {
        let request = json_body(body)?;
        cart_items::update_cart_item(state.pool(), &request).await
    }
    .await;
    version.log_outcome("update cart item", &result);
    result.map(|_| MessageResponse::new("Cart item updated successfully."))
}

/// `DELETE /cart-items/{cartItemId}`
async fn remove(
    State(state): State<AppState>,
    Extension(version): Extension<ApiVersion>,
    RequireUser(_caller): RequireUser,
    path: std::result::Result<Path<CartItemId>, PathRejection>,
) -> Result<Json<MessageResponse>> {
    let result = async {
        let cart_item_id = path_param(path)?;
        cart_items::delete_cart_item(state.pool(), cart_item_id).await
    }
    .await;
    version.log_outcome("delete cart item", &result);
    result.map(|()| MessageResponse::new("Cart item deleted successfully."))
}

/// Create the cart item routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cart-items", get(list).post(add).put(update))
        .route("/cart-items/{cart_item_id}", delete(remove))
}
