//! Checkout route.

use axum::{
    Extension, Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};

use super::{ApiVersion, MessageResponse, json_body};
use crate::error::Result;
use crate::handlers::orders;
use crate::middleware::RequireUser;
use crate::models::OrderRequest;
use crate::state::AppState;

/// `POST /checkout`
async fn checkout(
    State(state): State<AppState>,
    Extension(version): Extension<ApiVersion>,
    RequireUser(_caller): RequireUser,
    body: std::result::Result<Json<OrderRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let result = async {
        let request = json_body(body)?;
        orders::checkout_order(state.pool(), &request).await
    }
    .await;
    version.log_outcome("checkout order", &result);
    result.map(|_| MessageResponse::new("Order checked out successfully."))
}

/// Create the checkout routes router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/checkout", post(checkout))
}
