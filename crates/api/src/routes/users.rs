//! User routes.

use axum::{
    Extension, Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    routing::{get, post},
};

use ecommerce_core::UserId;

use super::{ApiVersion, MessageResponse, json_body, path_param};
use crate::error::Result;
use crate::handlers::users;
use crate::middleware::RequireUser;
use crate::models::{UserDto, UserRequest};
use crate::state::AppState;

/// `GET /users/{userId}`
async fn get_user(
    State(state): State<AppState>,
    Extension(version): Extension<ApiVersion>,
    RequireUser(_caller): RequireUser,
    path: std::result::Result<Path<UserId>, PathRejection>,
) -> Result<Json<UserDto>> {
    let result = async {
        let user_id = path_param(path)?;
        users::get_user(state.pool(), user_id).await
    }
    .await;
    version.log_outcome("get user", &result);
    result.map(Json)
}

/// `POST /users`
async fn add_user(
    State(state): State<AppState>,
    Extension(version): Extension<ApiVersion>,
    RequireUser(_caller): RequireUser,
    body: std::result::Result<Json<UserRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let result = async {
        let request = json_body(body)?;
        users::add_user(state.pool(), &request).await
    }
    .await;
    version.log_outcome("add user", &result);
    result.map(|_| MessageResponse::new("User added successfully."))
}

/// Create the user routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(add_user))
        .route("/users/{user_id}", get(get_user))
}
