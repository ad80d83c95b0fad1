//! Header-based caller identification.
//!
//! Every non-health route identifies its caller through the `x-user-id`
//! header, which must carry the UUID of an existing user. There is no
//! password or token; this is identification, not proof.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};
use tracing::{Span, debug};

use ecommerce_core::UserId;

use crate::db::{RepositoryError, UserRepository};
use crate::error::{AppError, set_sentry_user};
use crate::models::CurrentUser;
use crate::state::AppState;

/// The HTTP header carrying the caller's user ID.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extractor that requires an identified caller.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(RequireUser(user): RequireUser) -> impl IntoResponse {
///     format!("Hello, {}!", user.name)
/// }
/// ```
pub struct RequireUser(pub CurrentUser);

/// Error returned when the caller cannot be identified.
#[derive(Debug)]
pub enum AuthRejection {
    /// No `x-user-id` header.
    MissingHeader,
    /// Header present but not a UUID.
    InvalidHeader,
    /// Well-formed id with no matching user.
    UnknownUser,
    /// The user lookup itself failed.
    Lookup(RepositoryError),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let err = match self {
            Self::MissingHeader => AppError::Unauthorized("Missing x-user-id header.".to_owned()),
            Self::InvalidHeader => AppError::Unauthorized("Invalid x-user-id header.".to_owned()),
            Self::UnknownUser => {
                AppError::Unauthorized("Invalid x-user-id header. User does not exist.".to_owned())
            }
            Self::Lookup(err) => AppError::Database(err),
        };
        err.into_response()
    }
}

/// Parse the caller's id out of the request headers.
fn user_id_from_parts(parts: &Parts) -> Result<UserId, AuthRejection> {
    let raw = parts
        .headers
        .get(USER_ID_HEADER)
        .ok_or(AuthRejection::MissingHeader)?;

    raw.to_str()
        .ok()
        .and_then(|value| value.trim().parse::<UserId>().ok())
        .filter(|id| !id.is_nil())
        .ok_or(AuthRejection::InvalidHeader)
}

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = user_id_from_parts(parts)?;

        let user = UserRepository::new(state.pool())
            .find(user_id)
            .await
            .map_err(AuthRejection::Lookup)?
            .ok_or_else(|| {
                debug!(user_id = %user_id, "Unknown caller");
                AuthRejection::UnknownUser
            })?;

        Span::current().record("user_id", tracing::field::display(user_id));
        set_sentry_user(&user.id, &user.name);

        Ok(Self(user.into()))
    }
}
