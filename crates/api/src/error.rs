//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. All route handlers return
//! `Result<T, AppError>`; the response body is always JSON:
//!
//! ```json
//! { "error": "Cannot add cart item. User already has a pending order." }
//! { "error": "One or more validation errors occurred.", "fields": { "price": "'Price' should not be empty." } }
//! ```

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::validation::ValidationErrors;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request failed shape validation.
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// Request was well-formed but refused (business rule or malformed input).
    #[error("{0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// Caller could not be identified.
    #[error("{0}")]
    Unauthorized(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(RepositoryError),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(message) => Self::NotFound(message),
            RepositoryError::Rejected(rule) => Self::BadRequest(rule.to_string()),
            err @ RepositoryError::Database(_) => Self::Database(err),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a BTreeMap<String, String>>,
}

impl AppError {
    /// HTTP status this error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Translate a repository error from a delete. A missing target is a bad request.
    #[must_use]
    pub fn from_delete(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(message) => Self::BadRequest(message),
            other => other.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Database(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(_) => "Internal server error".to_owned(),
            _ => self.to_string(),
        };
        let fields = match &self {
            Self::Validation(errors) => Some(errors.fields()),
            _ => None,
        };

        let body = ErrorBody {
            error: &message,
            fields,
        };
        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from the authenticated caller.
pub fn set_sentry_user(user_id: &impl ToString, name: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            username: Some(name.to_owned()),
            ..Default::default()
        }));
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ecommerce_core::LifecycleError;
    use serde_json::Value;

    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            AppError::NotFound("test".to_owned()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Unauthorized("test".to_owned()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::BadRequest("test".to_owned()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Database(RepositoryError::Database(sqlx::Error::PoolTimedOut)).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_repository_errors_are_translated() {
        let err = AppError::from(RepositoryError::Rejected(LifecycleError::EmptyOrder));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Cannot checkout order. Order has no cart items.");

        let err = AppError::from(RepositoryError::NotFound("Order does not exist.".to_owned()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err = AppError::from(RepositoryError::Database(sqlx::Error::RowNotFound));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_missing_delete_target_is_bad_request() {
        let err = AppError::from_delete(RepositoryError::NotFound(
            "Cannot delete cart item. Cart item is not found.".to_owned(),
        ));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Cannot delete cart item. Cart item is not found.");

        let err = AppError::from_delete(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_rule_rejection_body() {
        let (status, body) = body_json(AppError::from(RepositoryError::Rejected(
            LifecycleError::PendingOrderExists,
        )))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "Cannot add cart item. User already has a pending order."
        );
        assert!(body.get("fields").is_none());
    }

    #[tokio::test]
    async fn test_validation_body_lists_fields() {
        let mut errors = ValidationErrors::default();
        errors.add("price", "'Price' should not be empty.");
        errors.add("item", "'Item' should not be empty.");

        let (status, body) = body_json(AppError::from(errors)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["fields"]["price"], "'Price' should not be empty.");
        assert_eq!(body["fields"]["item"], "'Item' should not be empty.");
    }

    #[tokio::test]
    async fn test_internal_details_are_hidden() {
        let (status, body) = body_json(AppError::from(RepositoryError::Database(
            sqlx::Error::Protocol("connection refused at 10.0.0.3".to_owned()),
        )))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
    }
}
