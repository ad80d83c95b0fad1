//! HTTP middleware and extractors.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, transaction)
//! 2. Request ID (propagate or generate `x-request-id`)
//! 3. `TraceLayer` (v2 routes only)
//!
//! Authentication is an extractor ([`RequireUser`]) rather than a layer, so
//! the health probes stay public without extra routing.

pub mod auth;
pub mod request_id;

pub use auth::{AuthRejection, RequireUser, USER_ID_HEADER};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
