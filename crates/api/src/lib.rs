//! Ecommerce REST API library.
//!
//! Users, orders and cart items over `PostgreSQL`, exposed as a versioned
//! JSON API. The binary in `main.rs` is a thin wrapper around [`routes::app`];
//! the library form lets the CLI and the integration tests reuse the
//! repositories and the router.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod validation;

/// Embedded database migrations for `crates/api/migrations`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
