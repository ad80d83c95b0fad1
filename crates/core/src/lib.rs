//! Ecommerce Core - Shared domain library.
//!
//! This crate provides the types and business rules used across all
//! components of the ecommerce backend:
//! - `api` - REST service for users, orders and cart items
//! - `cli` - Command-line tools for migrations and user bootstrap
//!
//! # Architecture
//!
//! The core crate contains only types and rules - no I/O, no database access,
//! no HTTP. Repositories gather the facts a rule needs, ask the rule for a
//! decision, and then persist the outcome.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and order statuses
//! - [`lifecycle`] - Order and cart item state-transition rules

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod lifecycle;
pub mod types;

pub use lifecycle::LifecycleError;
pub use types::*;
