//! Domain models and their JSON representations.
//!
//! Each entity has a domain type (what repositories read and write), a
//! response DTO (what clients receive) and a request DTO (what clients send).
//! Request DTOs are deliberately loose: every field is optional or defaulted
//! so that [`crate::validation`] can report all missing fields at once
//! instead of failing on the first one during deserialization.

pub mod cart_item;
pub mod order;
pub mod user;

pub use cart_item::{CartItem, CartItemDto, CartItemRequest};
pub use order::{Order, OrderDto, OrderRequest};
pub use user::{CurrentUser, User, UserDto, UserRequest};
