//! Request validation.
//!
//! Validators are pure: they run before a handler touches storage and turn a
//! loose request DTO into the domain values a repository accepts. Every
//! failing field is collected so the client sees all problems in one
//! response.

use std::collections::BTreeMap;
use std::fmt;

use ecommerce_core::{CartItemId, OrderId, OrderStatus, Price, UserId};

use crate::models::{CartItem, CartItemRequest, OrderRequest, UserRequest};

/// Field-level validation failures, keyed by camelCase field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<String, String>,
}

impl ValidationErrors {
    /// Record a failure for `field`. The first message per field wins.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_owned())
            .or_insert_with(|| message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub const fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// `Ok(value)` if nothing failed, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field failed.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("One or more validation errors occurred.")
    }
}

impl std::error::Error for ValidationErrors {}

// =============================================================================
// Rules
// =============================================================================

fn required_id(errors: &mut ValidationErrors, field: &str, label: &str, is_nil: bool) {
    if is_nil {
        errors.add(field, format!("'{label}' should not be empty."));
    }
}

fn required_text(
    errors: &mut ValidationErrors,
    field: &str,
    label: &str,
    value: Option<&str>,
) -> String {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_owned(),
        _ => {
            errors.add(field, format!("'{label}' should not be empty."));
            String::new()
        }
    }
}

fn positive_price(errors: &mut ValidationErrors, value: Option<i64>) -> Option<Price> {
    let Some(amount) = value else {
        errors.add("price", "'Price' should not be empty.");
        return None;
    };
    let Ok(amount) = i32::try_from(amount) else {
        errors.add("price", "'Price' is out of range.");
        return None;
    };
    match Price::new(amount) {
        Ok(price) => Some(price),
        Err(_) => {
            errors.add("price", "'Price' must be greater than 0.");
            None
        }
    }
}

fn known_status(errors: &mut ValidationErrors, value: Option<&str>) {
    if let Some(raw) = value
        && raw.parse::<OrderStatus>().is_err()
    {
        errors.add(
            "status",
            "'Status' must be one of Pending, Processed, Cancelled.",
        );
    }
}

// =============================================================================
// Per use case
// =============================================================================

/// Validate a user lookup.
///
/// # Errors
///
/// Fails if the id is nil.
pub fn get_user(user_id: UserId) -> Result<UserId, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    required_id(&mut errors, "userId", "UserId", user_id.is_nil());
    errors.into_result(user_id)
}

/// Validate a new user. Returns the id and the trimmed name.
///
/// # Errors
///
/// Fails if the id is nil or the name is missing or blank.
pub fn add_user(request: &UserRequest) -> Result<(UserId, String), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    required_id(&mut errors, "userId", "UserId", request.user_id.is_nil());
    let name = required_text(&mut errors, "name", "Name", request.name.as_deref());
    errors.into_result((request.user_id, name))
}

/// Validate a cart item for add or update.
///
/// # Errors
///
/// Fails if any id is nil, the label is blank, or the price is missing or
/// not positive.
pub fn cart_item(request: &CartItemRequest) -> Result<CartItem, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    required_id(&mut errors, "cartItemId", "CartItemId", request.cart_item_id.is_nil());
    required_id(&mut errors, "orderId", "OrderId", request.order_id.is_nil());
    required_id(&mut errors, "userId", "UserId", request.user_id.is_nil());
    let item = required_text(&mut errors, "item", "Item", request.item.as_deref());
    let price = positive_price(&mut errors, request.price);

    match price {
        Some(price) if errors.is_empty() => Ok(CartItem {
            id: request.cart_item_id,
            order_id: request.order_id,
            user_id: request.user_id,
            item,
            price,
        }),
        _ => Err(errors),
    }
}

/// Validate a cart item deletion.
///
/// # Errors
///
/// Fails if the id is nil.
pub fn delete_cart_item(cart_item_id: CartItemId) -> Result<CartItemId, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    required_id(&mut errors, "cartItemId", "CartItemId", cart_item_id.is_nil());
    errors.into_result(cart_item_id)
}

/// Validate an order lookup or deletion.
///
/// # Errors
///
/// Fails if the id is nil.
pub fn order_id(order_id: OrderId) -> Result<OrderId, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    required_id(&mut errors, "orderId", "OrderId", order_id.is_nil());
    errors.into_result(order_id)
}

/// Validate a cancel or checkout request.
///
/// # Errors
///
/// Fails if either id is nil or a supplied status is not a known one.
pub fn order_transition(request: &OrderRequest) -> Result<(OrderId, UserId), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    required_id(&mut errors, "orderId", "OrderId", request.order_id.is_nil());
    required_id(&mut errors, "userId", "UserId", request.user_id.is_nil());
    known_status(&mut errors, request.status.as_deref());
    errors.into_result((request.order_id, request.user_id))
}
