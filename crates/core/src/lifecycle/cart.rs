//! Cart item rules.

use super::{LifecycleError, Operation, OrderView};
use crate::{OrderId, UserId};

/// What is known when a cart item is about to be added.
#[derive(Debug, Clone, Copy)]
pub struct AddCartItemFacts {
    /// Whether the item's user exists.
    pub user_exists: bool,
    /// The order the item references, if it already exists (any owner).
    pub target_order: Option<OrderView>,
    /// The user's current pending order, if any.
    pub pending_order: Option<OrderId>,
    /// Whether a cart item with the same id already exists.
    pub cart_item_exists: bool,
}

/// How a validated add should be persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddCartItemPlan {
    /// The referenced order exists and is the user's pending order.
    AttachToExisting,
    /// The referenced order does not exist; open it as pending first.
    OpenOrder,
}

/// Decide whether a cart item may be added for `user_id`.
///
/// Checks run in this order: user exists, referenced order state (closed,
/// foreign, or absent while another order is pending), duplicate item id.
///
/// # Errors
///
/// Returns the first violated [`LifecycleError`].
pub fn plan_add_cart_item(
    user_id: UserId,
    facts: &AddCartItemFacts,
) -> Result<AddCartItemPlan, LifecycleError> {
    if !facts.user_exists {
        return Err(LifecycleError::UserNotFound(Operation::AddCartItem));
    }

    let plan = match facts.target_order {
        None => {
            if facts.pending_order.is_some() {
                return Err(LifecycleError::PendingOrderExists);
            }
            AddCartItemPlan::OpenOrder
        }
        Some(order) if !order.is_pending() => {
            return Err(LifecycleError::OrderNotPending(Operation::AddCartItem));
        }
        Some(order) if order.user_id != user_id => {
            return Err(LifecycleError::OrderOwnedByAnotherUser);
        }
        Some(_) => AddCartItemPlan::AttachToExisting,
    };

    if facts.cart_item_exists {
        return Err(LifecycleError::CartItemExists);
    }

    Ok(plan)
}

/// What is known when a cart item is about to be overwritten.
#[derive(Debug, Clone, Copy)]
pub struct UpdateCartItemFacts {
    pub user_exists: bool,
    /// The referenced order, only if it belongs to the item's user.
    pub order: Option<OrderView>,
    /// Whether the item exists under the referenced order.
    pub cart_item_in_order: bool,
}

/// Decide whether a cart item may be overwritten.
///
/// # Errors
///
/// Returns the first violated [`LifecycleError`].
pub fn check_update_cart_item(facts: &UpdateCartItemFacts) -> Result<(), LifecycleError> {
    if !facts.user_exists {
        return Err(LifecycleError::UserNotFound(Operation::UpdateCartItem));
    }
    let order = facts
        .order
        .ok_or(LifecycleError::OrderNotFound(Operation::UpdateCartItem))?;
    if !facts.cart_item_in_order {
        return Err(LifecycleError::CartItemNotFound);
    }
    if !order.is_pending() {
        return Err(LifecycleError::OrderNotPending(Operation::UpdateCartItem));
    }
    Ok(())
}

/// Resolve the caller's pending order for cart listing.
///
/// # Errors
///
/// Returns [`LifecycleError::NoPendingOrder`] if the caller has none.
pub fn require_pending_order(pending: Option<OrderId>) -> Result<OrderId, LifecycleError> {
    pending.ok_or(LifecycleError::NoPendingOrder)
}
