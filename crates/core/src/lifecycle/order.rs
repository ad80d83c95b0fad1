//! Order transition and user creation rules.

use super::{LifecycleError, Operation, OrderView};
use crate::OrderStatus;

/// What is known when an order is about to change status.
#[derive(Debug, Clone, Copy)]
pub struct TransitionFacts {
    pub user_exists: bool,
    /// The target order, only if it belongs to the requesting user.
    pub order: Option<OrderView>,
}

/// What is known when an order is about to be checked out.
#[derive(Debug, Clone, Copy)]
pub struct CheckoutFacts {
    pub user_exists: bool,
    /// The target order, only if it belongs to the requesting user.
    pub order: Option<OrderView>,
    pub cart_item_count: i64,
}

fn transition(
    op: Operation,
    user_exists: bool,
    order: Option<OrderView>,
    next: OrderStatus,
) -> Result<OrderStatus, LifecycleError> {
    if !user_exists {
        return Err(LifecycleError::UserNotFound(op));
    }
    let order = order.ok_or(LifecycleError::OrderNotFound(op))?;
    if !order.status.can_transition_to(next) {
        return Err(LifecycleError::OrderNotPending(op));
    }
    Ok(next)
}

/// Decide a cancellation. Returns the status to persist.
///
/// # Errors
///
/// Fails if the user is unknown, the order is not the user's, or the order
/// is no longer pending.
pub fn plan_cancel(facts: &TransitionFacts) -> Result<OrderStatus, LifecycleError> {
    transition(
        Operation::CancelOrder,
        facts.user_exists,
        facts.order,
        OrderStatus::Cancelled,
    )
}

/// Decide a checkout. Returns the status to persist.
///
/// # Errors
///
/// Fails like [`plan_cancel`], and additionally when the order has no items.
pub fn plan_checkout(facts: &CheckoutFacts) -> Result<OrderStatus, LifecycleError> {
    let next = transition(
        Operation::CheckoutOrder,
        facts.user_exists,
        facts.order,
        OrderStatus::Processed,
    )?;
    if facts.cart_item_count <= 0 {
        return Err(LifecycleError::EmptyOrder);
    }
    Ok(next)
}

/// Reject a user id that is already taken.
///
/// # Errors
///
/// Returns [`LifecycleError::UserExists`] if `already_exists`.
pub const fn check_add_user(already_exists: bool) -> Result<(), LifecycleError> {
    if already_exists {
        return Err(LifecycleError::UserExists);
    }
    Ok(())
}
