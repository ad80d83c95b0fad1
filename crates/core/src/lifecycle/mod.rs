//! Order and cart item lifecycle rules.
//!
//! Every rule is a pure function over a small "facts" struct. The caller (a
//! repository, inside a transaction) looks the facts up, asks the rule for a
//! decision, and persists the outcome only when the rule says yes.
//!
//! Rule order matters: when several rules are violated at once, the first
//! failing check determines the error the client sees.

mod cart;
mod order;

pub use cart::{AddCartItemFacts, AddCartItemPlan, UpdateCartItemFacts, plan_add_cart_item};
pub use cart::{check_update_cart_item, require_pending_order};
pub use order::{CheckoutFacts, TransitionFacts, check_add_user, plan_cancel, plan_checkout};

use std::fmt;

use thiserror::Error;

use crate::{OrderId, OrderStatus, UserId};

/// The mutating use case a rule was evaluated for.
///
/// Used to phrase rejection messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    AddCartItem,
    UpdateCartItem,
    CancelOrder,
    CheckoutOrder,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::AddCartItem => "Cannot add cart item",
            Self::UpdateCartItem => "Cannot update cart item",
            Self::CancelOrder => "Cannot cancel order",
            Self::CheckoutOrder => "Cannot checkout order",
        };
        f.write_str(text)
    }
}

/// A business-rule violation.
///
/// All variants surface to clients as validation failures (HTTP 400).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("{0}. User does not exist.")]
    UserNotFound(Operation),

    #[error("{0}. Order does not exist for this user.")]
    OrderNotFound(Operation),

    #[error("{0}. Order is already processed or cancelled.")]
    OrderNotPending(Operation),

    #[error("Cannot add cart item. Order belongs to another user.")]
    OrderOwnedByAnotherUser,

    #[error("Cannot add cart item. User already has a pending order.")]
    PendingOrderExists,

    #[error("Cannot add cart item. Cart item already exists.")]
    CartItemExists,

    #[error("Cannot update cart item. Cart item is not found for user.")]
    CartItemNotFound,

    #[error("Cannot checkout order. Order has no cart items.")]
    EmptyOrder,

    #[error("Cannot add user. User already exists.")]
    UserExists,

    #[error("User does not have a pending order.")]
    NoPendingOrder,
}

/// The parts of a stored order a rule needs to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderView {
    pub id: OrderId,
    pub user_id: UserId,
    pub status: OrderStatus,
}

impl OrderView {
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        !self.status.is_terminal()
    }
}
