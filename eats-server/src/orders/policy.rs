//! Order authorization policy
//!
//! Two pure predicates drive every order operation: who may see an order,
//! and which target statuses a role may set. Both are lookups, not
//! conditional cascades, so they are testable in isolation.

use crate::auth::CurrentUser;
use crate::db::models::{Order, Restaurant};
use shared::{OrderStatus, UserRole};

/// Target statuses each role is allowed to set.
///
/// Deliberately independent of the order's current status: the platform has
/// always allowed e.g. an owner to set Cooking on an already-delivered
/// order, and callers depend on that permissiveness. Only the role gates the
/// transition.
pub fn permitted_statuses(role: UserRole) -> &'static [OrderStatus] {
    match role {
        UserRole::Owner => &[
            OrderStatus::Cooking,
            OrderStatus::Cooked,
            OrderStatus::Canceled,
        ],
        UserRole::Delivery => &[OrderStatus::PickedUp, OrderStatus::Delivered],
        UserRole::Client => &[OrderStatus::Canceled],
    }
}

/// May `role` move any order to `target`?
pub fn can_set_status(role: UserRole, target: OrderStatus) -> bool {
    permitted_statuses(role).contains(&target)
}

/// May this actor see (and therefore act on) this order?
///
/// Exhaustive over roles: a client sees their own orders, a delivery account
/// the orders assigned to it, an owner the orders of their restaurants.
/// A negative answer always surfaces as an authorization error, never as an
/// empty result.
pub fn can_see_order(user: &CurrentUser, order: &Order, restaurant: &Restaurant) -> bool {
    match user.role {
        UserRole::Client => order.customer == user.id,
        UserRole::Delivery => order.driver.as_ref() == Some(&user.id),
        UserRole::Owner => restaurant.owner == user.id,
    }
}
