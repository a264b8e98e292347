//! Order status and item selection types

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// Created orders start at `Pending`. `Delivered` and `Canceled` are
/// terminal. Which target statuses an actor may set is a function of the
/// actor's role only, see the transition table in the server's order policy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Cooking,
    Cooked,
    PickedUp,
    Delivered,
    Canceled,
}

impl OrderStatus {
    /// No transition leads out of a terminal status
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Canceled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "PENDING"),
            OrderStatus::Cooking => write!(f, "COOKING"),
            OrderStatus::Cooked => write!(f, "COOKED"),
            OrderStatus::PickedUp => write!(f, "PICKED_UP"),
            OrderStatus::Delivered => write!(f, "DELIVERED"),
            OrderStatus::Canceled => write!(f, "CANCELED"),
        }
    }
}

/// One selected option on an ordered dish.
///
/// `name` refers to a dish option by name; `choice` optionally picks one of
/// that option's choices. Selections that match nothing on the dish are
/// ignored at pricing time rather than rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderItemChoice {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choice: Option<String>,
}
