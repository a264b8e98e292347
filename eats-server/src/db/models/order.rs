//! Order Model

use super::dish::DishId;
use super::restaurant::RestaurantId;
use super::serde_helpers;
use super::user::UserId;
use serde::{Deserialize, Serialize};
use shared::{OrderItemChoice, OrderStatus, Timestamp};
use surrealdb::RecordId;

/// Order ID type
pub type OrderId = RecordId;

/// A placed order.
///
/// Orders are never deleted; `Canceled` is a terminal status, not a row
/// removal. The driver link stays empty until a delivery account takes the
/// order, and is never overwritten once set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<OrderId>,
    #[serde(with = "serde_helpers::record_id")]
    pub customer: UserId,
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub driver: Option<UserId>,
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant: RestaurantId,
    pub status: OrderStatus,
    /// Sum of the resolved item prices, smallest currency unit
    pub total: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Order {
    /// True when this order's id equals the given one
    pub fn has_id(&self, id: &OrderId) -> bool {
        self.id.as_ref() == Some(id)
    }
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    #[serde(with = "serde_helpers::record_id")]
    pub customer: UserId,
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant: RestaurantId,
    pub status: OrderStatus,
    pub total: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One line of an order: a dish reference plus the selections made.
/// Written once together with the parent order, never mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub order_id: OrderId,
    #[serde(with = "serde_helpers::record_id")]
    pub dish: DishId,
    #[serde(default)]
    pub choices: Vec<OrderItemChoice>,
    /// Resolved price at order time (dish price plus applicable extras)
    pub price: i64,
}

/// Create order item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemCreate {
    #[serde(with = "serde_helpers::record_id")]
    pub order_id: OrderId,
    #[serde(with = "serde_helpers::record_id")]
    pub dish: DishId,
    pub choices: Vec<OrderItemChoice>,
    pub price: i64,
}
