//! Dish Model

use super::restaurant::RestaurantId;
use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::{DishOption, Timestamp};
use surrealdb::RecordId;

/// Dish ID type
pub type DishId = RecordId;

/// Menu entry. `price` is in the smallest currency unit; `options` is the
/// ordered list of configurable options with their surcharges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dish {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<DishId>,
    pub name: String,
    pub price: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant: RestaurantId,
    #[serde(default)]
    pub options: Vec<DishOption>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Create dish payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishCreate {
    pub name: String,
    pub price: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant: RestaurantId,
    pub options: Vec<DishOption>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Update dish payload (all fields optional)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DishUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<DishOption>>,
}
