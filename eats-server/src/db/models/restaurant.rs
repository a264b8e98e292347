//! Restaurant Model

use super::serde_helpers;
use super::user::UserId;
use serde::{Deserialize, Serialize};
use shared::Timestamp;
use surrealdb::RecordId;

/// Restaurant ID type
pub type RestaurantId = RecordId;

/// Restaurant, owned by exactly one Owner account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RestaurantId>,
    pub name: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub owner: UserId,
    /// Promotion flag, lifecycle-managed by the daily expiry sweep
    #[serde(default)]
    pub is_promoted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promoted_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Create restaurant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantCreate {
    pub name: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub owner: UserId,
    pub is_promoted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Update restaurant payload (all fields optional)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<RecordId>,
}
