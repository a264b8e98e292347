//! Payment Model

use super::restaurant::RestaurantId;
use super::serde_helpers;
use super::user::UserId;
use serde::{Deserialize, Serialize};
use shared::Timestamp;
use surrealdb::RecordId;

/// A recorded promotion payment. Creating one promotes the linked
/// restaurant; the row itself is only ever queried back by its payer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub transaction_id: String,
    #[serde(with = "serde_helpers::record_id")]
    pub user: UserId,
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant: RestaurantId,
    pub created_at: Timestamp,
}

/// Create payment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCreate {
    pub transaction_id: String,
    #[serde(with = "serde_helpers::record_id")]
    pub user: UserId,
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant: RestaurantId,
    pub created_at: Timestamp,
}
