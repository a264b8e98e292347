//! Email Verification Model

use super::serde_helpers;
use super::user::UserId;
use serde::{Deserialize, Serialize};
use shared::Timestamp;
use surrealdb::RecordId;

/// Pending email verification. One row per unverified address; replaced
/// whenever the user changes email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verification {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub code: String,
    #[serde(with = "serde_helpers::record_id")]
    pub user: UserId,
    pub created_at: Timestamp,
}

/// Create verification payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationCreate {
    pub code: String,
    #[serde(with = "serde_helpers::record_id")]
    pub user: UserId,
    pub created_at: Timestamp,
}
