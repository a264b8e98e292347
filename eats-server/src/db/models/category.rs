//! Category Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::Timestamp;
use surrealdb::RecordId;

/// Restaurant category, addressed by slug
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub created_at: Timestamp,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub created_at: Timestamp,
}

/// Normalize a category name into its slug form ("Fast Food" -> "fast-food")
pub fn slugify(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_trims_and_dashes() {
        assert_eq!(slugify(" Fast Food "), "fast-food");
        assert_eq!(slugify("BBQ"), "bbq");
    }
}
