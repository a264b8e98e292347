//! Dish option structures

use serde::{Deserialize, Serialize};

/// A configurable option on a dish, for example "spice level" or "size".
///
/// An option carries either a flat `extra` surcharge of its own or a list of
/// choices with per-choice surcharges. When a flat `extra` is present it
/// wins: the choices' extras are not consulted during pricing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DishOption {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<DishChoice>>,
}

/// One choice inside a dish option, for example "hot sauce"
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DishChoice {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<i64>,
}

impl DishOption {
    /// Flat option with its own surcharge and no choices
    pub fn flat(name: impl Into<String>, extra: i64) -> Self {
        Self {
            name: name.into(),
            extra: Some(extra),
            choices: None,
        }
    }

    /// Option priced through its choices
    pub fn with_choices(name: impl Into<String>, choices: Vec<DishChoice>) -> Self {
        Self {
            name: name.into(),
            extra: None,
            choices: Some(choices),
        }
    }
}
