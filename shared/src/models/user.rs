//! User Role

use serde::{Deserialize, Serialize};

/// Account role. Every authenticated actor carries exactly one role and
/// every authorization decision starts from it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Orders food
    Client,
    /// Owns restaurants
    Owner,
    /// Picks up and delivers orders
    Delivery,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Client => write!(f, "CLIENT"),
            UserRole::Owner => write!(f, "OWNER"),
            UserRole::Delivery => write!(f, "DELIVERY"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CLIENT" => Ok(UserRole::Client),
            "OWNER" => Ok(UserRole::Owner),
            "DELIVERY" => Ok(UserRole::Delivery),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn role_round_trips_through_display() {
        for role in [UserRole::Client, UserRole::Owner, UserRole::Delivery] {
            let parsed = UserRole::from_str(&role.to_string()).unwrap();
            assert_eq!(parsed, role);
        }
    }
}
