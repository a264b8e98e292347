//! User Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::{Timestamp, UserRole};
use surrealdb::RecordId;

/// User ID type
pub type UserId = RecordId;

/// User account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<UserId>,
    pub email: String,
    /// Argon2 hash, never serialized out
    #[serde(skip_serializing)]
    pub hash_pass: String,
    pub role: UserRole,
    #[serde(default)]
    pub verified: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Create user payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub hash_pass: String,
    pub role: UserRole,
    pub verified: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_round_trip() {
        let hash = User::hash_password("hunter2").unwrap();
        let user = User {
            id: None,
            email: "a@b.c".into(),
            hash_pass: hash,
            role: UserRole::Client,
            verified: false,
            created_at: 0,
            updated_at: 0,
        };
        assert!(user.verify_password("hunter2").unwrap());
        assert!(!user.verify_password("wrong").unwrap());
    }

    #[test]
    fn password_hash_is_not_serialized() {
        let user = User {
            id: None,
            email: "a@b.c".into(),
            hash_pass: "secret".into(),
            role: UserRole::Owner,
            verified: true,
            created_at: 0,
            updated_at: 0,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret"));
    }
}
