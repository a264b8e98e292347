//! Verification Repository

use super::{BaseRepository, RepoError, RepoResult, new_record_id};
use crate::db::models::{UserId, Verification, VerificationCreate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const VERIFICATION_TABLE: &str = "verification";

#[derive(Clone)]
pub struct VerificationRepository {
    base: BaseRepository,
}

impl VerificationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, data: VerificationCreate) -> RepoResult<Verification> {
        let created: Option<Verification> = self
            .base
            .db()
            .create(new_record_id(VERIFICATION_TABLE))
            .content(data)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create verification".to_string()))
    }

    pub async fn find_by_code(&self, code: &str) -> RepoResult<Option<Verification>> {
        let verification: Option<Verification> = self
            .base
            .db()
            .query("SELECT * FROM verification WHERE code = $code LIMIT 1")
            .bind(("code", code.to_string()))
            .await?
            .take(0)?;
        Ok(verification)
    }

    /// Remove any pending verification for the user (email change, completed
    /// verification)
    pub async fn delete_for_user(&self, user: &UserId) -> RepoResult<()> {
        self.base
            .db()
            .query("DELETE verification WHERE user = $user")
            .bind(("user", user.to_string()))
            .await?
            .check()?;
        Ok(())
    }
}
