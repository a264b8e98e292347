//! User Repository

use super::{BaseRepository, RepoError, RepoResult, new_record_id};
use crate::db::models::{User, UserCreate, UserId};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const USER_TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: &UserId) -> RepoResult<Option<User>> {
        let user: Option<User> = self.base.db().select(id.clone()).await?;
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let user: Option<User> = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?
            .take(0)?;
        Ok(user)
    }

    pub async fn create(&self, data: UserCreate) -> RepoResult<User> {
        let created: Option<User> = self
            .base
            .db()
            .create(new_record_id(USER_TABLE))
            .content(data)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Replace the stored email and drop the verified flag
    pub async fn set_email(&self, id: &UserId, email: &str) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $user SET email = $email, verified = false, updated_at = $now")
            .bind(("user", id.clone()))
            .bind(("email", email.to_string()))
            .bind(("now", shared::now_millis()))
            .await?
            .check()?;
        Ok(())
    }

    pub async fn set_password_hash(&self, id: &UserId, hash_pass: &str) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $user SET hash_pass = $hash, updated_at = $now")
            .bind(("user", id.clone()))
            .bind(("hash", hash_pass.to_string()))
            .bind(("now", shared::now_millis()))
            .await?
            .check()?;
        Ok(())
    }

    pub async fn mark_verified(&self, id: &UserId) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $user SET verified = true, updated_at = $now")
            .bind(("user", id.clone()))
            .bind(("now", shared::now_millis()))
            .await?
            .check()?;
        Ok(())
    }
}
