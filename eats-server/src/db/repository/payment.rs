//! Payment Repository

use super::{BaseRepository, RepoError, RepoResult, new_record_id};
use crate::db::models::{Payment, PaymentCreate, UserId};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const PAYMENT_TABLE: &str = "payment";

#[derive(Clone)]
pub struct PaymentRepository {
    base: BaseRepository,
}

impl PaymentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, data: PaymentCreate) -> RepoResult<Payment> {
        let created: Option<Payment> = self
            .base
            .db()
            .create(new_record_id(PAYMENT_TABLE))
            .content(data)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create payment".to_string()))
    }

    pub async fn find_by_user(&self, user: &UserId) -> RepoResult<Vec<Payment>> {
        let payments: Vec<Payment> = self
            .base
            .db()
            .query("SELECT * FROM payment WHERE user = $user ORDER BY created_at DESC")
            .bind(("user", user.to_string()))
            .await?
            .take(0)?;
        Ok(payments)
    }
}
