//! Repository Module
//!
//! Per-table CRUD over the embedded SurrealDB handle. Record keys are
//! snowflake i64 values; helpers below build typed `RecordId`s from them.

// Accounts
pub mod user;
pub mod verification;

// Catalog
pub mod category;
pub mod dish;
pub mod restaurant;

// Orders
pub mod order;

// Payments
pub mod payment;

// Re-exports
pub use category::CategoryRepository;
pub use dish::DishRepository;
pub use order::OrderRepository;
pub use payment::PaymentRepository;
pub use restaurant::RestaurantRepository;
pub use user::UserRepository;
pub use verification::VerificationRepository;

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Mint a fresh record id for `table` with a snowflake key
pub fn new_record_id(table: &str) -> RecordId {
    RecordId::from_table_key(table, shared::snowflake_id())
}

/// Numeric key of a record id. Every id in this database carries a
/// snowflake i64 key, so a non-numeric key means the id came from outside.
pub fn record_key_i64(id: &RecordId) -> Option<i64> {
    let full = id.to_string();
    full.rsplit(':').next()?.parse().ok()
}

/// Row shape for `SELECT count() FROM ... GROUP ALL`
#[derive(Debug, serde::Deserialize)]
pub(crate) struct CountRow {
    pub count: i64,
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
