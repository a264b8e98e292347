//! Restaurant Repository

use super::{BaseRepository, CountRow, RepoError, RepoResult, new_record_id};
use crate::db::models::{Restaurant, RestaurantCreate, RestaurantId, RestaurantUpdate, UserId};
use shared::Timestamp;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const RESTAURANT_TABLE: &str = "restaurant";

/// Listing page size, shared by all paginated restaurant queries
pub const PAGE_SIZE: i64 = 25;

#[derive(Clone)]
pub struct RestaurantRepository {
    base: BaseRepository,
}

impl RestaurantRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: &RestaurantId) -> RepoResult<Option<Restaurant>> {
        let restaurant: Option<Restaurant> = self.base.db().select(id.clone()).await?;
        Ok(restaurant)
    }

    pub async fn find_by_owner(&self, owner: &UserId) -> RepoResult<Vec<Restaurant>> {
        let restaurants: Vec<Restaurant> = self
            .base
            .db()
            .query("SELECT * FROM restaurant WHERE owner = $owner")
            .bind(("owner", owner.to_string()))
            .await?
            .take(0)?;
        Ok(restaurants)
    }

    /// One page of all restaurants, promoted entries first
    pub async fn find_page(&self, page: i64) -> RepoResult<(Vec<Restaurant>, i64)> {
        let start = (page.max(1) - 1) * PAGE_SIZE;
        let restaurants: Vec<Restaurant> = self
            .base
            .db()
            .query(
                "SELECT * FROM restaurant ORDER BY is_promoted DESC, created_at DESC \
                 LIMIT $limit START $start",
            )
            .bind(("limit", PAGE_SIZE))
            .bind(("start", start))
            .await?
            .take(0)?;
        let total = self.count_all().await?;
        Ok((restaurants, total))
    }

    /// Case-insensitive name search, paginated like [`find_page`]
    pub async fn search_by_name(&self, query: &str, page: i64) -> RepoResult<(Vec<Restaurant>, i64)> {
        let start = (page.max(1) - 1) * PAGE_SIZE;
        let needle = query.to_lowercase();
        let restaurants: Vec<Restaurant> = self
            .base
            .db()
            .query(
                "SELECT * FROM restaurant WHERE string::lowercase(name) CONTAINS $needle \
                 ORDER BY is_promoted DESC, created_at DESC LIMIT $limit START $start",
            )
            .bind(("needle", needle.clone()))
            .bind(("limit", PAGE_SIZE))
            .bind(("start", start))
            .await?
            .take(0)?;

        let count: Option<CountRow> = self
            .base
            .db()
            .query(
                "SELECT count() FROM restaurant \
                 WHERE string::lowercase(name) CONTAINS $needle GROUP ALL",
            )
            .bind(("needle", needle))
            .await?
            .take(0)?;
        Ok((restaurants, count.map(|c| c.count).unwrap_or(0)))
    }

    /// One page of a category's restaurants, promoted entries first
    pub async fn find_by_category(
        &self,
        category: &RecordId,
        page: i64,
    ) -> RepoResult<Vec<Restaurant>> {
        let start = (page.max(1) - 1) * PAGE_SIZE;
        let restaurants: Vec<Restaurant> = self
            .base
            .db()
            .query(
                "SELECT * FROM restaurant WHERE category = $category \
                 ORDER BY is_promoted DESC, created_at DESC LIMIT $limit START $start",
            )
            .bind(("category", category.to_string()))
            .bind(("limit", PAGE_SIZE))
            .bind(("start", start))
            .await?
            .take(0)?;
        Ok(restaurants)
    }

    pub async fn count_by_category(&self, category: &RecordId) -> RepoResult<i64> {
        let count: Option<CountRow> = self
            .base
            .db()
            .query("SELECT count() FROM restaurant WHERE category = $category GROUP ALL")
            .bind(("category", category.to_string()))
            .await?
            .take(0)?;
        Ok(count.map(|c| c.count).unwrap_or(0))
    }

    async fn count_all(&self) -> RepoResult<i64> {
        let count: Option<CountRow> = self
            .base
            .db()
            .query("SELECT count() FROM restaurant GROUP ALL")
            .await?
            .take(0)?;
        Ok(count.map(|c| c.count).unwrap_or(0))
    }

    pub async fn create(&self, data: RestaurantCreate) -> RepoResult<Restaurant> {
        let created: Option<Restaurant> = self
            .base
            .db()
            .create(new_record_id(RESTAURANT_TABLE))
            .content(data)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create restaurant".to_string()))
    }

    pub async fn update(
        &self,
        id: &RestaurantId,
        data: RestaurantUpdate,
    ) -> RepoResult<Restaurant> {
        let updated: Option<Restaurant> = self.base.db().update(id.clone()).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Restaurant {} not found", id)))
    }

    pub async fn delete(&self, id: &RestaurantId) -> RepoResult<()> {
        let _: Option<Restaurant> = self.base.db().delete(id.clone()).await?;
        Ok(())
    }

    /// Flag the restaurant as promoted until the given timestamp
    pub async fn promote(&self, id: &RestaurantId, until: Timestamp) -> RepoResult<()> {
        self.base
            .db()
            .query(
                "UPDATE $restaurant SET is_promoted = true, promoted_until = $until, \
                 updated_at = $now",
            )
            .bind(("restaurant", id.clone()))
            .bind(("until", until))
            .bind(("now", shared::now_millis()))
            .await?
            .check()?;
        Ok(())
    }

    /// Clear the promotion flag on every restaurant whose promotion has
    /// lapsed. Returns the affected rows.
    pub async fn clear_expired_promotions(&self, now: Timestamp) -> RepoResult<Vec<Restaurant>> {
        let expired: Vec<Restaurant> = self
            .base
            .db()
            .query(
                "UPDATE restaurant SET is_promoted = false, promoted_until = NONE \
                 WHERE is_promoted = true AND promoted_until != NONE AND promoted_until < $now",
            )
            .bind(("now", now))
            .await?
            .take(0)?;
        Ok(expired)
    }
}
