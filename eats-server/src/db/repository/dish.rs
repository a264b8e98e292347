//! Dish Repository

use super::{BaseRepository, RepoError, RepoResult, new_record_id};
use crate::db::models::{Dish, DishCreate, DishId, DishUpdate, RestaurantId};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const DISH_TABLE: &str = "dish";

/// Surcharges are additive on a non-negative base price; rejecting negative
/// extras here keeps resolved item prices non-negative everywhere else.
fn validate_options(options: &[shared::DishOption]) -> RepoResult<()> {
    for option in options {
        if option.extra.is_some_and(|extra| extra < 0) {
            return Err(RepoError::Validation(format!(
                "option {} has a negative extra",
                option.name
            )));
        }
        for choice in option.choices.iter().flatten() {
            if choice.extra.is_some_and(|extra| extra < 0) {
                return Err(RepoError::Validation(format!(
                    "choice {} has a negative extra",
                    choice.name
                )));
            }
        }
    }
    Ok(())
}

#[derive(Clone)]
pub struct DishRepository {
    base: BaseRepository,
}

impl DishRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: &DishId) -> RepoResult<Option<Dish>> {
        let dish: Option<Dish> = self.base.db().select(id.clone()).await?;
        Ok(dish)
    }

    /// Menu of one restaurant
    pub async fn find_by_restaurant(&self, restaurant: &RestaurantId) -> RepoResult<Vec<Dish>> {
        let dishes: Vec<Dish> = self
            .base
            .db()
            .query("SELECT * FROM dish WHERE restaurant = $restaurant ORDER BY name")
            .bind(("restaurant", restaurant.to_string()))
            .await?
            .take(0)?;
        Ok(dishes)
    }

    /// Fetch several dishes at once (order pricing)
    pub async fn find_many(&self, ids: Vec<DishId>) -> RepoResult<Vec<Dish>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let dishes: Vec<Dish> = self
            .base
            .db()
            .query("SELECT * FROM dish WHERE id IN $ids")
            .bind(("ids", ids))
            .await?
            .take(0)?;
        Ok(dishes)
    }

    pub async fn create(&self, data: DishCreate) -> RepoResult<Dish> {
        if data.price < 0 {
            return Err(RepoError::Validation("price cannot be negative".into()));
        }
        validate_options(&data.options)?;
        let created: Option<Dish> = self
            .base
            .db()
            .create(new_record_id(DISH_TABLE))
            .content(data)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create dish".to_string()))
    }

    pub async fn update(&self, id: &DishId, data: DishUpdate) -> RepoResult<Dish> {
        if let Some(price) = data.price
            && price < 0
        {
            return Err(RepoError::Validation("price cannot be negative".into()));
        }
        if let Some(options) = &data.options {
            validate_options(options)?;
        }
        let updated: Option<Dish> = self.base.db().update(id.clone()).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Dish {} not found", id)))
    }

    pub async fn delete(&self, id: &DishId) -> RepoResult<()> {
        let _: Option<Dish> = self.base.db().delete(id.clone()).await?;
        Ok(())
    }
}
