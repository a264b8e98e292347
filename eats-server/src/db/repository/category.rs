//! Category Repository

use super::{BaseRepository, RepoError, RepoResult, new_record_id};
use crate::db::models::{Category, CategoryCreate, slugify};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const CATEGORY_TABLE: &str = "category";

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let categories: Vec<Category> = self
            .base
            .db()
            .query("SELECT * FROM category ORDER BY name")
            .await?
            .take(0)?;
        Ok(categories)
    }

    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Category>> {
        let category: Option<Category> = self
            .base
            .db()
            .query("SELECT * FROM category WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug.to_string()))
            .await?
            .take(0)?;
        Ok(category)
    }

    /// Look a category up by its slugified name, creating it on first use
    pub async fn get_or_create(&self, name: &str) -> RepoResult<Category> {
        let slug = slugify(name);
        if let Some(existing) = self.find_by_slug(&slug).await? {
            return Ok(existing);
        }

        let created: Option<Category> = self
            .base
            .db()
            .create(new_record_id(CATEGORY_TABLE))
            .content(CategoryCreate {
                name: name.trim().to_string(),
                slug,
                cover_image: None,
                created_at: shared::now_millis(),
            })
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create category".to_string()))
    }
}
