//! Restaurant Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use shared::UserRole;
use surrealdb::RecordId;

use crate::auth::{CurrentUser, require_role};
use crate::core::ServerState;
use crate::db::models::{
    Category, Dish, Restaurant, RestaurantCreate, RestaurantId, RestaurantUpdate,
};
use crate::db::repository::restaurant::PAGE_SIZE;
use crate::db::repository::{CategoryRepository, DishRepository, RestaurantRepository};
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// Pagination query
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

fn total_pages(total: i64) -> i64 {
    (total + PAGE_SIZE - 1) / PAGE_SIZE
}

/// Load a restaurant and verify the caller owns it.
///
/// Shared with the dish handlers: every menu mutation runs through the same
/// ownership gate.
pub(crate) async fn check_owned(
    restaurants: &RestaurantRepository,
    user: &CurrentUser,
    id: &RestaurantId,
) -> AppResult<Restaurant> {
    let restaurant = restaurants
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Restaurant not found"))?;
    if restaurant.owner != user.id {
        return Err(AppError::forbidden(
            "Can not edit restaurant that you do not own",
        ));
    }
    Ok(restaurant)
}

/// One page of restaurants
#[derive(Debug, Serialize)]
pub struct RestaurantsPage {
    pub results: Vec<Restaurant>,
    pub total_pages: i64,
    pub total_results: i64,
}

/// List all restaurants, promoted first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<AppResponse<RestaurantsPage>>> {
    let repo = RestaurantRepository::new(state.db.clone());
    let (results, total_results) = repo.find_page(query.page).await?;
    Ok(ok(RestaurantsPage {
        results,
        total_pages: total_pages(total_results),
        total_results,
    }))
}

/// Search query
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: String,
    #[serde(default = "default_page")]
    pub page: i64,
}

/// Search restaurants by name, case insensitive
pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<AppResponse<RestaurantsPage>>> {
    let repo = RestaurantRepository::new(state.db.clone());
    let (results, total_results) = repo.search_by_name(&query.query, query.page).await?;
    Ok(ok(RestaurantsPage {
        results,
        total_pages: total_pages(total_results),
        total_results,
    }))
}

/// Restaurant with its menu loaded
#[derive(Debug, Serialize)]
pub struct RestaurantDetail {
    pub restaurant: Restaurant,
    pub menu: Vec<Dish>,
}

/// One restaurant with its menu
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<RestaurantDetail>>> {
    let restaurant_id = RecordId::from_table_key("restaurant", id);
    let restaurant = RestaurantRepository::new(state.db.clone())
        .find_by_id(&restaurant_id)
        .await?
        .ok_or_else(|| AppError::not_found("Restaurant does not exist"))?;
    let menu = DishRepository::new(state.db.clone())
        .find_by_restaurant(&restaurant_id)
        .await?;
    Ok(ok(RestaurantDetail { restaurant, menu }))
}

/// Create restaurant request
#[derive(Debug, Deserialize)]
pub struct CreateRestaurantRequest {
    pub name: String,
    pub address: String,
    pub cover_image: Option<String>,
    pub category_name: String,
}

/// Create a restaurant (owner only)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<CreateRestaurantRequest>,
) -> AppResult<Json<AppResponse<Restaurant>>> {
    require_role(&user, UserRole::Owner)?;

    let category = CategoryRepository::new(state.db.clone())
        .get_or_create(&req.category_name)
        .await?;

    let now = shared::now_millis();
    let restaurant = RestaurantRepository::new(state.db.clone())
        .create(RestaurantCreate {
            name: req.name,
            address: req.address,
            cover_image: req.cover_image,
            category: category.id,
            owner: user.id,
            is_promoted: false,
            created_at: now,
            updated_at: now,
        })
        .await?;

    Ok(ok(restaurant))
}

/// Edit restaurant request
#[derive(Debug, Deserialize)]
pub struct EditRestaurantRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub cover_image: Option<String>,
    pub category_name: Option<String>,
}

/// Edit an owned restaurant
pub async fn edit(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<EditRestaurantRequest>,
) -> AppResult<Json<AppResponse<Restaurant>>> {
    require_role(&user, UserRole::Owner)?;

    let repo = RestaurantRepository::new(state.db.clone());
    let restaurant_id = RecordId::from_table_key("restaurant", id);
    check_owned(&repo, &user, &restaurant_id).await?;

    let category = match req.category_name {
        Some(name) => {
            CategoryRepository::new(state.db.clone())
                .get_or_create(&name)
                .await?
                .id
        }
        None => None,
    };

    let updated = repo
        .update(
            &restaurant_id,
            RestaurantUpdate {
                name: req.name,
                address: req.address,
                cover_image: req.cover_image,
                category,
            },
        )
        .await?;

    Ok(ok(updated))
}

/// Delete an owned restaurant
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<()>>> {
    require_role(&user, UserRole::Owner)?;

    let repo = RestaurantRepository::new(state.db.clone());
    let restaurant_id = RecordId::from_table_key("restaurant", id);
    check_owned(&repo, &user, &restaurant_id).await?;

    repo.delete(&restaurant_id).await?;
    Ok(ok(()))
}

/// Category with how many restaurants it holds
#[derive(Debug, Serialize)]
pub struct CategoryWithCount {
    pub category: Category,
    pub restaurant_count: i64,
}

/// All categories with their restaurant counts
pub async fn all_categories(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<CategoryWithCount>>>> {
    let categories = CategoryRepository::new(state.db.clone()).find_all().await?;
    let restaurants = RestaurantRepository::new(state.db.clone());

    let mut results = Vec::with_capacity(categories.len());
    for category in categories {
        let restaurant_count = match &category.id {
            Some(id) => restaurants.count_by_category(id).await?,
            None => 0,
        };
        results.push(CategoryWithCount {
            category,
            restaurant_count,
        });
    }
    Ok(ok(results))
}

/// One category page
#[derive(Debug, Serialize)]
pub struct CategoryPage {
    pub category: Category,
    pub restaurants: Vec<Restaurant>,
    pub total_pages: i64,
}

/// One category with a page of its restaurants
pub async fn category_by_slug(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<AppResponse<CategoryPage>>> {
    let category = CategoryRepository::new(state.db.clone())
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::not_found("Could not find category"))?;

    let category_id = category
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Stored category has no id"))?;

    let restaurants_repo = RestaurantRepository::new(state.db.clone());
    let restaurants = restaurants_repo
        .find_by_category(&category_id, query.page)
        .await?;
    let total = restaurants_repo.count_by_category(&category_id).await?;

    Ok(ok(CategoryPage {
        category,
        restaurants,
        total_pages: total_pages(total),
    }))
}
