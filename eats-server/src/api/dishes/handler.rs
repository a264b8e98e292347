//! Dish Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shared::{DishOption, UserRole};
use surrealdb::RecordId;

use crate::api::restaurants::handler::check_owned;
use crate::auth::{CurrentUser, require_role};
use crate::core::ServerState;
use crate::db::models::{Dish, DishCreate, DishUpdate};
use crate::db::repository::{DishRepository, RestaurantRepository};
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// Create dish request
#[derive(Debug, Deserialize)]
pub struct CreateDishRequest {
    pub restaurant_id: i64,
    pub name: String,
    pub price: i64,
    pub photo: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub options: Vec<DishOption>,
}

/// Add a dish to an owned restaurant's menu
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<CreateDishRequest>,
) -> AppResult<Json<AppResponse<Dish>>> {
    require_role(&user, UserRole::Owner)?;

    let restaurants = RestaurantRepository::new(state.db.clone());
    let restaurant_id = RecordId::from_table_key("restaurant", req.restaurant_id);
    check_owned(&restaurants, &user, &restaurant_id).await?;

    let now = shared::now_millis();
    let dish = DishRepository::new(state.db.clone())
        .create(DishCreate {
            name: req.name,
            price: req.price,
            photo: req.photo,
            description: req.description,
            restaurant: restaurant_id,
            options: req.options,
            created_at: now,
            updated_at: now,
        })
        .await?;

    Ok(ok(dish))
}

/// Edit dish request
#[derive(Debug, Deserialize)]
pub struct EditDishRequest {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub photo: Option<String>,
    pub description: Option<String>,
    pub options: Option<Vec<DishOption>>,
}

/// Load the dish and verify the caller owns its restaurant
async fn check_dish_owned(
    state: &ServerState,
    user: &CurrentUser,
    id: &RecordId,
) -> AppResult<Dish> {
    let dish = DishRepository::new(state.db.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Dish not found"))?;
    let restaurants = RestaurantRepository::new(state.db.clone());
    check_owned(&restaurants, user, &dish.restaurant).await?;
    Ok(dish)
}

/// Edit a dish on an owned restaurant's menu
pub async fn edit(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<EditDishRequest>,
) -> AppResult<Json<AppResponse<Dish>>> {
    require_role(&user, UserRole::Owner)?;

    let dish_id = RecordId::from_table_key("dish", id);
    check_dish_owned(&state, &user, &dish_id).await?;

    let updated = DishRepository::new(state.db.clone())
        .update(
            &dish_id,
            DishUpdate {
                name: req.name,
                price: req.price,
                photo: req.photo,
                description: req.description,
                options: req.options,
            },
        )
        .await?;

    Ok(ok(updated))
}

/// Remove a dish from an owned restaurant's menu
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<()>>> {
    require_role(&user, UserRole::Owner)?;

    let dish_id = RecordId::from_table_key("dish", id);
    check_dish_owned(&state, &user, &dish_id).await?;

    DishRepository::new(state.db.clone()).delete(&dish_id).await?;
    Ok(ok(()))
}
