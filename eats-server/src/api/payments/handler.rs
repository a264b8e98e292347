//! Payment Handlers
//!
//! A payment is recorded by the restaurant's owner and immediately promotes
//! the restaurant for a fixed window; the daily sweep clears it later.

use axum::{Json, extract::State};
use serde::Deserialize;
use shared::UserRole;
use surrealdb::RecordId;

use crate::auth::{CurrentUser, require_role};
use crate::core::ServerState;
use crate::db::models::{Payment, PaymentCreate};
use crate::db::repository::{PaymentRepository, RestaurantRepository};
use crate::services::promotions;
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// Create payment request
#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    pub transaction_id: String,
    pub restaurant_id: i64,
}

/// Record a promotion payment for an owned restaurant
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<CreatePaymentRequest>,
) -> AppResult<Json<AppResponse<()>>> {
    require_role(&user, UserRole::Owner)?;

    let restaurants = RestaurantRepository::new(state.db.clone());
    let restaurant_id = RecordId::from_table_key("restaurant", req.restaurant_id);
    let restaurant = restaurants
        .find_by_id(&restaurant_id)
        .await?
        .ok_or_else(|| AppError::not_found("Restaurant not found"))?;

    if restaurant.owner != user.id {
        return Err(AppError::forbidden("Unauthorized request"));
    }

    let now = shared::now_millis();
    restaurants
        .promote(&restaurant_id, promotions::promotion_expiry(now))
        .await?;

    PaymentRepository::new(state.db.clone())
        .create(PaymentCreate {
            transaction_id: req.transaction_id,
            user: user.id,
            restaurant: restaurant_id,
            created_at: now,
        })
        .await?;

    Ok(ok(()))
}

/// Own payment history
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<Vec<Payment>>>> {
    let payments = PaymentRepository::new(state.db.clone())
        .find_by_user(&user.id)
        .await?;
    Ok(ok(payments))
}
