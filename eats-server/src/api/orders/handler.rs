//! Order Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::{OrderStatus, UserRole};

use crate::auth::{CurrentUser, require_role};
use crate::core::ServerState;
use crate::db::models::Order;
use crate::orders::{CreateOrderInput, OrderDetail};
use crate::utils::{AppResponse, AppResult, ok};

/// Place an order (clients only)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(input): Json<CreateOrderInput>,
) -> AppResult<Json<AppResponse<()>>> {
    require_role(&user, UserRole::Client)?;
    state.order_service().create_order(&user, input).await?;
    Ok(ok(()))
}

/// Listing filter
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<OrderStatus>,
}

/// Orders visible to the caller, optionally filtered by status
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<Vec<Order>>>> {
    let orders = state.order_service().get_orders(&user, query.status).await?;
    Ok(ok(orders))
}

/// One order with items, visibility checked
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<OrderDetail>>> {
    let detail = state.order_service().get_order(&user, id).await?;
    Ok(ok(detail))
}

/// Status edit request
#[derive(Debug, Deserialize)]
pub struct EditOrderRequest {
    pub status: OrderStatus,
}

/// Move an order to a new status (role gated by the order policy)
pub async fn edit_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<EditOrderRequest>,
) -> AppResult<Json<AppResponse<()>>> {
    state.order_service().edit_order(&user, id, req.status).await?;
    Ok(ok(()))
}

/// Take an unassigned order (delivery only)
pub async fn take(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<()>>> {
    require_role(&user, UserRole::Delivery)?;
    state.order_service().take_order(&user, id).await?;
    Ok(ok(()))
}
