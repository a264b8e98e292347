//! Order API Module
//!
//! Order placement and lifecycle. All logic lives in
//! [`crate::orders::OrderService`]; the handlers only translate the HTTP
//! shape and the per-operation role gates.

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", put(handler::edit_status))
        .route("/{id}/take", post(handler::take))
}
