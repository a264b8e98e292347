//! Dish API Module
//!
//! Menu management, owner only. Every mutation passes the same restaurant
//! ownership gate as the restaurant endpoints.

mod handler;

use axum::{
    Router,
    routing::{post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/dishes", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::edit).delete(handler::delete))
}
