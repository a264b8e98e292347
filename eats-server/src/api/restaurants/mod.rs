//! Restaurant API Module
//!
//! Catalog endpoints: restaurant CRUD (owner only), public listing, search
//! and categories.

pub(crate) mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/restaurants", routes())
        .nest("/api/categories", category_routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/search", get(handler::search))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::edit)
                .delete(handler::delete),
        )
}

fn category_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::all_categories))
        .route("/{slug}", get(handler::category_by_slug))
}
