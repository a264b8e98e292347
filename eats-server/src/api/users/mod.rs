//! User API Module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/me", get(handler::me).put(handler::edit_profile))
        .route("/verify", post(handler::verify_email))
        .route("/{id}", get(handler::get_by_id))
}
