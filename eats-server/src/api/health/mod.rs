//! Health Check

use axum::{Json, Router, routing::get};

use crate::core::ServerState;
use crate::utils::{AppResponse, ok};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

async fn health() -> Json<AppResponse<&'static str>> {
    ok("ok")
}
