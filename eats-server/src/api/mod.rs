//! API routing modules
//!
//! # Structure
//!
//! - [`health`]: liveness probe
//! - [`auth`]: account registration and login
//! - [`users`]: profile queries, profile editing, email verification
//! - [`restaurants`]: catalog CRUD, listing, search, categories
//! - [`dishes`]: menu management
//! - [`orders`]: order placement and lifecycle
//! - [`payments`]: promotion payments

pub mod auth;
pub mod dishes;
pub mod health;
pub mod orders;
pub mod payments;
pub mod restaurants;
pub mod users;

use crate::core::ServerState;
use axum::Router;

/// The complete API router
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(users::router())
        .merge(restaurants::router())
        .merge(dishes::router())
        .merge(orders::router())
        .merge(payments::router())
}

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
