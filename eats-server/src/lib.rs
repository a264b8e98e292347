//! Eats Server - food ordering platform backend
//!
//! # Architecture overview
//!
//! - **Accounts** (`api/auth`, `api/users`): registration, JWT login, email
//!   verification
//! - **Catalog** (`api/restaurants`, `api/dishes`): restaurants, categories
//!   and menus
//! - **Orders** (`orders`): pricing, visibility policy, role-gated status
//!   machine and driver assignment
//! - **Events** (`events`): in-process fan-out of order lifecycle events
//! - **Payments** (`api/payments`, `services/promotions`): promotion
//!   payments and the daily expiry sweep
//!
//! # Module structure
//!
//! ```text
//! eats-server/src/
//! ├── core/          # config, state, server lifecycle, background tasks
//! ├── auth/          # JWT session, middleware, role checks
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # embedded SurrealDB models and repositories
//! ├── events/        # order event bus
//! ├── orders/        # order domain core
//! ├── services/      # mail, promotions
//! └── utils/         # errors, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod events;
pub mod orders;
pub mod services;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use events::OrderEvents;
pub use orders::OrderService;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Process-level setup: environment file and logging
pub fn setup_environment() {
    dotenv::dotenv().ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(
        std::env::var("RUST_LOG").ok().as_deref(),
        log_dir.as_deref(),
    );
}
