//! Server Implementation
//!
//! HTTP server startup, background task registration and graceful shutdown.

use std::time::Duration;

use axum::middleware;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::auth::require_auth;
use crate::core::{BackgroundTasks, Config, ServerState};
use crate::db::repository::RestaurantRepository;
use crate::services::promotions;
use crate::utils::{AppError, AppResult};

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

/// The full application router: API routes behind the auth middleware.
/// Shared by [`Server::run`] and the HTTP-level tests.
pub fn build_router(state: ServerState) -> axum::Router {
    api::router()
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (tests, embedded setups)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> AppResult<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await?,
        };

        // Background tasks: the daily promotion expiry sweep. It only
        // touches restaurant rows and never blocks request handling.
        let mut tasks = BackgroundTasks::new();
        let sweep_token = tasks.shutdown_token();
        let sweep_state = state.clone();
        let sweep_interval = Duration::from_secs(self.config.promotion_sweep_interval_secs);
        tasks.spawn("promotion_sweep", async move {
            let restaurants = RestaurantRepository::new(sweep_state.db.clone());
            let mut ticker = tokio::time::interval(sweep_interval);
            loop {
                tokio::select! {
                    _ = sweep_token.cancelled() => break,
                    _ = ticker.tick() => {
                        if let Err(e) = promotions::clear_expired_promotions(&restaurants).await {
                            tracing::error!(error = %e, "Promotion sweep failed");
                        }
                    }
                }
            }
        });

        let app = build_router(state.clone());

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

        tracing::info!("Eats server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

        // Deterministic teardown: close the event bus first so subscriber
        // streams end, then stop background tasks.
        state.shutdown();
        tasks.shutdown(SHUTDOWN_TIMEOUT).await;
        tracing::info!("Shutdown complete");

        Ok(())
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutting down...");
}
