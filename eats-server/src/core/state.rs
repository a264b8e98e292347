//! Server state
//!
//! The composition root. One [`ServerState`] is built at startup and holds
//! every shared collaborator; components receive what they need explicitly
//! (no service container, no globals). Cloning is shallow through `Arc`.

use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::events::OrderEvents;
use crate::orders::OrderService;
use crate::services::MailService;
use crate::utils::AppError;

/// Shared server state
///
/// | Field | Role |
/// |-------|------|
/// | config | Immutable settings |
/// | db | Embedded SurrealDB handle |
/// | jwt_service | Session token codec |
/// | mail | Outbound mail boundary |
/// | events | Order event fan-out bus |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    pub mail: Arc<MailService>,
    pub events: Arc<OrderEvents>,
}

impl ServerState {
    /// Initialize production state: work directory, on-disk database and
    /// the shared services.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_dir().join("eats.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        Ok(Self {
            config: config.clone(),
            db: db_service.db,
            jwt_service: Arc::new(JwtService::with_config(config.jwt.clone())),
            mail: Arc::new(MailService::new(config.mail.clone())),
            events: Arc::new(OrderEvents::new()),
        })
    }

    /// State over an in-memory database (integration tests, demos)
    pub async fn in_memory(config: Config) -> Result<Self, AppError> {
        let db_service = DbService::memory().await?;
        Ok(Self {
            jwt_service: Arc::new(JwtService::with_config(config.jwt.clone())),
            mail: Arc::new(MailService::new(config.mail.clone())),
            events: Arc::new(OrderEvents::new()),
            db: db_service.db,
            config,
        })
    }

    /// Order service wired to this state's database and event bus
    pub fn order_service(&self) -> OrderService {
        OrderService::new(self.db.clone(), self.events.clone())
    }

    /// Deterministic teardown: close the event bus so every subscriber
    /// stream ends.
    pub fn shutdown(&self) {
        self.events.close();
    }
}
