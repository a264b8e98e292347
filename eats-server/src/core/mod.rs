//! Core
//!
//! Configuration, the composition root and server lifecycle.

pub mod config;
pub mod server;
pub mod state;
pub mod tasks;

pub use config::Config;
pub use server::{Server, build_router};
pub use state::ServerState;
pub use tasks::BackgroundTasks;
