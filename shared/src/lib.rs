//! Shared domain vocabulary for the eats platform
//!
//! Types used across the server crate and its tests:
//!
//! - [`models`]: roles, order statuses, dish option structures
//! - [`types`]: common aliases
//! - [`util`]: timestamps and snowflake ID generation

pub mod models;
pub mod types;
pub mod util;

pub use models::{DishChoice, DishOption, OrderItemChoice, OrderStatus, UserRole};
pub use types::Timestamp;
pub use util::{now_millis, snowflake_id};
