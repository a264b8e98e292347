//! Persistence models
//!
//! One file per table. All record keys are snowflake i64 values generated by
//! `shared::snowflake_id`, so ids stay numeric end to end while the Rust
//! types use SurrealDB `RecordId`s.

pub mod serde_helpers;

mod category;
mod dish;
mod order;
mod payment;
mod restaurant;
mod user;
mod verification;

pub use category::{Category, CategoryCreate, slugify};
pub use dish::{Dish, DishCreate, DishId, DishUpdate};
pub use order::{Order, OrderCreate, OrderId, OrderItem, OrderItemCreate};
pub use payment::{Payment, PaymentCreate};
pub use restaurant::{Restaurant, RestaurantCreate, RestaurantId, RestaurantUpdate};
pub use user::{User, UserCreate, UserId};
pub use verification::{Verification, VerificationCreate};
