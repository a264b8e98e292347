//! Order operations
//!
//! [`OrderService`] carries the order lifecycle end to end: creation with
//! up-front pricing, role-scoped listing, visibility-checked reads, the
//! role-gated status machine, driver assignment and the subscription
//! establishment paths. Collaborators (repositories, the event bus) are
//! handed in at construction; nothing here reaches for globals.
//!
//! # Operation flow
//!
//! ```text
//! create_order(customer, input)
//!     ├─ 1. Resolve restaurant (fail: Could not find restaurant)
//!     ├─ 2. Resolve all dishes and prices (fail: Could not find dish,
//!     │     nothing persisted yet)
//!     ├─ 3. Persist order + items
//!     └─ 4. Publish new-pending-order scoped to the restaurant owner
//!
//! edit_order(actor, id, status)
//!     ├─ 1. Load order           (fail: Could not find an order)
//!     ├─ 2. can_see_order        (fail: Unauthorized user)
//!     ├─ 3. Role status table    (fail: Unauthorized user)
//!     ├─ 4. Persist status
//!     ├─ 5. Owner set Cooked  -> publish new-cooked-order
//!     └─ 6. Always            -> publish order-updated
//! ```

pub mod policy;
pub mod pricing;

pub use pricing::{OrderItemRequest, PricingError, ResolvedItem};

use crate::auth::{CurrentUser, require_role};
use crate::db::models::{Dish, Order, OrderCreate, OrderId, OrderItem, Restaurant};
use crate::db::repository::{DishRepository, OrderRepository, RestaurantRepository};
use crate::events::OrderEvents;
use crate::utils::{AppError, AppResult};
use futures::Stream;
use serde::{Deserialize, Serialize};
use shared::{OrderStatus, UserRole, now_millis};
use std::collections::HashMap;
use std::sync::Arc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

/// Order creation request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderInput {
    pub restaurant_id: i64,
    pub items: Vec<OrderItemRequest>,
}

/// An order with its items loaded
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetail {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Order lifecycle service
pub struct OrderService {
    orders: OrderRepository,
    restaurants: RestaurantRepository,
    dishes: DishRepository,
    events: Arc<OrderEvents>,
}

impl OrderService {
    pub fn new(db: Surreal<Db>, events: Arc<OrderEvents>) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            restaurants: RestaurantRepository::new(db.clone()),
            dishes: DishRepository::new(db),
            events,
        }
    }

    fn order_record_id(order_id: i64) -> OrderId {
        RecordId::from_table_key("order", order_id)
    }

    /// Load an order and the restaurant it belongs to. The restaurant is
    /// needed for every visibility decision; its absence is a data fault,
    /// not a caller error.
    async fn load_order(
        &self,
        id: &OrderId,
        missing: impl Fn() -> AppError,
    ) -> AppResult<(Order, Restaurant)> {
        let order = self.orders.find_by_id(id).await?.ok_or_else(missing)?;
        let restaurant = self
            .restaurants
            .find_by_id(&order.restaurant)
            .await?
            .ok_or_else(|| AppError::internal(format!("Restaurant missing for order {}", id)))?;
        Ok((order, restaurant))
    }

    /// Place a new order.
    ///
    /// Every dish is resolved and priced before the first row is written, so
    /// an unknown restaurant or dish leaves no order or item rows behind.
    pub async fn create_order(
        &self,
        customer: &CurrentUser,
        input: CreateOrderInput,
    ) -> AppResult<()> {
        let restaurant_id = RecordId::from_table_key("restaurant", input.restaurant_id);
        let restaurant = self
            .restaurants
            .find_by_id(&restaurant_id)
            .await?
            .ok_or_else(|| AppError::not_found("Could not find restaurant"))?;

        let dish_ids = input
            .items
            .iter()
            .map(|item| RecordId::from_table_key("dish", item.dish_id))
            .collect();
        let dishes = self.dishes.find_many(dish_ids).await?;
        let lookup: HashMap<String, Dish> = dishes
            .into_iter()
            .filter_map(|dish| dish.id.clone().map(|id| (id.to_string(), dish)))
            .collect();

        let (total, resolved) = pricing::compute_order(&lookup, &input.items)
            .map_err(|e| AppError::not_found(e.to_string()))?;

        let now = now_millis();
        let order = self
            .orders
            .create_with_items(
                OrderCreate {
                    customer: customer.id.clone(),
                    restaurant: restaurant_id,
                    status: OrderStatus::Pending,
                    total,
                    created_at: now,
                    updated_at: now,
                },
                resolved
                    .into_iter()
                    .map(|item| (item.dish, item.choices, item.price))
                    .collect(),
            )
            .await?;

        tracing::debug!(total, "Order created");
        self.events.publish_pending(order, restaurant.owner);
        Ok(())
    }

    /// Orders visible to the actor, optionally narrowed to one status.
    ///
    /// Clients list their own orders, delivery accounts their assignments,
    /// owners everything placed at their restaurants (status filtered after
    /// the fan-in over restaurants).
    pub async fn get_orders(
        &self,
        user: &CurrentUser,
        status: Option<OrderStatus>,
    ) -> AppResult<Vec<Order>> {
        let orders = match user.role {
            UserRole::Client => self.orders.find_by_customer(&user.id, status).await?,
            UserRole::Delivery => self.orders.find_by_driver(&user.id, status).await?,
            UserRole::Owner => {
                let restaurants = self.restaurants.find_by_owner(&user.id).await?;
                let ids = restaurants.into_iter().filter_map(|r| r.id).collect();
                let mut orders = self.orders.find_by_restaurants(ids).await?;
                if let Some(status) = status {
                    orders.retain(|o| o.status == status);
                }
                orders
            }
        };
        Ok(orders)
    }

    /// One order with its items, visibility checked
    pub async fn get_order(&self, user: &CurrentUser, order_id: i64) -> AppResult<OrderDetail> {
        let id = Self::order_record_id(order_id);
        let (order, restaurant) = self
            .load_order(&id, || AppError::not_found("Order not found"))
            .await?;

        if !policy::can_see_order(user, &order, &restaurant) {
            return Err(AppError::forbidden("Unauthorized user"));
        }

        let items = self.orders.find_items(&id).await?;
        Ok(OrderDetail { order, items })
    }

    /// Move an order to a new status.
    ///
    /// Gated by visibility and by the role's permitted target set only; the
    /// current status is deliberately not consulted (see [`policy`]).
    pub async fn edit_order(
        &self,
        user: &CurrentUser,
        order_id: i64,
        status: OrderStatus,
    ) -> AppResult<()> {
        let id = Self::order_record_id(order_id);
        let (order, restaurant) = self
            .load_order(&id, || AppError::not_found("Could not find an order"))
            .await?;

        if !policy::can_see_order(user, &order, &restaurant) {
            return Err(AppError::forbidden("Unauthorized user"));
        }
        if !policy::can_set_status(user.role, status) {
            return Err(AppError::forbidden("Unauthorized user"));
        }

        self.orders.set_status(&id, status).await?;

        // Events carry the updated row; interested callers re-query
        let updated = Order {
            status,
            updated_at: now_millis(),
            ..order
        };
        if user.role == UserRole::Owner && status == OrderStatus::Cooked {
            self.events.publish_cooked(updated.clone());
        }
        self.events.publish_update(updated);
        Ok(())
    }

    /// Assign the calling delivery account as the order's driver.
    ///
    /// Not a status edit: an order that already has a driver is never
    /// reassigned, a second caller gets a conflict.
    pub async fn take_order(&self, driver: &CurrentUser, order_id: i64) -> AppResult<()> {
        let id = Self::order_record_id(order_id);
        let order = self
            .orders
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::not_found("Order not found"))?;

        if order.driver.is_some() {
            return Err(AppError::conflict("Order already has a driver"));
        }

        self.orders.set_driver(&id, &driver.id).await?;

        let updated = Order {
            driver: Some(driver.id.clone()),
            updated_at: now_millis(),
            ..order
        };
        self.events.publish_update(updated);
        Ok(())
    }

    // ========== Subscription establishment ==========

    /// Updates of one order. Establishment fails with an authorization
    /// error, never an empty stream: an unknown order id is indistinguishable
    /// from one the actor may not see.
    pub async fn subscribe_order(
        &self,
        user: &CurrentUser,
        order_id: i64,
    ) -> AppResult<impl Stream<Item = Order> + Send + 'static> {
        let id = Self::order_record_id(order_id);
        let (order, restaurant) = self
            .load_order(&id, || AppError::forbidden("Unauthorized user"))
            .await?;

        if !policy::can_see_order(user, &order, &restaurant) {
            return Err(AppError::forbidden("Unauthorized user"));
        }

        Ok(self.events.order_updates(id))
    }

    /// Pending orders of the calling owner's restaurants
    pub fn pending_orders(
        &self,
        owner: &CurrentUser,
    ) -> AppResult<impl Stream<Item = Order> + Send + 'static> {
        require_role(owner, UserRole::Owner)?;
        Ok(self.events.pending_orders(owner.id.clone()))
    }

    /// Every order marked cooked, for delivery accounts
    pub fn cooked_orders(
        &self,
        driver: &CurrentUser,
    ) -> AppResult<impl Stream<Item = Order> + Send + 'static> {
        require_role(driver, UserRole::Delivery)?;
        Ok(self.events.cooked_orders())
    }
}
