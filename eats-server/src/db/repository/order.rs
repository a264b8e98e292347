//! Order Repository
//!
//! Orders and their items. Items are written right before the parent order
//! and never touched again; status and driver updates are single-field
//! writes with last-write-wins semantics (no row locking, by design of the
//! request model).

use super::{BaseRepository, RepoError, RepoResult, new_record_id};
use crate::db::models::{
    Order, OrderCreate, OrderId, OrderItem, OrderItemCreate, RestaurantId, UserId,
};
use shared::OrderStatus;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const ORDER_TABLE: &str = "order";
const ORDER_ITEM_TABLE: &str = "order_item";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: &OrderId) -> RepoResult<Option<Order>> {
        let order: Option<Order> = self.base.db().select(id.clone()).await?;
        Ok(order)
    }

    pub async fn find_by_customer(
        &self,
        customer: &UserId,
        status: Option<OrderStatus>,
    ) -> RepoResult<Vec<Order>> {
        self.find_by_actor_field("customer", customer, status).await
    }

    pub async fn find_by_driver(
        &self,
        driver: &UserId,
        status: Option<OrderStatus>,
    ) -> RepoResult<Vec<Order>> {
        self.find_by_actor_field("driver", driver, status).await
    }

    async fn find_by_actor_field(
        &self,
        field: &'static str,
        actor: &UserId,
        status: Option<OrderStatus>,
    ) -> RepoResult<Vec<Order>> {
        let query = match (field, status.is_some()) {
            ("customer", true) => {
                "SELECT * FROM order WHERE customer = $actor AND status = $status \
                 ORDER BY created_at DESC"
            }
            ("customer", false) => {
                "SELECT * FROM order WHERE customer = $actor ORDER BY created_at DESC"
            }
            ("driver", true) => {
                "SELECT * FROM order WHERE driver = $actor AND status = $status \
                 ORDER BY created_at DESC"
            }
            _ => "SELECT * FROM order WHERE driver = $actor ORDER BY created_at DESC",
        };

        let mut request = self.base.db().query(query).bind(("actor", actor.to_string()));
        if let Some(status) = status {
            request = request.bind(("status", status));
        }
        let orders: Vec<Order> = request.await?.take(0)?;
        Ok(orders)
    }

    /// All orders placed at any of the given restaurants
    pub async fn find_by_restaurants(
        &self,
        restaurants: Vec<RestaurantId>,
    ) -> RepoResult<Vec<Order>> {
        if restaurants.is_empty() {
            return Ok(Vec::new());
        }
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE restaurant IN $restaurants ORDER BY created_at DESC")
            .bind((
                "restaurants",
                restaurants
                    .iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>(),
            ))
            .await?
            .take(0)?;
        Ok(orders)
    }

    pub async fn find_items(&self, order: &OrderId) -> RepoResult<Vec<OrderItem>> {
        let items: Vec<OrderItem> = self
            .base
            .db()
            .query("SELECT * FROM order_item WHERE order_id = $order")
            .bind(("order", order.to_string()))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Persist an order together with its already-resolved items.
    ///
    /// All dish lookups and price resolution happen before this call, so a
    /// failure earlier in the pipeline leaves no rows behind.
    pub async fn create_with_items(
        &self,
        order: OrderCreate,
        items: Vec<(surrealdb::RecordId, Vec<shared::OrderItemChoice>, i64)>,
    ) -> RepoResult<Order> {
        let order_id = new_record_id(ORDER_TABLE);

        let created: Option<Order> = self
            .base
            .db()
            .create(order_id.clone())
            .content(order)
            .await?;
        let created =
            created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))?;

        for (dish, choices, price) in items {
            let item: Option<OrderItem> = self
                .base
                .db()
                .create(new_record_id(ORDER_ITEM_TABLE))
                .content(OrderItemCreate {
                    order_id: order_id.clone(),
                    dish,
                    choices,
                    price,
                })
                .await?;
            item.ok_or_else(|| RepoError::Database("Failed to create order item".to_string()))?;
        }

        Ok(created)
    }

    pub async fn set_status(&self, id: &OrderId, status: OrderStatus) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $order SET status = $status, updated_at = $now")
            .bind(("order", id.clone()))
            .bind(("status", status))
            .bind(("now", shared::now_millis()))
            .await?
            .check()?;
        Ok(())
    }

    pub async fn set_driver(&self, id: &OrderId, driver: &UserId) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $order SET driver = $driver, updated_at = $now")
            .bind(("order", id.clone()))
            .bind(("driver", driver.to_string()))
            .bind(("now", shared::now_millis()))
            .await?
            .check()?;
        Ok(())
    }
}
