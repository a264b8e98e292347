//! Order event fan-out
//!
//! One process-wide [`OrderEvents`] bus is created at startup and handed to
//! every component that publishes or subscribes; there is no global. Three
//! logical channels exist:
//!
//! - new pending order: placed orders, delivered to the owning restaurant's
//!   owner (subscriber streams filter by owner id)
//! - new cooked order: orders an owner marked cooked, delivered to every
//!   delivery subscriber unfiltered
//! - order updated: any lifecycle change, delivered to subscribers of one
//!   specific order id
//!
//! Delivery is at-least-once to the listeners subscribed at publish time.
//! Nothing is persisted or replayed: a stream opened after an event was
//! published never sees it. Publishing never blocks on subscribers; a
//! lagged receiver skips the missed events and keeps going. Every stream
//! ends when the bus is closed on shutdown.

use crate::db::models::{Order, UserId};
use futures::Stream;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

/// Per-channel buffer; slow subscribers past this lag lose oldest events
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Payload of the pending-order channel: the order plus the owner the event
/// is scoped to
#[derive(Debug, Clone)]
pub struct PendingOrder {
    pub order: Order,
    pub owner_id: UserId,
}

/// Process-wide order event bus
#[derive(Debug)]
pub struct OrderEvents {
    pending_tx: broadcast::Sender<PendingOrder>,
    cooked_tx: broadcast::Sender<Order>,
    updates_tx: broadcast::Sender<Order>,
    shutdown: CancellationToken,
}

impl OrderEvents {
    pub fn new() -> Self {
        let (pending_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let (cooked_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let (updates_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            pending_tx,
            cooked_tx,
            updates_tx,
            shutdown: CancellationToken::new(),
        }
    }

    // ========== Publishing ==========

    /// Announce a freshly created order to its restaurant's owner
    pub fn publish_pending(&self, order: Order, owner_id: UserId) {
        // send only fails when nobody is subscribed, which is fine
        let _ = self.pending_tx.send(PendingOrder { order, owner_id });
    }

    /// Announce an order marked cooked to all delivery subscribers
    pub fn publish_cooked(&self, order: Order) {
        let _ = self.cooked_tx.send(order);
    }

    /// Announce any order change to that order's subscribers
    pub fn publish_update(&self, order: Order) {
        let _ = self.updates_tx.send(order);
    }

    // ========== Subscribing ==========

    /// Pending orders of restaurants owned by `owner_id`
    pub fn pending_orders(&self, owner_id: UserId) -> impl Stream<Item = Order> + Send + 'static {
        let rx = self.pending_tx.subscribe();
        let shutdown = self.shutdown.clone();
        futures::stream::unfold(
            (rx, shutdown, owner_id),
            |(mut rx, shutdown, owner_id)| async move {
                loop {
                    tokio::select! {
                        _ = shutdown.cancelled() => return None,
                        event = rx.recv() => match event {
                            Ok(pending) if pending.owner_id == owner_id => {
                                return Some((pending.order, (rx, shutdown, owner_id)));
                            }
                            Ok(_) => continue,
                            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                                tracing::warn!(skipped, "pending-order subscriber lagged");
                                continue;
                            }
                            Err(broadcast::error::RecvError::Closed) => return None,
                        },
                    }
                }
            },
        )
    }

    /// Every cooked order, unfiltered
    pub fn cooked_orders(&self) -> impl Stream<Item = Order> + Send + 'static {
        let rx = self.cooked_tx.subscribe();
        let shutdown = self.shutdown.clone();
        futures::stream::unfold((rx, shutdown), |(mut rx, shutdown)| async move {
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => return None,
                    event = rx.recv() => match event {
                        Ok(order) => return Some((order, (rx, shutdown))),
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "cooked-order subscriber lagged");
                            continue;
                        }
                        Err(broadcast::error::RecvError::Closed) => return None,
                    },
                }
            }
        })
    }

    /// Updates of one specific order
    pub fn order_updates(
        &self,
        order_id: crate::db::models::OrderId,
    ) -> impl Stream<Item = Order> + Send + 'static {
        let rx = self.updates_tx.subscribe();
        let shutdown = self.shutdown.clone();
        futures::stream::unfold(
            (rx, shutdown, order_id),
            |(mut rx, shutdown, order_id)| async move {
                loop {
                    tokio::select! {
                        _ = shutdown.cancelled() => return None,
                        event = rx.recv() => match event {
                            Ok(order) if order.has_id(&order_id) => {
                                return Some((order, (rx, shutdown, order_id)));
                            }
                            Ok(_) => continue,
                            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                                tracing::warn!(skipped, "order-update subscriber lagged");
                                continue;
                            }
                            Err(broadcast::error::RecvError::Closed) => return None,
                        },
                    }
                }
            },
        )
    }

    /// Close the bus: every open subscriber stream ends after draining what
    /// it already received. Called once on shutdown.
    pub fn close(&self) {
        self.shutdown.cancel();
    }
}

impl Default for OrderEvents {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use shared::OrderStatus;
    use surrealdb::RecordId;

    fn user_id(n: i64) -> UserId {
        RecordId::from_table_key("user", n)
    }

    fn order(n: i64, customer: i64, restaurant: i64) -> Order {
        Order {
            id: Some(RecordId::from_table_key("order", n)),
            customer: user_id(customer),
            driver: None,
            restaurant: RecordId::from_table_key("restaurant", restaurant),
            status: OrderStatus::Pending,
            total: 0,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[tokio::test]
    async fn pending_stream_filters_by_owner() {
        let events = OrderEvents::new();
        let mut stream = Box::pin(events.pending_orders(user_id(1)));

        events.publish_pending(order(10, 5, 100), user_id(2));
        events.publish_pending(order(11, 5, 101), user_id(1));

        let seen = stream.next().await.unwrap();
        assert!(seen.has_id(&RecordId::from_table_key("order", 11i64)));
    }

    #[tokio::test]
    async fn update_stream_filters_by_order_id() {
        let events = OrderEvents::new();
        let mut stream = Box::pin(events.order_updates(RecordId::from_table_key("order", 7i64)));

        events.publish_update(order(6, 1, 100));
        events.publish_update(order(7, 1, 100));

        let seen = stream.next().await.unwrap();
        assert!(seen.has_id(&RecordId::from_table_key("order", 7i64)));
    }

    #[tokio::test]
    async fn all_current_subscribers_receive_each_event() {
        let events = OrderEvents::new();
        let mut a = Box::pin(events.cooked_orders());
        let mut b = Box::pin(events.cooked_orders());

        events.publish_cooked(order(1, 2, 3));

        assert!(a.next().await.is_some());
        assert!(b.next().await.is_some());
    }

    #[tokio::test]
    async fn late_subscriber_sees_nothing() {
        let events = OrderEvents::new();
        events.publish_cooked(order(1, 2, 3));

        // Subscribed after the publish: no replay
        let mut stream = Box::pin(events.cooked_orders());
        events.close();
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn close_ends_open_streams() {
        let events = OrderEvents::new();
        let mut stream = Box::pin(events.cooked_orders());
        events.close();
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn publishing_without_subscribers_does_not_panic() {
        let events = OrderEvents::new();
        events.publish_update(order(1, 2, 3));
        events.publish_pending(order(1, 2, 3), user_id(9));
        events.publish_cooked(order(1, 2, 3));
    }
}
