//! Order lifecycle integration tests over an in-memory database: pricing on
//! creation, role-scoped listing, the status machine and driver assignment,
//! plus the events each step publishes.

mod common;

use common::*;
use eats_server::db::repository::OrderRepository;
use eats_server::orders::{CreateOrderInput, OrderItemRequest};
use eats_server::utils::AppError;
use futures::StreamExt;
use shared::{OrderItemChoice, OrderStatus, UserRole};
use std::time::Duration;

fn choice(name: &str, choice: Option<&str>) -> OrderItemChoice {
    OrderItemChoice {
        name: name.into(),
        choice: choice.map(Into::into),
    }
}

fn scenario_input(seed: &Seed) -> CreateOrderInput {
    CreateOrderInput {
        restaurant_id: key(&seed.restaurant.id),
        items: vec![
            OrderItemRequest {
                dish_id: key(&seed.dish.id),
                choices: vec![choice("sauce", Some("hot sauce"))],
            },
            OrderItemRequest {
                dish_id: key(&seed.dish.id),
                choices: vec![choice("pickle", None)],
            },
        ],
    }
}

/// Place the scenario order and return its numeric id
async fn place_order(state: &eats_server::core::ServerState, seed: &Seed) -> i64 {
    let service = state.order_service();
    service
        .create_order(&seed.client, scenario_input(seed))
        .await
        .expect("create order");
    let orders = service
        .get_orders(&seed.client, None)
        .await
        .expect("list orders");
    key(&orders[0].id)
}

async fn expect_no_event<S>(stream: &mut S)
where
    S: futures::Stream<Item = eats_server::db::models::Order> + Unpin,
{
    let extra = tokio::time::timeout(Duration::from_millis(100), stream.next()).await;
    assert!(extra.is_err(), "expected no further events");
}

#[tokio::test]
async fn create_order_prices_items_and_notifies_owner() {
    let state = test_state().await;
    let seed = seed(&state).await;
    let service = state.order_service();

    // Subscribe before the operation; fan-out has no replay
    let mut pending = Box::pin(state.events.pending_orders(seed.owner.id.clone()));

    service
        .create_order(&seed.client, scenario_input(&seed))
        .await
        .unwrap();

    // 150 (sauce: hot sauce +50) + 130 (pickle flat +30)
    let event = tokio::time::timeout(Duration::from_secs(1), pending.next())
        .await
        .expect("pending event")
        .unwrap();
    assert_eq!(event.total, 280);
    assert_eq!(event.status, OrderStatus::Pending);
    expect_no_event(&mut pending).await;

    let orders = service.get_orders(&seed.client, None).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].total, 280);

    let detail = service
        .get_order(&seed.client, key(&orders[0].id))
        .await
        .unwrap();
    assert_eq!(detail.items.len(), 2);
    assert_eq!(detail.items.iter().map(|i| i.price).sum::<i64>(), 280);
    assert_eq!(detail.items[0].choices.len(), 1);
}

#[tokio::test]
async fn pending_event_is_scoped_to_the_restaurant_owner() {
    let state = test_state().await;
    let seed = seed(&state).await;
    let (_, other_owner) = create_user(&state, "other-owner@example.com", UserRole::Owner).await;

    let mut other_stream = Box::pin(state.events.pending_orders(other_owner.id.clone()));
    let mut owner_stream = Box::pin(state.events.pending_orders(seed.owner.id.clone()));

    state
        .order_service()
        .create_order(&seed.client, scenario_input(&seed))
        .await
        .unwrap();

    let event = tokio::time::timeout(Duration::from_secs(1), owner_stream.next())
        .await
        .expect("owner event")
        .unwrap();
    assert_eq!(event.total, 280);
    expect_no_event(&mut other_stream).await;
}

#[tokio::test]
async fn unknown_restaurant_creates_nothing() {
    let state = test_state().await;
    let seed = seed(&state).await;

    let err = state
        .order_service()
        .create_order(
            &seed.client,
            CreateOrderInput {
                restaurant_id: 424242,
                items: vec![OrderItemRequest {
                    dish_id: key(&seed.dish.id),
                    choices: vec![],
                }],
            },
        )
        .await
        .unwrap_err();

    match err {
        AppError::NotFound(msg) => assert_eq!(msg, "Could not find restaurant"),
        other => panic!("expected NotFound, got {other:?}"),
    }
    assert_eq!(count_rows(&state, "order").await, 0);
    assert_eq!(count_rows(&state, "order_item").await, 0);
}

#[tokio::test]
async fn unknown_dish_creates_nothing() {
    let state = test_state().await;
    let seed = seed(&state).await;

    let err = state
        .order_service()
        .create_order(
            &seed.client,
            CreateOrderInput {
                restaurant_id: key(&seed.restaurant.id),
                items: vec![
                    OrderItemRequest {
                        dish_id: key(&seed.dish.id),
                        choices: vec![],
                    },
                    OrderItemRequest {
                        dish_id: 424242,
                        choices: vec![],
                    },
                ],
            },
        )
        .await
        .unwrap_err();

    match err {
        AppError::NotFound(msg) => assert_eq!(msg, "Could not find dish"),
        other => panic!("expected NotFound, got {other:?}"),
    }
    // Fail-fast: the resolvable first item must not have been written either
    assert_eq!(count_rows(&state, "order").await, 0);
    assert_eq!(count_rows(&state, "order_item").await, 0);
}

#[tokio::test]
async fn get_orders_is_role_scoped() {
    let state = test_state().await;
    let seed = seed(&state).await;
    let service = state.order_service();
    let order_id = place_order(&state, &seed).await;

    // Owner sees it through the restaurant, the driver not at all yet
    assert_eq!(service.get_orders(&seed.owner, None).await.unwrap().len(), 1);
    assert_eq!(
        service.get_orders(&seed.driver, None).await.unwrap().len(),
        0
    );

    // Another client sees nothing
    let (_, other) = create_user(&state, "other@example.com", UserRole::Client).await;
    assert_eq!(service.get_orders(&other, None).await.unwrap().len(), 0);

    // Status filters, including the owner's post-filtered arm
    assert_eq!(
        service
            .get_orders(&seed.client, Some(OrderStatus::Pending))
            .await
            .unwrap()
            .len(),
        1
    );
    assert_eq!(
        service
            .get_orders(&seed.owner, Some(OrderStatus::Cooking))
            .await
            .unwrap()
            .len(),
        0
    );

    // Assignment brings the order into the driver's listing
    service.take_order(&seed.driver, order_id).await.unwrap();
    assert_eq!(
        service.get_orders(&seed.driver, None).await.unwrap().len(),
        1
    );
}

#[tokio::test]
async fn get_order_enforces_visibility() {
    let state = test_state().await;
    let seed = seed(&state).await;
    let service = state.order_service();
    let order_id = place_order(&state, &seed).await;

    assert!(service.get_order(&seed.client, order_id).await.is_ok());
    assert!(service.get_order(&seed.owner, order_id).await.is_ok());

    // Unassigned: no delivery account may see it
    let err = service.get_order(&seed.driver, order_id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let err = service.get_order(&seed.client, 424242).await.unwrap_err();
    match err {
        AppError::NotFound(msg) => assert_eq!(msg, "Order not found"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn owner_marking_cooked_publishes_both_events_exactly_once() {
    let state = test_state().await;
    let seed = seed(&state).await;
    let service = state.order_service();
    let order_id = place_order(&state, &seed).await;

    let mut cooked = Box::pin(service.cooked_orders(&seed.driver).unwrap());
    let mut updates = Box::pin(
        service
            .subscribe_order(&seed.client, order_id)
            .await
            .unwrap(),
    );

    service
        .edit_order(&seed.owner, order_id, OrderStatus::Cooked)
        .await
        .unwrap();

    let cooked_event = tokio::time::timeout(Duration::from_secs(1), cooked.next())
        .await
        .expect("cooked event")
        .unwrap();
    assert_eq!(cooked_event.status, OrderStatus::Cooked);
    expect_no_event(&mut cooked).await;

    let update_event = tokio::time::timeout(Duration::from_secs(1), updates.next())
        .await
        .expect("update event")
        .unwrap();
    assert_eq!(update_event.status, OrderStatus::Cooked);
    expect_no_event(&mut updates).await;

    let persisted = service.get_order(&seed.owner, order_id).await.unwrap();
    assert_eq!(persisted.order.status, OrderStatus::Cooked);
}

#[tokio::test]
async fn cooking_status_publishes_update_but_not_cooked() {
    let state = test_state().await;
    let seed = seed(&state).await;
    let service = state.order_service();
    let order_id = place_order(&state, &seed).await;

    let mut cooked = Box::pin(state.events.cooked_orders());
    let mut updates = Box::pin(
        service
            .subscribe_order(&seed.client, order_id)
            .await
            .unwrap(),
    );

    service
        .edit_order(&seed.owner, order_id, OrderStatus::Cooking)
        .await
        .unwrap();

    let update_event = tokio::time::timeout(Duration::from_secs(1), updates.next())
        .await
        .expect("update event")
        .unwrap();
    assert_eq!(update_event.status, OrderStatus::Cooking);
    expect_no_event(&mut cooked).await;
}

#[tokio::test]
async fn edit_order_rejects_targets_outside_the_role_set() {
    let state = test_state().await;
    let seed = seed(&state).await;
    let service = state.order_service();
    let order_id = place_order(&state, &seed).await;

    // Owner may not hand the order to delivery statuses
    for status in [OrderStatus::PickedUp, OrderStatus::Delivered] {
        let err = service
            .edit_order(&seed.owner, order_id, status)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)), "{status:?}");
    }

    // Client may only cancel
    for status in [
        OrderStatus::Cooking,
        OrderStatus::Cooked,
        OrderStatus::PickedUp,
        OrderStatus::Delivered,
        OrderStatus::Pending,
    ] {
        let err = service
            .edit_order(&seed.client, order_id, status)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)), "{status:?}");
    }
    service
        .edit_order(&seed.client, order_id, OrderStatus::Canceled)
        .await
        .unwrap();
}

#[tokio::test]
async fn status_gates_ignore_the_current_status() {
    let state = test_state().await;
    let seed = seed(&state).await;
    let service = state.order_service();
    let order_id = place_order(&state, &seed).await;

    // Delivery may jump straight to Delivered from Pending once assigned
    service.take_order(&seed.driver, order_id).await.unwrap();
    service
        .edit_order(&seed.driver, order_id, OrderStatus::Delivered)
        .await
        .unwrap();

    // And the owner may still pull a delivered order back to Cooking: the
    // table is keyed by role alone, current status never enters into it
    service
        .edit_order(&seed.owner, order_id, OrderStatus::Cooking)
        .await
        .unwrap();
    let detail = service.get_order(&seed.owner, order_id).await.unwrap();
    assert_eq!(detail.order.status, OrderStatus::Cooking);
}

#[tokio::test]
async fn take_order_never_reassigns() {
    let state = test_state().await;
    let seed = seed(&state).await;
    let service = state.order_service();
    let order_id = place_order(&state, &seed).await;

    let mut updates = Box::pin(
        state
            .events
            .order_updates(surrealdb::RecordId::from_table_key("order", order_id)),
    );

    service.take_order(&seed.driver, order_id).await.unwrap();
    let event = tokio::time::timeout(Duration::from_secs(1), updates.next())
        .await
        .expect("update event")
        .unwrap();
    assert_eq!(event.driver, Some(seed.driver.id.clone()));

    // A second driver must not steal the assignment
    let (_, rival) = create_user(&state, "rival@example.com", UserRole::Delivery).await;
    let err = service.take_order(&rival, order_id).await.unwrap_err();
    match err {
        AppError::Conflict(msg) => assert_eq!(msg, "Order already has a driver"),
        other => panic!("expected Conflict, got {other:?}"),
    }

    let stored = OrderRepository::new(state.db.clone())
        .find_by_id(&surrealdb::RecordId::from_table_key("order", order_id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.driver, Some(seed.driver.id.clone()));

    let err = service.take_order(&seed.driver, 424242).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn subscription_establishment_is_authorization_gated() {
    let state = test_state().await;
    let seed = seed(&state).await;
    let service = state.order_service();
    let order_id = place_order(&state, &seed).await;

    // A stranger gets an error object instead of a stream, and an unknown
    // order id looks exactly the same
    let (_, stranger) = create_user(&state, "stranger@example.com", UserRole::Client).await;
    assert!(service.subscribe_order(&stranger, order_id).await.is_err());
    assert!(service.subscribe_order(&seed.client, 424242).await.is_err());

    // Role-gated feeds reject the wrong role outright
    assert!(service.pending_orders(&seed.client).is_err());
    assert!(service.cooked_orders(&seed.owner).is_err());
    assert!(service.pending_orders(&seed.owner).is_ok());
    assert!(service.cooked_orders(&seed.driver).is_ok());
}

#[tokio::test]
async fn subscribers_only_see_events_after_joining() {
    let state = test_state().await;
    let seed = seed(&state).await;
    let service = state.order_service();
    let order_id = place_order(&state, &seed).await;

    // This edit happens before the subscription exists
    service
        .edit_order(&seed.owner, order_id, OrderStatus::Cooking)
        .await
        .unwrap();

    let mut updates = Box::pin(
        service
            .subscribe_order(&seed.client, order_id)
            .await
            .unwrap(),
    );
    expect_no_event(&mut updates).await;

    // The next edit is seen
    service
        .edit_order(&seed.owner, order_id, OrderStatus::Cooked)
        .await
        .unwrap();
    let event = tokio::time::timeout(Duration::from_secs(1), updates.next())
        .await
        .expect("update event")
        .unwrap();
    assert_eq!(event.status, OrderStatus::Cooked);

    // Shutdown ends the stream deterministically
    state.events.close();
    assert!(updates.next().await.is_none());
}
