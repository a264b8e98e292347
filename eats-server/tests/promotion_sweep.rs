//! Promotion expiry sweep tests: only lapsed promotions are cleared, and
//! the sweep touches nothing else.

mod common;

use common::*;
use eats_server::db::repository::RestaurantRepository;
use eats_server::services::promotions;
use shared::{UserRole, now_millis};

#[tokio::test]
async fn sweep_clears_only_lapsed_promotions() {
    let state = test_state().await;
    let (_, owner) = create_user(&state, "owner@example.com", UserRole::Owner).await;
    let repo = RestaurantRepository::new(state.db.clone());

    let lapsed = create_restaurant(&state, &owner, "Lapsed").await;
    let active = create_restaurant(&state, &owner, "Active").await;
    let never = create_restaurant(&state, &owner, "Never promoted").await;

    let now = now_millis();
    repo.promote(lapsed.id.as_ref().unwrap(), now - 1_000)
        .await
        .unwrap();
    repo.promote(active.id.as_ref().unwrap(), promotions::promotion_expiry(now))
        .await
        .unwrap();

    let cleared = promotions::clear_expired_promotions(&repo).await.unwrap();
    assert_eq!(cleared, 1);

    let lapsed = repo
        .find_by_id(lapsed.id.as_ref().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert!(!lapsed.is_promoted);
    assert_eq!(lapsed.promoted_until, None);

    let active = repo
        .find_by_id(active.id.as_ref().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert!(active.is_promoted);
    assert!(active.promoted_until.is_some());

    let never = repo
        .find_by_id(never.id.as_ref().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert!(!never.is_promoted);

    // A second sweep finds nothing left to clear
    let cleared = promotions::clear_expired_promotions(&repo).await.unwrap();
    assert_eq!(cleared, 0);
}

#[tokio::test]
async fn promoted_restaurants_sort_first_in_listings() {
    let state = test_state().await;
    let (_, owner) = create_user(&state, "owner@example.com", UserRole::Owner).await;
    let repo = RestaurantRepository::new(state.db.clone());

    let _plain = create_restaurant(&state, &owner, "Plain").await;
    let promoted = create_restaurant(&state, &owner, "Promoted").await;
    repo.promote(
        promoted.id.as_ref().unwrap(),
        promotions::promotion_expiry(now_millis()),
    )
    .await
    .unwrap();

    let (page, total) = repo.find_page(1).await.unwrap();
    assert_eq!(total, 2);
    assert_eq!(page[0].name, "Promoted");
}
