//! Restaurant promotion lifecycle
//!
//! A paid promotion flags a restaurant for a fixed number of days. The
//! expiry sweep runs on its own schedule outside any request path and only
//! ever touches restaurant rows, so it never contends with order traffic.

use crate::db::repository::RestaurantRepository;
use crate::utils::AppResult;
use shared::Timestamp;

/// How long one payment promotes a restaurant
pub const PROMOTION_DAYS: i64 = 7;

/// Promotion end timestamp for a payment made at `from`
pub fn promotion_expiry(from: Timestamp) -> Timestamp {
    from + PROMOTION_DAYS * 24 * 60 * 60 * 1000
}

/// Drop the promoted flag on every restaurant whose promotion lapsed.
/// Returns how many rows were cleared.
pub async fn clear_expired_promotions(restaurants: &RestaurantRepository) -> AppResult<usize> {
    let cleared = restaurants
        .clear_expired_promotions(shared::now_millis())
        .await?;
    if !cleared.is_empty() {
        tracing::info!(count = cleared.len(), "Cleared expired restaurant promotions");
    }
    Ok(cleared.len())
}
