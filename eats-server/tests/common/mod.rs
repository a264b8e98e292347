//! Shared setup for integration tests: in-memory state and seed data.

#![allow(dead_code)]

use eats_server::auth::{CurrentUser, JwtConfig};
use eats_server::core::{Config, ServerState};
use eats_server::db::models::{
    Dish, DishCreate, Restaurant, RestaurantCreate, User, UserCreate,
};
use eats_server::db::repository::{
    DishRepository, RestaurantRepository, UserRepository, record_key_i64,
};
use eats_server::services::MailConfig;
use shared::{DishChoice, DishOption, UserRole, now_millis};
use surrealdb::RecordId;

pub fn test_config() -> Config {
    Config {
        work_dir: "/tmp/eats-test".into(),
        http_port: 0,
        jwt: JwtConfig {
            secret: "integration-test-secret-0123456789ab".into(),
            expiration_minutes: 60,
            issuer: "eats-server".into(),
            audience: "eats-clients".into(),
        },
        mail: MailConfig {
            domain: String::new(),
            api_key: String::new(),
            from: "Eats <noreply@example.com>".into(),
        },
        environment: "test".into(),
        promotion_sweep_interval_secs: 86_400,
    }
}

pub async fn test_state() -> ServerState {
    ServerState::in_memory(test_config())
        .await
        .expect("in-memory state")
}

/// Numeric key of a stored entity's id
pub fn key(id: &Option<RecordId>) -> i64 {
    record_key_i64(id.as_ref().expect("entity has an id")).expect("numeric key")
}

pub async fn create_user(state: &ServerState, email: &str, role: UserRole) -> (User, CurrentUser) {
    let now = now_millis();
    let user = UserRepository::new(state.db.clone())
        .create(UserCreate {
            email: email.to_string(),
            hash_pass: User::hash_password("password123").unwrap(),
            role,
            verified: false,
            created_at: now,
            updated_at: now,
        })
        .await
        .expect("create user");

    let current = CurrentUser {
        id: user.id.clone().unwrap(),
        email: user.email.clone(),
        role: user.role,
    };
    (user, current)
}

pub async fn create_restaurant(
    state: &ServerState,
    owner: &CurrentUser,
    name: &str,
) -> Restaurant {
    let now = now_millis();
    RestaurantRepository::new(state.db.clone())
        .create(RestaurantCreate {
            name: name.to_string(),
            address: "1 Test Street".into(),
            cover_image: None,
            category: None,
            owner: owner.id.clone(),
            is_promoted: false,
            created_at: now,
            updated_at: now,
        })
        .await
        .expect("create restaurant")
}

pub async fn create_dish(
    state: &ServerState,
    restaurant: &Restaurant,
    name: &str,
    price: i64,
    options: Vec<DishOption>,
) -> Dish {
    let now = now_millis();
    DishRepository::new(state.db.clone())
        .create(DishCreate {
            name: name.to_string(),
            price,
            photo: None,
            description: None,
            restaurant: restaurant.id.clone().unwrap(),
            options,
            created_at: now,
            updated_at: now,
        })
        .await
        .expect("create dish")
}

/// Client, owner and delivery accounts plus one restaurant with the
/// dish from the pricing scenarios: price 100, "sauce" with a priced
/// "hot sauce" choice and a flat-priced "pickle" option.
pub struct Seed {
    pub client: CurrentUser,
    pub owner: CurrentUser,
    pub driver: CurrentUser,
    pub restaurant: Restaurant,
    pub dish: Dish,
}

pub async fn seed(state: &ServerState) -> Seed {
    let (_, client) = create_user(state, "client@example.com", UserRole::Client).await;
    let (_, owner) = create_user(state, "owner@example.com", UserRole::Owner).await;
    let (_, driver) = create_user(state, "driver@example.com", UserRole::Delivery).await;

    let restaurant = create_restaurant(state, &owner, "Test Kitchen").await;
    let dish = create_dish(
        state,
        &restaurant,
        "Burger",
        100,
        vec![
            DishOption::with_choices(
                "sauce",
                vec![DishChoice {
                    name: "hot sauce".into(),
                    extra: Some(50),
                }],
            ),
            DishOption::flat("pickle", 30),
        ],
    )
    .await;

    Seed {
        client,
        owner,
        driver,
        restaurant,
        dish,
    }
}

/// Rows in a table, via a raw count query
pub async fn count_rows(state: &ServerState, table: &str) -> i64 {
    #[derive(serde::Deserialize)]
    struct Count {
        count: i64,
    }
    let row: Option<Count> = state
        .db
        .query(format!("SELECT count() FROM {table} GROUP ALL"))
        .await
        .expect("count query")
        .take(0)
        .expect("count rows");
    row.map(|c| c.count).unwrap_or(0)
}
