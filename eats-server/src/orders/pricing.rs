//! Order pricing
//!
//! Pure price resolution over an already-loaded dish lookup. All lookups and
//! arithmetic happen before anything is persisted, so a missing dish aborts
//! the whole order with no rows written.

use crate::db::models::{Dish, DishId};
use shared::OrderItemChoice;
use std::collections::HashMap;
use surrealdb::RecordId;
use thiserror::Error;

/// Pricing failure modes
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// A requested dish id resolved to nothing
    #[error("Could not find dish")]
    DishNotFound,
}

/// One requested order line: a dish id plus the selections made on it
#[derive(Debug, Clone, serde::Deserialize)]
pub struct OrderItemRequest {
    pub dish_id: i64,
    #[serde(default)]
    pub choices: Vec<OrderItemChoice>,
}

/// A priced order line, ready to persist
#[derive(Debug, Clone)]
pub struct ResolvedItem {
    pub dish: DishId,
    pub choices: Vec<OrderItemChoice>,
    pub price: i64,
}

/// Price one dish with the given selections.
///
/// Selections that name no option on the dish are skipped. An option with a
/// flat `extra` contributes exactly that surcharge and its choices are not
/// consulted; otherwise the named choice's `extra` applies when present.
pub fn resolve_item_price(dish: &Dish, choices: &[OrderItemChoice]) -> i64 {
    let mut price = dish.price;

    for selection in choices {
        let Some(option) = dish.options.iter().find(|o| o.name == selection.name) else {
            continue;
        };

        if let Some(extra) = option.extra {
            price += extra;
        } else if let (Some(choice_name), Some(option_choices)) =
            (&selection.choice, &option.choices)
        {
            if let Some(choice) = option_choices.iter().find(|c| &c.name == choice_name)
                && let Some(extra) = choice.extra
            {
                price += extra;
            }
        }
    }

    price
}

/// Resolve every requested item against the dish lookup and sum the total.
///
/// Fails fast on the first missing dish; the caller has not persisted
/// anything at that point.
pub fn compute_order(
    dishes: &HashMap<String, Dish>,
    items: &[OrderItemRequest],
) -> Result<(i64, Vec<ResolvedItem>), PricingError> {
    let mut total: i64 = 0;
    let mut resolved = Vec::with_capacity(items.len());

    for item in items {
        let dish_id = RecordId::from_table_key("dish", item.dish_id);
        let dish = dishes
            .get(&dish_id.to_string())
            .ok_or(PricingError::DishNotFound)?;

        let price = resolve_item_price(dish, &item.choices);
        total += price;
        resolved.push(ResolvedItem {
            dish: dish_id,
            choices: item.choices.clone(),
            price,
        });
    }

    Ok((total, resolved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{DishChoice, DishOption};

    fn dish(id: i64, price: i64, options: Vec<DishOption>) -> Dish {
        Dish {
            id: Some(RecordId::from_table_key("dish", id)),
            name: format!("dish-{id}"),
            price,
            photo: None,
            description: None,
            restaurant: RecordId::from_table_key("restaurant", 1i64),
            options,
            created_at: 0,
            updated_at: 0,
        }
    }

    /// Dish 100 with "sauce" choices [hot sauce +50] and flat "pickle" +30
    fn sample_dish() -> Dish {
        dish(
            1,
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
    }

    fn selection(name: &str, choice: Option<&str>) -> OrderItemChoice {
        OrderItemChoice {
            name: name.into(),
            choice: choice.map(Into::into),
        }
    }

    fn lookup(dishes: Vec<Dish>) -> HashMap<String, Dish> {
        dishes
            .into_iter()
            .map(|d| (d.id.clone().unwrap().to_string(), d))
            .collect()
    }

    #[test]
    fn choice_extra_applies_when_option_has_no_flat_extra() {
        let d = sample_dish();
        let price = resolve_item_price(&d, &[selection("sauce", Some("hot sauce"))]);
        assert_eq!(price, 150);
    }

    #[test]
    fn flat_extra_applies_on_its_own() {
        let d = sample_dish();
        let price = resolve_item_price(&d, &[selection("pickle", None)]);
        assert_eq!(price, 130);
    }

    #[test]
    fn flat_extra_shadows_choice_extras() {
        // Option with both a flat extra and priced choices: only the flat
        // surcharge counts, whatever choice is named
        let d = dish(
            2,
            100,
            vec![DishOption {
                name: "size".into(),
                extra: Some(20),
                choices: Some(vec![DishChoice {
                    name: "xl".into(),
                    extra: Some(500),
                }]),
            }],
        );
        let price = resolve_item_price(&d, &[selection("size", Some("xl"))]);
        assert_eq!(price, 120);
    }

    #[test]
    fn unknown_option_and_choice_are_skipped_silently() {
        let d = sample_dish();
        assert_eq!(
            resolve_item_price(&d, &[selection("no-such-option", None)]),
            100
        );
        assert_eq!(
            resolve_item_price(&d, &[selection("sauce", Some("no-such-choice"))]),
            100
        );
        assert_eq!(resolve_item_price(&d, &[selection("sauce", None)]), 100);
    }

    #[test]
    fn order_total_is_sum_of_resolved_items() {
        let dishes = lookup(vec![sample_dish()]);
        let items = vec![
            OrderItemRequest {
                dish_id: 1,
                choices: vec![selection("sauce", Some("hot sauce"))],
            },
            OrderItemRequest {
                dish_id: 1,
                choices: vec![selection("pickle", None)],
            },
        ];

        let (total, resolved) = compute_order(&dishes, &items).unwrap();
        assert_eq!(total, 280);
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].price, 150);
        assert_eq!(resolved[1].price, 130);
        assert_eq!(total, resolved.iter().map(|r| r.price).sum::<i64>());
        assert!(resolved.iter().all(|r| r.price >= 0));
    }

    #[test]
    fn missing_dish_fails_the_whole_order() {
        let dishes = lookup(vec![sample_dish()]);
        let items = vec![
            OrderItemRequest {
                dish_id: 1,
                choices: vec![],
            },
            OrderItemRequest {
                dish_id: 999,
                choices: vec![],
            },
        ];

        assert_eq!(
            compute_order(&dishes, &items).unwrap_err(),
            PricingError::DishNotFound
        );
    }

    #[test]
    fn empty_order_totals_zero() {
        let dishes = lookup(vec![]);
        let (total, resolved) = compute_order(&dishes, &[]).unwrap();
        assert_eq!(total, 0);
        assert!(resolved.is_empty());
    }
}
