//! Cart pricing
//!
//! Turns a list of `(food, unit)` inputs into priced order lines using the
//! catalog as the only price authority. Client-side prices are never
//! trusted. All money arithmetic runs on `Decimal` and is rounded to two
//! places at the edges.

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use crate::db::models::{CartLine, Food, OrderItem};
use crate::utils::{AppError, AppResult};

/// Two priced amounts within half a cent are considered equal.
pub const MONEY_TOLERANCE: f64 = 0.005;

/// One requested line: a food id plus a quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemInput {
    #[serde(alias = "_id")]
    pub food_id: String,
    pub unit: i64,
}

/// The result of pricing a cart against the catalog.
#[derive(Debug, Clone)]
pub struct PricedCart {
    /// Order lines with catalog prices and ready times snapshotted.
    pub items: Vec<OrderItem>,
    /// The single vendor every line belongs to.
    pub vendor: Thing,
    /// Pre-discount total, rounded to two places.
    pub original_value: f64,
    /// Mean preparation time across the lines, minutes.
    pub mean_ready_time: f64,
}

impl PricedCart {
    /// Snapshot of the lines in cart form, stored on the transaction.
    pub fn cart_lines(&self) -> Vec<CartLine> {
        self.items
            .iter()
            .map(|item| CartLine {
                food: item.food.clone(),
                unit: item.unit,
            })
            .collect()
    }
}

fn decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

fn to_money(value: Decimal) -> f64 {
    value.round_dp(2).to_f64().unwrap_or(0.0)
}

/// Price the requested items against the resolved catalog entries.
///
/// Every requested id must resolve to a food and every food must belong
/// to the same vendor; anything else is a validation failure, not a
/// silently shrunk cart.
pub fn price_items(inputs: &[ItemInput], foods: &[Food]) -> AppResult<PricedCart> {
    if inputs.is_empty() {
        return Err(AppError::validation("Cart is empty"));
    }

    let mut items = Vec::with_capacity(inputs.len());
    let mut vendor: Option<Thing> = None;
    let mut total = Decimal::ZERO;
    let mut ready_time_sum = Decimal::ZERO;

    for input in inputs {
        if input.unit <= 0 {
            return Err(AppError::validation(format!(
                "Invalid unit {} for food {}",
                input.unit, input.food_id
            )));
        }

        let food = foods
            .iter()
            .find(|f| {
                f.id.as_ref()
                    .is_some_and(|id| id.id.to_string() == input.food_id)
            })
            .ok_or_else(|| {
                AppError::validation(format!("Unknown food id {}", input.food_id))
            })?;
        let food_id = food
            .id
            .clone()
            .ok_or_else(|| AppError::internal("Catalog entry without id"))?;

        match &vendor {
            None => vendor = Some(food.vendor.clone()),
            Some(v) if *v != food.vendor => {
                return Err(AppError::validation(
                    "All items in an order must come from one vendor",
                ));
            }
            Some(_) => {}
        }

        total += decimal(food.price) * Decimal::from(input.unit);
        ready_time_sum += Decimal::from(food.ready_time);

        items.push(OrderItem {
            food: food_id,
            name: food.name.clone(),
            unit: input.unit,
            price: food.price,
            ready_time: food.ready_time,
        });
    }

    let vendor = vendor.ok_or_else(|| AppError::validation("Cart is empty"))?;
    let line_count = Decimal::from(items.len() as i64);
    let mean_ready_time = to_money(ready_time_sum / line_count);

    Ok(PricedCart {
        items,
        vendor,
        original_value: to_money(total),
        mean_ready_time,
    })
}

/// Payable amount after applying a flat discount, clamped at zero.
pub fn apply_discount(original_value: f64, offer_amount: f64) -> f64 {
    let payable = decimal(original_value) - decimal(offer_amount);
    to_money(payable.max(Decimal::ZERO))
}

/// Whether two money amounts agree within [`MONEY_TOLERANCE`].
pub fn amounts_match(a: f64, b: f64) -> bool {
    (a - b).abs() < MONEY_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::now_ms;
    use crate::db::repository::make_thing;

    fn food(id: &str, vendor: &str, price: f64, ready_time: i64) -> Food {
        Food {
            id: Some(make_thing("food", id)),
            vendor: make_thing("vendor", vendor),
            name: format!("food {}", id),
            description: String::new(),
            category: "meal".to_string(),
            food_type: "veg".to_string(),
            price,
            ready_time,
            rating: 0.0,
            images: Vec::new(),
            created_at: now_ms(),
        }
    }

    fn input(id: &str, unit: i64) -> ItemInput {
        ItemInput {
            food_id: id.to_string(),
            unit,
        }
    }

    #[test]
    fn prices_and_averages_ready_time() {
        let foods = vec![food("a", "v1", 7.5, 20), food("b", "v1", 2.5, 30)];
        let priced = price_items(&[input("a", 2), input("b", 2)], &foods).unwrap();

        assert_eq!(priced.original_value, 20.0);
        assert_eq!(priced.mean_ready_time, 25.0);
        assert_eq!(priced.items.len(), 2);
        assert_eq!(priced.vendor, make_thing("vendor", "v1"));
    }

    #[test]
    fn unknown_food_id_is_rejected() {
        let foods = vec![food("a", "v1", 7.5, 20)];
        let err = price_items(&[input("a", 1), input("missing", 1)], &foods).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn mixed_vendor_cart_is_rejected() {
        let foods = vec![food("a", "v1", 7.5, 20), food("b", "v2", 2.5, 30)];
        let err = price_items(&[input("a", 1), input("b", 1)], &foods).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn non_positive_unit_is_rejected() {
        let foods = vec![food("a", "v1", 7.5, 20)];
        assert!(price_items(&[input("a", 0)], &foods).is_err());
        assert!(price_items(&[input("a", -2)], &foods).is_err());
    }

    #[test]
    fn discount_clamps_at_zero() {
        assert_eq!(apply_discount(20.0, 5.0), 15.0);
        assert_eq!(apply_discount(4.0, 5.0), 0.0);
    }

    #[test]
    fn decimal_arithmetic_avoids_float_drift() {
        let foods = vec![food("a", "v1", 0.1, 10), food("b", "v1", 0.2, 10)];
        let priced = price_items(&[input("a", 1), input("b", 1)], &foods).unwrap();
        assert_eq!(priced.original_value, 0.3);
        assert!(amounts_match(priced.original_value, 0.3));
    }
}
