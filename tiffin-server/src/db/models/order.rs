//! Order model

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::serde_thing;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Accepted,
    Rejected,
    Processing,
    Ready,
}

/// One order line. Price and ready time are fixed at order creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(with = "serde_thing")]
    pub food: Thing,
    pub name: String,
    pub unit: i64,
    pub price: f64,
    pub ready_time: i64,
}

/// An order created from a validated cart + transaction pair.
///
/// `total_amount` always equals the backing transaction's original value;
/// the item list is immutable after creation and all items belong to
/// `ordered_from`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(
        default,
        with = "serde_thing::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<Thing>,
    #[serde(with = "serde_thing")]
    pub ordered_by: Thing,
    #[serde(with = "serde_thing")]
    pub ordered_from: Thing,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    pub paid_amount: f64,
    pub payment_via: String,
    pub order_status: OrderStatus,
    #[serde(default)]
    pub remarks: String,
    #[serde(default, with = "serde_thing::option")]
    pub delivery: Option<Thing>,
    pub applied_offer: bool,
    #[serde(default, with = "serde_thing::option")]
    pub offer: Option<Thing>,
    /// Mean preparation time of the items, minutes
    pub ready_time: f64,
    pub order_date: i64,
}
