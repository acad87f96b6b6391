//! Payment transaction model

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::serde_thing;
use super::CartLine;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Open,
    Confirmed,
    Failed,
}

impl TransactionStatus {
    /// A pending transaction may still back an order.
    pub fn is_pending(self) -> bool {
        !matches!(self, TransactionStatus::Confirmed | TransactionStatus::Failed)
    }
}

/// A priced payment attempt. Created before the Order; `vendor` and
/// `order` are back-filled once the order exists. Source of truth for how
/// much was actually charged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(
        default,
        with = "serde_thing::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<Thing>,
    #[serde(with = "serde_thing")]
    pub customer: Thing,
    #[serde(default, with = "serde_thing::option")]
    pub vendor: Option<Thing>,
    #[serde(default, with = "serde_thing::option")]
    pub order: Option<Thing>,
    /// Pre-discount sum of the priced items
    pub original_value: f64,
    /// Post-discount payable amount
    pub order_value: f64,
    #[serde(default, with = "serde_thing::option")]
    pub offer_used: Option<Thing>,
    pub status: TransactionStatus,
    pub payment_via: String,
    #[serde(default)]
    pub payment_response: String,
    /// Snapshot of the items the price was computed from
    pub items: Vec<CartLine>,
    #[serde(default)]
    pub created_at: i64,
}
