//! Customer account model

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::{GeoPoint, serde_thing};

/// One cart line owned by exactly one customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(with = "serde_thing")]
    pub food: Thing,
    pub unit: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    #[serde(
        default,
        with = "serde_thing::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<Thing>,
    pub email: String,
    pub password: String,
    pub phone: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub address: String,
    pub verified: bool,
    pub otp: i64,
    pub otp_expiry: i64,
    #[serde(default)]
    pub geo: GeoPoint,
    #[serde(default)]
    pub cart: Vec<CartLine>,
    /// Revision counter for compare-and-swap cart updates
    #[serde(default)]
    pub cart_revision: i64,
    #[serde(default, with = "serde_thing::vec")]
    pub orders: Vec<Thing>,
    #[serde(default)]
    pub created_at: i64,
}
