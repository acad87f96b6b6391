//! Delivery courier account model

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::{GeoPoint, serde_thing};

/// A delivery user eligible for order assignment by zip and availability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Courier {
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
    pub zipcode: String,
    pub verified: bool,
    pub is_available: bool,
    #[serde(default)]
    pub geo: GeoPoint,
    #[serde(default, with = "serde_thing::vec")]
    pub orders: Vec<Thing>,
    #[serde(default)]
    pub created_at: i64,
}
