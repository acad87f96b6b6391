//! Food catalog model

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::serde_thing;

/// A food item offered by one vendor. The price stored here is what the
/// customer browses; at transaction time it is captured into the order
/// snapshot and never re-read for that order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    #[serde(
        default,
        with = "serde_thing::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<Thing>,
    #[serde(with = "serde_thing")]
    pub vendor: Thing,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub food_type: String,
    pub price: f64,
    /// Preparation time in minutes
    pub ready_time: i64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub created_at: i64,
}

#[derive(Debug, Clone, Deserialize, validator::Validate)]
pub struct FoodCreate {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub category: String,
    #[validate(length(min = 1))]
    pub food_type: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(range(min = 0))]
    pub ready_time: i64,
}
