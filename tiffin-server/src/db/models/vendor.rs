//! Vendor account model

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::{GeoPoint, serde_thing};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vendor {
    #[serde(
        default,
        with = "serde_thing::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<Thing>,
    pub name: String,
    pub owner_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub address: String,
    pub zipcode: String,
    #[serde(default)]
    pub food_type: Vec<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub service_available: bool,
    #[serde(default)]
    pub cover_images: Vec<String>,
    #[serde(default, with = "serde_thing::vec")]
    pub foods: Vec<Thing>,
    #[serde(default)]
    pub geo: GeoPoint,
    #[serde(default)]
    pub created_at: i64,
}

#[derive(Debug, Clone, Deserialize, validator::Validate)]
pub struct VendorCreate {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub owner_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[validate(length(min = 5))]
    pub phone: String,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(length(min = 1))]
    pub zipcode: String,
    #[serde(default)]
    pub food_type: Vec<String>,
}
