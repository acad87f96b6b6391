use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// Customer profile as sent to clients. No password, no OTP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub id: String,
    pub email: String,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub verified: bool,
    pub geo: GeoPoint,
    pub cart: Vec<CartLineView>,
    pub orders: Vec<String>,
}

/// One cart line: a food reference and a unit count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineView {
    pub food: String,
    pub unit: i64,
}
