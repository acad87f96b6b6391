use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// Delivery courier profile as sent to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourierProfile {
    pub id: String,
    pub email: String,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub zipcode: String,
    pub verified: bool,
    pub is_available: bool,
    pub geo: GeoPoint,
    pub orders: Vec<String>,
}
