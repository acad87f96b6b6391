use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// Vendor profile as sent to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorProfile {
    pub id: String,
    pub name: String,
    pub owner_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub zipcode: String,
    pub food_type: Vec<String>,
    pub rating: f64,
    pub service_available: bool,
    pub cover_images: Vec<String>,
    pub foods: Vec<String>,
    pub geo: GeoPoint,
}
