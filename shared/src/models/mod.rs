//! Outbound models
//!
//! Client-facing representations of the account records. Ids are rendered
//! as `table:key` strings; credential fields are stripped.

mod auth;
mod courier;
mod customer;
mod vendor;

pub use auth::AuthPayload;
pub use courier::CourierProfile;
pub use customer::{CartLineView, CustomerProfile};
pub use vendor::VendorProfile;

/// Geo position attached to every account record.
#[derive(Debug, Clone, Copy, Default, serde::Serialize, serde::Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}
