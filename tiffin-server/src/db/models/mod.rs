//! Database models
//!
//! Serde structs persisted in the embedded document store. Record links
//! are `Thing`s serialized through [`serde_thing`]; timestamps are epoch
//! milliseconds.

pub mod serde_thing;

mod courier;
mod customer;
mod food;
mod offer;
mod order;
mod transaction;
mod vendor;

pub use courier::Courier;
pub use customer::{CartLine, Customer};
pub use food::{Food, FoodCreate};
pub use offer::{Offer, OfferType, OfferUpsert};
pub use order::{Order, OrderItem, OrderStatus};
pub use transaction::{Transaction, TransactionStatus};
pub use vendor::{Vendor, VendorCreate};

pub use shared::models::GeoPoint;

/// Current timestamp in epoch milliseconds.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
