//! Promotional offer model

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::serde_thing;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferType {
    /// Scoped to the vendors listed on the offer
    Vendor,
    /// Applies to any vendor
    Generic,
}

/// A promotional offer with a bounded redemption counter.
///
/// Invariant: `is_active` is false whenever `max_use` has reached zero
/// through redemption, and `max_use` never goes below zero. Both are
/// maintained by a single conditional update in the repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    #[serde(
        default,
        with = "serde_thing::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<Thing>,
    pub offer_type: OfferType,
    #[serde(default, with = "serde_thing::vec")]
    pub vendors: Vec<Thing>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub promo_code: String,
    pub promo_type: String,
    /// Minimum order value for the offer to apply (stored, not enforced)
    pub min_value: f64,
    /// Maximum order value for the offer to apply (stored, not enforced)
    pub max_value: f64,
    /// Flat discount amount
    pub offer_amount: f64,
    pub valid_from: Option<i64>,
    pub valid_until: Option<i64>,
    #[serde(default)]
    pub zip_code: String,
    pub is_active: bool,
    /// Remaining redemptions
    pub max_use: i64,
    #[serde(default)]
    pub created_at: i64,
}

/// Create/edit payload for vendor-managed offers.
#[derive(Debug, Clone, Deserialize, validator::Validate)]
pub struct OfferUpsert {
    pub offer_type: OfferType,
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub promo_code: String,
    #[validate(length(min = 1))]
    pub promo_type: String,
    #[validate(range(min = 0.0))]
    pub min_value: f64,
    #[validate(range(min = 0.0))]
    pub max_value: f64,
    #[validate(range(min = 0.0))]
    pub offer_amount: f64,
    pub valid_from: Option<i64>,
    pub valid_until: Option<i64>,
    pub zip_code: Option<String>,
    pub is_active: bool,
    #[validate(range(min = 0))]
    pub max_use: i64,
}
