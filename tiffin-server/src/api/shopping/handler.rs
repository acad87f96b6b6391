//! Public shopping handlers
//!
//! Browsing only: serviceable vendors in a zip code, best rated first,
//! plus their catalogs and the offers advertised in the area.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use shared::Envelope;
use shared::models::VendorProfile;

use crate::core::ServerState;
use crate::db::models::{Food, Offer};
use crate::db::repository::{FoodRepository, OfferRepository, VendorRepository};
use crate::utils::{AppError, AppResult};

const TOP_RESTAURANT_LIMIT: usize = 10;
const QUICK_FOOD_MINUTES: i64 = 30;

/// GET /shopping/:zipcode - serviceable vendors, rating-sorted
pub async fn food_availability(
    State(state): State<ServerState>,
    Path(zipcode): Path<String>,
) -> AppResult<Json<Envelope<Vec<VendorProfile>>>> {
    let repo = VendorRepository::new(state.db.clone());
    let vendors = repo.find_by_zip(&zipcode, None).await?;
    let profiles = vendors.iter().map(VendorProfile::from).collect();
    Ok(Json(Envelope::ok(profiles)))
}

/// GET /shopping/top-restaurants/:zipcode
pub async fn top_restaurants(
    State(state): State<ServerState>,
    Path(zipcode): Path<String>,
) -> AppResult<Json<Envelope<Vec<VendorProfile>>>> {
    let repo = VendorRepository::new(state.db.clone());
    let vendors = repo.find_by_zip(&zipcode, Some(TOP_RESTAURANT_LIMIT)).await?;
    let profiles = vendors.iter().map(VendorProfile::from).collect();
    Ok(Json(Envelope::ok(profiles)))
}

/// GET /shopping/foods-in-30-min/:zipcode - quick-preparation foods
pub async fn foods_in_30_min(
    State(state): State<ServerState>,
    Path(zipcode): Path<String>,
) -> AppResult<Json<Envelope<Vec<Food>>>> {
    let foods = foods_in_zip(&state, &zipcode).await?;
    let quick = foods
        .into_iter()
        .filter(|f| f.ready_time <= QUICK_FOOD_MINUTES)
        .collect();
    Ok(Json(Envelope::ok(quick)))
}

/// GET /shopping/search/:zipcode - every food sold in the area
pub async fn search_foods(
    State(state): State<ServerState>,
    Path(zipcode): Path<String>,
) -> AppResult<Json<Envelope<Vec<Food>>>> {
    let foods = foods_in_zip(&state, &zipcode).await?;
    Ok(Json(Envelope::ok(foods)))
}

/// GET /shopping/offers/:zipcode - active offers advertised in the area
pub async fn offers_by_zip(
    State(state): State<ServerState>,
    Path(zipcode): Path<String>,
) -> AppResult<Json<Envelope<Vec<Offer>>>> {
    let repo = OfferRepository::new(state.db.clone());
    let offers = repo.find_by_zip(&zipcode).await?;
    Ok(Json(Envelope::ok(offers)))
}

/// A vendor page: the profile plus its catalog.
#[derive(Debug, Serialize)]
pub struct RestaurantView {
    #[serde(flatten)]
    pub vendor: VendorProfile,
    pub menu: Vec<Food>,
}

/// GET /shopping/restaurant/:id
pub async fn restaurant(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Envelope<RestaurantView>>> {
    let vendors = VendorRepository::new(state.db.clone());
    let foods = FoodRepository::new(state.db.clone());

    let vendor = vendors
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Restaurant {} not found", id)))?;
    let menu = foods.find_by_vendor(&id).await?;

    Ok(Json(Envelope::ok(RestaurantView {
        vendor: VendorProfile::from(&vendor),
        menu,
    })))
}

async fn foods_in_zip(state: &ServerState, zipcode: &str) -> AppResult<Vec<Food>> {
    let vendors = VendorRepository::new(state.db.clone());
    let foods = FoodRepository::new(state.db.clone());

    let mut result = Vec::new();
    for vendor in vendors.find_by_zip(zipcode, None).await? {
        if let Some(id) = &vendor.id {
            result.extend(foods.find_by_vendor(&id.id.to_string()).await?);
        }
    }
    Ok(result)
}
