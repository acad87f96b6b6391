//! Admin API handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shared::Envelope;
use shared::models::{CourierProfile, VendorProfile};

use crate::auth::hash_password;
use crate::core::ServerState;
use crate::db::models::{Transaction, VendorCreate};
use crate::db::repository::{CourierRepository, TransactionRepository, VendorRepository};
use crate::utils::{AppError, AppResult, validate_payload};

/// POST /admin/vendor - onboard a vendor
pub async fn create_vendor(
    State(state): State<ServerState>,
    Json(payload): Json<VendorCreate>,
) -> AppResult<Json<Envelope<VendorProfile>>> {
    validate_payload(&payload)?;

    let password_hash = hash_password(&payload.password)?;
    let repo = VendorRepository::new(state.db.clone());
    let vendor = repo.create(payload, password_hash).await?;

    Ok(Json(Envelope::ok(VendorProfile::from(&vendor))))
}

/// GET /admin/vendors
pub async fn list_vendors(
    State(state): State<ServerState>,
) -> AppResult<Json<Envelope<Vec<VendorProfile>>>> {
    let repo = VendorRepository::new(state.db.clone());
    let vendors = repo.find_all().await?;
    let profiles = vendors.iter().map(VendorProfile::from).collect();
    Ok(Json(Envelope::ok(profiles)))
}

/// GET /admin/vendor/:id
pub async fn get_vendor(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Envelope<VendorProfile>>> {
    let repo = VendorRepository::new(state.db.clone());
    let vendor = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Vendor {} not found", id)))?;
    Ok(Json(Envelope::ok(VendorProfile::from(&vendor))))
}

/// GET /admin/transactions
pub async fn list_transactions(
    State(state): State<ServerState>,
) -> AppResult<Json<Envelope<Vec<Transaction>>>> {
    let repo = TransactionRepository::new(state.db.clone());
    let transactions = repo.find_all().await?;
    Ok(Json(Envelope::ok(transactions)))
}

/// GET /admin/transaction/:id
pub async fn get_transaction(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Envelope<Transaction>>> {
    let repo = TransactionRepository::new(state.db.clone());
    let transaction = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Transaction {} not found", id)))?;
    Ok(Json(Envelope::ok(transaction)))
}

#[derive(Debug, Deserialize)]
pub struct VerifyCourierRequest {
    #[serde(alias = "_id")]
    pub id: String,
    pub status: bool,
}

/// PUT /admin/delivery/verify - flip a courier's verification flag
pub async fn verify_courier(
    State(state): State<ServerState>,
    Json(payload): Json<VerifyCourierRequest>,
) -> AppResult<Json<Envelope<CourierProfile>>> {
    let repo = CourierRepository::new(state.db.clone());
    let courier = repo.set_verified(&payload.id, payload.status).await?;
    Ok(Json(Envelope::ok(CourierProfile::from(&courier))))
}

/// GET /admin/delivery/users
pub async fn list_couriers(
    State(state): State<ServerState>,
) -> AppResult<Json<Envelope<Vec<CourierProfile>>>> {
    let repo = CourierRepository::new(state.db.clone());
    let couriers = repo.find_all().await?;
    let profiles = couriers.iter().map(CourierProfile::from).collect();
    Ok(Json(Envelope::ok(profiles)))
}
