//! Delivery courier handlers
//!
//! Couriers sign up unverified and unavailable; an admin verifies them and
//! they flip their own availability when on shift. Only verified,
//! available couriers are considered for assignment.

use axum::{
    Json,
    extract::State,
};
use serde::Deserialize;
use shared::Envelope;
use shared::models::{AuthPayload, CourierProfile};

use crate::api::convert::thing_to_string;
use crate::auth::{CurrentUser, hash_password, verify_password};
use crate::core::ServerState;
use crate::db::models::{Courier, GeoPoint, now_ms};
use crate::db::repository::{CourierRepository, strip_table_prefix};
use crate::utils::{AppError, AppResult, validate_payload};

fn courier_key(user: &CurrentUser) -> &str {
    strip_table_prefix("delivery_user", &user.id)
}

#[derive(Debug, Deserialize, validator::Validate)]
pub struct SignupRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[validate(length(min = 5))]
    pub phone: String,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(length(min = 1))]
    pub zipcode: String,
}

/// POST /delivery/signup
pub async fn signup(
    State(state): State<ServerState>,
    Json(payload): Json<SignupRequest>,
) -> AppResult<Json<Envelope<AuthPayload>>> {
    validate_payload(&payload)?;

    let repo = CourierRepository::new(state.db.clone());
    let password_hash = hash_password(&payload.password)?;
    let courier = repo
        .create(Courier {
            id: None,
            email: payload.email,
            password: password_hash,
            phone: payload.phone,
            first_name: payload.first_name,
            last_name: payload.last_name,
            address: payload.address,
            zipcode: payload.zipcode,
            verified: false,
            is_available: false,
            geo: GeoPoint::default(),
            orders: Vec::new(),
            created_at: now_ms(),
        })
        .await?;

    let signature =
        state
            .jwt_service
            .generate_token(&thing_to_string(&courier.id), &courier.email, false)?;
    Ok(Json(Envelope::ok(AuthPayload {
        signature,
        verified: false,
        email: courier.email,
    })))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /delivery/login
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<Envelope<AuthPayload>>> {
    let repo = CourierRepository::new(state.db.clone());
    let courier = repo
        .find_by_email(&payload.email)
        .await?
        .filter(|c| verify_password(&payload.password, &c.password))
        .ok_or(AppError::Unauthorized)?;

    let signature = state.jwt_service.generate_token(
        &thing_to_string(&courier.id),
        &courier.email,
        courier.verified,
    )?;
    Ok(Json(Envelope::ok(AuthPayload {
        signature,
        verified: courier.verified,
        email: courier.email,
    })))
}

/// GET /delivery/profile
pub async fn profile(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Envelope<CourierProfile>>> {
    let repo = CourierRepository::new(state.db.clone());
    let courier = repo
        .find_by_id(courier_key(&user))
        .await?
        .ok_or_else(|| AppError::not_found("Delivery account not found"))?;
    Ok(Json(Envelope::ok(CourierProfile::from(&courier))))
}

#[derive(Debug, Deserialize, validator::Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(length(min = 1))]
    pub address: String,
}

/// PATCH /delivery/profile
pub async fn update_profile(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<Envelope<CourierProfile>>> {
    validate_payload(&payload)?;
    let repo = CourierRepository::new(state.db.clone());
    let courier = repo
        .update_profile(
            courier_key(&user),
            payload.first_name,
            payload.last_name,
            payload.address,
        )
        .await?;
    Ok(Json(Envelope::ok(CourierProfile::from(&courier))))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub is_available: bool,
}

/// PUT /delivery/update-status - shift availability toggle
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<Envelope<CourierProfile>>> {
    let repo = CourierRepository::new(state.db.clone());
    let courier = repo
        .set_available(courier_key(&user), payload.is_available)
        .await?;
    Ok(Json(Envelope::ok(CourierProfile::from(&courier))))
}

/// PUT /delivery/update-geo
pub async fn update_geo(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<GeoPoint>,
) -> AppResult<Json<Envelope<CourierProfile>>> {
    let repo = CourierRepository::new(state.db.clone());
    let courier = repo.set_geo(courier_key(&user), payload).await?;
    Ok(Json(Envelope::ok(CourierProfile::from(&courier))))
}
