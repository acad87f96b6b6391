//! Customer API handlers
//!
//! Signup issues a token immediately and hands the OTP to the configured
//! sender; `/verify` upgrades the account (and the token) once the code
//! comes back. Cart and checkout routes require a bearer token.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shared::Envelope;
use shared::models::{AuthPayload, CartLineView, CustomerProfile};
use tracing::warn;

use crate::api::convert::{cart_view, thing_to_string};
use crate::auth::{CurrentUser, generate_otp, hash_password, verify_password};
use crate::checkout::{self, OrderRequest, PaymentRequest};
use crate::core::ServerState;
use crate::db::models::{Offer, Order, Transaction, now_ms};
use crate::db::repository::customer::new_customer;
use crate::db::repository::{
    CustomerRepository, OfferRepository, OrderRepository, make_thing, strip_table_prefix,
};
use crate::utils::{AppError, AppResult, validate_payload};

fn customer_key(user: &CurrentUser) -> &str {
    strip_table_prefix("customer", &user.id)
}

#[derive(Debug, Deserialize, validator::Validate)]
pub struct SignupRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[validate(length(min = 5))]
    pub phone: String,
}

/// POST /customer/signup
pub async fn signup(
    State(state): State<ServerState>,
    Json(payload): Json<SignupRequest>,
) -> AppResult<Json<Envelope<AuthPayload>>> {
    validate_payload(&payload)?;

    let repo = CustomerRepository::new(state.db.clone());
    let otp = generate_otp();
    let password_hash = hash_password(&payload.password)?;
    let customer = repo
        .create(new_customer(
            payload.email,
            password_hash,
            payload.phone,
            otp.code,
            otp.expiry_ms,
        ))
        .await?;

    // OTP delivery is best-effort; the customer can re-request
    if let Err(err) = state.otp_sender.send(otp.code, &customer.phone).await {
        warn!(error = %err, "failed to send signup OTP");
    }

    let signature =
        state
            .jwt_service
            .generate_token(&thing_to_string(&customer.id), &customer.email, false)?;
    Ok(Json(Envelope::ok(AuthPayload {
        signature,
        verified: false,
        email: customer.email,
    })))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /customer/login
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<Envelope<AuthPayload>>> {
    let repo = CustomerRepository::new(state.db.clone());
    let customer = repo
        .find_by_email(&payload.email)
        .await?
        .filter(|c| verify_password(&payload.password, &c.password))
        .ok_or(AppError::Unauthorized)?;

    let signature = state.jwt_service.generate_token(
        &thing_to_string(&customer.id),
        &customer.email,
        customer.verified,
    )?;
    Ok(Json(Envelope::ok(AuthPayload {
        signature,
        verified: customer.verified,
        email: customer.email,
    })))
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub otp: i64,
}

/// PATCH /customer/verify - confirm the OTP and upgrade the token
pub async fn verify(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<VerifyRequest>,
) -> AppResult<Json<Envelope<AuthPayload>>> {
    let repo = CustomerRepository::new(state.db.clone());
    let customer = repo
        .find_by_id(customer_key(&user))
        .await?
        .ok_or_else(|| AppError::not_found("Customer account not found"))?;

    if customer.otp != payload.otp || customer.otp_expiry < now_ms() {
        return Err(AppError::validation("OTP is invalid or has expired"));
    }

    let customer = repo.set_verified(customer_key(&user)).await?;
    let signature =
        state
            .jwt_service
            .generate_token(&thing_to_string(&customer.id), &customer.email, true)?;
    Ok(Json(Envelope::ok(AuthPayload {
        signature,
        verified: true,
        email: customer.email,
    })))
}

/// GET /customer/otp - issue a fresh OTP
pub async fn request_otp(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Envelope<String>>> {
    let repo = CustomerRepository::new(state.db.clone());
    let otp = generate_otp();
    let customer = repo
        .set_otp(customer_key(&user), otp.code, otp.expiry_ms)
        .await?;

    state.otp_sender.send(otp.code, &customer.phone).await?;
    Ok(Json(Envelope::ok(
        "OTP sent to your registered phone number".to_string(),
    )))
}

/// GET /customer/profile
pub async fn profile(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Envelope<CustomerProfile>>> {
    let repo = CustomerRepository::new(state.db.clone());
    let customer = repo
        .find_by_id(customer_key(&user))
        .await?
        .ok_or_else(|| AppError::not_found("Customer account not found"))?;
    Ok(Json(Envelope::ok(CustomerProfile::from(&customer))))
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

/// PATCH /customer/profile
pub async fn update_profile(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<Envelope<CustomerProfile>>> {
    validate_payload(&payload)?;
    let repo = CustomerRepository::new(state.db.clone());
    let customer = repo
        .update_profile(
            customer_key(&user),
            payload.first_name,
            payload.last_name,
            payload.address,
        )
        .await?;
    Ok(Json(Envelope::ok(CustomerProfile::from(&customer))))
}

#[derive(Debug, Deserialize)]
pub struct CartRequest {
    #[serde(alias = "_id")]
    pub id: String,
    pub unit: i64,
}

/// POST /customer/cart - merge one line into the cart
pub async fn add_to_cart(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CartRequest>,
) -> AppResult<Json<Envelope<Vec<CartLineView>>>> {
    let repo = CustomerRepository::new(state.db.clone());
    let food = make_thing("food", strip_table_prefix("food", &payload.id));
    let cart = repo
        .set_cart_line(customer_key(&user), food, payload.unit)
        .await?;
    Ok(Json(Envelope::ok(cart_view(&cart))))
}

/// GET /customer/cart
pub async fn get_cart(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Envelope<Vec<CartLineView>>>> {
    let repo = CustomerRepository::new(state.db.clone());
    let customer = repo
        .find_by_id(customer_key(&user))
        .await?
        .ok_or_else(|| AppError::not_found("Customer account not found"))?;
    Ok(Json(Envelope::ok(cart_view(&customer.cart))))
}

/// DELETE /customer/cart
pub async fn clear_cart(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Envelope<Vec<CartLineView>>>> {
    let repo = CustomerRepository::new(state.db.clone());
    repo.clear_cart(customer_key(&user)).await?;
    Ok(Json(Envelope::ok(Vec::new())))
}

/// GET /customer/offers/verify/:id - check an offer before paying
pub async fn verify_offer(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Envelope<Offer>>> {
    let repo = OfferRepository::new(state.db.clone());
    let offer = repo
        .verify(strip_table_prefix("offer", &id))
        .await?
        .ok_or_else(|| AppError::not_found("Offer is not available"))?;
    Ok(Json(Envelope::ok(offer)))
}

/// POST /customer/create-payment
pub async fn create_payment(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<PaymentRequest>,
) -> AppResult<Json<Envelope<Transaction>>> {
    validate_payload(&payload)?;
    let transaction = checkout::create_payment(&state.db, customer_key(&user), payload).await?;
    Ok(Json(Envelope::ok(transaction)))
}

/// POST /customer/create-order
pub async fn create_order(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<OrderRequest>,
) -> AppResult<Json<Envelope<Order>>> {
    validate_payload(&payload)?;
    let order = checkout::create_order(&state.db, customer_key(&user), payload).await?;
    Ok(Json(Envelope::ok(order)))
}

/// GET /customer/orders
pub async fn list_orders(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Envelope<Vec<Order>>>> {
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_by_customer(customer_key(&user)).await?;
    Ok(Json(Envelope::ok(orders)))
}

/// GET /customer/orders/:id
pub async fn get_order(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Envelope<Order>>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&id)
        .await?
        .filter(|o| o.ordered_by.id.to_string() == customer_key(&user))
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    Ok(Json(Envelope::ok(order)))
}
