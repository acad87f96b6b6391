//! API route modules
//!
//! One module per actor, each exposing `router()`:
//!
//! - [`admin`] - vendor onboarding, transaction ledger, courier verification
//! - [`vendor`] - vendor portal: catalog, offers, order processing
//! - [`customer`] - accounts, cart, checkout
//! - [`shopping`] - public browsing by zip code
//! - [`delivery`] - courier accounts and availability

pub mod convert;

pub mod admin;
pub mod customer;
pub mod delivery;
pub mod shopping;
pub mod vendor;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Build the full application router.
pub fn create_router(state: ServerState) -> Router {
    Router::<ServerState>::new()
        .merge(admin::router())
        .merge(vendor::router())
        .merge(customer::router())
        .merge(shopping::router())
        .merge(delivery::router())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
