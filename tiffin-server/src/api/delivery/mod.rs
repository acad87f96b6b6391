//! Delivery courier API module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/delivery", delivery_routes())
}

fn delivery_routes() -> Router<ServerState> {
    Router::new()
        .route("/signup", post(handler::signup))
        .route("/login", post(handler::login))
        .route("/profile", get(handler::profile).patch(handler::update_profile))
        .route("/update-status", put(handler::update_status))
        .route("/update-geo", put(handler::update_geo))
}
