//! Admin API module

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/admin", admin_routes())
}

fn admin_routes() -> Router<ServerState> {
    Router::new()
        .route("/vendor", axum::routing::post(handler::create_vendor))
        .route("/vendors", get(handler::list_vendors))
        .route("/vendor/{id}", get(handler::get_vendor))
        .route("/transactions", get(handler::list_transactions))
        .route("/transaction/{id}", get(handler::get_transaction))
        .route("/delivery/verify", put(handler::verify_courier))
        .route("/delivery/users", get(handler::list_couriers))
}
