//! Customer API module

mod handler;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/customer", customer_routes())
}

fn customer_routes() -> Router<ServerState> {
    Router::new()
        .route("/signup", post(handler::signup))
        .route("/login", post(handler::login))
        .route("/verify", patch(handler::verify))
        .route("/otp", get(handler::request_otp))
        .route("/profile", get(handler::profile).patch(handler::update_profile))
        .route(
            "/cart",
            post(handler::add_to_cart)
                .get(handler::get_cart)
                .delete(handler::clear_cart),
        )
        .route("/offers/verify/{id}", get(handler::verify_offer))
        .route("/create-payment", post(handler::create_payment))
        .route("/create-order", post(handler::create_order))
        .route("/orders", get(handler::list_orders))
        .route("/orders/{id}", get(handler::get_order))
}
