//! Public shopping API module
//!
//! No credentials required; everything is keyed by zip code.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/shopping", shopping_routes())
}

fn shopping_routes() -> Router<ServerState> {
    Router::new()
        .route("/top-restaurants/{zipcode}", get(handler::top_restaurants))
        .route("/foods-in-30-min/{zipcode}", get(handler::foods_in_30_min))
        .route("/search/{zipcode}", get(handler::search_foods))
        .route("/offers/{zipcode}", get(handler::offers_by_zip))
        .route("/restaurant/{id}", get(handler::restaurant))
        .route("/{zipcode}", get(handler::food_availability))
}
