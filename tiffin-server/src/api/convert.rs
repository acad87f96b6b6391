//! Outbound conversions
//!
//! Database records carry credentials and record links; the API surface
//! sends the `shared` profile types instead. Record links are rendered as
//! `table:key` strings.

use shared::models::{CartLineView, CourierProfile, CustomerProfile, VendorProfile};
use surrealdb::sql::Thing;

use crate::db::models::{CartLine, Courier, Customer, Vendor};

pub fn thing_to_string(thing: &Option<Thing>) -> String {
    thing.as_ref().map(Thing::to_string).unwrap_or_default()
}

fn links_to_strings(links: &[Thing]) -> Vec<String> {
    links.iter().map(Thing::to_string).collect()
}

pub fn cart_view(cart: &[CartLine]) -> Vec<CartLineView> {
    cart.iter()
        .map(|line| CartLineView {
            food: line.food.to_string(),
            unit: line.unit,
        })
        .collect()
}

impl From<&Customer> for CustomerProfile {
    fn from(customer: &Customer) -> Self {
        Self {
            id: thing_to_string(&customer.id),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            address: customer.address.clone(),
            verified: customer.verified,
            geo: customer.geo,
            cart: cart_view(&customer.cart),
            orders: links_to_strings(&customer.orders),
        }
    }
}

impl From<&Vendor> for VendorProfile {
    fn from(vendor: &Vendor) -> Self {
        Self {
            id: thing_to_string(&vendor.id),
            name: vendor.name.clone(),
            owner_name: vendor.owner_name.clone(),
            email: vendor.email.clone(),
            phone: vendor.phone.clone(),
            address: vendor.address.clone(),
            zipcode: vendor.zipcode.clone(),
            food_type: vendor.food_type.clone(),
            rating: vendor.rating,
            service_available: vendor.service_available,
            cover_images: vendor.cover_images.clone(),
            foods: links_to_strings(&vendor.foods),
            geo: vendor.geo,
        }
    }
}

impl From<&Courier> for CourierProfile {
    fn from(courier: &Courier) -> Self {
        Self {
            id: thing_to_string(&courier.id),
            email: courier.email.clone(),
            phone: courier.phone.clone(),
            first_name: courier.first_name.clone(),
            last_name: courier.last_name.clone(),
            address: courier.address.clone(),
            zipcode: courier.zipcode.clone(),
            verified: courier.verified,
            is_available: courier.is_available,
            geo: courier.geo,
            orders: links_to_strings(&courier.orders),
        }
    }
}
