//! Courier assignment for freshly created orders
//!
//! Picks the first verified, available courier registered in the vendor's
//! zip code. No distance ranking, no retry: an order that finds no courier
//! stays unassigned and the outcome is logged. Runs as a spawned task so
//! order creation never waits on it.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tracing::{error, info, warn};

use crate::db::models::Order;
use crate::db::repository::{CourierRepository, VendorRepository};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentOutcome {
    Assigned { courier: String },
    NoCourierAvailable,
}

/// Assign a courier to the order, if one is eligible.
pub async fn assign(db: &Surreal<Db>, order: &Order) -> AppResult<AssignmentOutcome> {
    let vendors = VendorRepository::new(db.clone());
    let couriers = CourierRepository::new(db.clone());

    let order_id = order
        .id
        .as_ref()
        .ok_or_else(|| AppError::internal("Order without id"))?;
    let vendor_id = order.ordered_from.id.to_string();
    let vendor = vendors
        .find_by_id(&vendor_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Vendor {} not found", vendor_id)))?;

    let eligible = couriers.find_eligible(&vendor.zipcode).await?;
    let Some(courier) = eligible.into_iter().next() else {
        return Ok(AssignmentOutcome::NoCourierAvailable);
    };
    let courier_id = courier
        .id
        .as_ref()
        .map(|id| id.id.to_string())
        .ok_or_else(|| AppError::internal("Courier without id"))?;

    let order_key = order_id.id.to_string();
    // Record links are stored as "table:key" strings
    db.query(
        "BEGIN TRANSACTION; \
         UPDATE type::thing('order', $order_key) SET delivery = $courier_link; \
         UPDATE type::thing('delivery_user', $courier_key) SET orders += $order_link; \
         COMMIT TRANSACTION;",
    )
    .bind(("order_key", order_key))
    .bind(("courier_link", format!("delivery_user:{}", courier_id)))
    .bind(("courier_key", courier_id.clone()))
    .bind(("order_link", order_id.to_string()))
    .await?
    .check()
    .map_err(|err| AppError::database(err.to_string()))?;

    Ok(AssignmentOutcome::Assigned {
        courier: courier_id,
    })
}

/// Fire-and-forget assignment. The outcome is observable in the logs but
/// never fails the request that created the order.
pub fn spawn_assignment(db: Surreal<Db>, order: Order) {
    tokio::spawn(async move {
        let order_label = order
            .id
            .as_ref()
            .map(|id| id.id.to_string())
            .unwrap_or_default();
        match assign(&db, &order).await {
            Ok(AssignmentOutcome::Assigned { courier }) => {
                info!(order = %order_label, courier = %courier, "delivery assigned");
            }
            Ok(AssignmentOutcome::NoCourierAvailable) => {
                warn!(order = %order_label, "no courier available for delivery");
            }
            Err(err) => {
                error!(order = %order_label, error = %err, "delivery assignment failed");
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_memory;
    use crate::db::models::{
        Courier, GeoPoint, Order, OrderStatus, Vendor, now_ms,
    };
    use crate::db::repository::{OrderRepository, make_thing};

    async fn seed_vendor(db: &Surreal<Db>, zipcode: &str) -> String {
        let vendor = Vendor {
            id: None,
            name: "kitchen".to_string(),
            owner_name: "owner".to_string(),
            email: format!("kitchen-{}@test.local", zipcode),
            password: "hash".to_string(),
            phone: "123".to_string(),
            address: "1 Main St".to_string(),
            zipcode: zipcode.to_string(),
            food_type: vec!["veg".to_string()],
            rating: 0.0,
            service_available: true,
            cover_images: Vec::new(),
            foods: Vec::new(),
            geo: GeoPoint::default(),
            created_at: now_ms(),
        };
        let created: Option<Vendor> = db.create("vendor").content(vendor).await.unwrap();
        created.unwrap().id.unwrap().id.to_string()
    }

    async fn seed_courier(db: &Surreal<Db>, zipcode: &str, verified: bool, available: bool) {
        let courier = Courier {
            id: None,
            email: format!("courier-{}-{}-{}@test.local", zipcode, verified, available),
            password: "hash".to_string(),
            phone: "456".to_string(),
            first_name: "pat".to_string(),
            last_name: "rider".to_string(),
            address: "2 Side St".to_string(),
            zipcode: zipcode.to_string(),
            verified,
            is_available: available,
            geo: GeoPoint::default(),
            orders: Vec::new(),
            created_at: now_ms(),
        };
        let _: Option<Courier> = db.create("delivery_user").content(courier).await.unwrap();
    }

    async fn seed_order(db: &Surreal<Db>, vendor_id: &str) -> Order {
        let order = Order {
            id: None,
            ordered_by: make_thing("customer", "c1"),
            ordered_from: make_thing("vendor", vendor_id),
            items: Vec::new(),
            total_amount: 10.0,
            paid_amount: 10.0,
            payment_via: "COD".to_string(),
            order_status: OrderStatus::Pending,
            remarks: String::new(),
            delivery: None,
            applied_offer: false,
            offer: None,
            ready_time: 20.0,
            order_date: now_ms(),
        };
        let created: Option<Order> = db.create("order").content(order).await.unwrap();
        created.unwrap()
    }

    #[tokio::test]
    async fn assigns_first_eligible_courier() {
        let db = connect_memory().await.unwrap();
        let vendor = seed_vendor(&db, "560001").await;
        seed_courier(&db, "560001", true, true).await;
        let order = seed_order(&db, &vendor).await;

        let outcome = assign(&db, &order).await.unwrap();
        assert!(matches!(outcome, AssignmentOutcome::Assigned { .. }));

        let stored = OrderRepository::new(db.clone())
            .find_by_id(&order.id.unwrap().id.to_string())
            .await
            .unwrap()
            .unwrap();
        assert!(stored.delivery.is_some());
    }

    #[tokio::test]
    async fn no_courier_leaves_order_unassigned() {
        let db = connect_memory().await.unwrap();
        let vendor = seed_vendor(&db, "560002").await;
        // Wrong zip, unverified, and unavailable couriers are all skipped
        seed_courier(&db, "999999", true, true).await;
        seed_courier(&db, "560002", false, true).await;
        seed_courier(&db, "560002", true, false).await;
        let order = seed_order(&db, &vendor).await;

        let outcome = assign(&db, &order).await.unwrap();
        assert_eq!(outcome, AssignmentOutcome::NoCourierAvailable);

        let stored = OrderRepository::new(db.clone())
            .find_by_id(&order.id.unwrap().id.to_string())
            .await
            .unwrap()
            .unwrap();
        assert!(stored.delivery.is_none());
    }
}
