//! Order status state machine
//!
//! PENDING → ACCEPTED | REJECTED, ACCEPTED → PROCESSING,
//! PROCESSING → READY. REJECTED and READY are terminal. The table is
//! enforced: an out-of-order transition is a validation failure, and only
//! the vendor that owns the order may drive it.

use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tracing::info;

use crate::db::models::{Order, OrderStatus};
use crate::db::repository::OrderRepository;
use crate::utils::{AppError, AppResult};

/// Whether `from → to` is a legal vendor transition.
pub fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::*;
    matches!(
        (from, to),
        (Pending, Accepted) | (Pending, Rejected) | (Accepted, Processing) | (Processing, Ready)
    )
}

#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    pub status: OrderStatus,
    #[serde(default)]
    pub remarks: Option<String>,
    /// Revised preparation time, minutes.
    #[serde(default)]
    pub time: Option<f64>,
}

/// Apply a vendor-driven status transition to an order.
pub async fn process_order(
    db: &Surreal<Db>,
    vendor_id: &str,
    order_id: &str,
    request: ProcessRequest,
) -> AppResult<Order> {
    let orders = OrderRepository::new(db.clone());

    let order = orders
        .find_by_id(order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", order_id)))?;

    if order.ordered_from.id.to_string() != vendor_id {
        return Err(AppError::forbidden("Order belongs to another vendor"));
    }
    if !can_transition(order.order_status, request.status) {
        return Err(AppError::validation(format!(
            "Cannot move order from {:?} to {:?}",
            order.order_status, request.status
        )));
    }

    let updated = orders
        .update_status(
            order_id,
            request.status,
            request.remarks.unwrap_or_default(),
            request.time,
        )
        .await?;

    info!(
        order = order_id,
        vendor = vendor_id,
        status = ?updated.order_status,
        "order status updated"
    );
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_memory;
    use crate::db::models::now_ms;
    use crate::db::repository::make_thing;

    #[test]
    fn transition_table_is_enforced() {
        use OrderStatus::*;
        assert!(can_transition(Pending, Accepted));
        assert!(can_transition(Pending, Rejected));
        assert!(can_transition(Accepted, Processing));
        assert!(can_transition(Processing, Ready));

        // Skips, reversals, and terminal exits
        assert!(!can_transition(Pending, Processing));
        assert!(!can_transition(Pending, Ready));
        assert!(!can_transition(Accepted, Ready));
        assert!(!can_transition(Accepted, Pending));
        assert!(!can_transition(Rejected, Accepted));
        assert!(!can_transition(Ready, Processing));
        assert!(!can_transition(Ready, Ready));
    }

    async fn seed_order(db: &Surreal<Db>, vendor: &str) -> String {
        let order = Order {
            id: None,
            ordered_by: make_thing("customer", "c1"),
            ordered_from: make_thing("vendor", vendor),
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
        created.unwrap().id.unwrap().id.to_string()
    }

    #[tokio::test]
    async fn vendor_walks_the_full_lifecycle() {
        let db = connect_memory().await.unwrap();
        let order_id = seed_order(&db, "v1").await;

        for (status, time) in [
            (OrderStatus::Accepted, Some(35.0)),
            (OrderStatus::Processing, None),
            (OrderStatus::Ready, None),
        ] {
            let updated = process_order(
                &db,
                "v1",
                &order_id,
                ProcessRequest {
                    status,
                    remarks: None,
                    time,
                },
            )
            .await
            .unwrap();
            assert_eq!(updated.order_status, status);
        }
    }

    #[tokio::test]
    async fn skipping_a_state_is_rejected() {
        let db = connect_memory().await.unwrap();
        let order_id = seed_order(&db, "v1").await;

        let err = process_order(
            &db,
            "v1",
            &order_id,
            ProcessRequest {
                status: OrderStatus::Ready,
                remarks: None,
                time: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn foreign_vendor_is_forbidden() {
        let db = connect_memory().await.unwrap();
        let order_id = seed_order(&db, "v1").await;

        let err = process_order(
            &db,
            "v2",
            &order_id,
            ProcessRequest {
                status: OrderStatus::Accepted,
                remarks: None,
                time: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
