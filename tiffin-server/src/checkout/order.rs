//! Order creation
//!
//! Cross-validates a cart against its OPEN payment transaction and, when
//! they agree, commits the order in one multi-statement storage
//! transaction: create the order, clear the customer's cart, append the
//! order to the customer's history, and confirm the transaction. A status
//! guard inside the transaction makes double spending a conflict even
//! under concurrent submissions.

use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::db::models::{Order, OrderStatus, Transaction, now_ms};
use crate::db::repository::{
    FoodRepository, OrderRepository, TransactionRepository, make_thing, strip_table_prefix,
};
use crate::delivery;
use crate::utils::{AppError, AppResult};

use super::pricing::{self, ItemInput};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    #[serde(alias = "transactionID")]
    #[validate(length(min = 1, message = "transaction id is required"))]
    pub transaction_id: String,
    #[validate(length(min = 1, message = "at least one item is required"))]
    pub items: Vec<ItemInput>,
}

pub async fn create_order(
    db: &Surreal<Db>,
    customer_id: &str,
    request: OrderRequest,
) -> AppResult<Order> {
    let transactions = TransactionRepository::new(db.clone());
    let foods = FoodRepository::new(db.clone());
    let orders = OrderRepository::new(db.clone());

    let txn_id = strip_table_prefix("transaction", &request.transaction_id).to_string();
    let transaction = transactions
        .find_by_id(&txn_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Transaction {} not found", txn_id)))?;
    validate_transaction(&transaction, customer_id)?;

    let ids: Vec<String> = request.items.iter().map(|i| i.food_id.clone()).collect();
    let catalog = foods.find_by_ids(&ids).await?;
    let priced = pricing::price_items(&request.items, &catalog)?;

    // The transaction priced the cart; a different total now means the
    // cart changed after payment.
    if !pricing::amounts_match(priced.original_value, transaction.original_value) {
        return Err(AppError::conflict(format!(
            "Order total {:.2} does not match the paid transaction ({:.2})",
            priced.original_value, transaction.original_value
        )));
    }

    let order_key = Uuid::new_v4().simple().to_string();
    let order_link = make_thing("order", &order_key).to_string();
    let vendor_link = priced.vendor.to_string();
    let order = Order {
        id: None,
        ordered_by: make_thing("customer", customer_id),
        ordered_from: priced.vendor.clone(),
        items: priced.items.clone(),
        total_amount: transaction.original_value,
        paid_amount: transaction.order_value,
        payment_via: transaction.payment_via.clone(),
        order_status: OrderStatus::Pending,
        remarks: String::new(),
        delivery: None,
        applied_offer: transaction.offer_used.is_some(),
        offer: transaction.offer_used.clone(),
        ready_time: priced.mean_ready_time,
        order_date: now_ms(),
    };

    // One atomic block. The status re-check guards against a concurrent
    // consumer that confirmed the transaction between our read and here.
    let response = db
        .query(
            "BEGIN TRANSACTION; \
             LET $current = (SELECT VALUE status FROM ONLY type::thing('transaction', $txn_id)); \
             IF $current != 'OPEN' { THROW 'transaction already consumed' }; \
             CREATE type::thing('order', $order_key) CONTENT $order; \
             UPDATE type::thing('customer', $customer_id) SET \
                 cart = [], cart_revision += 1, orders += $order_link; \
             UPDATE type::thing('transaction', $txn_id) SET \
                 status = 'CONFIRMED', vendor = $vendor_link, `order` = $order_link; \
             COMMIT TRANSACTION;",
        )
        .bind(("txn_id", txn_id.clone()))
        .bind(("order_key", order_key.clone()))
        .bind(("order", order))
        .bind(("customer_id", customer_id.to_string()))
        .bind(("order_link", order_link))
        .bind(("vendor_link", vendor_link))
        .await?;
    response.check().map_err(|err| {
        let message = err.to_string();
        if message.contains("already consumed") {
            AppError::conflict("Transaction already consumed by another order")
        } else {
            AppError::database(message)
        }
    })?;

    let created = orders
        .find_by_id(&order_key)
        .await?
        .ok_or_else(|| AppError::database("Order vanished after commit"))?;

    info!(
        order = order_key,
        customer = customer_id,
        total = created.total_amount,
        paid = created.paid_amount,
        "order created"
    );

    delivery::spawn_assignment(db.clone(), created.clone());
    Ok(created)
}

fn validate_transaction(transaction: &Transaction, customer_id: &str) -> AppResult<()> {
    if transaction.customer.id.to_string() != customer_id {
        return Err(AppError::forbidden(
            "Transaction belongs to another customer",
        ));
    }
    if !transaction.status.is_pending() {
        return Err(AppError::conflict("Transaction already consumed"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::payment::{PaymentRequest, create_payment};
    use crate::db::connect_memory;
    use crate::db::models::{Food, TransactionStatus};

    async fn seed_food(db: &Surreal<Db>, vendor: &str, price: f64) -> String {
        let repo = FoodRepository::new(db.clone());
        let created = repo
            .insert(Food {
                id: None,
                vendor: make_thing("vendor", vendor),
                name: "dish".to_string(),
                description: String::new(),
                category: "meal".to_string(),
                food_type: "veg".to_string(),
                price,
                ready_time: 20,
                rating: 0.0,
                images: Vec::new(),
                created_at: now_ms(),
            })
            .await
            .unwrap();
        created.id.unwrap().id.to_string()
    }

    fn items(food_ids: &[(&str, i64)]) -> Vec<ItemInput> {
        food_ids
            .iter()
            .map(|(id, unit)| ItemInput {
                food_id: id.to_string(),
                unit: *unit,
            })
            .collect()
    }

    async fn open_transaction(db: &Surreal<Db>, customer: &str, lines: Vec<ItemInput>) -> String {
        let txn = create_payment(
            db,
            customer,
            PaymentRequest {
                items: lines,
                payment_via: "COD".to_string(),
                offer_id: None,
            },
        )
        .await
        .unwrap();
        txn.id.unwrap().id.to_string()
    }

    #[tokio::test]
    async fn order_confirms_transaction_and_clears_cart() {
        let db = connect_memory().await.unwrap();
        let food = seed_food(&db, "v1", 10.0).await;
        let lines = items(&[(&food, 2)]);
        let txn_id = open_transaction(&db, "c1", lines.clone()).await;

        let order = create_order(
            &db,
            "c1",
            OrderRequest {
                transaction_id: txn_id.clone(),
                items: lines,
            },
        )
        .await
        .unwrap();

        assert_eq!(order.order_status, OrderStatus::Pending);
        assert_eq!(order.total_amount, 20.0);
        assert_eq!(order.paid_amount, 20.0);
        assert!(order.delivery.is_none());

        let txn = TransactionRepository::new(db.clone())
            .find_by_id(&txn_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(txn.status, TransactionStatus::Confirmed);
        assert_eq!(txn.order.as_ref().unwrap().id.to_string(), order.id.unwrap().id.to_string());
    }

    #[tokio::test]
    async fn consumed_transaction_cannot_back_a_second_order() {
        let db = connect_memory().await.unwrap();
        let food = seed_food(&db, "v1", 10.0).await;
        let lines = items(&[(&food, 1)]);
        let txn_id = open_transaction(&db, "c1", lines.clone()).await;

        create_order(
            &db,
            "c1",
            OrderRequest {
                transaction_id: txn_id.clone(),
                items: lines.clone(),
            },
        )
        .await
        .unwrap();

        let err = create_order(
            &db,
            "c1",
            OrderRequest {
                transaction_id: txn_id,
                items: lines,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn tampered_cart_total_is_a_conflict() {
        let db = connect_memory().await.unwrap();
        let food = seed_food(&db, "v1", 10.0).await;
        let txn_id = open_transaction(&db, "c1", items(&[(&food, 1)])).await;

        // Quantity bumped after payment
        let err = create_order(
            &db,
            "c1",
            OrderRequest {
                transaction_id: txn_id,
                items: items(&[(&food, 3)]),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn missing_transaction_is_not_found() {
        let db = connect_memory().await.unwrap();
        let food = seed_food(&db, "v1", 10.0).await;
        let err = create_order(
            &db,
            "c1",
            OrderRequest {
                transaction_id: "ghost".to_string(),
                items: items(&[(&food, 1)]),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn foreign_transaction_is_forbidden() {
        let db = connect_memory().await.unwrap();
        let food = seed_food(&db, "v1", 10.0).await;
        let lines = items(&[(&food, 1)]);
        let txn_id = open_transaction(&db, "c1", lines.clone()).await;

        let err = create_order(
            &db,
            "c2",
            OrderRequest {
                transaction_id: txn_id,
                items: lines,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
