//! End-to-end order flow against an in-memory database
//!
//! Covers the whole lifecycle: seeded catalog → cart → payment
//! transaction → order creation → courier assignment → vendor status
//! transitions, including the tampering and double-spend rejections.

use tiffin_server::checkout::{
    ItemInput, OrderRequest, PaymentRequest, create_order, create_payment,
};
use tiffin_server::db::connect_memory;
use tiffin_server::db::models::{
    Courier, Food, GeoPoint, OrderStatus, TransactionStatus, Vendor, now_ms,
};
use tiffin_server::db::repository::offer::generic_offer;
use tiffin_server::db::repository::{
    CustomerRepository, FoodRepository, OfferRepository, TransactionRepository, customer,
    make_thing,
};
use tiffin_server::delivery::{AssignmentOutcome, assign};
use tiffin_server::orders::{ProcessRequest, process_order};
use tiffin_server::utils::AppError;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

struct Fixture {
    db: Surreal<Db>,
    vendor_id: String,
    customer_id: String,
    food_ids: Vec<String>,
}

/// Vendor with two dishes (12.50 and 7.50) plus one verified customer.
async fn fixture() -> Fixture {
    let db = connect_memory().await.unwrap();

    let vendor: Option<Vendor> = db
        .create("vendor")
        .content(Vendor {
            id: None,
            name: "Masala Box".to_string(),
            owner_name: "Asha".to_string(),
            email: "owner@masalabox.test".to_string(),
            password: "hash".to_string(),
            phone: "9000000000".to_string(),
            address: "12 Market Rd".to_string(),
            zipcode: "560001".to_string(),
            food_type: vec!["indian".to_string()],
            rating: 4.5,
            service_available: true,
            cover_images: Vec::new(),
            foods: Vec::new(),
            geo: GeoPoint::default(),
            created_at: now_ms(),
        })
        .await
        .unwrap();
    let vendor_id = vendor.unwrap().id.unwrap().id.to_string();

    let foods_repo = FoodRepository::new(db.clone());
    let mut food_ids = Vec::new();
    for (name, price, ready_time) in [("Thali", 12.5, 25), ("Chai", 7.5, 5)] {
        let food = foods_repo
            .insert(Food {
                id: None,
                vendor: make_thing("vendor", &vendor_id),
                name: name.to_string(),
                description: String::new(),
                category: "meal".to_string(),
                food_type: "veg".to_string(),
                price,
                ready_time,
                rating: 0.0,
                images: Vec::new(),
                created_at: now_ms(),
            })
            .await
            .unwrap();
        food_ids.push(food.id.unwrap().id.to_string());
    }

    let customers = CustomerRepository::new(db.clone());
    let created = customers
        .create(customer::new_customer(
            "eater@test.local".to_string(),
            "hash".to_string(),
            "9111111111".to_string(),
            123456,
            now_ms() + 60_000,
        ))
        .await
        .unwrap();
    let customer_id = created.id.unwrap().id.to_string();

    Fixture {
        db,
        vendor_id,
        customer_id,
        food_ids,
    }
}

fn items(pairs: &[(&str, i64)]) -> Vec<ItemInput> {
    pairs
        .iter()
        .map(|(id, unit)| ItemInput {
            food_id: id.to_string(),
            unit: *unit,
        })
        .collect()
}

async fn seed_courier(db: &Surreal<Db>, zipcode: &str) {
    let _: Option<Courier> = db
        .create("delivery_user")
        .content(Courier {
            id: None,
            email: format!("rider-{}@test.local", zipcode),
            password: "hash".to_string(),
            phone: "9222222222".to_string(),
            first_name: "Ravi".to_string(),
            last_name: "K".to_string(),
            address: "3 Depot Ln".to_string(),
            zipcode: zipcode.to_string(),
            verified: true,
            is_available: true,
            geo: GeoPoint::default(),
            orders: Vec::new(),
            created_at: now_ms(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn full_flow_without_offer() {
    let fx = fixture().await;
    let lines = items(&[(&fx.food_ids[0], 1), (&fx.food_ids[1], 1)]);

    // Price 12.50 + 7.50 = 20.00
    let txn = create_payment(
        &fx.db,
        &fx.customer_id,
        PaymentRequest {
            items: lines.clone(),
            payment_via: "COD".to_string(),
            offer_id: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(txn.original_value, 20.0);
    assert_eq!(txn.order_value, 20.0);
    assert_eq!(txn.status, TransactionStatus::Open);
    let txn_id = txn.id.unwrap().id.to_string();

    let order = create_order(
        &fx.db,
        &fx.customer_id,
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
    assert_eq!(order.ready_time, 15.0);
    assert_eq!(order.ordered_from.id.to_string(), fx.vendor_id);

    let txn = TransactionRepository::new(fx.db.clone())
        .find_by_id(&txn_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(txn.status, TransactionStatus::Confirmed);
    assert_eq!(
        txn.vendor.unwrap().id.to_string(),
        fx.vendor_id,
        "vendor back-filled on confirmation"
    );

    let customer = CustomerRepository::new(fx.db.clone())
        .find_by_id(&fx.customer_id)
        .await
        .unwrap()
        .unwrap();
    assert!(customer.cart.is_empty());
    assert_eq!(customer.orders.len(), 1);
}

#[tokio::test]
async fn offer_discounts_once_then_runs_out() {
    let fx = fixture().await;
    let offers = OfferRepository::new(fx.db.clone());
    let offer = offers
        .insert(generic_offer("Five off", 5.0, 1))
        .await
        .unwrap();
    let offer_id = offer.id.unwrap().id.to_string();
    let lines = items(&[(&fx.food_ids[0], 1), (&fx.food_ids[1], 1)]);

    let first = create_payment(
        &fx.db,
        &fx.customer_id,
        PaymentRequest {
            items: lines.clone(),
            payment_via: "COD".to_string(),
            offer_id: Some(offer_id.clone()),
        },
    )
    .await
    .unwrap();
    assert_eq!(first.original_value, 20.0);
    assert_eq!(first.order_value, 15.0);
    assert!(first.offer_used.is_some());

    let spent = offers.find_by_id(&offer_id).await.unwrap().unwrap();
    assert_eq!(spent.max_use, 0);
    assert!(!spent.is_active);

    // Second attempt gets no discount and no negative counter
    let second = create_payment(
        &fx.db,
        &fx.customer_id,
        PaymentRequest {
            items: lines,
            payment_via: "COD".to_string(),
            offer_id: Some(offer_id.clone()),
        },
    )
    .await
    .unwrap();
    assert_eq!(second.order_value, 20.0);
    assert!(second.offer_used.is_none());
    assert_eq!(offers.find_by_id(&offer_id).await.unwrap().unwrap().max_use, 0);
}

#[tokio::test]
async fn double_spend_and_tampering_are_conflicts() {
    let fx = fixture().await;
    let lines = items(&[(&fx.food_ids[0], 2)]);

    let txn = create_payment(
        &fx.db,
        &fx.customer_id,
        PaymentRequest {
            items: lines.clone(),
            payment_via: "COD".to_string(),
            offer_id: None,
        },
    )
    .await
    .unwrap();
    let txn_id = txn.id.unwrap().id.to_string();

    // Inflated cart against the same transaction
    let err = create_order(
        &fx.db,
        &fx.customer_id,
        OrderRequest {
            transaction_id: txn_id.clone(),
            items: items(&[(&fx.food_ids[0], 5)]),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // The honest cart still goes through, once
    create_order(
        &fx.db,
        &fx.customer_id,
        OrderRequest {
            transaction_id: txn_id.clone(),
            items: lines.clone(),
        },
    )
    .await
    .unwrap();

    let err = create_order(
        &fx.db,
        &fx.customer_id,
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
async fn courier_assignment_follows_zip_and_availability() {
    let fx = fixture().await;
    let lines = items(&[(&fx.food_ids[1], 1)]);

    let txn = create_payment(
        &fx.db,
        &fx.customer_id,
        PaymentRequest {
            items: lines.clone(),
            payment_via: "COD".to_string(),
            offer_id: None,
        },
    )
    .await
    .unwrap();
    let order = create_order(
        &fx.db,
        &fx.customer_id,
        OrderRequest {
            transaction_id: txn.id.unwrap().id.to_string(),
            items: lines,
        },
    )
    .await
    .unwrap();

    // No courier registered in the vendor's zip yet
    let outcome = assign(&fx.db, &order).await.unwrap();
    assert_eq!(outcome, AssignmentOutcome::NoCourierAvailable);

    seed_courier(&fx.db, "560001").await;
    let outcome = assign(&fx.db, &order).await.unwrap();
    assert!(matches!(outcome, AssignmentOutcome::Assigned { .. }));
}

#[tokio::test]
async fn vendor_drives_order_to_ready() {
    let fx = fixture().await;
    let lines = items(&[(&fx.food_ids[0], 1)]);

    let txn = create_payment(
        &fx.db,
        &fx.customer_id,
        PaymentRequest {
            items: lines.clone(),
            payment_via: "COD".to_string(),
            offer_id: None,
        },
    )
    .await
    .unwrap();
    let order = create_order(
        &fx.db,
        &fx.customer_id,
        OrderRequest {
            transaction_id: txn.id.unwrap().id.to_string(),
            items: lines,
        },
    )
    .await
    .unwrap();
    let order_id = order.id.unwrap().id.to_string();

    for status in [
        OrderStatus::Accepted,
        OrderStatus::Processing,
        OrderStatus::Ready,
    ] {
        let updated = process_order(
            &fx.db,
            &fx.vendor_id,
            &order_id,
            ProcessRequest {
                status,
                remarks: None,
                time: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.order_status, status);
    }

    // READY is terminal
    let err = process_order(
        &fx.db,
        &fx.vendor_id,
        &order_id,
        ProcessRequest {
            status: OrderStatus::Processing,
            remarks: None,
            time: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}
