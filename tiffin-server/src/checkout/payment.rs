//! Payment transaction creation
//!
//! Prices the requested items against the catalog, applies an optional
//! offer, and records an OPEN transaction. The amount is always computed
//! server-side; the client only names items and quantities.
//!
//! Offer handling is redeem-first: the counter is consumed before the
//! discount is granted, so an exhausted offer downgrades the transaction
//! to the undiscounted amount instead of recording a discount no counter
//! backs. If the transaction write itself fails, the consumed use is
//! restored.

use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tracing::{error, info};
use validator::Validate;

use crate::db::models::{Transaction, TransactionStatus, now_ms};
use crate::db::repository::{
    FoodRepository, OfferRepository, TransactionRepository, make_thing,
};
use crate::utils::AppResult;

use super::pricing::{self, ItemInput};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    #[validate(length(min = 1, message = "at least one item is required"))]
    pub items: Vec<ItemInput>,
    #[validate(length(min = 1, message = "payment mode is required"))]
    pub payment_via: String,
    #[serde(default, alias = "offerID")]
    pub offer_id: Option<String>,
}

pub async fn create_payment(
    db: &Surreal<Db>,
    customer_id: &str,
    request: PaymentRequest,
) -> AppResult<Transaction> {
    let foods = FoodRepository::new(db.clone());
    let offers = OfferRepository::new(db.clone());
    let transactions = TransactionRepository::new(db.clone());

    let ids: Vec<String> = request.items.iter().map(|i| i.food_id.clone()).collect();
    let catalog = foods.find_by_ids(&ids).await?;
    let priced = pricing::price_items(&request.items, &catalog)?;

    let mut order_value = priced.original_value;
    let mut offer_used = None;
    let mut redeemed_offer = None;
    if let Some(offer_id) = &request.offer_id {
        if let Some(offer) = offers.verify(offer_id).await? {
            // Consume the counter first. If another redemption won the
            // race, fall back to the undiscounted amount.
            if offers.redeem(offer_id).await? {
                order_value = pricing::apply_discount(priced.original_value, offer.offer_amount);
                offer_used = offer.id;
                redeemed_offer = Some(offer_id.clone());
            }
        }
    }

    let created = transactions
        .create(Transaction {
            id: None,
            customer: make_thing("customer", customer_id),
            vendor: None,
            order: None,
            original_value: priced.original_value,
            order_value,
            offer_used,
            status: TransactionStatus::Open,
            payment_via: request.payment_via,
            payment_response: "Payment is cash on delivery".to_string(),
            items: priced.cart_lines(),
            created_at: now_ms(),
        })
        .await;

    let transaction = match created {
        Ok(transaction) => transaction,
        Err(err) => {
            // No transaction was recorded, so the consumed use goes back
            if let Some(offer_id) = redeemed_offer {
                if let Err(restore_err) = offers.restore_use(&offer_id).await {
                    error!(
                        offer = %offer_id,
                        error = %restore_err,
                        "failed to restore offer use after transaction error"
                    );
                }
            }
            return Err(err.into());
        }
    };

    info!(
        customer = customer_id,
        original_value = transaction.original_value,
        order_value = transaction.order_value,
        discounted = transaction.offer_used.is_some(),
        "payment transaction opened"
    );
    Ok(transaction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_memory;
    use crate::db::models::Food;
    use crate::db::repository::offer::generic_offer;
    use crate::utils::AppError;

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

    fn request(food_ids: &[&str], offer_id: Option<String>) -> PaymentRequest {
        PaymentRequest {
            items: food_ids
                .iter()
                .map(|id| ItemInput {
                    food_id: id.to_string(),
                    unit: 1,
                })
                .collect(),
            payment_via: "COD".to_string(),
            offer_id,
        }
    }

    #[tokio::test]
    async fn undiscounted_payment_opens_transaction() {
        let db = connect_memory().await.unwrap();
        let food = seed_food(&db, "v1", 20.0).await;

        let txn = create_payment(&db, "c1", request(&[&food], None))
            .await
            .unwrap();
        assert_eq!(txn.original_value, 20.0);
        assert_eq!(txn.order_value, 20.0);
        assert_eq!(txn.status, TransactionStatus::Open);
        assert!(txn.offer_used.is_none());
        assert_eq!(txn.items.len(), 1);
    }

    #[tokio::test]
    async fn active_offer_discounts_and_is_redeemed() {
        let db = connect_memory().await.unwrap();
        let food = seed_food(&db, "v1", 20.0).await;
        let offers = OfferRepository::new(db.clone());
        let offer = offers.insert(generic_offer("Five off", 5.0, 1)).await.unwrap();
        let offer_id = offer.id.as_ref().unwrap().id.to_string();

        let txn = create_payment(&db, "c1", request(&[&food], Some(offer_id.clone())))
            .await
            .unwrap();
        assert_eq!(txn.order_value, 15.0);
        assert!(txn.offer_used.is_some());

        let spent = offers.find_by_id(&offer_id).await.unwrap().unwrap();
        assert_eq!(spent.max_use, 0);
        assert!(!spent.is_active);
    }

    #[tokio::test]
    async fn exhausted_offer_downgrades_to_full_price() {
        let db = connect_memory().await.unwrap();
        let food = seed_food(&db, "v1", 20.0).await;
        let offers = OfferRepository::new(db.clone());
        let mut offer = generic_offer("Spent", 5.0, 0);
        offer.is_active = false;
        let offer = offers.insert(offer).await.unwrap();
        let offer_id = offer.id.as_ref().unwrap().id.to_string();

        let txn = create_payment(&db, "c1", request(&[&food], Some(offer_id)))
            .await
            .unwrap();
        assert_eq!(txn.order_value, 20.0);
        assert!(txn.offer_used.is_none());
    }

    #[tokio::test]
    async fn unknown_food_id_fails_validation() {
        let db = connect_memory().await.unwrap();
        let err = create_payment(&db, "c1", request(&["ghost"], None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
