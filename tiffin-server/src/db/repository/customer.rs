//! Customer repository
//!
//! Account CRUD plus the cart aggregator. Cart writes are serialized
//! per-customer with a compare-and-swap on `cart_revision`; a stale read
//! retries a bounded number of times before giving up.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{CartLine, Customer, now_ms};

pub const TABLE: &str = "customer";

const CART_CAS_RETRIES: usize = 3;

#[derive(Clone)]
pub struct CustomerRepository {
    base: BaseRepository,
}

impl CustomerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Customer>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let customer: Option<Customer> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(customer)
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Customer>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM customer WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let customers: Vec<Customer> = result.take(0)?;
        Ok(customers.into_iter().next())
    }

    pub async fn create(&self, customer: Customer) -> RepoResult<Customer> {
        if self.find_by_email(&customer.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Customer '{}' already exists",
                customer.email
            )));
        }
        let created: Option<Customer> = self.base.db().create(TABLE).content(customer).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create customer".to_string()))
    }

    pub async fn update_profile(
        &self,
        id: &str,
        first_name: String,
        last_name: String,
        address: String,
    ) -> RepoResult<Customer> {
        let pure_id = strip_table_prefix(TABLE, id).to_string();
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE type::thing('customer', $id) SET \
                 first_name = $first, last_name = $last, address = $address",
            )
            .bind(("id", pure_id))
            .bind(("first", first_name))
            .bind(("last", last_name))
            .bind(("address", address))
            .await?;
        let updated: Vec<Customer> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Customer {} not found", id)))
    }

    pub async fn set_otp(&self, id: &str, otp: i64, otp_expiry: i64) -> RepoResult<Customer> {
        let pure_id = strip_table_prefix(TABLE, id).to_string();
        let mut result = self
            .base
            .db()
            .query("UPDATE type::thing('customer', $id) SET otp = $otp, otp_expiry = $expiry")
            .bind(("id", pure_id))
            .bind(("otp", otp))
            .bind(("expiry", otp_expiry))
            .await?;
        let updated: Vec<Customer> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Customer {} not found", id)))
    }

    pub async fn set_verified(&self, id: &str) -> RepoResult<Customer> {
        let pure_id = strip_table_prefix(TABLE, id).to_string();
        let mut result = self
            .base
            .db()
            .query("UPDATE type::thing('customer', $id) SET verified = true")
            .bind(("id", pure_id))
            .await?;
        let updated: Vec<Customer> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Customer {} not found", id)))
    }

    /// Merge one line into the cart: unit > 0 on an existing food replaces
    /// the count, unit == 0 removes the line, a new food appends.
    ///
    /// The write only lands if `cart_revision` is unchanged since the
    /// read; a concurrent edit triggers a re-read and retry.
    pub async fn set_cart_line(
        &self,
        customer_id: &str,
        food: Thing,
        unit: i64,
    ) -> RepoResult<Vec<CartLine>> {
        if unit < 0 {
            return Err(RepoError::Validation("unit must not be negative".into()));
        }

        for _ in 0..CART_CAS_RETRIES {
            let customer = self
                .find_by_id(customer_id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Customer {} not found", customer_id)))?;

            let mut cart = customer.cart;
            match cart.iter().position(|line| line.food == food) {
                Some(index) => {
                    if unit > 0 {
                        cart[index].unit = unit;
                    } else {
                        cart.remove(index);
                    }
                }
                None => {
                    if unit > 0 {
                        cart.push(CartLine {
                            food: food.clone(),
                            unit,
                        });
                    }
                }
            }

            if self
                .try_replace_cart(customer_id, &cart, customer.cart_revision)
                .await?
            {
                return Ok(cart);
            }
        }

        Err(RepoError::Conflict(
            "Cart was modified concurrently, please retry".to_string(),
        ))
    }

    pub async fn clear_cart(&self, customer_id: &str) -> RepoResult<()> {
        for _ in 0..CART_CAS_RETRIES {
            let customer = self
                .find_by_id(customer_id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Customer {} not found", customer_id)))?;
            if self
                .try_replace_cart(customer_id, &[], customer.cart_revision)
                .await?
            {
                return Ok(());
            }
        }
        Err(RepoError::Conflict(
            "Cart was modified concurrently, please retry".to_string(),
        ))
    }

    async fn try_replace_cart(
        &self,
        customer_id: &str,
        cart: &[CartLine],
        expected_revision: i64,
    ) -> RepoResult<bool> {
        let pure_id = strip_table_prefix(TABLE, customer_id).to_string();
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE type::thing('customer', $id) \
                 SET cart = $cart, cart_revision += 1 \
                 WHERE cart_revision = $revision",
            )
            .bind(("id", pure_id))
            .bind(("cart", cart.to_vec()))
            .bind(("revision", expected_revision))
            .await?;
        let updated: Vec<Customer> = result.take(0)?;
        Ok(!updated.is_empty())
    }
}

/// Fresh unverified customer record with an empty cart.
pub fn new_customer(email: String, password: String, phone: String, otp: i64, otp_expiry: i64) -> Customer {
    Customer {
        id: None,
        email,
        password,
        phone,
        first_name: String::new(),
        last_name: String::new(),
        address: String::new(),
        verified: false,
        otp,
        otp_expiry,
        geo: Default::default(),
        cart: Vec::new(),
        cart_revision: 0,
        orders: Vec::new(),
        created_at: now_ms(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_memory;
    use crate::db::repository::make_thing;

    async fn seeded_repo() -> (CustomerRepository, String) {
        let db = connect_memory().await.unwrap();
        let repo = CustomerRepository::new(db);
        let customer = repo
            .create(new_customer(
                "cart@test.com".into(),
                "hash".into(),
                "555-0100".into(),
                123456,
                0,
            ))
            .await
            .unwrap();
        let id = customer.id.unwrap().id.to_string();
        (repo, id)
    }

    #[tokio::test]
    async fn cart_round_trip() {
        let (repo, id) = seeded_repo().await;
        let food_a = make_thing("food", "a");
        let food_b = make_thing("food", "b");

        // New food appends
        let cart = repo.set_cart_line(&id, food_a.clone(), 2).await.unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].unit, 2);

        // unit > 0 on an existing line replaces the count
        let cart = repo.set_cart_line(&id, food_a.clone(), 5).await.unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].unit, 5);

        // Second food appends
        let cart = repo.set_cart_line(&id, food_b.clone(), 1).await.unwrap();
        assert_eq!(cart.len(), 2);

        // unit == 0 removes the line
        let cart = repo.set_cart_line(&id, food_a, 0).await.unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].food, food_b);

        // Persisted state matches the returned cart
        let stored = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.cart.len(), 1);
        assert!(stored.cart_revision >= 4);
    }

    #[tokio::test]
    async fn clear_cart_empties_and_bumps_revision() {
        let (repo, id) = seeded_repo().await;
        repo.set_cart_line(&id, make_thing("food", "a"), 3)
            .await
            .unwrap();
        repo.clear_cart(&id).await.unwrap();

        let stored = repo.find_by_id(&id).await.unwrap().unwrap();
        assert!(stored.cart.is_empty());
        assert_eq!(stored.cart_revision, 2);
    }

    #[tokio::test]
    async fn duplicate_email_rejected() {
        let (repo, _) = seeded_repo().await;
        let err = repo
            .create(new_customer(
                "cart@test.com".into(),
                "hash".into(),
                "555-0101".into(),
                1,
                0,
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn negative_unit_rejected() {
        let (repo, id) = seeded_repo().await;
        let err = repo
            .set_cart_line(&id, make_thing("food", "a"), -1)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }
}
