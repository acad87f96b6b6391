//! Delivery courier repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{Courier, GeoPoint};

pub const TABLE: &str = "delivery_user";

#[derive(Clone)]
pub struct CourierRepository {
    base: BaseRepository,
}

impl CourierRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Courier>> {
        let couriers: Vec<Courier> = self.base.db().select(TABLE).await?;
        Ok(couriers)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Courier>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let courier: Option<Courier> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(courier)
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Courier>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM delivery_user WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let couriers: Vec<Courier> = result.take(0)?;
        Ok(couriers.into_iter().next())
    }

    pub async fn create(&self, courier: Courier) -> RepoResult<Courier> {
        if self.find_by_email(&courier.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Delivery user '{}' already exists",
                courier.email
            )));
        }
        let created: Option<Courier> = self.base.db().create(TABLE).content(courier).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create delivery user".to_string()))
    }

    /// Couriers eligible for assignment in a zip code area.
    pub async fn find_eligible(&self, zipcode: &str) -> RepoResult<Vec<Courier>> {
        let couriers: Vec<Courier> = self
            .base
            .db()
            .query(
                "SELECT * FROM delivery_user \
                 WHERE zipcode = $zip AND verified = true AND is_available = true",
            )
            .bind(("zip", zipcode.to_string()))
            .await?
            .take(0)?;
        Ok(couriers)
    }

    pub async fn update_profile(
        &self,
        id: &str,
        first_name: String,
        last_name: String,
        address: String,
    ) -> RepoResult<Courier> {
        let pure_id = strip_table_prefix(TABLE, id).to_string();
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE type::thing('delivery_user', $id) SET \
                 first_name = $first, last_name = $last, address = $address",
            )
            .bind(("id", pure_id))
            .bind(("first", first_name))
            .bind(("last", last_name))
            .bind(("address", address))
            .await?;
        let updated: Vec<Courier> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Delivery user {} not found", id)))
    }

    /// Admin verification toggle.
    pub async fn set_verified(&self, id: &str, verified: bool) -> RepoResult<Courier> {
        let pure_id = strip_table_prefix(TABLE, id).to_string();
        let mut result = self
            .base
            .db()
            .query("UPDATE type::thing('delivery_user', $id) SET verified = $verified")
            .bind(("id", pure_id))
            .bind(("verified", verified))
            .await?;
        let updated: Vec<Courier> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Delivery user {} not found", id)))
    }

    pub async fn set_available(&self, id: &str, is_available: bool) -> RepoResult<Courier> {
        let pure_id = strip_table_prefix(TABLE, id).to_string();
        let mut result = self
            .base
            .db()
            .query("UPDATE type::thing('delivery_user', $id) SET is_available = $available")
            .bind(("id", pure_id))
            .bind(("available", is_available))
            .await?;
        let updated: Vec<Courier> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Delivery user {} not found", id)))
    }

    pub async fn set_geo(&self, id: &str, geo: GeoPoint) -> RepoResult<Courier> {
        let pure_id = strip_table_prefix(TABLE, id).to_string();
        let mut result = self
            .base
            .db()
            .query("UPDATE type::thing('delivery_user', $id) SET geo = $geo")
            .bind(("id", pure_id))
            .bind(("geo", geo))
            .await?;
        let updated: Vec<Courier> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Delivery user {} not found", id)))
    }
}
