//! Vendor repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{Vendor, VendorCreate, now_ms};

pub const TABLE: &str = "vendor";

#[derive(Clone)]
pub struct VendorRepository {
    base: BaseRepository,
}

impl VendorRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Vendor>> {
        let vendors: Vec<Vendor> = self.base.db().select(TABLE).await?;
        Ok(vendors)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Vendor>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let vendor: Option<Vendor> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(vendor)
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Vendor>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM vendor WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let vendors: Vec<Vendor> = result.take(0)?;
        Ok(vendors.into_iter().next())
    }

    /// Create a vendor account (admin operation). The password is expected
    /// to be hashed already.
    pub async fn create(&self, data: VendorCreate, password_hash: String) -> RepoResult<Vendor> {
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Vendor '{}' already exists",
                data.email
            )));
        }

        let vendor = Vendor {
            id: None,
            name: data.name,
            owner_name: data.owner_name,
            email: data.email,
            password: password_hash,
            phone: data.phone,
            address: data.address,
            zipcode: data.zipcode,
            food_type: data.food_type,
            rating: 0.0,
            service_available: false,
            cover_images: Vec::new(),
            foods: Vec::new(),
            geo: Default::default(),
            created_at: now_ms(),
        };

        let created: Option<Vendor> = self.base.db().create(TABLE).content(vendor).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create vendor".to_string()))
    }

    pub async fn update_profile(
        &self,
        id: &str,
        name: String,
        address: String,
        phone: String,
        food_type: Vec<String>,
    ) -> RepoResult<Vendor> {
        let pure_id = strip_table_prefix(TABLE, id).to_string();
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE type::thing('vendor', $id) SET \
                 name = $name, address = $address, phone = $phone, food_type = $food_type",
            )
            .bind(("id", pure_id))
            .bind(("name", name))
            .bind(("address", address))
            .bind(("phone", phone))
            .bind(("food_type", food_type))
            .await?;
        let updated: Vec<Vendor> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Vendor {} not found", id)))
    }

    /// Flip service availability.
    pub async fn toggle_service(&self, id: &str) -> RepoResult<Vendor> {
        let pure_id = strip_table_prefix(TABLE, id).to_string();
        let mut result = self
            .base
            .db()
            .query("UPDATE type::thing('vendor', $id) SET service_available = !service_available")
            .bind(("id", pure_id))
            .await?;
        let updated: Vec<Vendor> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Vendor {} not found", id)))
    }

    /// Link a newly created food to its vendor.
    pub async fn push_food(&self, id: &str, food: &Thing) -> RepoResult<()> {
        let pure_id = strip_table_prefix(TABLE, id).to_string();
        self.base
            .db()
            .query("UPDATE type::thing('vendor', $id) SET foods += $food")
            .bind(("id", pure_id))
            // Record links are stored as "table:key" strings
            .bind(("food", food.to_string()))
            .await?;
        Ok(())
    }

    /// Serviceable vendors in a zip code, best rated first.
    pub async fn find_by_zip(&self, zipcode: &str, limit: Option<usize>) -> RepoResult<Vec<Vendor>> {
        let sql = match limit {
            Some(_) => {
                "SELECT * FROM vendor WHERE zipcode = $zip AND service_available = true \
                 ORDER BY rating DESC LIMIT $limit"
            }
            None => {
                "SELECT * FROM vendor WHERE zipcode = $zip AND service_available = true \
                 ORDER BY rating DESC"
            }
        };
        let mut query = self.base.db().query(sql).bind(("zip", zipcode.to_string()));
        if let Some(n) = limit {
            query = query.bind(("limit", n));
        }
        let vendors: Vec<Vendor> = query.await?.take(0)?;
        Ok(vendors)
    }
}
