//! Food catalog repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::{Food, FoodCreate, now_ms};

pub const TABLE: &str = "food";

#[derive(Clone)]
pub struct FoodRepository {
    base: BaseRepository,
}

impl FoodRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Food>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let food: Option<Food> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(food)
    }

    /// Resolve a batch of food ids. Items that do not exist are absent
    /// from the result; checkout pricing then rejects the whole request
    /// as a validation failure rather than shrinking the cart.
    pub async fn find_by_ids(&self, ids: &[String]) -> RepoResult<Vec<Food>> {
        let id_strings: Vec<String> = ids
            .iter()
            .map(|id| make_thing(TABLE, id).to_string())
            .collect();
        let foods: Vec<Food> = self
            .base
            .db()
            .query("SELECT * FROM food WHERE <string>id IN $ids")
            .bind(("ids", id_strings))
            .await?
            .take(0)?;
        Ok(foods)
    }

    pub async fn find_by_vendor(&self, vendor_id: &str) -> RepoResult<Vec<Food>> {
        // Record links are stored as "table:key" strings
        let vendor = make_thing("vendor", vendor_id).to_string();
        let foods: Vec<Food> = self
            .base
            .db()
            .query("SELECT * FROM food WHERE vendor = $vendor")
            .bind(("vendor", vendor))
            .await?
            .take(0)?;
        Ok(foods)
    }

    pub async fn create(&self, vendor_id: &str, data: FoodCreate) -> RepoResult<Food> {
        let food = Food {
            id: None,
            vendor: make_thing("vendor", vendor_id),
            name: data.name,
            description: data.description.unwrap_or_default(),
            category: data.category,
            food_type: data.food_type,
            price: data.price,
            ready_time: data.ready_time,
            rating: 0.0,
            images: Vec::new(),
            created_at: now_ms(),
        };

        let created: Option<Food> = self.base.db().create(TABLE).content(food).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create food".to_string()))
    }

    /// Seed helper used by tests and fixtures.
    pub async fn insert(&self, food: Food) -> RepoResult<Food> {
        let created: Option<Food> = self.base.db().create(TABLE).content(food).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create food".to_string()))
    }
}
