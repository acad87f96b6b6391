//! Offer ledger
//!
//! Holds the promotional offers and their remaining-use counters. The
//! counter is the one shared-mutable hot spot in the system, so redemption
//! is a single conditional UPDATE: the storage engine serializes
//! concurrent redemptions per offer and the counter can never go below
//! zero.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::{Offer, OfferType, OfferUpsert, now_ms};

pub const TABLE: &str = "offer";

#[derive(Clone)]
pub struct OfferRepository {
    base: BaseRepository,
}

impl OfferRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Offer>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let offer: Option<Offer> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(offer)
    }

    /// Returns the offer only while it is active.
    pub async fn verify(&self, id: &str) -> RepoResult<Option<Offer>> {
        Ok(self.find_by_id(id).await?.filter(|o| o.is_active))
    }

    /// Redeem one use of an offer.
    ///
    /// Decrements `max_use` and deactivates the offer exactly when the
    /// decrement brings it to zero, in one conditional UPDATE. Matches
    /// nothing once the offer is inactive or exhausted, so the counter
    /// never goes negative. Returns whether a use was consumed.
    pub async fn redeem(&self, id: &str) -> RepoResult<bool> {
        let pure_id = strip_table_prefix(TABLE, id).to_string();
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE type::thing('offer', $id) SET is_active = max_use > 1, max_use -= 1 \
                 WHERE is_active = true AND max_use > 0",
            )
            .bind(("id", pure_id))
            .await?;
        let updated: Vec<Offer> = result.take(0)?;
        Ok(!updated.is_empty())
    }

    /// Give back one redeemed use.
    ///
    /// Compensation for a redemption whose follow-up write never landed;
    /// the counter comes back and the offer reactivates.
    pub async fn restore_use(&self, id: &str) -> RepoResult<()> {
        let pure_id = strip_table_prefix(TABLE, id).to_string();
        self.base
            .db()
            .query("UPDATE type::thing('offer', $id) SET max_use += 1, is_active = true")
            .bind(("id", pure_id))
            .await?;
        Ok(())
    }

    /// Offers available to a vendor: vendor-scoped plus generic, no
    /// duplicates.
    pub async fn available_for_vendor(&self, vendor_id: &str) -> RepoResult<Vec<Offer>> {
        // Record links are stored as "table:key" strings
        let vendor = make_thing("vendor", vendor_id).to_string();
        let offers: Vec<Offer> = self
            .base
            .db()
            .query(
                "SELECT * FROM offer \
                 WHERE offer_type = 'GENERIC' OR $vendor IN vendors \
                 ORDER BY created_at DESC",
            )
            .bind(("vendor", vendor))
            .await?
            .take(0)?;
        Ok(offers)
    }

    /// Active offers advertised in a zip code area (generic ones included).
    pub async fn find_by_zip(&self, zipcode: &str) -> RepoResult<Vec<Offer>> {
        let offers: Vec<Offer> = self
            .base
            .db()
            .query(
                "SELECT * FROM offer \
                 WHERE is_active = true AND (zip_code = $zip OR offer_type = 'GENERIC')",
            )
            .bind(("zip", zipcode.to_string()))
            .await?
            .take(0)?;
        Ok(offers)
    }

    /// Create a vendor-managed offer.
    pub async fn create(&self, vendor_id: &str, data: OfferUpsert) -> RepoResult<Offer> {
        let offer = Offer {
            id: None,
            offer_type: data.offer_type,
            vendors: vec![make_thing("vendor", vendor_id)],
            title: data.title,
            description: data.description.unwrap_or_default(),
            promo_code: data.promo_code,
            promo_type: data.promo_type,
            min_value: data.min_value,
            max_value: data.max_value,
            offer_amount: data.offer_amount,
            valid_from: data.valid_from,
            valid_until: data.valid_until,
            zip_code: data.zip_code.unwrap_or_default(),
            is_active: data.is_active && data.max_use > 0,
            max_use: data.max_use,
            created_at: now_ms(),
        };

        let created: Option<Offer> = self.base.db().create(TABLE).content(offer).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create offer".to_string()))
    }

    /// Replace the editable fields of an existing offer.
    pub async fn update(&self, id: &str, data: OfferUpsert) -> RepoResult<Offer> {
        let pure_id = strip_table_prefix(TABLE, id);
        let existing = self
            .find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Offer {} not found", id)))?;

        // id is carried by the update target, not the content
        let updated = Offer {
            id: None,
            offer_type: data.offer_type,
            vendors: existing.vendors,
            title: data.title,
            description: data.description.unwrap_or_default(),
            promo_code: data.promo_code,
            promo_type: data.promo_type,
            min_value: data.min_value,
            max_value: data.max_value,
            offer_amount: data.offer_amount,
            valid_from: data.valid_from,
            valid_until: data.valid_until,
            zip_code: data.zip_code.unwrap_or_default(),
            is_active: data.is_active && data.max_use > 0,
            max_use: data.max_use,
            created_at: existing.created_at,
        };

        let saved: Option<Offer> = self
            .base
            .db()
            .update((TABLE, pure_id))
            .content(updated)
            .await?;
        saved.ok_or_else(|| RepoError::Database("Failed to update offer".to_string()))
    }

    /// Seed helper used by tests and fixtures.
    pub async fn insert(&self, offer: Offer) -> RepoResult<Offer> {
        let created: Option<Offer> = self.base.db().create(TABLE).content(offer).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create offer".to_string()))
    }
}

pub fn generic_offer(title: &str, offer_amount: f64, max_use: i64) -> Offer {
    Offer {
        id: None,
        offer_type: OfferType::Generic,
        vendors: Vec::new(),
        title: title.to_string(),
        description: String::new(),
        promo_code: title.to_uppercase().replace(' ', ""),
        promo_type: "ALL".to_string(),
        min_value: 0.0,
        max_value: 0.0,
        offer_amount,
        valid_from: None,
        valid_until: None,
        zip_code: String::new(),
        is_active: max_use > 0,
        max_use,
        created_at: now_ms(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_memory;

    fn offer_key(offer: &Offer) -> String {
        offer.id.as_ref().unwrap().id.to_string()
    }

    #[tokio::test]
    async fn redeem_decrements_and_deactivates_at_zero() {
        let db = connect_memory().await.unwrap();
        let repo = OfferRepository::new(db);

        let offer = repo.insert(generic_offer("Five off", 5.0, 2)).await.unwrap();
        let id = offer_key(&offer);

        assert!(repo.redeem(&id).await.unwrap());
        let after_one = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(after_one.max_use, 1);
        assert!(after_one.is_active);

        assert!(repo.redeem(&id).await.unwrap());
        let after_two = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(after_two.max_use, 0);
        assert!(!after_two.is_active);
    }

    #[tokio::test]
    async fn redeem_is_a_guarded_noop_when_exhausted() {
        let db = connect_memory().await.unwrap();
        let repo = OfferRepository::new(db);

        let offer = repo.insert(generic_offer("One shot", 5.0, 1)).await.unwrap();
        let id = offer_key(&offer);

        assert!(repo.redeem(&id).await.unwrap());
        // Second redemption consumes nothing and never drives max_use
        // below zero.
        assert!(!repo.redeem(&id).await.unwrap());
        let after = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(after.max_use, 0);
        assert!(!after.is_active);

        // verify() no longer returns the exhausted offer
        assert!(repo.verify(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn restore_use_returns_a_consumed_use() {
        let db = connect_memory().await.unwrap();
        let repo = OfferRepository::new(db);

        let offer = repo.insert(generic_offer("Last one", 5.0, 1)).await.unwrap();
        let id = offer_key(&offer);

        assert!(repo.redeem(&id).await.unwrap());
        repo.restore_use(&id).await.unwrap();

        let restored = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(restored.max_use, 1);
        assert!(restored.is_active);

        // The returned use is redeemable again
        assert!(repo.redeem(&id).await.unwrap());
    }

    #[tokio::test]
    async fn vendor_offers_union_generic_without_duplicates() {
        let db = connect_memory().await.unwrap();
        let repo = OfferRepository::new(db);

        let mut scoped = generic_offer("Vendor only", 3.0, 10);
        scoped.offer_type = OfferType::Vendor;
        scoped.vendors = vec![make_thing("vendor", "v1")];
        repo.insert(scoped).await.unwrap();
        repo.insert(generic_offer("Everyone", 2.0, 10)).await.unwrap();

        let for_v1 = repo.available_for_vendor("v1").await.unwrap();
        assert_eq!(for_v1.len(), 2);

        let for_v2 = repo.available_for_vendor("v2").await.unwrap();
        assert_eq!(for_v2.len(), 1);
        assert_eq!(for_v2[0].title, "Everyone");
    }
}
