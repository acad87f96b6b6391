//! Order repository
//!
//! Read access plus the status mutation used by the vendor state machine.
//! Order creation itself goes through `checkout::order`, which needs a
//! multi-document transaction.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::{Order, OrderStatus};

pub const TABLE: &str = "order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let order: Option<Order> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(order)
    }

    pub async fn find_by_customer(&self, customer_id: &str) -> RepoResult<Vec<Order>> {
        // Record links are stored as "table:key" strings
        let customer = make_thing("customer", customer_id).to_string();
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM type::table('order') WHERE ordered_by = $customer ORDER BY order_date DESC")
            .bind(("customer", customer))
            .await?
            .take(0)?;
        Ok(orders)
    }

    pub async fn find_by_vendor(&self, vendor_id: &str) -> RepoResult<Vec<Order>> {
        let vendor = make_thing("vendor", vendor_id).to_string();
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM type::table('order') WHERE ordered_from = $vendor ORDER BY order_date DESC")
            .bind(("vendor", vendor))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Persist a vendor-driven status transition. The transition itself is
    /// validated by `orders::lifecycle` before this is called.
    pub async fn update_status(
        &self,
        id: &str,
        status: OrderStatus,
        remarks: String,
        ready_time: Option<f64>,
    ) -> RepoResult<Order> {
        let pure_id = strip_table_prefix(TABLE, id).to_string();
        let sql = match ready_time {
            Some(_) => {
                "UPDATE type::thing('order', $id) SET \
                 order_status = $status, remarks = $remarks, ready_time = $ready_time"
            }
            None => {
                "UPDATE type::thing('order', $id) SET \
                 order_status = $status, remarks = $remarks"
            }
        };
        let mut query = self
            .base
            .db()
            .query(sql)
            .bind(("id", pure_id))
            .bind(("status", status))
            .bind(("remarks", remarks));
        if let Some(t) = ready_time {
            query = query.bind(("ready_time", t));
        }
        let updated: Vec<Order> = query.await?.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }
}
