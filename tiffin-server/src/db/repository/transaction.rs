//! Transaction ledger repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::Transaction;

pub const TABLE: &str = "transaction";

#[derive(Clone)]
pub struct TransactionRepository {
    base: BaseRepository,
}

impl TransactionRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Transaction>> {
        let transactions: Vec<Transaction> = self.base.db().select(TABLE).await?;
        Ok(transactions)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Transaction>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let transaction: Option<Transaction> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(transaction)
    }

    pub async fn create(&self, transaction: Transaction) -> RepoResult<Transaction> {
        let created: Option<Transaction> =
            self.base.db().create(TABLE).content(transaction).await?;
        created.ok_or_else(|| RepoError::Database("Failed to record transaction".to_string()))
    }
}
