//! Repository module
//!
//! Per-collection CRUD over the embedded document store, plus the
//! conditional updates the order-and-payment core depends on (atomic
//! offer redemption, compare-and-swap cart writes).

pub mod courier;
pub mod customer;
pub mod food;
pub mod offer;
pub mod order;
pub mod transaction;
pub mod vendor;

pub use courier::CourierRepository;
pub use customer::CustomerRepository;
pub use food::FoodRepository;
pub use offer::OfferRepository;
pub use order::OrderRepository;
pub use transaction::TransactionRepository;
pub use vendor::VendorRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for crate::AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => crate::AppError::NotFound(msg),
            RepoError::Duplicate(msg) | RepoError::Conflict(msg) => crate::AppError::Conflict(msg),
            RepoError::Validation(msg) => crate::AppError::Validation(msg),
            RepoError::Database(msg) => crate::AppError::Database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID convention: the API layer works with "table:key" strings throughout.
// =============================================================================

/// Build a record id from a table and a (possibly prefixed) key.
pub fn make_thing(table: &str, id: &str) -> Thing {
    Thing::from((table.to_string(), strip_table_prefix(table, id).to_string()))
}

/// Accepts both `"key"` and `"table:key"` forms.
pub fn strip_table_prefix<'a>(table: &str, id: &'a str) -> &'a str {
    id.strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id)
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
