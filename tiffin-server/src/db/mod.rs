//! Database module
//!
//! Embedded SurrealDB. Production opens a RocksDB-backed store under the
//! work directory; tests use the in-memory engine.

pub mod models;
pub mod repository;

use std::path::PathBuf;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::AppError;

const NAMESPACE: &str = "tiffin";
const DATABASE: &str = "tiffin";

/// Open the embedded database under `work_dir`.
pub async fn connect(work_dir: &str) -> Result<Surreal<Db>, AppError> {
    let path = PathBuf::from(work_dir).join("tiffin.db");
    let db = Surreal::new::<RocksDb>(path)
        .await
        .map_err(|e| AppError::database(format!("Failed to open database: {}", e)))?;
    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .map_err(|e| AppError::database(format!("Failed to select namespace: {}", e)))?;

    tracing::info!("Database ready (embedded SurrealDB)");
    Ok(db)
}

/// In-memory database for tests.
pub async fn connect_memory() -> Result<Surreal<Db>, AppError> {
    let db = Surreal::new::<Mem>(())
        .await
        .map_err(|e| AppError::database(format!("Failed to open in-memory database: {}", e)))?;
    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .map_err(|e| AppError::database(format!("Failed to select namespace: {}", e)))?;
    Ok(db)
}
