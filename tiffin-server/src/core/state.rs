//! Shared application state
//!
//! One embedded database handle plus the collaborators every handler
//! needs. Cloning is cheap; everything inside is an `Arc` or an `Arc`-like
//! handle.

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::{JwtService, LogOtpSender, OtpSender};
use crate::core::Config;
use crate::db;
use crate::utils::AppResult;

#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    pub otp_sender: Arc<dyn OtpSender>,
}

impl ServerState {
    /// Open the embedded database and build the collaborators.
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db = db::connect(&config.work_dir).await?;
        Ok(Self {
            config: config.clone(),
            db,
            jwt_service: Arc::new(JwtService::with_config(config.jwt.clone())),
            otp_sender: Arc::new(LogOtpSender),
        })
    }
}
