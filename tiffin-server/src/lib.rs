//! Tiffin Server - food-ordering backend
//!
//! # Module structure
//!
//! ```text
//! tiffin-server/src/
//! ├── core/          # Config, state, HTTP server bootstrap
//! ├── auth/          # JWT, passwords, OTP
//! ├── db/            # Embedded SurrealDB: models + repositories
//! ├── checkout/      # Pricing, payment transactions, order creation
//! ├── orders/        # Order status state machine
//! ├── delivery/      # Courier assignment background task
//! ├── api/           # HTTP routes and handlers per actor
//! └── utils/         # Errors, logging, validation helpers
//! ```

pub mod api;
pub mod auth;
pub mod checkout;
pub mod core;
pub mod db;
pub mod delivery;
pub mod orders;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};
pub use utils::logger::init_logger;
