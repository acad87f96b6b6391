//! Shared infrastructure: error types, logging, request validation.

pub mod error;
pub mod logger;
pub mod result;
pub mod validation;

pub use error::{AppError, FieldViolation};
pub use result::AppResult;
pub use validation::validate_payload;
