//! Uniform API response envelope
//!
//! Every response, success or failure, has the shape
//! `{ "success": bool, "message": ... }`. Handlers wrap their payload with
//! [`Envelope::ok`]; the error path is produced by the server's error type.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: T,
}

impl<T> Envelope<T> {
    pub fn ok(message: T) -> Self {
        Self {
            success: true,
            message,
        }
    }
}
