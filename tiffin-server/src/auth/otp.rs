//! One-time passwords
//!
//! OTP generation lives here; delivery is a collaborator behind
//! [`OtpSender`]. The default sender only logs the code — wiring a real
//! SMS gateway is deployment configuration, not core logic.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rand::Rng;

/// A generated OTP and its expiry (epoch millis).
#[derive(Debug, Clone, Copy)]
pub struct Otp {
    pub code: i64,
    pub expiry_ms: i64,
}

/// Generate a 6-digit OTP valid for 30 minutes.
pub fn generate_otp() -> Otp {
    let code = rand::thread_rng().gen_range(100_000..1_000_000);
    let expiry_ms = (Utc::now() + Duration::minutes(30)).timestamp_millis();
    Otp { code, expiry_ms }
}

/// Notification collaborator delivering OTP codes to customers.
#[async_trait]
pub trait OtpSender: Send + Sync {
    async fn send(&self, code: i64, phone: &str) -> anyhow::Result<()>;
}

/// Stub sender: logs the OTP instead of dispatching an SMS.
pub struct LogOtpSender;

#[async_trait]
impl OtpSender for LogOtpSender {
    async fn send(&self, code: i64, phone: &str) -> anyhow::Result<()> {
        tracing::info!(phone = %phone, code, "OTP generated (delivery stubbed)");
        Ok(())
    }
}
