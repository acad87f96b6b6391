//! Authentication: JWT tokens, password hashing, OTP.

pub mod extractor;
pub mod jwt;
pub mod otp;
pub mod password;

pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use otp::{LogOtpSender, Otp, OtpSender, generate_otp};
pub use password::{hash_password, verify_password};

use serde::{Deserialize, Serialize};

/// Authenticated identity resolved from a bearer token.
///
/// `verified` mirrors the account's OTP-verification state for customers
/// and couriers; vendor and admin tokens always carry `true`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub verified: bool,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            verified: claims.verified,
        }
    }
}
