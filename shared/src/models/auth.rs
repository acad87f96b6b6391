use serde::{Deserialize, Serialize};

/// Login/signup response body: the bearer token plus the identity facts
/// the client needs without another round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthPayload {
    pub signature: String,
    pub verified: bool,
    pub email: String,
}
