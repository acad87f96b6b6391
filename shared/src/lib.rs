//! Shared wire types for the tiffin platform.
//!
//! Everything the HTTP surface sends to clients lives here: the uniform
//! response envelope and the outbound profile representations. Database
//! records never cross the API boundary directly — profiles carry no
//! password or OTP fields.

pub mod models;
pub mod response;

pub use response::Envelope;
