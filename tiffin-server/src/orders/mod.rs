//! Vendor-side order lifecycle.

pub mod lifecycle;

pub use lifecycle::{ProcessRequest, can_transition, process_order};
