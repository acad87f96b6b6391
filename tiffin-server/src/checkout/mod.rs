//! Checkout core: pricing, payment transactions, order creation.
//!
//! The flow is cart → [`payment::create_payment`] (priced OPEN
//! transaction, offer redeemed) → [`order::create_order`] (cross-validated
//! order, transaction confirmed) → delivery assignment.

pub mod order;
pub mod payment;
pub mod pricing;

pub use order::{OrderRequest, create_order};
pub use payment::{PaymentRequest, create_payment};
pub use pricing::{ItemInput, PricedCart, price_items};
