//! Delivery courier assignment.

pub mod assignment;

pub use assignment::{AssignmentOutcome, assign, spawn_assignment};
