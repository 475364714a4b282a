//! Fundamental types for Project Legit.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! product identifiers, the ledger's product record, and timestamps.

pub mod error;
pub mod product;
pub mod time;

pub use error::TypesError;
pub use product::{ProductDetails, ProductId};
pub use time::Timestamp;
