//! Top-level error type shared across crates.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("product id must not be empty")]
    EmptyProductId,
}
