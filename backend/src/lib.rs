//! Client side of the Project Legit backend API.
//!
//! The backend fronts a Soroban product-authenticity contract. This crate
//! only talks to it:
//! - `GET /get_product_details/{product_id}`: ledger lookup
//! - `POST /register_product`: register a product with the manufacturer account
//! - `POST /transfer_ownership`: move a product to a new owner
//! - `GET /`: welcome message, used as a health probe
//!
//! Everything above the wire goes through the [`LedgerBackend`] trait so the
//! verification flow can run against [`HttpBackend`] or a test double.

pub mod error;
pub mod http;
pub mod transport;
pub mod wire;

pub use error::{BackendError, TransportError};
pub use http::HttpBackend;
pub use transport::{LedgerBackend, LookupReply};
pub use wire::{OperationReceipt, RegisterProductRequest, TransferOwnershipRequest};
