//! The backend seam.

use async_trait::async_trait;
use legit_types::ProductId;

use crate::error::{BackendError, TransportError};
use crate::wire::{OperationReceipt, RegisterProductRequest, TransferOwnershipRequest};

/// A completed HTTP exchange for a product lookup.
///
/// The body is kept raw: deciding what a status or body means is the
/// verification layer's job, not the transport's.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupReply {
    pub status: u16,
    pub body: String,
}

impl LookupReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Operations the Project Legit backend exposes.
///
/// Implementations:
/// - [`crate::HttpBackend`]: the real service over HTTP
/// - `legit_nullables::NullBackend`: scripted replies for tests
/// - `legit_nullables::SimulatedBackend`: hardcoded catalogue for local demos
#[async_trait]
pub trait LedgerBackend: Send + Sync {
    /// Human-readable name of this backend.
    fn name(&self) -> &str;

    /// Issue exactly one lookup for `product_id`. No retries.
    async fn fetch_product_details(
        &self,
        product_id: &ProductId,
    ) -> Result<LookupReply, TransportError>;

    /// Register a product on the ledger under the backend's manufacturer account.
    async fn register_product(
        &self,
        request: &RegisterProductRequest,
    ) -> Result<OperationReceipt, BackendError>;

    /// Transfer a product to a new owner.
    async fn transfer_ownership(
        &self,
        request: &TransferOwnershipRequest,
    ) -> Result<OperationReceipt, BackendError>;

    /// Fetch the backend's welcome message.
    async fn ping(&self) -> Result<String, BackendError>;
}
