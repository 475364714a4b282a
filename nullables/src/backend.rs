//! Nullable backend: scripted replies, recorded requests.

use async_trait::async_trait;
use legit_backend::{
    BackendError, LedgerBackend, LookupReply, OperationReceipt, RegisterProductRequest,
    TransferOwnershipRequest, TransportError,
};
use legit_types::{ProductDetails, ProductId};
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// One scripted answer to a lookup.
#[derive(Clone, Debug)]
pub struct ScriptedReply {
    pub result: Result<LookupReply, TransportError>,
    /// How long the lookup takes before answering.
    pub latency: Duration,
}

impl ScriptedReply {
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            result: Ok(LookupReply::new(status, body)),
            latency: Duration::ZERO,
        }
    }

    /// A 200 reply carrying `details` as the backend would serialize them.
    pub fn found(details: &ProductDetails) -> Self {
        let body = serde_json::to_string(details).unwrap_or_default();
        Self::status(200, body)
    }

    pub fn not_found() -> Self {
        Self::status(404, r#"{"detail":"Not Found"}"#)
    }

    pub fn server_error() -> Self {
        Self::status(500, r#"{"detail":"Soroban CLI error"}"#)
    }

    /// The request never completes (connection refused).
    pub fn unreachable() -> Self {
        Self {
            result: Err(TransportError::Connect("connection refused".into())),
            latency: Duration::ZERO,
        }
    }

    pub fn after(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[derive(Default)]
struct Inner {
    /// Per-product replies, consumed in order.
    queued: HashMap<ProductId, VecDeque<ScriptedReply>>,
    /// Per-product reply used once the queue is empty.
    fixed: HashMap<ProductId, ScriptedReply>,
    lookups: Vec<ProductId>,
    registrations: Vec<RegisterProductRequest>,
    transfers: Vec<TransferOwnershipRequest>,
}

/// A test backend that answers from a script instead of the network.
///
/// Unscripted products answer 404.
#[derive(Default)]
pub struct NullBackend {
    inner: Mutex<Inner>,
}

impl NullBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every lookup of `product_id` with `reply`.
    pub fn set_reply(&self, product_id: &ProductId, reply: ScriptedReply) {
        self.lock().fixed.insert(product_id.clone(), reply);
    }

    /// Answer the next lookup of `product_id` with `reply`, ahead of the fixed one.
    pub fn push_reply(&self, product_id: &ProductId, reply: ScriptedReply) {
        self.lock()
            .queued
            .entry(product_id.clone())
            .or_default()
            .push_back(reply);
    }

    /// Every product looked up so far, in call order.
    pub fn lookups(&self) -> Vec<ProductId> {
        self.lock().lookups.clone()
    }

    pub fn lookup_count(&self) -> usize {
        self.lock().lookups.len()
    }

    pub fn registrations(&self) -> Vec<RegisterProductRequest> {
        self.lock().registrations.clone()
    }

    pub fn transfers(&self) -> Vec<TransferOwnershipRequest> {
        self.lock().transfers.clone()
    }

    /// Clear all state.
    pub fn reset(&self) {
        *self.lock() = Inner::default();
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn receipt(message: &str) -> OperationReceipt {
        OperationReceipt {
            status: "success".into(),
            message: message.into(),
            cli_output: String::new(),
        }
    }
}

#[async_trait]
impl LedgerBackend for NullBackend {
    fn name(&self) -> &str {
        "null"
    }

    async fn fetch_product_details(
        &self,
        product_id: &ProductId,
    ) -> Result<LookupReply, TransportError> {
        let scripted = {
            let mut inner = self.lock();
            inner.lookups.push(product_id.clone());
            let queued = inner
                .queued
                .get_mut(product_id)
                .and_then(VecDeque::pop_front);
            queued
                .or_else(|| inner.fixed.get(product_id).cloned())
                .unwrap_or_else(ScriptedReply::not_found)
        };

        if !scripted.latency.is_zero() {
            tokio::time::sleep(scripted.latency).await;
        }
        scripted.result
    }

    async fn register_product(
        &self,
        request: &RegisterProductRequest,
    ) -> Result<OperationReceipt, BackendError> {
        self.lock().registrations.push(request.clone());
        Ok(Self::receipt("Product registration initiated"))
    }

    async fn transfer_ownership(
        &self,
        request: &TransferOwnershipRequest,
    ) -> Result<OperationReceipt, BackendError> {
        self.lock().transfers.push(request.clone());
        Ok(Self::receipt("Ownership transfer initiated"))
    }

    async fn ping(&self) -> Result<String, BackendError> {
        Ok("null backend".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> ProductId {
        ProductId::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn unscripted_lookup_is_not_found_and_recorded() {
        let backend = NullBackend::new();
        let reply = backend.fetch_product_details(&id("X")).await.unwrap();
        assert_eq!(reply.status, 404);
        assert_eq!(backend.lookups(), vec![id("X")]);
    }

    #[tokio::test]
    async fn queued_replies_come_before_fixed_reply() {
        let backend = NullBackend::new();
        backend.set_reply(&id("X"), ScriptedReply::server_error());
        backend.push_reply(&id("X"), ScriptedReply::unreachable());

        assert!(backend.fetch_product_details(&id("X")).await.is_err());
        assert_eq!(
            backend.fetch_product_details(&id("X")).await.unwrap().status,
            500
        );
        assert_eq!(backend.lookup_count(), 2);
    }

    #[tokio::test]
    async fn reset_clears_script_and_history() {
        let backend = NullBackend::new();
        backend.set_reply(&id("X"), ScriptedReply::server_error());
        backend.fetch_product_details(&id("X")).await.unwrap();
        backend.reset();
        assert_eq!(backend.lookup_count(), 0);
        assert_eq!(
            backend.fetch_product_details(&id("X")).await.unwrap().status,
            404
        );
    }
}
