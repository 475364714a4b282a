//! At-most-one in-flight lookup per product id.
//!
//! Without coalescing, two verifications of the same product race: both
//! requests go out and whichever reply lands last wins the slot. With it,
//! later callers join the lookup already in flight and every caller sees
//! the same reply.

use futures_util::future::{BoxFuture, FutureExt, Shared};
use legit_backend::{LedgerBackend, LookupReply, TransportError};
use legit_types::ProductId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

pub type LookupResult = Result<LookupReply, TransportError>;

type SharedLookup = Shared<BoxFuture<'static, LookupResult>>;

#[derive(Default)]
pub struct InFlightLookups {
    /// Pending lookups keyed by product, tagged with a generation so a
    /// finished caller never evicts a newer lookup for the same id.
    pending: Mutex<HashMap<ProductId, (u64, SharedLookup)>>,
    next_generation: AtomicU64,
}

impl InFlightLookups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `product_id`, joining an identical lookup if one is in flight.
    pub async fn lookup(
        &self,
        backend: &Arc<dyn LedgerBackend>,
        product_id: &ProductId,
    ) -> LookupResult {
        let (generation, lookup) = {
            let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
            match pending.get(product_id) {
                Some((generation, lookup)) => {
                    tracing::debug!(product_id = %product_id, "joining in-flight lookup");
                    (*generation, lookup.clone())
                }
                None => {
                    let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
                    let backend = Arc::clone(backend);
                    let id = product_id.clone();
                    let lookup = async move { backend.fetch_product_details(&id).await }
                        .boxed()
                        .shared();
                    pending.insert(product_id.clone(), (generation, lookup.clone()));
                    (generation, lookup)
                }
            }
        };

        let result = lookup.await;

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if pending
            .get(product_id)
            .is_some_and(|(current, _)| *current == generation)
        {
            pending.remove(product_id);
        }
        result
    }

    /// Number of products with a lookup in flight.
    pub fn len(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
