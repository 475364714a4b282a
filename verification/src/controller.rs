//! The verification controller: owns the UI store and drives lookups.

use legit_backend::{HttpBackend, LedgerBackend, LookupReply, TransportError};
use legit_types::ProductId;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::classify::classify;
use crate::coalesce::{InFlightLookups, LookupResult};
use crate::config::ClientConfig;
use crate::outcome::{SuspicionReason, VerificationOutcome};
use crate::render::{render_alert, render_badge, AlertView, BadgeView};
use crate::state::{BadgeState, ResultSlot, UiState, UiStore};
use crate::VerificationError;

/// Runs verification attempts and keeps the resulting UI state.
///
/// Attempts for different slots touch disjoint state and may run
/// concurrently. Two attempts on the same slot are not ordered: each
/// writes the slot when its reply arrives, so the later reply wins. The
/// store lock is never held across the lookup.
pub struct VerificationController {
    backend: Arc<dyn LedgerBackend>,
    store: Mutex<UiStore>,
    in_flight: Option<InFlightLookups>,
}

impl VerificationController {
    pub fn new(backend: Arc<dyn LedgerBackend>) -> Self {
        Self {
            backend,
            store: Mutex::new(UiStore::new()),
            in_flight: None,
        }
    }

    /// Build a controller talking HTTP to `config.backend_url`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, VerificationError> {
        let backend = HttpBackend::with_timeout(&config.backend_url, config.request_timeout())?;
        let controller = Self::new(Arc::new(backend));
        Ok(if config.coalesce_in_flight {
            controller.with_coalescing()
        } else {
            controller
        })
    }

    /// Share in-flight lookups between concurrent attempts for one product.
    pub fn with_coalescing(mut self) -> Self {
        self.in_flight = Some(InFlightLookups::new());
        self
    }

    pub fn backend(&self) -> &Arc<dyn LedgerBackend> {
        &self.backend
    }

    /// Verify `raw_id` and show the result in `slot`.
    ///
    /// A blank id yields [`VerificationOutcome::InvalidInput`] without a
    /// lookup. Network failures and malformed replies are logged and leave
    /// the slot on its loading message; the badge is not touched.
    pub async fn verify(&self, slot: ResultSlot, raw_id: &str) -> VerificationOutcome {
        let product_id = match ProductId::parse(raw_id) {
            Ok(id) => id,
            Err(_) => {
                let outcome = VerificationOutcome::InvalidInput;
                if let Some(state) = UiState::for_outcome(&outcome) {
                    self.store().set_slot(slot, state);
                }
                return outcome;
            }
        };

        self.store().set_slot(slot.clone(), UiState::loading());

        let result = self.lookup(&product_id).await;
        let outcome = classify(&result);

        {
            let mut store = self.store();
            if let Some(badge) = outcome.badge() {
                store.set_badge(product_id.clone(), badge);
            }
            if let Some(state) = UiState::for_outcome(&outcome) {
                store.set_slot(slot.clone(), state);
            }
        }

        log_outcome(&slot, &product_id, &outcome, &result);
        outcome
    }

    /// Verify a listed product in its own slot.
    pub async fn verify_listed(&self, product_id: &ProductId) -> VerificationOutcome {
        self.verify(ResultSlot::Product(product_id.clone()), product_id.as_str())
            .await
    }

    pub fn ui_state(&self, slot: &ResultSlot) -> UiState {
        self.store().slot(slot)
    }

    pub fn badge(&self, product_id: &ProductId) -> BadgeState {
        self.store().badge(product_id)
    }

    pub fn alert(&self, slot: &ResultSlot) -> Option<AlertView> {
        render_alert(&self.ui_state(slot))
    }

    pub fn badge_view(&self, product_id: &ProductId) -> Option<BadgeView> {
        render_badge(self.badge(product_id))
    }

    /// A copy of the whole store.
    pub fn snapshot(&self) -> UiStore {
        self.store().clone()
    }

    async fn lookup(&self, product_id: &ProductId) -> LookupResult {
        tracing::debug!(product_id = %product_id, backend = self.backend.name(), "dispatching lookup");
        match &self.in_flight {
            Some(in_flight) => in_flight.lookup(&self.backend, product_id).await,
            None => self.backend.fetch_product_details(product_id).await,
        }
    }

    fn store(&self) -> MutexGuard<'_, UiStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Every failed lookup is logged exactly once.
fn log_outcome(
    slot: &ResultSlot,
    product_id: &ProductId,
    outcome: &VerificationOutcome,
    result: &Result<LookupReply, TransportError>,
) {
    let Some(reason) = outcome.reason() else {
        tracing::info!(%slot, product_id = %product_id, "product verified on ledger");
        return;
    };

    let detail = match (reason, result) {
        (_, Err(e)) => e.to_string(),
        (SuspicionReason::MalformedResponse, Ok(reply)) => {
            format!("HTTP {} with unparseable body", reply.status)
        }
        (_, Ok(reply)) => format!("HTTP {}", reply.status),
    };

    tracing::error!(
        %slot,
        product_id = %product_id,
        reason = reason.as_str(),
        detail = %detail,
        "verification error"
    );
}
