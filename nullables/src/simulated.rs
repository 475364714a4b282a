//! Simulated backend for local development and demos.
//!
//! Answers from an in-memory catalogue with a randomized delay, the way the
//! demo page used to fake the service. Register and transfer follow the
//! ledger contract's rules: duplicate registrations fail with
//! `ProductAlreadyExists`, transfers need the current owner and an existing
//! product.

use async_trait::async_trait;
use legit_backend::{
    BackendError, LedgerBackend, LookupReply, OperationReceipt, RegisterProductRequest,
    TransferOwnershipRequest, TransportError,
};
use legit_types::{ProductDetails, ProductId, Timestamp};
use rand::Rng;
use std::collections::{HashMap, HashSet};
use std::ops::RangeInclusive;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Manufacturer account used for simulated registrations.
pub const DEMO_MANUFACTURER: &str = "GD23ZFKW4QLVX3TMDXE45RSUDGKJ6EL6TCXSE7RTMJEXKFS5INE7PSJ3";

/// Products registered on the simulated ledger at start-up.
pub const DEMO_REGISTERED: &[&str] = &["NIKE-AIR-123456", "ADIDAS-UB-789012", "ROLEX-SUB-345678"];

/// Products known to be counterfeit. They answer 404 like any unknown id.
pub const DEMO_COUNTERFEIT: &[&str] = &["FAKE-NIKE-000000", "COPY-ROLEX-999999"];

/// Id that always answers HTTP 500, for exercising the server-error path.
pub const DEMO_SERVER_ERROR: &str = "ERROR-500";

/// Default simulated latency in milliseconds.
const DEFAULT_DELAY_MS: RangeInclusive<u64> = 500..=1500;

/// Registration time of the start-up catalogue.
const DEMO_REGISTERED_AT: u64 = 1_700_000_000;

pub struct SimulatedBackend {
    catalogue: Mutex<HashMap<String, ProductDetails>>,
    counterfeit: HashSet<String>,
    manufacturer: String,
    delay_ms: RangeInclusive<u64>,
}

impl SimulatedBackend {
    /// The demo catalogue with the default randomized delay.
    pub fn new() -> Self {
        let catalogue = DEMO_REGISTERED
            .iter()
            .map(|id| {
                let details = ProductDetails {
                    product_id: id.to_string(),
                    manufacturer: DEMO_MANUFACTURER.to_string(),
                    current_owner: DEMO_MANUFACTURER.to_string(),
                    registered_at: Timestamp::new(DEMO_REGISTERED_AT),
                };
                (id.to_string(), details)
            })
            .collect();
        Self {
            catalogue: Mutex::new(catalogue),
            counterfeit: DEMO_COUNTERFEIT.iter().map(|s| s.to_string()).collect(),
            manufacturer: DEMO_MANUFACTURER.to_string(),
            delay_ms: DEFAULT_DELAY_MS,
        }
    }

    /// Answer without delay.
    pub fn instant() -> Self {
        Self::new().with_delay_ms(0..=0)
    }

    /// Delay each call by a random number of milliseconds in `range`.
    pub fn with_delay_ms(mut self, range: RangeInclusive<u64>) -> Self {
        self.delay_ms = range;
        self
    }

    pub fn is_counterfeit(&self, product_id: &str) -> bool {
        self.counterfeit.contains(product_id)
    }

    fn catalogue(&self) -> MutexGuard<'_, HashMap<String, ProductDetails>> {
        self.catalogue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn simulate_latency(&self) {
        let (lo, hi) = (*self.delay_ms.start(), *self.delay_ms.end());
        if hi == 0 || lo > hi {
            return;
        }
        let ms = rand::thread_rng().gen_range(lo..=hi);
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    fn rejected(detail: &str) -> BackendError {
        BackendError::Rejected {
            status: 500,
            detail: format!("Soroban CLI error: {detail}"),
        }
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerBackend for SimulatedBackend {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn fetch_product_details(
        &self,
        product_id: &ProductId,
    ) -> Result<LookupReply, TransportError> {
        self.simulate_latency().await;

        if product_id.as_str() == DEMO_SERVER_ERROR {
            return Ok(LookupReply::new(500, r#"{"detail":"simulated server error"}"#));
        }

        let found = self.catalogue().get(product_id.as_str()).cloned();
        let reply = match found {
            Some(details) => match serde_json::to_string(&details) {
                Ok(body) => LookupReply::new(200, body),
                Err(e) => LookupReply::new(500, format!(r#"{{"detail":"{e}"}}"#)),
            },
            None => {
                if self.is_counterfeit(product_id.as_str()) {
                    tracing::debug!(product_id = %product_id, "simulated counterfeit lookup");
                }
                LookupReply::new(404, r#"{"detail":"Not Found"}"#)
            }
        };
        Ok(reply)
    }

    async fn register_product(
        &self,
        request: &RegisterProductRequest,
    ) -> Result<OperationReceipt, BackendError> {
        self.simulate_latency().await;

        let mut catalogue = self.catalogue();
        if catalogue.contains_key(&request.product_id) {
            return Err(Self::rejected("ProductAlreadyExists"));
        }
        let registered_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        catalogue.insert(
            request.product_id.clone(),
            ProductDetails {
                product_id: request.product_id.clone(),
                manufacturer: self.manufacturer.clone(),
                current_owner: self.manufacturer.clone(),
                registered_at: Timestamp::new(registered_at),
            },
        );

        Ok(OperationReceipt {
            status: "success".into(),
            message: "Product registration initiated".into(),
            cli_output: "\"Product registered successfully\"".into(),
        })
    }

    async fn transfer_ownership(
        &self,
        request: &TransferOwnershipRequest,
    ) -> Result<OperationReceipt, BackendError> {
        self.simulate_latency().await;

        let mut catalogue = self.catalogue();
        let product = catalogue
            .get_mut(&request.product_id)
            .ok_or_else(|| Self::rejected("ProductNotFound"))?;
        if product.current_owner != request.current_owner_public_key {
            return Err(Self::rejected("NotAuthorized"));
        }
        product.current_owner = request.new_owner_public_key.clone();

        Ok(OperationReceipt {
            status: "success".into(),
            message: "Ownership transfer initiated".into(),
            cli_output: "\"Ownership transferred successfully\"".into(),
        })
    }

    async fn ping(&self) -> Result<String, BackendError> {
        Ok("Welcome to Product Authenticity Backend API (simulated)".to_string())
    }
}
