//! HTTP client for the backend verification service.

use async_trait::async_trait;
use legit_types::ProductId;
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::{BackendError, TransportError};
use crate::transport::{LedgerBackend, LookupReply};
use crate::wire::{
    error_detail, OperationReceipt, RegisterProductRequest, TransferOwnershipRequest,
    WelcomeResponse,
};

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the Project Legit backend.
///
/// Sends `GET /get_product_details/{product_id}` for lookups. There is no
/// overall request timeout unless one is configured; lookups wait for the
/// backend to answer.
#[derive(Clone)]
pub struct HttpBackend {
    /// HTTP client (reusable connection pool).
    http_client: reqwest::Client,
    base_url: Url,
}

impl HttpBackend {
    /// Create a client for the backend at `base_url` (e.g. `http://localhost:8000`).
    pub fn new(base_url: &str) -> Result<Self, BackendError> {
        Self::with_timeout(base_url, None)
    }

    /// Create a client with an optional overall request timeout.
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self, BackendError> {
        let base_url = parse_base_url(base_url)?;
        let mut builder = reqwest::Client::builder().connect_timeout(DEFAULT_CONNECT_TIMEOUT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| BackendError::Client(e.to_string()))?;
        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// The configured backend URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the lookup endpoint for `product_id`.
    ///
    /// The id becomes one path segment; characters that would break out of
    /// the segment (`/`, `?`, `#`, spaces) are percent-encoded.
    pub fn lookup_url(&self, product_id: &ProductId) -> Url {
        self.endpoint(&["get_product_details", product_id.as_str()])
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if segments.is_empty() {
            return url;
        }
        // parse_base_url rejected cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn post_json<B, T>(&self, segment: &str, body: &B) -> Result<T, BackendError>
    where
        B: serde::Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(&[segment]);
        tracing::debug!(%url, "POST");
        let response = self
            .http_client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(TransportError::from)?;
        decode(response).await
    }
}

#[async_trait]
impl LedgerBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_product_details(
        &self,
        product_id: &ProductId,
    ) -> Result<LookupReply, TransportError> {
        let url = self.lookup_url(product_id);
        tracing::debug!(%url, "GET");

        let response = self.http_client.get(url).send().await?;
        let status = response.status();
        // Only a 2xx body is ever parsed; a failed status is classified on the code alone.
        let body = if status.is_success() {
            response.text().await?
        } else {
            response.text().await.unwrap_or_default()
        };
        Ok(LookupReply {
            status: status.as_u16(),
            body,
        })
    }

    async fn register_product(
        &self,
        request: &RegisterProductRequest,
    ) -> Result<OperationReceipt, BackendError> {
        self.post_json("register_product", request).await
    }

    async fn transfer_ownership(
        &self,
        request: &TransferOwnershipRequest,
    ) -> Result<OperationReceipt, BackendError> {
        self.post_json("transfer_ownership", request).await
    }

    async fn ping(&self) -> Result<String, BackendError> {
        let url = self.endpoint(&[]);
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(TransportError::from)?;
        let welcome: WelcomeResponse = decode(response).await?;
        Ok(welcome.message)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, BackendError> {
    let url = Url::parse(raw).map_err(|e| BackendError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(BackendError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: "expected an http(s) base URL".to_string(),
        });
    }
    Ok(url)
}

/// Turn a reply into `T`, or into [`BackendError::Rejected`] for non-2xx.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let status = response.status();
    let body = response.text().await.map_err(TransportError::from)?;

    if !status.is_success() {
        return Err(BackendError::Rejected {
            status: status.as_u16(),
            detail: error_detail(&body),
        });
    }

    serde_json::from_str(&body).map_err(|e| {
        BackendError::InvalidResponse(format!("failed to parse backend response: {e}"))
    })
}
