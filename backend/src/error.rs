use thiserror::Error;

/// A lookup that never produced an HTTP response.
///
/// Cloneable so a single failed request can be handed to every caller
/// waiting on it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request aborted: {0}")]
    Aborted(String),
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("invalid backend URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to create HTTP client: {0}")]
    Client(String),

    #[error("backend unreachable: {0}")]
    Unreachable(#[from] TransportError),

    #[error("backend rejected request with HTTP {status}: {detail}")]
    Rejected { status: u16, detail: String },

    #[error("invalid response from backend: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout(e.to_string())
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else {
            TransportError::Aborted(e.to_string())
        }
    }
}
