//! JSON bodies exchanged with the backend, apart from the lookup reply
//! itself (see [`legit_types::ProductDetails`]).

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterProductRequest {
    pub product_id: String,
}

/// The contract requires `current_owner_public_key` to authorize the move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOwnershipRequest {
    pub product_id: String,
    pub current_owner_public_key: String,
    pub new_owner_public_key: String,
}

/// Reply to a state-changing call.
///
/// `cli_output` is whatever the contract invocation printed; it is opaque.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationReceipt {
    pub status: String,
    pub message: String,
    #[serde(default)]
    pub cli_output: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WelcomeResponse {
    pub message: String,
}

/// Error body of a non-2xx reply (`{"detail": "..."}`).
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: serde_json::Value,
}

/// Extract a readable reason from a non-2xx body, falling back to the raw text.
pub(crate) fn error_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: serde_json::Value::String(s),
        }) => s,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) => body.trim().to_string(),
    }
}
