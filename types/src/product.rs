//! Product identifiers and the ledger's product record.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Timestamp, TypesError};

/// An opaque product identifier as typed or clicked by a user.
///
/// The only rule is non-emptiness after trimming; the ledger decides
/// everything else about the format.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    /// Parse a raw identifier, trimming surrounding whitespace.
    pub fn parse(raw: &str) -> Result<Self, TypesError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TypesError::EmptyProductId);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Return the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ProductId {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A product as recorded on the ledger.
///
/// Field names follow the backend's JSON body:
/// `{"product_id", "manufacturer", "current_owner", "registered_at"}`.
/// `manufacturer` and `current_owner` are Stellar account addresses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetails {
    pub product_id: String,
    pub manufacturer: String,
    pub current_owner: String,
    pub registered_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_whitespace() {
        let id = ProductId::parse("  NIKE-AIR-123456\t").unwrap();
        assert_eq!(id.as_str(), "NIKE-AIR-123456");
    }

    #[test]
    fn parse_rejects_blank_input() {
        assert_eq!(ProductId::parse(""), Err(TypesError::EmptyProductId));
        assert_eq!(ProductId::parse("   \n"), Err(TypesError::EmptyProductId));
    }

    #[test]
    fn deserializing_blank_id_fails() {
        let result: Result<ProductId, _> = serde_json::from_str(r#""  ""#);
        assert!(result.is_err());
    }

    #[test]
    fn details_deserialize_from_backend_body() {
        let json = r#"{
            "product_id": "NIKE-AIR-123456",
            "manufacturer": "GABCDEFGHIJKLMNOPQRSTUVWX",
            "current_owner": "GXYZ1234567890ABCDE",
            "registered_at": 1700000000
        }"#;
        let details: ProductDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.product_id, "NIKE-AIR-123456");
        assert_eq!(details.registered_at, Timestamp::new(1_700_000_000));
    }

    #[test]
    fn details_missing_field_is_rejected() {
        let json = r#"{"product_id": "X", "manufacturer": "M", "registered_at": 1}"#;
        let result: Result<ProductDetails, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
