//! Maps a lookup's result to a [`VerificationOutcome`].

use legit_backend::{LookupReply, TransportError};
use legit_types::ProductDetails;

use crate::outcome::{SuspicionReason, VerificationOutcome};

/// Classify the result of a single product lookup.
///
/// | Lookup result                    | Outcome                  |
/// |----------------------------------|--------------------------|
/// | transport failure                | `network_error`          |
/// | HTTP 404                         | `not_found`              |
/// | any other non-2xx                | `server_error`           |
/// | 2xx, body is a product record    | `Legit`                  |
/// | 2xx, body is anything else       | `malformed_response`     |
pub fn classify(result: &Result<LookupReply, TransportError>) -> VerificationOutcome {
    let reply = match result {
        Ok(reply) => reply,
        Err(_) => return VerificationOutcome::network_error(),
    };

    if !reply.is_success() {
        return if reply.status == 404 {
            VerificationOutcome::not_found()
        } else {
            VerificationOutcome::server_error()
        };
    }

    match serde_json::from_str::<ProductDetails>(&reply.body) {
        Ok(details) => VerificationOutcome::Legit(details),
        Err(_) => VerificationOutcome::NotFoundOrSuspicious {
            reason: SuspicionReason::MalformedResponse,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use legit_types::Timestamp;

    const NIKE_BODY: &str = r#"{"product_id":"NIKE-AIR-123456","manufacturer":"GABCDEFGHIJKLMNOPQRSTUVWX","current_owner":"GXYZ1234567890ABCDE","registered_at":1700000000}"#;

    fn reply(status: u16, body: &str) -> Result<LookupReply, TransportError> {
        Ok(LookupReply::new(status, body))
    }

    #[test]
    fn ok_with_product_record_is_legit() {
        let outcome = classify(&reply(200, NIKE_BODY));
        assert_eq!(
            outcome,
            VerificationOutcome::Legit(ProductDetails {
                product_id: "NIKE-AIR-123456".into(),
                manufacturer: "GABCDEFGHIJKLMNOPQRSTUVWX".into(),
                current_owner: "GXYZ1234567890ABCDE".into(),
                registered_at: Timestamp::new(1_700_000_000),
            })
        );
    }

    #[test]
    fn not_found_status() {
        assert_eq!(
            classify(&reply(404, r#"{"detail":"Not Found"}"#)),
            VerificationOutcome::not_found()
        );
    }

    #[test]
    fn other_failure_statuses_are_server_errors() {
        for status in [400, 401, 403, 409, 422, 500, 502, 503] {
            assert_eq!(
                classify(&reply(status, "")),
                VerificationOutcome::server_error(),
                "status {status}"
            );
        }
    }

    #[test]
    fn any_2xx_with_record_is_legit() {
        assert!(classify(&reply(203, NIKE_BODY)).is_legit());
    }

    #[test]
    fn transport_failure_is_network_error() {
        let result = Err(TransportError::Connect("connection refused".into()));
        assert_eq!(classify(&result), VerificationOutcome::network_error());
    }

    #[test]
    fn unparseable_success_body_is_malformed() {
        let outcome = classify(&reply(200, "<html>gateway</html>"));
        assert_eq!(outcome.reason(), Some(SuspicionReason::MalformedResponse));
    }

    #[test]
    fn success_body_missing_fields_is_malformed() {
        let outcome = classify(&reply(200, r#"{"product_id":"X"}"#));
        assert_eq!(outcome.reason(), Some(SuspicionReason::MalformedResponse));
    }
}
