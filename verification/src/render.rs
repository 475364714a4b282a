//! Pure projection of UI state into displayable alerts and badges.

use legit_types::ProductDetails;
use legit_utils::{format_timestamp, truncate_middle};
use serde::Serialize;

use crate::outcome::{Severity, SuspicionReason, VerificationOutcome};
use crate::state::{BadgeState, UiState};

pub const INVALID_INPUT_MESSAGE: &str = "Please enter a Product ID";
pub const NOT_FOUND_MESSAGE: &str =
    "Product not found. This product may be counterfeit or not registered.";
pub const SERVER_ERROR_MESSAGE: &str = "Error verifying product. Please try again later.";

/// Leading and trailing characters kept when shortening ledger addresses.
const ADDRESS_HEAD: usize = 10;
const ADDRESS_TAIL: usize = 5;

/// A visible alert panel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AlertView {
    pub severity: Severity,
    /// CSS class of the alert element, e.g. `alert alert-success`.
    pub class: String,
    /// Message lines joined with `\n`.
    pub message: String,
}

/// A visible product badge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BadgeView {
    pub class: &'static str,
    pub label: &'static str,
}

/// Render a slot. `Idle` renders nothing (the panel stays hidden).
pub fn render_alert(state: &UiState) -> Option<AlertView> {
    let (severity, message) = match state {
        UiState::Idle => return None,
        UiState::Loading { message } => (Severity::Info, message.clone()),
        UiState::Result { outcome, severity } => (*severity, outcome_message(outcome)),
    };
    Some(AlertView {
        severity,
        class: format!("alert alert-{severity}"),
        message,
    })
}

/// Render a badge. `Hidden` renders nothing.
pub fn render_badge(badge: BadgeState) -> Option<BadgeView> {
    match badge {
        BadgeState::Hidden => None,
        BadgeState::LegitVerified => Some(BadgeView {
            class: "legit-badge",
            label: "LEGIT VERIFIED",
        }),
        BadgeState::Suspicious => Some(BadgeView {
            class: "suspicious-badge",
            label: "SUSPICIOUS",
        }),
    }
}

fn outcome_message(outcome: &VerificationOutcome) -> String {
    match outcome {
        VerificationOutcome::Legit(details) => legit_message(details),
        VerificationOutcome::InvalidInput => INVALID_INPUT_MESSAGE.to_string(),
        VerificationOutcome::NotFoundOrSuspicious { reason } => match reason {
            SuspicionReason::NotFound => NOT_FOUND_MESSAGE.to_string(),
            // Silent reasons never reach a Result state; share the generic text.
            SuspicionReason::ServerError
            | SuspicionReason::NetworkError
            | SuspicionReason::MalformedResponse => SERVER_ERROR_MESSAGE.to_string(),
        },
    }
}

fn legit_message(details: &ProductDetails) -> String {
    [
        "✅ LEGIT VERIFIED".to_string(),
        format!("Product ID: {}", details.product_id),
        format!(
            "Manufacturer: {}",
            truncate_middle(&details.manufacturer, ADDRESS_HEAD, ADDRESS_TAIL)
        ),
        format!(
            "Current Owner: {}",
            truncate_middle(&details.current_owner, ADDRESS_HEAD, ADDRESS_TAIL)
        ),
        format!("Registered: {}", format_timestamp(details.registered_at)),
        String::new(),
        "Verified on Stellar/Soroban blockchain".to_string(),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use legit_types::Timestamp;

    fn nike() -> ProductDetails {
        ProductDetails {
            product_id: "NIKE-AIR-123456".into(),
            manufacturer: "GABCDEFGHIJKLMNOPQRSTUVWX".into(),
            current_owner: "GXYZ1234567890ABCDE".into(),
            registered_at: Timestamp::new(1_700_000_000),
        }
    }

    #[test]
    fn idle_renders_nothing() {
        assert_eq!(render_alert(&UiState::Idle), None);
    }

    #[test]
    fn loading_renders_info_alert() {
        let alert = render_alert(&UiState::loading()).unwrap();
        assert_eq!(alert.class, "alert alert-info");
        assert_eq!(alert.message, "Verifying product on blockchain...");
    }

    #[test]
    fn legit_message_shortens_addresses_and_formats_date() {
        let state = UiState::for_outcome(&VerificationOutcome::Legit(nike())).unwrap();
        let alert = render_alert(&state).unwrap();

        assert_eq!(alert.class, "alert alert-success");
        assert!(alert.message.starts_with("✅ LEGIT VERIFIED"));
        assert!(alert.message.contains("Product ID: NIKE-AIR-123456"));
        assert!(alert.message.contains("Manufacturer: GABCDEFGHI...TUVWX"));
        assert!(alert.message.contains("Current Owner: GXYZ123456...ABCDE"));
        assert!(alert.message.contains("Registered: 2023-11-14 22:13:20 UTC"));
        assert!(alert
            .message
            .ends_with("Verified on Stellar/Soroban blockchain"));
    }

    #[test]
    fn failures_render_danger_messages() {
        let not_found = UiState::for_outcome(&VerificationOutcome::not_found()).unwrap();
        let alert = render_alert(&not_found).unwrap();
        assert_eq!(alert.class, "alert alert-danger");
        assert_eq!(alert.message, NOT_FOUND_MESSAGE);

        let server = UiState::for_outcome(&VerificationOutcome::server_error()).unwrap();
        assert_eq!(render_alert(&server).unwrap().message, SERVER_ERROR_MESSAGE);
    }

    #[test]
    fn invalid_input_renders_warning() {
        let state = UiState::for_outcome(&VerificationOutcome::InvalidInput).unwrap();
        let alert = render_alert(&state).unwrap();
        assert_eq!(alert.class, "alert alert-warning");
        assert_eq!(alert.message, INVALID_INPUT_MESSAGE);
    }

    #[test]
    fn badges_render_labels() {
        assert_eq!(render_badge(BadgeState::Hidden), None);
        assert_eq!(
            render_badge(BadgeState::LegitVerified),
            Some(BadgeView {
                class: "legit-badge",
                label: "LEGIT VERIFIED"
            })
        );
        assert_eq!(render_badge(BadgeState::Suspicious).unwrap().label, "SUSPICIOUS");
    }
}
