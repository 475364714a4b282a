//! Classified results of a verification attempt.

use legit_types::ProductDetails;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::state::BadgeState;

/// The classified result of one verification attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum VerificationOutcome {
    /// The product is registered on the ledger.
    Legit(ProductDetails),
    /// The lookup did not confirm the product.
    NotFoundOrSuspicious { reason: SuspicionReason },
    /// The identifier was blank; no lookup was made.
    InvalidInput,
}

/// Why a lookup failed to confirm a product.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuspicionReason {
    /// The backend answered 404.
    NotFound,
    /// The backend answered with any other non-2xx status.
    ServerError,
    /// The request never completed.
    NetworkError,
    /// The backend answered 2xx with a body that is not a product record.
    MalformedResponse,
}

impl SuspicionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::ServerError => "server_error",
            Self::NetworkError => "network_error",
            Self::MalformedResponse => "malformed_response",
        }
    }

    /// Whether the user sees this failure. Silent failures are only logged
    /// and leave the slot on its loading message.
    pub fn is_user_visible(&self) -> bool {
        matches!(self, Self::NotFound | Self::ServerError)
    }
}

impl fmt::Display for SuspicionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alert severity, mirroring the page's `alert-*` classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Success,
    Danger,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Success => "success",
            Self::Danger => "danger",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl VerificationOutcome {
    pub fn not_found() -> Self {
        Self::NotFoundOrSuspicious {
            reason: SuspicionReason::NotFound,
        }
    }

    pub fn server_error() -> Self {
        Self::NotFoundOrSuspicious {
            reason: SuspicionReason::ServerError,
        }
    }

    pub fn network_error() -> Self {
        Self::NotFoundOrSuspicious {
            reason: SuspicionReason::NetworkError,
        }
    }

    pub fn is_legit(&self) -> bool {
        matches!(self, Self::Legit(_))
    }

    /// The failure reason, if this is a failed lookup.
    pub fn reason(&self) -> Option<SuspicionReason> {
        match self {
            Self::NotFoundOrSuspicious { reason } => Some(*reason),
            _ => None,
        }
    }

    /// Severity of the terminal alert, or `None` when nothing is rendered.
    pub fn severity(&self) -> Option<Severity> {
        match self {
            Self::Legit(_) => Some(Severity::Success),
            Self::InvalidInput => Some(Severity::Warning),
            Self::NotFoundOrSuspicious { reason } if reason.is_user_visible() => {
                Some(Severity::Danger)
            }
            Self::NotFoundOrSuspicious { .. } => None,
        }
    }

    /// The badge this outcome writes, or `None` to leave the badge alone.
    pub fn badge(&self) -> Option<BadgeState> {
        match self {
            Self::Legit(_) => Some(BadgeState::LegitVerified),
            Self::NotFoundOrSuspicious { reason } if reason.is_user_visible() => {
                Some(BadgeState::Suspicious)
            }
            _ => None,
        }
    }
}
