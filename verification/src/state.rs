//! UI state for verification attempts, held as plain data.

use legit_types::ProductId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::outcome::{Severity, VerificationOutcome};

/// Message shown while a lookup is in flight.
pub const LOADING_MESSAGE: &str = "Verifying product on blockchain...";

/// A result panel on the page.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSlot {
    /// The free-text input with its verify button.
    Main,
    /// The container of one listed product.
    Product(ProductId),
}

impl fmt::Display for ResultSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Main => f.write_str("main"),
            Self::Product(id) => write!(f, "product:{id}"),
        }
    }
}

/// What one result panel currently shows.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum UiState {
    /// Nothing verified yet; the panel is hidden.
    #[default]
    Idle,
    /// A lookup was dispatched. Severity is always info.
    Loading { message: String },
    /// A terminal result.
    Result {
        outcome: VerificationOutcome,
        severity: Severity,
    },
}

impl UiState {
    pub fn loading() -> Self {
        Self::Loading {
            message: LOADING_MESSAGE.to_string(),
        }
    }

    /// The terminal state for `outcome`, or `None` for silent failures.
    pub fn for_outcome(outcome: &VerificationOutcome) -> Option<Self> {
        outcome.severity().map(|severity| Self::Result {
            outcome: outcome.clone(),
            severity,
        })
    }

    pub fn severity(&self) -> Option<Severity> {
        match self {
            Self::Idle => None,
            Self::Loading { .. } => Some(Severity::Info),
            Self::Result { severity, .. } => Some(*severity),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

/// Last-known verification status of a listed product.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeState {
    #[default]
    Hidden,
    LegitVerified,
    Suspicious,
}

/// Every slot's [`UiState`] and every product's [`BadgeState`].
///
/// Absent entries read as `Idle` / `Hidden`. Badges never revert on their
/// own: only a later lookup for the same product overwrites one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiStore {
    slots: HashMap<ResultSlot, UiState>,
    badges: HashMap<ProductId, BadgeState>,
}

impl UiStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, slot: &ResultSlot) -> UiState {
        self.slots.get(slot).cloned().unwrap_or_default()
    }

    pub fn set_slot(&mut self, slot: ResultSlot, state: UiState) {
        self.slots.insert(slot, state);
    }

    pub fn badge(&self, product_id: &ProductId) -> BadgeState {
        self.badges.get(product_id).copied().unwrap_or_default()
    }

    pub fn set_badge(&mut self, product_id: ProductId, badge: BadgeState) {
        self.badges.insert(product_id, badge);
    }

    /// Products whose badge has been written, in no particular order.
    pub fn badges(&self) -> impl Iterator<Item = (&ProductId, &BadgeState)> {
        self.badges.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> ProductId {
        ProductId::parse(raw).unwrap()
    }

    #[test]
    fn empty_store_reads_idle_and_hidden() {
        let store = UiStore::new();
        assert_eq!(store.slot(&ResultSlot::Main), UiState::Idle);
        assert_eq!(store.badge(&id("ANY")), BadgeState::Hidden);
    }

    #[test]
    fn slots_are_independent() {
        let mut store = UiStore::new();
        store.set_slot(ResultSlot::Product(id("A")), UiState::loading());
        assert!(store.slot(&ResultSlot::Product(id("A"))).is_loading());
        assert_eq!(store.slot(&ResultSlot::Product(id("B"))), UiState::Idle);
        assert_eq!(store.slot(&ResultSlot::Main), UiState::Idle);
    }

    #[test]
    fn badge_overwrite_is_last_write() {
        let mut store = UiStore::new();
        store.set_badge(id("A"), BadgeState::Suspicious);
        store.set_badge(id("A"), BadgeState::LegitVerified);
        assert_eq!(store.badge(&id("A")), BadgeState::LegitVerified);
        assert_eq!(store.badges().count(), 1);
    }

    #[test]
    fn loading_is_info() {
        assert_eq!(UiState::loading().severity(), Some(Severity::Info));
        assert_eq!(UiState::Idle.severity(), None);
    }

    #[test]
    fn silent_outcomes_have_no_terminal_state() {
        assert_eq!(UiState::for_outcome(&VerificationOutcome::network_error()), None);
        assert_eq!(
            UiState::for_outcome(&VerificationOutcome::InvalidInput),
            Some(UiState::Result {
                outcome: VerificationOutcome::InvalidInput,
                severity: Severity::Warning,
            })
        );
    }
}
