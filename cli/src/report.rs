//! Printable results of `legit verify`.

use legit_types::ProductId;
use legit_verification::{
    render_alert, render_badge, AlertView, BadgeView, ResultSlot, UiStore, VerificationOutcome,
};
use serde::Serialize;
use std::fmt::Write;

/// What one verified input ended up showing.
#[derive(Debug, Serialize)]
pub struct VerifyReport {
    pub input: String,
    pub outcome: VerificationOutcome,
    pub alert: Option<AlertView>,
    pub badge: Option<BadgeView>,
}

impl VerifyReport {
    /// Project the store's view of `input` after its attempt finished.
    pub fn collect(input: &str, outcome: VerificationOutcome, store: &UiStore) -> Self {
        let (slot, badge) = match ProductId::parse(input) {
            Ok(id) => {
                let badge = render_badge(store.badge(&id));
                (ResultSlot::Product(id), badge)
            }
            Err(_) => (ResultSlot::Main, None),
        };
        Self {
            input: input.to_string(),
            outcome,
            alert: render_alert(&store.slot(&slot)),
            badge,
        }
    }

    /// Human-readable block for terminal output.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let label = if self.input.trim().is_empty() {
            "(empty)"
        } else {
            self.input.trim()
        };
        let badge = self.badge.as_ref().map_or("-", |b| b.label);
        let _ = writeln!(out, "== {label} [{badge}]");
        if let Some(alert) = &self.alert {
            for line in alert.message.lines() {
                let _ = writeln!(out, "  {line}");
            }
        }
        out
    }
}
