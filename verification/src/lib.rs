//! Product authenticity verification.
//!
//! One verification attempt:
//! 1. **Validate**: a blank product id never reaches the network.
//! 2. **Look up**: one `GET /get_product_details/{id}` through a [`LedgerBackend`].
//! 3. **Classify**: status and body map to a [`VerificationOutcome`] (pure).
//! 4. **Apply**: the outcome updates the slot's [`UiState`] and the product's
//!    [`BadgeState`] in the [`UiStore`].
//!
//! Rendering is a pure projection of the store; nothing here touches a real UI.
//!
//! [`LedgerBackend`]: legit_backend::LedgerBackend

pub mod classify;
pub mod coalesce;
pub mod config;
pub mod controller;
pub mod error;
pub mod outcome;
pub mod render;
pub mod state;

pub use classify::classify;
pub use coalesce::InFlightLookups;
pub use config::ClientConfig;
pub use controller::VerificationController;
pub use error::VerificationError;
pub use outcome::{Severity, SuspicionReason, VerificationOutcome};
pub use render::{render_alert, render_badge, AlertView, BadgeView};
pub use state::{BadgeState, ResultSlot, UiState, UiStore};
