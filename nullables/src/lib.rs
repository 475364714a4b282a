//! Nullable infrastructure for deterministic testing.
//!
//! Inspired by the "A-frame architecture" pattern: every external
//! dependency (here the backend service and the log sink) sits behind a
//! trait or a layer, and this crate provides implementations that:
//! - Return scripted or catalogue-driven values
//! - Can be controlled and inspected programmatically
//! - Never touch the network
//!
//! Usage: swap [`NullBackend`] or [`SimulatedBackend`] in for
//! `HttpBackend`, and install a [`LogCapture`] to assert on log events.

pub mod backend;
pub mod logs;
pub mod simulated;

pub use backend::{NullBackend, ScriptedReply};
pub use logs::{CapturedEvent, LogCapture};
pub use simulated::SimulatedBackend;
