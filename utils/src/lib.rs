//! Shared utilities for Project Legit.

pub mod logging;
pub mod text;
pub mod time;

pub use logging::{init_logging, LogFormat};
pub use text::truncate_middle;
pub use time::format_timestamp;
