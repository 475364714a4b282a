//! Time formatting helpers.

use chrono::DateTime;
use legit_types::Timestamp;

/// Format a ledger timestamp as a human-readable UTC date.
///
/// `1700000000` renders as `2023-11-14 22:13:20 UTC`. Values outside
/// chrono's representable range fall back to the raw seconds.
pub fn format_timestamp(ts: Timestamp) -> String {
    i64::try_from(ts.as_secs())
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| ts.to_string())
}
