//! Client configuration with TOML file support.

use legit_utils::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::VerificationError;

/// Configuration for the verification client.
///
/// Can be loaded from a TOML file via [`ClientConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the backend verification service.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Overall request timeout in seconds. Unset means lookups wait for
    /// the backend indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Share one in-flight lookup between concurrent verifications of the
    /// same product.
    #[serde(default)]
    pub coalesce_in_flight: bool,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_backend_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, VerificationError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| VerificationError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, VerificationError> {
        toml::from_str(s).map_err(|e| VerificationError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, VerificationError> {
        toml::to_string_pretty(self).map_err(|e| VerificationError::Config(e.to_string()))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            request_timeout_secs: None,
            coalesce_in_flight: false,
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}
