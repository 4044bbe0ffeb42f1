use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::CoreError;

/// Upper bound for the simulated report delay (one minute).
const MAX_REPORT_DELAY_MS: u64 = 60_000;

/// Session configuration. Every field has a default, so a partial JSON
/// document (or none at all) is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Currency in which holding prices and totals are shown (e.g., "RUB").
    pub currency: String,

    /// How long the simulated report backend "works" before completing.
    pub report_delay_ms: u64,

    /// Lower bound of the fabricated report size, in megabytes.
    pub report_size_min_mb: f64,

    /// Upper bound (exclusive) of the fabricated report size, in megabytes.
    pub report_size_max_mb: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: "RUB".to_string(),
            report_delay_ms: 2_000,
            report_size_min_mb: 0.5,
            report_size_max_mb: 5.5,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)
            .map_err(|e| CoreError::Config(format!("Failed to parse settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check every field is in a usable range.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CoreError::Config(format!(
                "Invalid currency code '{}': must be exactly 3 ASCII letters (e.g., RUB, USD, EUR)",
                self.currency
            )));
        }
        if self.report_delay_ms > MAX_REPORT_DELAY_MS {
            return Err(CoreError::Config(format!(
                "report_delay_ms of {} exceeds maximum of {MAX_REPORT_DELAY_MS}",
                self.report_delay_ms
            )));
        }
        if !(self.report_size_min_mb.is_finite() && self.report_size_min_mb > 0.0) {
            return Err(CoreError::Config(format!(
                "report_size_min_mb must be positive, got {}",
                self.report_size_min_mb
            )));
        }
        if !(self.report_size_max_mb.is_finite() && self.report_size_max_mb > self.report_size_min_mb) {
            return Err(CoreError::Config(format!(
                "report_size_max_mb ({}) must be greater than report_size_min_mb ({})",
                self.report_size_max_mb, self.report_size_min_mb
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn report_delay(&self) -> Duration {
        Duration::from_millis(self.report_delay_ms)
    }
}
