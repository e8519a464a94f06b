// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.
//
// The source material left extraction and store calls unbounded; here both
// deadlines are explicit and documented so that no remote call can hang a
// capture session forever.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default deadline for one extraction attempt.
pub const DEFAULT_EXTRACTION_TIMEOUT_SECS: u64 = 30;

/// Default deadline for one record-store round-trip.
pub const DEFAULT_STORE_TIMEOUT_SECS: u64 = 15;

/// Connection settings for the remote record store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the remote persistence service.
    pub base_url: String,
    /// API key sent with every request.
    pub api_key: String,
    /// Collection (table) holding the records.
    pub table: String,
    /// Per-request deadline in seconds.
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            table: "id_scans".into(),
            timeout_secs: DEFAULT_STORE_TIMEOUT_SECS,
        }
    }
}

impl StoreConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Persistent application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub store: StoreConfig,
    /// Deadline for one extraction attempt, in seconds.
    pub extraction_timeout_secs: u64,
    /// Whether the captured image reference is kept on saved records.
    pub keep_image_reference: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            extraction_timeout_secs: DEFAULT_EXTRACTION_TIMEOUT_SECS,
            keep_image_reference: true,
        }
    }
}

impl AppConfig {
    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_bounded_deadlines() {
        let config = AppConfig::default();
        assert!(config.extraction_timeout() > Duration::ZERO);
        assert!(config.store.timeout() > Duration::ZERO);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).expect("serialize");
        let back: AppConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.store.table, "id_scans");
        assert_eq!(back.extraction_timeout_secs, config.extraction_timeout_secs);
    }
}
