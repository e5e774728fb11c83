//! Panel configuration.

use crate::error::{PanelError, PanelResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Panel configuration, loaded from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Backend base URL.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Background status poll period (ms).
    #[serde(default = "default_status_poll_ms")]
    pub status_poll_ms: u64,
    /// Alerts poll period (ms).
    #[serde(default = "default_alerts_poll_ms")]
    pub alerts_poll_ms: u64,
    /// Watchlist poll period (ms).
    #[serde(default = "default_watchlist_poll_ms")]
    pub watchlist_poll_ms: u64,
    /// ML/system stats poll period (ms).
    #[serde(default = "default_stats_poll_ms")]
    pub stats_poll_ms: u64,
    /// Delay after a restart before trusting a status poll (ms).
    #[serde(default = "default_settle_window_ms")]
    pub settle_window_ms: u64,
    /// Period of the dashboard summary log line (ms).
    #[serde(default = "default_summary_interval_ms")]
    pub summary_interval_ms: u64,
    /// Maximum number of alerts fetched per poll.
    #[serde(default)]
    pub alerts_limit: Option<u32>,
    /// Substitute sample data when the backend is unreachable.
    /// Development convenience only; leave off in production so an
    /// outage looks like an outage.
    #[serde(default)]
    pub dev_fallbacks: bool,
}

fn default_api_base_url() -> String {
    cryptoscan_api::DEFAULT_BASE_URL.to_string()
}

fn default_status_poll_ms() -> u64 {
    10_000
}

fn default_alerts_poll_ms() -> u64 {
    5_000
}

fn default_watchlist_poll_ms() -> u64 {
    15_000
}

fn default_stats_poll_ms() -> u64 {
    15_000
}

fn default_settle_window_ms() -> u64 {
    3_000
}

fn default_summary_interval_ms() -> u64 {
    10_000
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            status_poll_ms: default_status_poll_ms(),
            alerts_poll_ms: default_alerts_poll_ms(),
            watchlist_poll_ms: default_watchlist_poll_ms(),
            stats_poll_ms: default_stats_poll_ms(),
            settle_window_ms: default_settle_window_ms(),
            summary_interval_ms: default_summary_interval_ms(),
            alerts_limit: None,
            dev_fallbacks: false,
        }
    }
}

impl PanelConfig {
    /// Load configuration, falling back to defaults when the file is
    /// absent.
    pub fn load(path: &str) -> PanelResult<Self> {
        if Path::new(path).exists() {
            Self::from_file(path)
        } else {
            tracing::warn!(path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> PanelResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PanelError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| PanelError::Config(format!("Failed to parse config: {e}")))
    }

    pub fn status_poll(&self) -> Duration {
        Duration::from_millis(self.status_poll_ms)
    }

    pub fn alerts_poll(&self) -> Duration {
        Duration::from_millis(self.alerts_poll_ms)
    }

    pub fn watchlist_poll(&self) -> Duration {
        Duration::from_millis(self.watchlist_poll_ms)
    }

    pub fn stats_poll(&self) -> Duration {
        Duration::from_millis(self.stats_poll_ms)
    }

    pub fn settle_window(&self) -> Duration {
        Duration::from_millis(self.settle_window_ms)
    }

    pub fn summary_interval(&self) -> Duration {
        Duration::from_millis(self.summary_interval_ms)
    }
}
