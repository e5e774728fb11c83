//! Backend record payloads.
//!
//! These are read-mostly records fetched over REST. The sync layer
//! treats them as opaque: fields are deserialized as-is and never
//! normalized or validated beyond what serde requires. Nested detector
//! payloads (order book snapshots, candle data) stay as raw JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A manipulation alert produced by the detection backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertRecord {
    pub id: i64,
    pub symbol: String,
    pub alert_type: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub alert_timestamp_ms: i64,
    #[serde(default)]
    pub alert_start_time: Option<String>,
    #[serde(default)]
    pub alert_end_time: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub volume_ratio: f64,
    #[serde(default)]
    pub current_volume_usdt: f64,
    #[serde(default)]
    pub average_volume_usdt: f64,
    #[serde(default)]
    pub consecutive_count: i64,
    #[serde(default)]
    pub grouped_alerts_count: i64,
    #[serde(default)]
    pub is_grouped: bool,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub has_imbalance: bool,
    #[serde(default)]
    pub imbalance_data: Option<serde_json::Value>,
    #[serde(default)]
    pub candle_data: Option<serde_json::Value>,
    #[serde(default)]
    pub order_book_snapshot: Option<serde_json::Value>,
    #[serde(default)]
    pub trade_history: Option<serde_json::Value>,
    #[serde(default)]
    pub status: String,
    /// None until an operator or the ML pipeline labels the alert.
    #[serde(default)]
    pub is_true_signal: Option<bool>,
    #[serde(default)]
    pub predicted_price_change: Option<f64>,
    #[serde(default)]
    pub predicted_direction: Option<String>,
    #[serde(default)]
    pub ml_source_alert_type: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Mutation payload for `PUT /api/alerts/{id}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AlertPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_true_signal: Option<bool>,
}

/// A tracked symbol on the watchlist.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub id: i64,
    pub symbol: String,
    #[serde(default)]
    pub price_drop: f64,
    #[serde(default)]
    pub current_price: f64,
    #[serde(default)]
    pub historical_price: f64,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub added_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Creation payload for `POST /api/watchlist`.
#[derive(Debug, Clone, Serialize)]
pub struct NewWatchlistEntry {
    pub symbol: String,
    pub price_drop: f64,
    pub current_price: f64,
    pub historical_price: f64,
}

/// Mutation payload for `PUT /api/watchlist/{id}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WatchlistPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

/// ML pipeline statistics from `GET /api/ml/stats`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MlStats {
    #[serde(default)]
    pub total_training_data: u64,
    #[serde(default)]
    pub model_accuracy: f64,
    #[serde(default)]
    pub last_training: Option<String>,
    #[serde(default)]
    pub predictions_today: u64,
}

/// Backend resource/uptime statistics from `GET /api/stats`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemStats {
    #[serde(default)]
    pub uptime: f64,
    #[serde(default)]
    pub active_connections: u64,
    #[serde(default)]
    pub processed_trades: u64,
    #[serde(default)]
    pub memory_usage: f64,
    #[serde(default)]
    pub cpu_usage: f64,
}
