//! Sample data for development fallbacks.
//!
//! When `dev_fallbacks` is enabled and the backend is unreachable, the
//! panel substitutes these records so the dashboard stays populated
//! while working on it offline. Never enabled by default.

use cryptoscan_core::{AlertRecord, MlStats, SystemStats, WatchlistEntry};

pub fn sample_alerts() -> Vec<AlertRecord> {
    vec![
        AlertRecord {
            id: 1,
            symbol: "BTCUSDT".to_string(),
            alert_type: "volume_spike".to_string(),
            price: 45_123.45,
            message: "Volume spike 5.2x above average".to_string(),
            volume_ratio: 5.2,
            current_volume_usdt: 1_250_000.0,
            average_volume_usdt: 240_000.0,
            consecutive_count: 3,
            status: "new".to_string(),
            ..Default::default()
        },
        AlertRecord {
            id: 2,
            symbol: "ETHUSDT".to_string(),
            alert_type: "wash_trading".to_string(),
            price: 2_890.12,
            message: "Repetitive self-matching pattern detected".to_string(),
            status: "new".to_string(),
            is_true_signal: Some(true),
            ..Default::default()
        },
    ]
}

pub fn sample_watchlist() -> Vec<WatchlistEntry> {
    vec![
        WatchlistEntry {
            id: 1,
            symbol: "SOLUSDT".to_string(),
            price_drop: 12.5,
            current_price: 98.40,
            historical_price: 112.50,
            is_active: true,
            ..Default::default()
        },
        WatchlistEntry {
            id: 2,
            symbol: "DOGEUSDT".to_string(),
            price_drop: 8.1,
            current_price: 0.081,
            historical_price: 0.088,
            is_active: false,
            ..Default::default()
        },
    ]
}

pub fn sample_ml_stats() -> MlStats {
    MlStats {
        total_training_data: 1_540,
        model_accuracy: 0.87,
        last_training: Some("2h ago".to_string()),
        predictions_today: 42,
    }
}

pub fn sample_system_stats() -> SystemStats {
    SystemStats {
        uptime: 3_600.0,
        active_connections: 12,
        processed_trades: 125_000,
        memory_usage: 42.0,
        cpu_usage: 17.5,
    }
}
