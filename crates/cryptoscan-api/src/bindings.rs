//! Typed bindings for each backend capability.
//!
//! Each method is a pure mapping from call to HTTP request with a
//! fixed endpoint; failure handling, caching and scheduling live in
//! the layer above. Endpoint surface:
//!
//! ```text
//! GET  /api/system/status        POST /api/system/{start,stop,restart}
//! GET  /api/config               PUT  /api/config
//! GET  /api/watchlist[/count]    POST /api/watchlist
//! PUT/DELETE /api/watchlist/{id}
//! GET  /api/alerts[?filters]     GET  /api/alerts/count
//! PUT  /api/alerts/{id}
//! GET  /api/ml/stats             POST /api/ml/retrain
//! GET  /api/stats
//! ```

use crate::error::ApiResult;
use crate::transport::ApiClient;
use cryptoscan_core::{
    AlertFilter, AlertPatch, AlertRecord, MlStats, NewWatchlistEntry, SystemStats, SystemStatus,
    WatchlistEntry, WatchlistPatch,
};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Response shape of `GET /api/system/status`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StatusResponse {
    pub status: SystemStatus,
}

/// Response shape of the `/count` endpoints.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CountResponse {
    pub count: u64,
}

impl ApiClient {
    // --- System control ---

    pub async fn system_status(&self) -> ApiResult<SystemStatus> {
        let response: StatusResponse = self.get_json("/api/system/status").await?;
        Ok(response.status)
    }

    pub async fn start_system(&self) -> ApiResult<()> {
        self.post_empty("/api/system/start").await
    }

    pub async fn stop_system(&self) -> ApiResult<()> {
        self.post_empty("/api/system/stop").await
    }

    pub async fn restart_system(&self) -> ApiResult<()> {
        self.post_empty("/api/system/restart").await
    }

    // --- Config ---

    /// Full config as the wire map (string key to string value).
    pub async fn fetch_config(&self) -> ApiResult<BTreeMap<String, String>> {
        self.get_json("/api/config").await
    }

    /// Replace the remote config with `config` (full map, not a patch).
    pub async fn update_config(&self, config: &BTreeMap<String, String>) -> ApiResult<()> {
        self.put_json("/api/config", config).await
    }

    // --- Watchlist ---

    pub async fn watchlist(&self) -> ApiResult<Vec<WatchlistEntry>> {
        self.get_json("/api/watchlist").await
    }

    pub async fn watchlist_count(&self) -> ApiResult<u64> {
        let response: CountResponse = self.get_json("/api/watchlist/count").await?;
        Ok(response.count)
    }

    pub async fn add_watchlist_entry(&self, entry: &NewWatchlistEntry) -> ApiResult<()> {
        self.post_json("/api/watchlist", entry).await
    }

    pub async fn update_watchlist_entry(&self, id: i64, patch: &WatchlistPatch) -> ApiResult<()> {
        self.put_json(&format!("/api/watchlist/{id}"), patch).await
    }

    pub async fn remove_watchlist_entry(&self, id: i64) -> ApiResult<()> {
        self.delete(&format!("/api/watchlist/{id}")).await
    }

    // --- Alerts ---

    /// Filtered alert list. Empty filter fields are omitted from the
    /// query entirely (see `AlertFilter::to_query`).
    pub async fn alerts(&self, filter: &AlertFilter) -> ApiResult<Vec<AlertRecord>> {
        self.get_json_with_query("/api/alerts", &filter.to_query())
            .await
    }

    pub async fn alerts_count(&self) -> ApiResult<u64> {
        let response: CountResponse = self.get_json("/api/alerts/count").await?;
        Ok(response.count)
    }

    pub async fn update_alert(&self, id: i64, patch: &AlertPatch) -> ApiResult<()> {
        self.put_json(&format!("/api/alerts/{id}"), patch).await
    }

    // --- ML ---

    pub async fn ml_stats(&self) -> ApiResult<MlStats> {
        self.get_json("/api/ml/stats").await
    }

    pub async fn retrain_model(&self) -> ApiResult<()> {
        self.post_empty("/api/ml/retrain").await
    }

    // --- Stats ---

    pub async fn system_stats(&self) -> ApiResult<SystemStats> {
        self.get_json("/api/stats").await
    }
}
