//! Panel orchestration.
//!
//! Wires one polling container per backend resource to the shared API
//! client, runs the system controller's background status poll, and
//! logs a dashboard summary on a fixed interval. Ctrl-C tears every
//! poll loop down before the process exits.

use crate::config::PanelConfig;
use crate::error::PanelResult;
use crate::samples;
use cryptoscan_api::ApiClient;
use cryptoscan_core::AlertFilter;
use cryptoscan_sync::{
    ConfigCell, ControllerConfig, PollHandle, Poller, ResourceCell, SystemController,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

/// The running panel: one API client shared by every container.
pub struct Panel {
    config: PanelConfig,
    api: Arc<ApiClient>,
}

impl Panel {
    pub fn new(config: PanelConfig) -> PanelResult<Self> {
        let api = Arc::new(ApiClient::new(&config.api_base_url)?);
        Ok(Self { config, api })
    }

    /// Run until Ctrl-C.
    pub async fn run(&self) -> PanelResult<()> {
        let controller = Arc::new(SystemController::new(
            self.api.clone(),
            ControllerConfig {
                settle_window: self.config.settle_window(),
                poll_period: self.config.status_poll(),
            },
        ));
        let status_poller = controller.spawn_status_poller();

        let config_cell = Arc::new(ConfigCell::new(self.api.clone()));
        if let Err(e) = config_cell.load().await {
            warn!(%e, "Initial config load failed, starting with empty snapshot");
        } else {
            info!(keys = config_cell.snapshot().len(), "Config loaded");
        }

        let filter = match self.config.alerts_limit {
            Some(limit) => AlertFilter::new().page(limit, 0),
            None => AlertFilter::new(),
        };

        let alerts = self.cell(self.config.dev_fallbacks.then_some(samples::sample_alerts));
        let api = self.api.clone();
        let alerts_poller = Poller::spawn(alerts.clone(), self.config.alerts_poll(), move || {
            let api = api.clone();
            let filter = filter.clone();
            async move { api.alerts(&filter).await }
        });

        let alerts_count = self.cell::<u64>(None);
        let alerts_count_poller = self.spawn(&alerts_count, self.config.alerts_poll(), |api| async move {
            api.alerts_count().await
        });

        let watchlist = self.cell(self.config.dev_fallbacks.then_some(samples::sample_watchlist));
        let watchlist_poller = self.spawn(&watchlist, self.config.watchlist_poll(), |api| async move {
            api.watchlist().await
        });

        let watchlist_count = self.cell::<u64>(None);
        let watchlist_count_poller =
            self.spawn(&watchlist_count, self.config.watchlist_poll(), |api| async move {
                api.watchlist_count().await
            });

        let ml_stats = self.cell(self.config.dev_fallbacks.then_some(samples::sample_ml_stats));
        let ml_stats_poller = self.spawn(&ml_stats, self.config.stats_poll(), |api| async move {
            api.ml_stats().await
        });

        let system_stats =
            self.cell(self.config.dev_fallbacks.then_some(samples::sample_system_stats));
        let system_stats_poller =
            self.spawn(&system_stats, self.config.stats_poll(), |api| async move {
                api.system_stats().await
            });

        info!(
            api_base_url = %self.config.api_base_url,
            dev_fallbacks = self.config.dev_fallbacks,
            "Panel running"
        );

        let mut summary = tokio::time::interval(self.config.summary_interval());
        summary.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown signal received");
                    break;
                }
                _ = summary.tick() => {
                    info!(
                        status = %controller.status(),
                        alerts = alerts_count.value().unwrap_or(0),
                        watchlist = watchlist_count.value().unwrap_or(0),
                        config_dirty = config_cell.is_dirty(),
                        alerts_fresh = alerts.is_fresh(),
                        "Dashboard summary"
                    );
                    if let Some(e) = controller.last_error() {
                        warn!(error = %e, "Backend status unavailable");
                    }
                }
            }
        }

        // Deterministic teardown: every timer stops now, and no late
        // completion may write afterwards.
        config_cell.close();
        for handle in [
            status_poller,
            alerts_poller,
            alerts_count_poller,
            watchlist_poller,
            watchlist_count_poller,
            ml_stats_poller,
            system_stats_poller,
        ] {
            handle.shutdown().await;
        }
        info!("Panel stopped");
        Ok(())
    }

    fn cell<T: Clone>(&self, fallback: Option<fn() -> T>) -> Arc<ResourceCell<T>>
    where
        T: Send + Sync + 'static,
    {
        match fallback {
            Some(provider) => Arc::new(ResourceCell::with_fallback(provider)),
            None => Arc::new(ResourceCell::new()),
        }
    }

    fn spawn<T, F, Fut>(
        &self,
        cell: &Arc<ResourceCell<T>>,
        period: Duration,
        fetch: F,
    ) -> PollHandle
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(Arc<ApiClient>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = cryptoscan_api::ApiResult<T>> + Send + 'static,
    {
        let api = self.api.clone();
        Poller::spawn(cell.clone(), period, move || fetch(api.clone()))
    }
}
