//! Config editing container.
//!
//! Holds two snapshots: the baseline (last state confirmed by the
//! backend) and the working copy the operator edits. The dirty flag is
//! derived: the working copy differs from the baseline. Edits never
//! touch the network; `save` sends the full working snapshot and, on
//! success, adopts it as the new baseline. A failed save keeps the
//! dirty flag set so the operator can retry or discard.

use crate::error::{SyncError, SyncResult};
use cryptoscan_api::ApiClient;
use cryptoscan_core::{ConfigSnapshot, ConfigValue};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

#[derive(Default)]
struct ConfigState {
    baseline: ConfigSnapshot,
    working: ConfigSnapshot,
    error: Option<String>,
    loading: bool,
    saving: bool,
}

/// Owner of the backend config resource.
pub struct ConfigCell {
    api: Arc<ApiClient>,
    state: Mutex<ConfigState>,
    closed: CancellationToken,
}

impl ConfigCell {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            state: Mutex::new(ConfigState::default()),
            closed: CancellationToken::new(),
        }
    }

    /// Working copy of the config.
    pub fn snapshot(&self) -> ConfigSnapshot {
        self.state.lock().working.clone()
    }

    pub fn get(&self, key: &str) -> Option<ConfigValue> {
        self.state.lock().working.get(key).cloned()
    }

    /// Edit one key locally. Does not contact the network.
    pub fn set(&self, key: impl Into<String>, raw: impl Into<String>) {
        self.state.lock().working.set(key, raw);
    }

    /// True when the working copy has diverged from the last snapshot
    /// the backend confirmed.
    pub fn is_dirty(&self) -> bool {
        let state = self.state.lock();
        state.working != state.baseline
    }

    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    pub fn is_saving(&self) -> bool {
        self.state.lock().saving
    }

    /// Throw away local edits and return to the baseline.
    pub fn discard(&self) {
        let mut state = self.state.lock();
        state.working = state.baseline.clone();
        debug!("Discarded local config edits");
    }

    pub fn close(&self) {
        self.closed.cancel();
    }

    fn check_open(&self) -> SyncResult<()> {
        if self.closed.is_cancelled() {
            Err(SyncError::Closed)
        } else {
            Ok(())
        }
    }

    /// Fetch the remote config, replacing baseline and working copy.
    /// Local edits are lost; callers should check `is_dirty` first if
    /// that matters to them.
    pub async fn load(&self) -> SyncResult<()> {
        self.check_open()?;
        self.state.lock().loading = true;

        let result = self.api.fetch_config().await;

        self.check_open()?;
        let mut state = self.state.lock();
        state.loading = false;
        match result {
            Ok(wire) => {
                let snapshot = ConfigSnapshot::from_wire(wire);
                state.baseline = snapshot.clone();
                state.working = snapshot;
                state.error = None;
                Ok(())
            }
            Err(e) => {
                state.error = Some(e.to_string());
                Err(SyncError::Api(e))
            }
        }
    }

    /// Save the working copy to the backend.
    pub async fn save(&self) -> SyncResult<()> {
        let snapshot = self.snapshot();
        self.save_snapshot(snapshot).await
    }

    /// Save a caller-supplied snapshot, adopting it as baseline and
    /// working copy on success.
    pub async fn save_snapshot(&self, snapshot: ConfigSnapshot) -> SyncResult<()> {
        self.check_open()?;
        self.state.lock().saving = true;

        let result = self.api.update_config(&snapshot.to_wire()).await;

        self.check_open()?;
        let mut state = self.state.lock();
        state.saving = false;
        match result {
            Ok(()) => {
                state.baseline = snapshot.clone();
                state.working = snapshot;
                state.error = None;
                info!(keys = state.baseline.len(), "Config saved");
                Ok(())
            }
            Err(e) => {
                // Dirty flag stays set (working != baseline); the
                // operator retries or discards.
                state.error = Some(e.to_string());
                Err(SyncError::Api(e))
            }
        }
    }
}
