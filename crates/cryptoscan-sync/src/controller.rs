//! System control state machine.
//!
//! Tracks the backend lifecycle state ({stopped, running, restarting})
//! and drives the start/stop/restart endpoints. Restart transitions to
//! `restarting` optimistically, then re-polls status once after a
//! settle window and adopts whatever the backend reports. While that
//! settle cycle is active the background status poller's results are
//! discarded, so the settle poll is the authoritative writer for its
//! cycle and cannot be clobbered by a tick that lands first.

use crate::cell::PollHandle;
use crate::error::{SyncError, SyncResult};
use cryptoscan_api::ApiClient;
use cryptoscan_core::SystemStatus;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Controller timing configuration.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Delay after a restart request before trusting a fresh status poll.
    pub settle_window: Duration,
    /// Background status poll period.
    pub poll_period: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            settle_window: Duration::from_millis(3000),
            poll_period: Duration::from_millis(10_000),
        }
    }
}

struct ControlState {
    status: SystemStatus,
    error: Option<String>,
}

/// Releases the busy flag when a control action finishes, whichever
/// path it exits through.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Marks a settle cycle; cleared on drop so a failed restart never
/// leaves the background poller suppressed.
struct SettleClaim<'a> {
    flag: &'a AtomicBool,
}

impl Drop for SettleClaim<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Owner of the system status resource and its control actions.
pub struct SystemController {
    api: Arc<ApiClient>,
    config: ControllerConfig,
    state: Mutex<ControlState>,
    busy: AtomicBool,
    settle_active: AtomicBool,
    closed: CancellationToken,
}

impl SystemController {
    pub fn new(api: Arc<ApiClient>, config: ControllerConfig) -> Self {
        Self {
            api,
            config,
            state: Mutex::new(ControlState {
                status: SystemStatus::Stopped,
                error: None,
            }),
            busy: AtomicBool::new(false),
            settle_active: AtomicBool::new(false),
            closed: CancellationToken::new(),
        }
    }

    pub fn status(&self) -> SystemStatus {
        self.state.lock().status
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    /// True while a control action (toggle or restart) is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn close(&self) {
        self.closed.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.is_cancelled()
    }

    fn check_open(&self) -> SyncResult<()> {
        if self.is_closed() {
            Err(SyncError::Closed)
        } else {
            Ok(())
        }
    }

    fn claim_busy(&self) -> SyncResult<BusyGuard<'_>> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(SyncError::Busy);
        }
        Ok(BusyGuard { flag: &self.busy })
    }

    /// Poll the backend's reported status.
    ///
    /// Used by the background poller. A completion that lands while a
    /// restart settle cycle is active is discarded; the settle logic
    /// owns the state for that cycle.
    pub async fn refresh(&self) -> SyncResult<SystemStatus> {
        self.check_open()?;
        let result = self.api.system_status().await;
        self.check_open()?;

        if self.settle_active.load(Ordering::Acquire) {
            debug!("Status poll discarded, restart settle cycle active");
            return Ok(self.status());
        }

        let mut state = self.state.lock();
        match result {
            Ok(status) => {
                state.status = status;
                state.error = None;
                Ok(status)
            }
            Err(e) => {
                state.error = Some(e.to_string());
                Err(SyncError::Api(e))
            }
        }
    }

    /// Start the system when stopped, stop it when running.
    ///
    /// On endpoint failure the state stays where it was and the error
    /// is recorded; no retry is attempted.
    pub async fn toggle(&self) -> SyncResult<SystemStatus> {
        self.check_open()?;
        let _busy = self.claim_busy()?;

        let current = self.status();
        let result = if current.is_running() {
            self.api
                .stop_system()
                .await
                .map(|()| SystemStatus::Stopped)
        } else {
            self.api
                .start_system()
                .await
                .map(|()| SystemStatus::Running)
        };

        self.check_open()?;
        let mut state = self.state.lock();
        match result {
            Ok(next) => {
                info!(from = %current, to = %next, "System toggled");
                state.status = next;
                state.error = None;
                Ok(next)
            }
            Err(e) => {
                warn!(%e, status = %current, "Toggle failed, state unchanged");
                state.error = Some(e.to_string());
                Err(SyncError::Api(e))
            }
        }
    }

    /// Restart the system.
    ///
    /// Transitions to `restarting` before the endpoint confirms. On
    /// endpoint failure the state falls back to `stopped`. On success,
    /// waits out the settle window and adopts the status the backend
    /// then reports (`stopped` again if that poll fails); the machine
    /// does not force a particular terminal state.
    pub async fn restart(&self) -> SyncResult<SystemStatus> {
        self.check_open()?;
        let _busy = self.claim_busy()?;

        self.settle_active.store(true, Ordering::Release);
        let _settle = SettleClaim {
            flag: &self.settle_active,
        };
        {
            let mut state = self.state.lock();
            state.status = SystemStatus::Restarting;
            state.error = None;
        }
        info!("Restart requested");

        let result = self.api.restart_system().await;
        self.check_open()?;

        if let Err(e) = result {
            let mut state = self.state.lock();
            state.status = SystemStatus::Stopped;
            state.error = Some(e.to_string());
            warn!(%e, "Restart request failed, falling back to stopped");
            return Err(SyncError::Api(e));
        }

        // Give the backend time to come back before trusting a poll.
        tokio::select! {
            _ = self.closed.cancelled() => return Err(SyncError::Closed),
            _ = tokio::time::sleep(self.config.settle_window) => {}
        }

        let settled = self.api.system_status().await;
        self.check_open()?;

        let mut state = self.state.lock();
        let final_status = match settled {
            Ok(status) => {
                state.error = None;
                status
            }
            Err(e) => {
                state.error = Some(e.to_string());
                SystemStatus::Stopped
            }
        };
        state.status = final_status;
        info!(status = %final_status, "Restart settled");
        Ok(final_status)
    }

    /// Spawn the background status poll loop (immediate poll, then one
    /// per configured period). The returned handle tears the loop down
    /// together with the controller.
    pub fn spawn_status_poller(self: &Arc<Self>) -> PollHandle {
        let controller = self.clone();
        let token = self.closed.clone();
        let loop_token = token.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(controller.config.poll_period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = loop_token.cancelled() => break,
                    _ = ticker.tick() => {
                        match controller.refresh().await {
                            Ok(_) => {}
                            Err(SyncError::Closed) => break,
                            Err(e) => debug!(%e, "Background status poll failed"),
                        }
                    }
                }
            }
        });
        PollHandle::new(token, task)
    }
}
