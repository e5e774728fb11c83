//! Polling state container.
//!
//! A `ResourceCell<T>` owns the last-known value of one backend
//! resource plus its error slot. Concurrency rules:
//!
//! - Each completed fetch replaces the whole value under one lock;
//!   partial field merges cannot happen.
//! - Overlapping loads resolve by completion order: whichever response
//!   arrives last is the value kept, regardless of issue order.
//! - After `close()` no completion may write; late responses are
//!   discarded and the caller sees `SyncError::Closed`.
//! - A load failure keeps the stale value and records the error, so
//!   views keep showing the last good data instead of flickering
//!   empty. A cell built with a fallback provider substitutes the
//!   provider's value instead; that behavior is opt-in per cell
//!   because it can mask a real outage behind plausible data.

use crate::error::{SyncError, SyncResult};
use cryptoscan_api::ApiResult;
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

type FallbackProvider<T> = Box<dyn Fn() -> T + Send + Sync>;

struct CellState<T> {
    value: Option<T>,
    error: Option<String>,
    /// True when the value reflects the most recent completed load.
    fresh: bool,
    loads_in_flight: u32,
    completed_loads: u64,
}

impl<T> Default for CellState<T> {
    fn default() -> Self {
        Self {
            value: None,
            error: None,
            fresh: false,
            loads_in_flight: 0,
            completed_loads: 0,
        }
    }
}

/// Client-side owner of one backend resource's cached value.
pub struct ResourceCell<T> {
    state: Mutex<CellState<T>>,
    fallback: Option<FallbackProvider<T>>,
    closed: CancellationToken,
}

impl<T: Clone> Default for ResourceCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> ResourceCell<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(CellState::default()),
            fallback: None,
            closed: CancellationToken::new(),
        }
    }

    /// Cell that substitutes `provider()` for the value when a load
    /// fails. Intended for development builds only.
    pub fn with_fallback(provider: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self {
            fallback: Some(Box::new(provider)),
            ..Self::new()
        }
    }

    /// Last-known value, if any load has ever succeeded (or a fallback
    /// was substituted).
    pub fn value(&self) -> Option<T> {
        self.state.lock().value.clone()
    }

    /// Error from the most recent failed load, cleared on success.
    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().loads_in_flight > 0
    }

    /// False when the latest load failed and the value is stale.
    pub fn is_fresh(&self) -> bool {
        self.state.lock().fresh
    }

    /// Number of loads that have completed (success or failure).
    pub fn completed_loads(&self) -> u64 {
        self.state.lock().completed_loads
    }

    /// Tear the container down. The poll timer stops, and in-flight
    /// loads discard their results instead of writing.
    pub fn close(&self) {
        self.closed.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.is_cancelled()
    }

    pub(crate) fn closed_token(&self) -> CancellationToken {
        self.closed.clone()
    }

    /// Fetch the current value and reconcile it into the cell.
    ///
    /// On success the whole value is replaced and the error slot is
    /// cleared. On failure the previous value is retained (or the
    /// fallback substituted) and the error is recorded. No automatic
    /// retry; the next poll tick or caller action retries.
    pub async fn load<F, Fut>(&self, fetch: F) -> SyncResult<()>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        if self.is_closed() {
            return Err(SyncError::Closed);
        }
        self.state.lock().loads_in_flight += 1;

        let result = fetch().await;

        // A close raced completion: drop the response on the floor.
        if self.is_closed() {
            return Err(SyncError::Closed);
        }

        let mut state = self.state.lock();
        state.loads_in_flight = state.loads_in_flight.saturating_sub(1);
        state.completed_loads += 1;
        match result {
            Ok(value) => {
                state.value = Some(value);
                state.error = None;
                state.fresh = true;
                Ok(())
            }
            Err(e) => {
                state.error = Some(e.to_string());
                state.fresh = false;
                if let Some(provider) = &self.fallback {
                    state.value = Some(provider());
                }
                Err(SyncError::Api(e))
            }
        }
    }
}

/// Cancellation handle for a scheduled poll loop.
///
/// Returned at creation; invoking it (or dropping it) stops the timer
/// deterministically and closes the owning cell, so no completion can
/// land afterwards.
pub struct PollHandle {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    pub(crate) fn new(token: CancellationToken, task: JoinHandle<()>) -> Self {
        Self {
            token,
            task: Some(task),
        }
    }

    /// Stop the poll loop and close the cell.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Stop the poll loop and wait for the task to exit.
    pub async fn shutdown(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Scheduler for a `ResourceCell`.
pub struct Poller;

impl Poller {
    /// Spawn a poll loop: an immediate load, then one per `period`.
    ///
    /// A tick that fires while a load is still in flight is skipped,
    /// so at most one scheduled load is outstanding per cell and a
    /// hung request never stacks.
    pub fn spawn<T, F, Fut>(
        cell: Arc<ResourceCell<T>>,
        period: Duration,
        fetch: F,
    ) -> PollHandle
    where
        T: Clone + Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ApiResult<T>> + Send + 'static,
    {
        let token = cell.closed_token();
        let loop_token = token.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = loop_token.cancelled() => break,
                    _ = ticker.tick() => {
                        if cell.is_loading() {
                            debug!("Poll tick skipped, previous load still in flight");
                            continue;
                        }
                        match cell.load(&fetch).await {
                            Ok(()) => {}
                            Err(SyncError::Closed) => break,
                            Err(e) => warn!(%e, "Poll load failed, keeping stale value"),
                        }
                    }
                }
            }
        });
        PollHandle::new(token, task)
    }
}
