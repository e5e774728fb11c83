//! Client-side synchronization layer for the CryptoScan control panel.
//!
//! Each backend resource (status, config, watchlist, alerts, stats) is
//! owned by exactly one polling state container that fetches on
//! startup, refreshes on a fixed interval, and exposes loading/error
//! state. Containers never share values; each response replaces the
//! whole cached value atomically, and whichever response completes
//! last wins. Teardown cancels the poll timer deterministically and
//! late completions are discarded.
//!
//! System start/stop/restart runs through `SystemController`, a small
//! state machine that owns the optimistic `restarting` transition and
//! the post-restart settle window.

pub mod cell;
pub mod config_cell;
pub mod controller;
pub mod error;

pub use cell::{PollHandle, Poller, ResourceCell};
pub use config_cell::ConfigCell;
pub use controller::{ControllerConfig, SystemController};
pub use error::{SyncError, SyncResult};

use cryptoscan_core::SystemStatus;

/// Save the working config, then restart the backend.
///
/// Fail-fast: a save failure returns immediately and the restart call
/// is never issued, leaving the dirty flag set so the operator can
/// retry or discard.
pub async fn save_and_restart(
    config: &ConfigCell,
    controller: &SystemController,
) -> SyncResult<SystemStatus> {
    config.save().await?;
    controller.restart().await
}
