//! Core domain types for the CryptoScan control panel.
//!
//! This crate provides the types shared by the API client and the
//! synchronization layer:
//! - `SystemStatus`: backend lifecycle state
//! - `ConfigSnapshot`: typed view over the backend's string-encoded config
//! - `AlertRecord`, `WatchlistEntry`: backend record payloads
//! - `AlertFilter`: query filter with falsy-omitting serialization

pub mod config;
pub mod error;
pub mod filter;
pub mod records;
pub mod status;

pub use config::{ConfigKind, ConfigSnapshot, ConfigValue};
pub use error::{CoreError, Result};
pub use filter::AlertFilter;
pub use records::{
    AlertPatch, AlertRecord, MlStats, NewWatchlistEntry, SystemStats, WatchlistEntry,
    WatchlistPatch,
};
pub use status::SystemStatus;
