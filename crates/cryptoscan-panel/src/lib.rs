//! Headless CryptoScan control panel.
//!
//! Composes the synchronization layer into a running process: a
//! background poller per backend resource, the system controller, and
//! a periodic summary rendered to the structured log.

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod samples;

pub use app::Panel;
pub use config::PanelConfig;
pub use error::{PanelError, PanelResult};
pub use logging::init_logging;
