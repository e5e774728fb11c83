//! REST client for the CryptoScan monitoring backend.
//!
//! Two layers:
//! - `transport`: a thin `reqwest` wrapper that serializes JSON and
//!   turns every non-2xx response into an explicit error
//! - `bindings`: one typed method per backend capability
//!
//! No caching or retries here; that belongs to the polling containers
//! in `cryptoscan-sync`.

pub mod bindings;
pub mod error;
pub mod transport;

pub use bindings::{CountResponse, StatusResponse};
pub use error::{ApiError, ApiResult};
pub use transport::{ApiClient, DEFAULT_BASE_URL};
