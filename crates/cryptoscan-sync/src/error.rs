//! Sync layer error types.

use cryptoscan_api::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A control action was requested while another is in flight.
    #[error("Control action already in flight")]
    Busy,

    /// The container was torn down; the operation result was discarded.
    #[error("Container is closed")]
    Closed,
}

pub type SyncResult<T> = Result<T, SyncError>;
