//! Panel error types.

use cryptoscan_api::ApiError;
use cryptoscan_sync::SyncError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Sync(#[from] SyncError),
}

pub type PanelResult<T> = Result<T, PanelError>;
