//! API client error types.

use thiserror::Error;

/// Failures surfaced by the transport. Callers treat all variants as
/// a single "the backend did not give us data" outcome; the variants
/// exist for logging and tests.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never completed (connect, timeout, TLS).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The backend answered 2xx but the body did not decode.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status code, if the backend rejected the request.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
