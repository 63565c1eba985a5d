//! API error types

use kizami_engine::ChunkError;
use std::string::FromUtf8Error;
use thiserror::Error;

/// API-level errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Input could not be turned into text pages
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Why the input was rejected
        reason: String,
    },

    /// I/O error while reading an input source
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input bytes were not valid UTF-8
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] FromUtf8Error),

    /// Engine-level chunking error
    #[error("engine error: {0}")]
    Engine(#[from] ChunkError),
}

impl ApiError {
    /// Whether this error reports a caller-correctable parameter problem.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            ApiError::InvalidInput { .. } | ApiError::Engine(ChunkError::InvalidParameter { .. })
        )
    }
}

/// Result type for API operations
pub type ApiResult<T> = std::result::Result<T, ApiError>;
