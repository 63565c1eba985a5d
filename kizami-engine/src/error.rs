//! Engine error types

use thiserror::Error;

/// Errors reported by the chunking engine.
#[derive(Error, Debug)]
pub enum ChunkError {
    /// The caller supplied an unusable parameter (empty input, zero chunk
    /// size, out-of-range overlap). Always correctable by the caller; no
    /// partial output is produced.
    #[error("invalid parameter: {reason}")]
    InvalidParameter {
        /// What was wrong with the input
        reason: String,
    },

    /// Defensive catch-all for an unexpected internal fault. This signals
    /// an implementation defect, not an expected runtime condition, and
    /// never masks partial results.
    #[error("chunk processing failed: {reason}")]
    ProcessingFailed {
        /// What went wrong internally
        reason: String,
    },
}

impl ChunkError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        ChunkError::InvalidParameter {
            reason: reason.into(),
        }
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, ChunkError>;
