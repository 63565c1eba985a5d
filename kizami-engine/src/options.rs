//! Chunking configuration

use crate::error::{ChunkError, Result};
use kizami_core::TokenMethod;

/// Unit in which [`ChunkingOptions::chunk_size`] is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeUnit {
    /// Unicode codepoints (not bytes).
    Characters,
    /// Approximate tokens.
    #[default]
    Tokens,
}

/// Options governing one chunking call.
///
/// Immutable while a call runs; a [`crate::Chunker`] additionally holds a
/// mutable default copy that callers can replace between calls.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkingOptions {
    /// Target size of each chunk, in [`SizeUnit`] units.
    pub chunk_size: usize,
    /// Unit for `chunk_size`.
    pub size_unit: SizeUnit,
    /// Fraction of a chunk's nominal size repeated at the start of the next
    /// chunk; must lie in `[0, 1)`.
    pub overlap_percentage: f64,
    /// Avoid splitting words across chunk boundaries.
    pub preserve_word_boundaries: bool,
    /// Token approximation method used in token mode.
    pub token_method: TokenMethod,
}

impl Default for ChunkingOptions {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            size_unit: SizeUnit::Tokens,
            overlap_percentage: 0.1,
            preserve_word_boundaries: true,
            token_method: TokenMethod::Simple,
        }
    }
}

impl ChunkingOptions {
    /// Options with the given size and overlap, keeping the remaining
    /// defaults.
    pub fn new(chunk_size: usize, overlap_percentage: f64) -> Self {
        Self {
            chunk_size,
            overlap_percentage,
            ..Self::default()
        }
    }

    /// Token-sized options.
    pub fn tokens(chunk_size: usize) -> Self {
        Self {
            chunk_size,
            size_unit: SizeUnit::Tokens,
            ..Self::default()
        }
    }

    /// Character-sized options.
    pub fn characters(chunk_size: usize) -> Self {
        Self {
            chunk_size,
            size_unit: SizeUnit::Characters,
            ..Self::default()
        }
    }

    /// Set the overlap fraction.
    pub fn with_overlap(mut self, overlap_percentage: f64) -> Self {
        self.overlap_percentage = overlap_percentage;
        self
    }

    /// Set whether word boundaries are preserved.
    pub fn with_word_boundaries(mut self, preserve: bool) -> Self {
        self.preserve_word_boundaries = preserve;
        self
    }

    /// Set the token approximation method.
    pub fn with_token_method(mut self, method: TokenMethod) -> Self {
        self.token_method = method;
        self
    }

    /// Reject unusable option combinations before any work happens.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(ChunkError::invalid("chunk size must be positive"));
        }
        if !(0.0..1.0).contains(&self.overlap_percentage) {
            return Err(ChunkError::invalid(format!(
                "overlap percentage {} outside [0, 1)",
                self.overlap_percentage
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = ChunkingOptions::default();
        assert_eq!(opts.chunk_size, 500);
        assert_eq!(opts.size_unit, SizeUnit::Tokens);
        assert!((opts.overlap_percentage - 0.1).abs() < f64::EPSILON);
        assert!(opts.preserve_word_boundaries);
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(ChunkingOptions::default().validate().is_ok());
        assert!(ChunkingOptions::characters(100).validate().is_ok());
        assert!(ChunkingOptions::new(1, 0.0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_size() {
        let err = ChunkingOptions::new(0, 0.1).validate().unwrap_err();
        assert!(matches!(err, ChunkError::InvalidParameter { .. }));
    }

    #[test]
    fn test_validate_rejects_bad_overlap() {
        assert!(ChunkingOptions::new(100, 1.0).validate().is_err());
        assert!(ChunkingOptions::new(100, -0.1).validate().is_err());
        assert!(ChunkingOptions::new(100, f64::NAN).validate().is_err());
        assert!(ChunkingOptions::new(100, 0.999).validate().is_ok());
    }
}
