//! Core algorithms for Unicode-aware text chunking
//!
//! This crate provides the leaf components of the kizami chunking engine:
//! byte-position UTF-8 decoding, the per-text [`UnicodeIndex`], word-boundary
//! search routines, and heuristic token estimation. It has no external
//! dependencies and performs no I/O.

#![warn(missing_docs)]

pub mod boundary;
pub mod decode;
pub mod token;
pub mod unicode_index;

// Re-export key types
pub use boundary::{CodepointSource, SearchDirection, Utf8Scanner};
pub use token::{TokenEstimator, TokenMethod, CHARS_PER_TOKEN};
pub use unicode_index::UnicodeIndex;
