//! Chunking orchestration for the kizami engine
//!
//! This crate turns decoded document text (optionally page-segmented) into
//! bounded, optionally overlapping chunks sized in characters or approximate
//! tokens. The leaf algorithms live in `kizami-core`; this layer adds
//! validation, the chunk iteration loops, multi-page assembly, statistics,
//! and runtime-toggled instrumentation.

#![warn(missing_docs)]

pub mod chunk;
pub mod chunker;
pub mod document;
pub mod error;
pub mod instrument;
pub mod options;

// Re-export key types
pub use chunk::TextChunk;
pub use chunker::Chunker;
pub use error::{ChunkError, Result};
pub use instrument::Instrument;
pub use options::{ChunkingOptions, SizeUnit};

// Re-export from core for convenience
pub use kizami_core::{TokenEstimator, TokenMethod};
