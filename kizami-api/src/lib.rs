//! Public API for kizami document chunking
//!
//! This crate provides a clean, stable interface over the chunking engine:
//! callers hand in text, bytes, a file path, or pre-segmented pages and get
//! back an ordered chunk list plus processing metadata. The engine itself
//! performs no I/O; everything source-shaped is resolved here.

#![warn(missing_docs)]

pub mod config;
pub mod dto;
pub mod error;
pub mod input;

use kizami_engine::{Chunker, Instrument, SizeUnit};
use std::time::Instant;

// Re-export key types
pub use config::{Config, ConfigBuilder};
pub use dto::{ChunkRecord, Metadata, Output};
pub use error::{ApiError, ApiResult};
pub use input::Input;
pub use kizami_engine::{ChunkingOptions, TokenMethod};

/// Main entry point for document chunking
///
/// Wraps an engine [`Chunker`] with input resolution and timing metadata.
/// The chunker's statistics are not synchronized; use one processor per
/// thread or add external synchronization for concurrent calls.
pub struct ChunkProcessor {
    chunker: Chunker,
    config: Config,
}

impl ChunkProcessor {
    /// Processor with default configuration
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Processor with custom configuration
    pub fn with_config(config: Config) -> Self {
        let chunker = Chunker::with_instrument(Instrument::new(config.instrument));
        Self { chunker, config }
    }

    /// Chunk the input and return the chunks with processing metadata
    pub fn process(&mut self, input: Input) -> ApiResult<Output> {
        let start = Instant::now();
        let pages = input.into_pages()?;
        let options = self.config.options.clone();

        let chunks = self.chunker.chunk_document(&pages, &options)?;

        let elapsed = start.elapsed();
        let total_bytes: usize = pages.iter().map(String::len).sum();
        let total_chars: usize = pages.iter().map(|p| p.chars().count()).sum();
        let metadata = Metadata {
            total_bytes,
            total_chars,
            page_count: pages.len(),
            chunk_count: chunks.len(),
            processing_time_ms: elapsed.as_secs_f64() * 1000.0,
            size_unit: match options.size_unit {
                SizeUnit::Characters => "characters".to_string(),
                SizeUnit::Tokens => "tokens".to_string(),
            },
        };

        Ok(Output {
            chunks: chunks.into_iter().map(ChunkRecord::from).collect(),
            metadata,
        })
    }

    /// Chunk a text string directly (convenience method)
    pub fn process_text(&mut self, text: &str) -> ApiResult<Output> {
        self.process(Input::from_text(text))
    }

    /// Number of chunks produced by the last operation
    pub fn chunk_count(&self) -> usize {
        self.chunker.chunk_count()
    }

    /// Total characters processed by the last operation
    pub fn total_characters(&self) -> usize {
        self.chunker.total_characters()
    }

    /// Reset the last-operation statistics
    pub fn reset_statistics(&mut self) {
        self.chunker.reset_statistics()
    }

    /// Current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Default for ChunkProcessor {
    fn default() -> Self {
        Self::new()
    }
}

// Convenience functions

/// Chunk text with the default configuration
pub fn chunk_text(text: &str) -> ApiResult<Output> {
    ChunkProcessor::new().process_text(text)
}

/// Chunk an ordered page sequence with the default configuration
pub fn chunk_pages<I, S>(pages: I) -> ApiResult<Output>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ChunkProcessor::new().process(Input::from_pages(pages))
}

/// Chunk a file's contents with the default configuration
pub fn chunk_file<P: AsRef<std::path::Path>>(path: P) -> ApiResult<Output> {
    ChunkProcessor::new().process(Input::from_file(path.as_ref().to_path_buf()))
}
