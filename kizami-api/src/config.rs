//! High-level configuration API

use crate::error::{ApiError, ApiResult};
use kizami_engine::{ChunkingOptions, SizeUnit, TokenMethod};

/// High-level configuration for chunk processing
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub(crate) options: ChunkingOptions,
    pub(crate) instrument: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            options: ChunkingOptions::default(),
            instrument: false,
        }
    }
}

impl Config {
    /// Preset tuned for embedding pipelines: 512-token chunks, 10% overlap.
    pub fn embedding() -> Self {
        Self {
            options: ChunkingOptions::tokens(512).with_overlap(0.1),
            instrument: false,
        }
    }

    /// Preset for small, dense chunks: 256 tokens, 5% overlap.
    pub fn compact() -> Self {
        Self {
            options: ChunkingOptions::tokens(256).with_overlap(0.05),
            instrument: false,
        }
    }

    /// Create a builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// The engine options this configuration resolves to
    pub fn chunking_options(&self) -> &ChunkingOptions {
        &self.options
    }
}

/// Configuration builder
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the chunk size (in the configured unit)
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.options.chunk_size = size;
        self
    }

    /// Size chunks in Unicode characters
    pub fn characters(mut self) -> Self {
        self.config.options.size_unit = SizeUnit::Characters;
        self
    }

    /// Size chunks in approximate tokens
    pub fn tokens(mut self) -> Self {
        self.config.options.size_unit = SizeUnit::Tokens;
        self
    }

    /// Set the overlap fraction in `[0, 1)`
    pub fn overlap_percentage(mut self, overlap: f64) -> Self {
        self.config.options.overlap_percentage = overlap;
        self
    }

    /// Set whether word boundaries are preserved
    pub fn preserve_word_boundaries(mut self, preserve: bool) -> Self {
        self.config.options.preserve_word_boundaries = preserve;
        self
    }

    /// Set the token approximation method
    pub fn token_method(mut self, method: TokenMethod) -> Self {
        self.config.options.token_method = method;
        self
    }

    /// Enable or disable runtime instrumentation
    pub fn instrument(mut self, enabled: bool) -> Self {
        self.config.instrument = enabled;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ApiResult<Config> {
        self.config
            .options
            .validate()
            .map_err(ApiError::Engine)?;
        Ok(self.config)
    }
}
