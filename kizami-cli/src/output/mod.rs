//! Output formatting module

use anyhow::Result;
use kizami_api::Output;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and output one processed document
    fn document(&mut self, name: &str, output: &Output) -> Result<()>;

    /// Finalize output (e.g. close a JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;
