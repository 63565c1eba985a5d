//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use kizami_api::Output;
use std::io::Write;

/// Markdown formatter - one section per document, one subsection per chunk
pub struct MarkdownFormatter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputFormatter for MarkdownFormatter<W> {
    fn document(&mut self, name: &str, output: &Output) -> Result<()> {
        writeln!(self.writer, "# {name}")?;
        writeln!(self.writer)?;
        for (i, chunk) in output.chunks.iter().enumerate() {
            writeln!(
                self.writer,
                "## Chunk {} (page {}, ~{} tokens)",
                i + 1,
                chunk.page_number,
                chunk.estimated_tokens
            )?;
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", chunk.content)?;
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
