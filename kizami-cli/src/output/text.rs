//! Human-readable text output

use super::OutputFormatter;
use anyhow::Result;
use kizami_api::Output;
use std::io::Write;

/// Text formatter - one header line per chunk followed by its content
pub struct TextFormatter<W: Write> {
    writer: W,
    documents: usize,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            documents: 0,
        }
    }
}

impl<W: Write> OutputFormatter for TextFormatter<W> {
    fn document(&mut self, name: &str, output: &Output) -> Result<()> {
        if self.documents > 0 {
            writeln!(self.writer)?;
        }
        self.documents += 1;
        writeln!(
            self.writer,
            "=== {name}: {} chunk(s) from {} page(s)",
            output.metadata.chunk_count, output.metadata.page_count
        )?;
        for (i, chunk) in output.chunks.iter().enumerate() {
            writeln!(
                self.writer,
                "--- chunk {i} (page {}, ~{} tokens, bytes {}..{})",
                chunk.page_number, chunk.estimated_tokens, chunk.start_index, chunk.end_index
            )?;
            writeln!(self.writer, "{}", chunk.content)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
