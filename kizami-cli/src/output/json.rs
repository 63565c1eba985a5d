//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use kizami_api::{ChunkRecord, Metadata, Output};
use serde::Serialize;
use std::io::Write;

/// JSON formatter - outputs documents as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    documents: Vec<DocumentData>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize)]
pub struct DocumentData {
    /// Source file name (or "-" for stdin)
    pub file: String,
    /// Processing metadata
    pub metadata: Metadata,
    /// Chunk records
    pub chunks: Vec<ChunkRecord>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            documents: Vec::new(),
        }
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn document(&mut self, name: &str, output: &Output) -> Result<()> {
        self.documents.push(DocumentData {
            file: name.to_string(),
            metadata: output.metadata.clone(),
            chunks: output.chunks.clone(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.documents)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
