//! Data transfer objects for the public API

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use kizami_engine::TextChunk;

/// One chunk as returned across the public boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChunkRecord {
    /// Chunk text, trimmed of surrounding whitespace
    pub content: String,
    /// Byte offset of the chunk's start in the logical document
    pub start_index: usize,
    /// Byte offset just past the chunk's end in the logical document
    pub end_index: usize,
    /// Zero-based page the chunk starts on
    pub page_number: usize,
    /// Heuristic token count of the content
    pub estimated_tokens: usize,
}

impl From<TextChunk> for ChunkRecord {
    fn from(chunk: TextChunk) -> Self {
        Self {
            content: chunk.content,
            start_index: chunk.start_index,
            end_index: chunk.end_index,
            page_number: chunk.page_number,
            estimated_tokens: chunk.estimated_tokens,
        }
    }
}

/// Processing metadata for one chunking call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Metadata {
    /// Total bytes across all input pages
    pub total_bytes: usize,
    /// Total codepoints across all input pages
    pub total_chars: usize,
    /// Number of pages in the input
    pub page_count: usize,
    /// Number of chunks produced
    pub chunk_count: usize,
    /// Wall-clock processing time in milliseconds
    pub processing_time_ms: f64,
    /// Sizing unit that was used ("characters" or "tokens")
    pub size_unit: String,
}

/// Rich output of one chunking call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Output {
    /// Ordered chunk records
    pub chunks: Vec<ChunkRecord>,
    /// Processing metadata
    pub metadata: Metadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_chunk() {
        let chunk = TextChunk {
            content: "text".to_string(),
            start_index: 3,
            end_index: 9,
            page_number: 1,
            estimated_tokens: 1,
        };
        let record = ChunkRecord::from(chunk);
        assert_eq!(record.content, "text");
        assert_eq!(record.start_index, 3);
        assert_eq!(record.page_number, 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_record_serializes() {
        let record = ChunkRecord {
            content: "text".to_string(),
            start_index: 0,
            end_index: 4,
            page_number: 0,
            estimated_tokens: 1,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"estimated_tokens\":1"));
        let back: ChunkRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
