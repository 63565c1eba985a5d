//! Per-text byte-position decode tables
//!
//! A [`UnicodeIndex`] turns one text buffer into two parallel lookup tables
//! so that repeated positional queries cost O(1) instead of a rescan. The
//! tables are valid only for the exact text they were built from and are
//! never mutated in place; a new text means a new index.

use crate::boundary::{self, CodepointSource, SearchDirection};
use crate::decode;

/// O(1) positional decode access for one fixed text buffer.
///
/// `codepoint_at[byte]` holds the codepoint decoded at that byte offset
/// (`None` for continuation bytes and malformed sequences) and
/// `next_byte[byte]` the offset of the following codepoint. Lookups are
/// byte-for-byte indistinguishable from decoding without the index.
#[derive(Debug, Clone)]
pub struct UnicodeIndex {
    text: String,
    codepoint_at: Vec<Option<char>>,
    next_byte: Vec<usize>,
    char_count: usize,
}

impl UnicodeIndex {
    /// Build the tables for `text` in a single forward pass.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let bytes = text.as_bytes();
        let len = bytes.len();

        let mut codepoint_at = vec![None; len];
        let mut next_byte = vec![0usize; len];
        let mut char_count = 0;

        let mut pos = 0;
        while pos < len {
            let (decoded, next) = decode::decode_char_at(bytes, pos);
            if let Some(c) = decoded {
                codepoint_at[pos] = Some(c);
                next_byte[pos] = next;
                // Continuation bytes advance one byte, like the uncached
                // decoder's recovery path
                for cont in pos + 1..next {
                    codepoint_at[cont] = None;
                    next_byte[cont] = cont + 1;
                }
                char_count += 1;
            } else {
                codepoint_at[pos] = None;
                next_byte[pos] = pos + 1;
            }
            pos = if next > pos { next } else { pos + 1 };
        }

        Self {
            text,
            codepoint_at,
            next_byte,
            char_count,
        }
    }

    /// The exact text the tables were built from.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Codepoint and next byte offset at `byte_pos`.
    ///
    /// Past the end of the text this returns `(None, len)`; everywhere else
    /// it is a direct table lookup.
    pub fn char_at(&self, byte_pos: usize) -> (Option<char>, usize) {
        if byte_pos >= self.text.len() {
            return (None, self.text.len());
        }
        (self.codepoint_at[byte_pos], self.next_byte[byte_pos])
    }

    /// Byte offset of the `char_index`-th codepoint.
    ///
    /// Walks the `next_byte` chain from the start of the text counting only
    /// decoded codepoints; returns the text length when the index is out of
    /// range. A lookup that fails to advance falls back to a one-byte step
    /// so malformed tables cannot loop forever.
    pub fn byte_pos_for_char_index(&self, char_index: usize) -> usize {
        if char_index == 0 || self.text.is_empty() {
            return 0;
        }
        let len = self.text.len();
        let mut counted = 0;
        let mut pos = 0;
        while pos < len && counted < char_index {
            let (c, next) = self.char_at(pos);
            if c.is_some() {
                counted += 1;
            }
            pos = if next > pos { next } else { pos + 1 };
        }
        pos
    }

    /// Slice of `char_count` codepoints starting at codepoint `start_char`.
    ///
    /// Degenerate ranges (empty text, zero count, start past the end)
    /// produce an empty slice.
    pub fn substring(&self, start_char: usize, char_count: usize) -> &str {
        if self.text.is_empty() || char_count == 0 {
            return "";
        }
        let start = self.byte_pos_for_char_index(start_char);
        if start >= self.text.len() {
            return "";
        }
        let end = self.byte_pos_for_char_index(start_char + char_count);
        if start >= end {
            return "";
        }
        self.text.get(start..end).unwrap_or("")
    }

    /// Number of codepoints in the text (not its byte length).
    pub fn unicode_length(&self) -> usize {
        self.char_count
    }

    /// Nearest word/non-word transition from `start_byte`; see
    /// [`boundary::find_word_boundary`].
    pub fn find_word_boundary(&self, start_byte: usize, direction: SearchDirection) -> usize {
        boundary::find_word_boundary(self, start_byte, direction)
    }
}

impl CodepointSource for UnicodeIndex {
    fn len(&self) -> usize {
        self.text.len()
    }

    fn char_at(&self, byte_pos: usize) -> (Option<char>, usize) {
        UnicodeIndex::char_at(self, byte_pos)
    }
}
