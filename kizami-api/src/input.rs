//! Input abstraction for chunk processing
//!
//! Provides a unified interface over the sources a caller may hold text in.
//! The engine itself only ever sees in-memory pages; reading files and
//! decoding bytes happens here, at the API boundary.

use crate::error::ApiResult;
use std::fs;
use std::path::PathBuf;

/// Unified input abstraction
///
/// Everything is reduced to an ordered sequence of UTF-8 text pages before
/// chunking; single-text variants become one-page documents.
#[derive(Debug, Clone)]
pub enum Input {
    /// Direct text string
    Text(String),
    /// Static text reference (zero-copy for string literals)
    TextRef(&'static str),
    /// File path to read from
    File(PathBuf),
    /// Bytes to process as UTF-8 text
    Bytes(Vec<u8>),
    /// Pre-segmented document pages
    Pages(Vec<String>),
}

impl Input {
    /// Create input from a text string
    pub fn from_text<S: Into<String>>(text: S) -> Self {
        Input::Text(text.into())
    }

    /// Create input from a static string reference (zero-copy)
    pub fn from_text_ref(text: &'static str) -> Self {
        Input::TextRef(text)
    }

    /// Create input from a file path
    pub fn from_file<P: Into<PathBuf>>(path: P) -> Self {
        Input::File(path.into())
    }

    /// Create input from bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }

    /// Create input from pre-segmented pages
    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Input::Pages(pages.into_iter().map(Into::into).collect())
    }

    /// Reduce the input to an ordered page sequence
    ///
    /// Reads files and decodes bytes as needed; single-text sources become
    /// a one-page document.
    pub fn into_pages(self) -> ApiResult<Vec<String>> {
        match self {
            Input::Text(text) => Ok(vec![text]),
            Input::TextRef(text) => Ok(vec![text.to_string()]),
            Input::File(path) => Ok(vec![fs::read_to_string(&path)?]),
            Input::Bytes(bytes) => Ok(vec![String::from_utf8(bytes)?]),
            Input::Pages(pages) => Ok(pages),
        }
    }

    /// Estimated byte size of the input (if available without reading)
    pub fn estimated_size(&self) -> Option<usize> {
        match self {
            Input::Text(text) => Some(text.len()),
            Input::TextRef(text) => Some(text.len()),
            Input::Bytes(bytes) => Some(bytes.len()),
            Input::Pages(pages) => Some(pages.iter().map(String::len).sum()),
            Input::File(path) => fs::metadata(path).ok().map(|m| m.len() as usize),
        }
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Input::Text(text)
    }
}

impl From<&'static str> for Input {
    fn from(text: &'static str) -> Self {
        Input::TextRef(text)
    }
}

impl From<PathBuf> for Input {
    fn from(path: PathBuf) -> Self {
        Input::File(path)
    }
}

impl From<Vec<u8>> for Input {
    fn from(bytes: Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }
}

impl From<Vec<String>> for Input {
    fn from(pages: Vec<String>) -> Self {
        Input::Pages(pages)
    }
}
