//! Chunk-boundary orchestration
//!
//! The [`Chunker`] validates options, runs the character- or token-sized
//! iteration over the (possibly page-concatenated) text, and tags chunks
//! with page numbers. Character mode iterates byte offsets directly against
//! the uncached decoder; token mode builds one [`UnicodeIndex`] per call and
//! converges each chunk's end position by bounded iterative refinement.

use crate::{
    chunk::TextChunk,
    document,
    error::{ChunkError, Result},
    instrument::Instrument,
    options::{ChunkingOptions, SizeUnit},
};
use kizami_core::{
    boundary::{self, Utf8Scanner},
    decode, TokenEstimator, TokenMethod, UnicodeIndex, CHARS_PER_TOKEN,
};

// Word-boundary search window: ~15% of the chunk size, clamped.
const WORD_WINDOW_FRACTION: f64 = 0.15;
const WORD_WINDOW_MIN: usize = 50;
const WORD_WINDOW_MAX: usize = 300;

// A located boundary may stretch a chunk to 1.5x its nominal size; a
// fallback boundary is only accepted at 0.67x or more.
const BOUNDARY_STRETCH: f64 = 1.5;
const BOUNDARY_SHRINK: f64 = 0.67;

// Token-mode refinement: conservative initial span, bounded rounds, +/-8%
// convergence tolerance, partial extension steps, 2x runaway cap.
const INITIAL_SPAN_FACTOR: f64 = 0.8;
const TOKEN_REFINE_ROUNDS: usize = 8;
const TOKEN_TOLERANCE: f64 = 0.08;
const EXTEND_FACTOR: f64 = 0.7;
const RUNAWAY_SPAN_FACTOR: usize = 2;

// Word-boundary window for token-mode chunk ends.
const TOKEN_END_WINDOW: usize = 100;

// Local density sampling.
const DENSITY_SAMPLE_CHARS: usize = 500;
const DENSITY_SAMPLE_MIN: usize = 50;
const DENSITY_MIN: f64 = 2.0;
const DENSITY_MAX: f64 = 8.0;

/// Splits text or page sequences into bounded, optionally overlapping
/// chunks.
///
/// An instance owns a mutable default-options copy and the statistics of
/// its last operation; neither is synchronized, so concurrent use of one
/// instance requires external synchronization (or one instance per thread).
#[derive(Debug, Clone, Default)]
pub struct Chunker {
    default_options: ChunkingOptions,
    last_chunk_count: usize,
    last_total_characters: usize,
    instrument: Instrument,
}

impl Chunker {
    /// Chunker with default options and instrumentation off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Chunker with the given instrumentation state.
    pub fn with_instrument(instrument: Instrument) -> Self {
        Self {
            instrument,
            ..Self::default()
        }
    }

    /// Chunk a single text.
    pub fn chunk_text(&mut self, text: &str, options: &ChunkingOptions) -> Result<Vec<TextChunk>> {
        self.chunk_document(&[text], options)
    }

    /// Chunk a single text with the instance's default options.
    pub fn chunk_text_with_defaults(&mut self, text: &str) -> Result<Vec<TextChunk>> {
        let options = self.default_options.clone();
        self.chunk_text(text, &options)
    }

    /// Chunk an ordered sequence of pages.
    ///
    /// Pages are concatenated with a fixed two-character separator and the
    /// single-text algorithm runs over the concatenation; every chunk's
    /// `page_number` is then derived from its start offset. Validation
    /// failures report [`ChunkError::InvalidParameter`] and leave the
    /// statistics untouched.
    pub fn chunk_document<S: AsRef<str>>(
        &mut self,
        pages: &[S],
        options: &ChunkingOptions,
    ) -> Result<Vec<TextChunk>> {
        if pages.is_empty() {
            return Err(ChunkError::invalid("document has no pages"));
        }
        options.validate()?;
        let total_length: usize = pages.iter().map(|p| p.as_ref().len()).sum();
        if total_length == 0 {
            return Err(ChunkError::invalid("document text is empty"));
        }

        self.instrument.record(|| {
            format!(
                "chunking {} page(s), {} bytes, size {} {:?}, overlap {:.0}%",
                pages.len(),
                total_length,
                options.chunk_size,
                options.size_unit,
                options.overlap_percentage * 100.0
            )
        });

        let timer = self.instrument.timer("page combination");
        let (combined, page_starts) = document::combine_pages(pages);
        timer.finish();

        let timer = self.instrument.timer("core chunking");
        let mut chunks = match options.size_unit {
            SizeUnit::Characters => self.chunk_by_characters(&combined, options)?,
            SizeUnit::Tokens => self.chunk_by_tokens(&combined, options)?,
        };
        timer.finish();

        if page_starts.len() > 1 {
            for chunk in &mut chunks {
                chunk.page_number = document::page_for_offset(&page_starts, chunk.start_index);
            }
        }

        self.last_chunk_count = chunks.len();
        self.last_total_characters = total_length;
        self.instrument
            .record(|| format!("produced {} chunk(s)", chunks.len()));
        Ok(chunks)
    }

    /// Number of chunks produced by the last operation.
    pub fn chunk_count(&self) -> usize {
        self.last_chunk_count
    }

    /// Total characters processed by the last operation.
    pub fn total_characters(&self) -> usize {
        self.last_total_characters
    }

    /// Reset the last-operation statistics.
    pub fn reset_statistics(&mut self) {
        self.last_chunk_count = 0;
        self.last_total_characters = 0;
    }

    /// Replace the default options used by
    /// [`Chunker::chunk_text_with_defaults`].
    pub fn set_default_options(&mut self, options: ChunkingOptions) {
        self.default_options = options;
    }

    /// Current default options.
    pub fn default_options(&self) -> &ChunkingOptions {
        &self.default_options
    }

    /// Mutable access to the instrumentation switch.
    pub fn instrument_mut(&mut self) -> &mut Instrument {
        &mut self.instrument
    }

    /// Character-sized iteration over byte offsets.
    fn chunk_by_characters(
        &self,
        text: &str,
        options: &ChunkingOptions,
    ) -> Result<Vec<TextChunk>> {
        let len = text.len();
        let size = options.chunk_size;
        let preserve = options.preserve_word_boundaries;
        let method = options.token_method;
        let scanner = Utf8Scanner::new(text);

        // Short-circuit: the whole text fits in one chunk
        if len <= size {
            return Ok(build_chunk(text, 0, len, preserve, method)?
                .into_iter()
                .collect());
        }

        let effective_step =
            (((size as f64) * (1.0 - options.overlap_percentage)).floor() as usize).max(1);
        let window = word_search_window(size);
        let stretch_limit = (size as f64 * BOUNDARY_STRETCH) as usize;
        let shrink_limit = (size as f64 * BOUNDARY_SHRINK) as usize;

        let mut chunks = Vec::new();
        let mut start = 0usize;
        loop {
            let mut end = align_to_char_start(text, start.saturating_add(size).min(len));
            if preserve && end < len {
                let located = boundary::locate_split(&scanner, end, window);
                if located > start && located - start <= stretch_limit {
                    end = located;
                } else {
                    // The nearby boundary would overstretch the chunk (or
                    // collapsed behind its start); try again near the cap
                    // and only shrink so far before accepting the stretch.
                    let cap = align_to_char_start(text, start.saturating_add(stretch_limit).min(len));
                    let fallback = boundary::locate_split(&scanner, cap, window);
                    if fallback > start && fallback - start >= shrink_limit {
                        end = fallback;
                    } else if located > start {
                        end = located;
                    }
                }
            }

            if let Some(chunk) = build_chunk(text, start, end, preserve, method)? {
                chunks.push(chunk);
            }
            if end >= len {
                break;
            }

            let mut next_start = align_to_char_start(text, start + effective_step);
            if next_start > end {
                // Never step past unemitted text
                next_start = end;
            }
            if preserve && boundary::is_mid_word(&scanner, next_start) {
                next_start = boundary::next_word_start(&scanner, next_start);
            }
            if next_start <= start {
                next_start = align_to_char_start(text, start + 1);
            }
            if next_start >= len {
                break;
            }
            start = next_start;
        }
        Ok(chunks)
    }

    /// Token-sized iteration over character positions.
    fn chunk_by_tokens(&self, text: &str, options: &ChunkingOptions) -> Result<Vec<TextChunk>> {
        let index = UnicodeIndex::new(text);
        let len = text.len();
        let total_chars = index.unicode_length();
        let target = options.chunk_size;
        let preserve = options.preserve_word_boundaries;
        let method = options.token_method;

        // Short-circuit: the whole text is within the token target
        if TokenEstimator::estimate(text, method) <= target {
            return Ok(build_chunk(text, 0, len, preserve, method)?
                .into_iter()
                .collect());
        }

        let naive_chars = TokenEstimator::tokens_to_chars(target, method).max(1);
        let max_span_chars = naive_chars * RUNAWAY_SPAN_FACTOR;
        let tolerance = target as f64 * TOKEN_TOLERANCE;

        let mut chunks = Vec::new();
        let mut start_byte = 0usize;
        let mut start_char = 0usize;

        while start_byte < len {
            let remaining_chars = total_chars.saturating_sub(start_char);
            if remaining_chars == 0 {
                break;
            }
            let chars_per_token = local_density(&index, start_char, method);

            // Converge the span onto the token target, starting deliberately
            // short to avoid overshoot.
            let mut span_chars = (((naive_chars as f64) * INITIAL_SPAN_FACTOR).round() as usize)
                .clamp(1, remaining_chars.min(max_span_chars));
            for _ in 0..TOKEN_REFINE_ROUNDS {
                let candidate = index.substring(start_char, span_chars);
                let estimated = TokenEstimator::estimate(candidate, method) as f64;
                if (estimated - target as f64).abs() <= tolerance {
                    break;
                }
                if estimated < target as f64 {
                    if span_chars >= remaining_chars.min(max_span_chars) {
                        break;
                    }
                    let deficit = (target as f64 - estimated) * chars_per_token * EXTEND_FACTOR;
                    let grow = (deficit.round() as usize).max(1);
                    span_chars = (span_chars + grow).min(remaining_chars).min(max_span_chars);
                } else {
                    let excess = (estimated - target as f64) * chars_per_token;
                    let shrink = (excess.round() as usize).max(1);
                    span_chars = span_chars.saturating_sub(shrink).max(1);
                }
            }

            let end_char = start_char + span_chars;
            let span_end = index.byte_pos_for_char_index(end_char);
            if span_end > len {
                return Err(ChunkError::ProcessingFailed {
                    reason: format!("span end {span_end} escaped the text ({len} bytes)"),
                });
            }
            let mut end_byte = span_end;
            if preserve && end_byte < len {
                end_byte = boundary::locate_split(&index, end_byte, TOKEN_END_WINDOW);
                if end_byte <= start_byte {
                    // A backward search collapsed the chunk (single huge
                    // word); keep the converged span end instead
                    end_byte = span_end;
                }
            }

            if let Some(chunk) = build_chunk(text, start_byte, end_byte, preserve, method)? {
                self.instrument.record(|| {
                    format!(
                        "chunk {}: bytes {}..{} (~{} tokens)",
                        chunks.len(),
                        chunk.start_index,
                        chunk.end_index,
                        chunk.estimated_tokens
                    )
                });
                chunks.push(chunk);
            }
            if end_byte >= len {
                break;
            }

            // Overlap-adjusted advance, expressed in tokens and converted
            // back through the local density
            let effective_tokens =
                (((target as f64) * (1.0 - options.overlap_percentage)).round() as usize).max(1);
            let advance_chars = ((effective_tokens as f64 * chars_per_token).round() as usize).max(1);
            let mut next_char = start_char + advance_chars;
            let mut next_byte = index.byte_pos_for_char_index(next_char);
            if next_byte > end_byte {
                // Never step past unemitted text
                next_byte = end_byte;
                next_char = char_index_at(&index, start_byte, start_char, next_byte);
            }
            if preserve && boundary::is_mid_word(&index, next_byte) {
                let realigned = boundary::next_word_start(&index, next_byte);
                next_char = char_index_at(&index, next_byte, next_char, realigned);
                next_byte = realigned;
            }
            if next_byte <= start_byte {
                let (_, bumped) = index.char_at(start_byte);
                next_byte = bumped.max(start_byte + 1);
                next_char = char_index_at(&index, start_byte, start_char, next_byte);
            }
            if next_byte >= len {
                break;
            }
            start_byte = next_byte;
            start_char = next_char;
        }
        Ok(chunks)
    }
}

/// Search window for word-boundary preservation, proportional to the chunk
/// size.
fn word_search_window(chunk_size: usize) -> usize {
    ((chunk_size as f64 * WORD_WINDOW_FRACTION) as usize).clamp(WORD_WINDOW_MIN, WORD_WINDOW_MAX)
}

/// Snap `pos` forward to the nearest codepoint start (or the text end).
fn align_to_char_start(text: &str, mut pos: usize) -> usize {
    let bytes = text.as_bytes();
    if pos >= bytes.len() {
        return bytes.len();
    }
    while pos < bytes.len() && !decode::is_char_start(bytes[pos]) {
        pos += 1;
    }
    pos
}

/// Snap `pos` backward to the nearest codepoint start.
fn align_floor_char_start(text: &str, mut pos: usize) -> usize {
    if pos >= text.len() {
        return text.len();
    }
    let bytes = text.as_bytes();
    while pos > 0 && !decode::is_char_start(bytes[pos]) {
        pos -= 1;
    }
    pos
}

/// Character index of `to_byte`, walking forward from a known
/// `(from_byte, from_char)` pair.
fn char_index_at(index: &UnicodeIndex, from_byte: usize, from_char: usize, to_byte: usize) -> usize {
    let mut pos = from_byte;
    let mut count = from_char;
    while pos < to_byte {
        let (c, next) = index.char_at(pos);
        if c.is_some() {
            count += 1;
        }
        pos = if next > pos { next } else { pos + 1 };
    }
    count
}

/// Characters-per-token ratio sampled near the current position.
///
/// Falls back to the global constant when too little text remains for a
/// meaningful sample; clamped to a sane range either way.
fn local_density(index: &UnicodeIndex, start_char: usize, method: TokenMethod) -> f64 {
    let remaining = index.unicode_length().saturating_sub(start_char);
    let sample_chars = remaining.min(DENSITY_SAMPLE_CHARS);
    if sample_chars < DENSITY_SAMPLE_MIN {
        return CHARS_PER_TOKEN;
    }
    let sample = index.substring(start_char, sample_chars);
    let tokens = TokenEstimator::estimate(sample, method);
    if tokens == 0 {
        return CHARS_PER_TOKEN;
    }
    (sample_chars as f64 / tokens as f64).clamp(DENSITY_MIN, DENSITY_MAX)
}

/// Cut a chunk out of `text`, re-aligning both ends to codepoint starts and
/// trimming surrounding whitespace when requested.
///
/// Returns `Ok(None)` for spans that are degenerate or trim down to
/// nothing. The only error is the defensive misaligned-span check, which
/// signals an implementation defect rather than a runtime condition.
fn build_chunk(
    text: &str,
    start: usize,
    end: usize,
    trim: bool,
    method: TokenMethod,
) -> Result<Option<TextChunk>> {
    let len = text.len();
    if start >= len || end > len || start >= end {
        return Ok(None);
    }
    let start = align_to_char_start(text, start);
    let end = align_floor_char_start(text, end);
    if start >= end {
        return Ok(None);
    }

    let raw = text.get(start..end).ok_or_else(|| ChunkError::ProcessingFailed {
        reason: format!("chunk span {start}..{end} is not codepoint-aligned"),
    })?;
    let content = if trim { raw.trim() } else { raw };
    if content.is_empty() {
        return Ok(None);
    }

    Ok(Some(TextChunk {
        content: content.to_string(),
        start_index: start,
        end_index: end,
        page_number: 0,
        estimated_tokens: TokenEstimator::estimate(content, method),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_search_window_clamps() {
        assert_eq!(word_search_window(10), 50);
        assert_eq!(word_search_window(1000), 150);
        assert_eq!(word_search_window(100_000), 300);
    }

    #[test]
    fn test_align_helpers() {
        let text = "aあb"; // あ occupies bytes 1..4
        assert_eq!(align_to_char_start(text, 2), 4);
        assert_eq!(align_floor_char_start(text, 2), 1);
        assert_eq!(align_to_char_start(text, 4), 4);
        assert_eq!(align_to_char_start(text, 99), 5);
        assert_eq!(align_floor_char_start(text, 99), 5);
    }

    #[test]
    fn test_build_chunk_trims() {
        let text = "  hello world  ";
        let chunk = build_chunk(text, 0, text.len(), true, TokenMethod::Simple)
            .unwrap()
            .unwrap();
        assert_eq!(chunk.content, "hello world");
        assert_eq!(chunk.start_index, 0);
        assert_eq!(chunk.end_index, text.len());
        assert_eq!(chunk.estimated_tokens, 3);
    }

    #[test]
    fn test_build_chunk_degenerate_spans() {
        assert!(build_chunk("abc", 2, 2, true, TokenMethod::Simple)
            .unwrap()
            .is_none());
        assert!(build_chunk("abc", 5, 9, true, TokenMethod::Simple)
            .unwrap()
            .is_none());
        assert!(build_chunk("   ", 0, 3, true, TokenMethod::Simple)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_build_chunk_keeps_whitespace_without_trim() {
        let chunk = build_chunk(" x ", 0, 3, false, TokenMethod::Simple)
            .unwrap()
            .unwrap();
        assert_eq!(chunk.content, " x ");
    }

    #[test]
    fn test_char_index_at() {
        let index = UnicodeIndex::new("aあb");
        assert_eq!(char_index_at(&index, 0, 0, 0), 0);
        assert_eq!(char_index_at(&index, 0, 0, 1), 1);
        assert_eq!(char_index_at(&index, 0, 0, 4), 2);
        assert_eq!(char_index_at(&index, 1, 1, 5), 3);
    }

    #[test]
    fn test_local_density_ascii() {
        let text = "word ".repeat(200);
        let index = UnicodeIndex::new(&text);
        let density = local_density(&index, 0, TokenMethod::Simple);
        assert!((density - 4.0).abs() < 0.1, "ascii density ~4, got {density}");
    }

    #[test]
    fn test_local_density_short_text_falls_back() {
        let index = UnicodeIndex::new("short");
        assert_eq!(local_density(&index, 0, TokenMethod::Simple), CHARS_PER_TOKEN);
    }

    #[test]
    fn test_local_density_clamped_for_wide_text() {
        // CJK text: 3 bytes per codepoint, raw ratio ~1.33 clamps to 2.0
        let text = "日本語の文書".repeat(100);
        let index = UnicodeIndex::new(&text);
        assert_eq!(local_density(&index, 0, TokenMethod::Simple), DENSITY_MIN);
    }

    #[test]
    fn test_statistics_lifecycle() {
        let mut chunker = Chunker::new();
        assert_eq!(chunker.chunk_count(), 0);
        assert_eq!(chunker.total_characters(), 0);

        let options = ChunkingOptions::characters(10).with_overlap(0.0);
        let chunks = chunker.chunk_text("one two three four five", &options).unwrap();
        assert_eq!(chunker.chunk_count(), chunks.len());
        assert_eq!(chunker.total_characters(), 23);

        chunker.reset_statistics();
        assert_eq!(chunker.chunk_count(), 0);
        assert_eq!(chunker.total_characters(), 0);
    }

    #[test]
    fn test_default_options_roundtrip() {
        let mut chunker = Chunker::new();
        assert_eq!(chunker.default_options().chunk_size, 500);

        chunker.set_default_options(ChunkingOptions::characters(64));
        assert_eq!(chunker.default_options().chunk_size, 64);
        assert_eq!(chunker.default_options().size_unit, SizeUnit::Characters);

        let chunks = chunker
            .chunk_text_with_defaults("every word here is four characters long or so")
            .unwrap();
        assert!(!chunks.is_empty());
    }

    #[test]
    fn test_validation_failure_leaves_statistics() {
        let mut chunker = Chunker::new();
        let options = ChunkingOptions::characters(100);
        chunker.chunk_text("some text to chunk", &options).unwrap();
        let count = chunker.chunk_count();

        let bad = ChunkingOptions::new(0, 0.1);
        assert!(chunker.chunk_text("more text", &bad).is_err());
        assert_eq!(chunker.chunk_count(), count, "failed call must not touch stats");
    }
}
