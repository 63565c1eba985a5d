//! Word-boundary search over any codepoint source
//!
//! The search routines here run identically against the uncached decoder
//! ([`Utf8Scanner`]) and the table-backed [`crate::UnicodeIndex`]; the
//! [`CodepointSource`] trait is the seam between the two. Callers rely on
//! [`locate_split`] preferring to shrink a chunk over growing it, but never
//! splitting a word when any boundary exists.

use crate::decode::{self, is_word_char};

/// Direction for word-boundary scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    /// Scan toward the end of the text.
    Forward,
    /// Scan toward the start of the text.
    Backward,
}

/// Positional decode access shared by the cached and uncached paths.
///
/// `char_at` returns the codepoint starting at a byte offset (or `None` for
/// continuation bytes, malformed sequences, and out-of-range offsets) plus
/// the next byte offset to visit. Implementations never panic.
pub trait CodepointSource {
    /// Total byte length of the underlying text.
    fn len(&self) -> usize;

    /// Whether the underlying text is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decode the codepoint at `byte_pos`; see [`crate::decode::decode_char_at`].
    fn char_at(&self, byte_pos: usize) -> (Option<char>, usize);
}

/// Uncached [`CodepointSource`] that decodes directly from a text slice.
#[derive(Debug, Clone, Copy)]
pub struct Utf8Scanner<'a> {
    bytes: &'a [u8],
}

impl<'a> Utf8Scanner<'a> {
    /// Wrap a text slice for positional decoding.
    pub fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
        }
    }
}

impl CodepointSource for Utf8Scanner<'_> {
    fn len(&self) -> usize {
        self.bytes.len()
    }

    fn char_at(&self, byte_pos: usize) -> (Option<char>, usize) {
        decode::decode_char_at(self.bytes, byte_pos)
    }
}

/// Guaranteed-progress advance for `next_byte` chains.
///
/// Malformed tables could report a non-increasing next position; advancing
/// one byte instead prevents an infinite walk.
fn bump(pos: usize, next: usize) -> usize {
    if next > pos {
        next
    } else {
        pos + 1
    }
}

/// Byte offset of the codepoint immediately before `byte_pos`.
///
/// Steps back over at most three continuation bytes (a UTF-8 sequence is at
/// most four bytes); if no covering sequence start is found the byte right
/// before `byte_pos` is treated as a one-byte unit.
pub fn prev_char_start<S: CodepointSource + ?Sized>(source: &S, byte_pos: usize) -> usize {
    if byte_pos == 0 {
        return 0;
    }
    let floor = byte_pos.saturating_sub(4);
    let mut pos = byte_pos - 1;
    loop {
        let (c, next) = source.char_at(pos);
        if c.is_some() && next >= byte_pos {
            return pos;
        }
        if pos == floor {
            break;
        }
        pos -= 1;
    }
    byte_pos - 1
}

/// Find the nearest word/non-word transition from `start_byte`.
///
/// Forward scans return the offset where a word ends (the first non-word
/// codepoint after word characters). Backward scans return the position
/// *after* a transition from non-word to word, i.e. the start of the word being
/// scanned through. When no transition exists the text start or end is
/// returned.
pub fn find_word_boundary<S: CodepointSource + ?Sized>(
    source: &S,
    start_byte: usize,
    direction: SearchDirection,
) -> usize {
    let len = source.len();
    if len == 0 {
        return 0;
    }
    if start_byte >= len {
        return len;
    }

    match direction {
        SearchDirection::Forward => {
            let mut pos = start_byte;
            let mut in_word = false;
            while pos < len {
                let (c, next) = source.char_at(pos);
                if let Some(c) = c {
                    let word = is_word_char(c);
                    if in_word && !word {
                        return pos;
                    }
                    in_word = word;
                }
                pos = bump(pos, next);
            }
            len
        }
        SearchDirection::Backward => {
            if start_byte == 0 {
                return 0;
            }
            let (c, _) = source.char_at(start_byte);
            let mut was_in_word = c.map(is_word_char).unwrap_or(false);
            let mut pos = start_byte;
            while pos > 0 {
                let prev = prev_char_start(source, pos);
                if prev >= pos {
                    break;
                }
                let (prev_c, _) = source.char_at(prev);
                if let Some(prev_c) = prev_c {
                    let word = is_word_char(prev_c);
                    if was_in_word && !word {
                        return pos;
                    }
                    was_in_word = word;
                }
                pos = prev;
            }
            0
        }
    }
}

/// Find the best split position at or near `target` without cutting a word.
///
/// Precedence, in order:
/// 1. `target` itself when it sits on whitespace or a text boundary;
/// 2. bounded backward search (up to `window` bytes) for whitespace,
///    returning the start of the word that follows it (0 when the
///    whitespace run begins the text);
/// 3. bounded forward search (up to `window` bytes) for the end of the
///    current word: the next whitespace, or the text end when the window
///    reaches it;
/// 4. unbounded backward word-boundary scan;
/// 5. unbounded forward word-boundary scan;
/// 6. the text length.
pub fn locate_split<S: CodepointSource + ?Sized>(
    source: &S,
    target: usize,
    window: usize,
) -> usize {
    let len = source.len();
    if target >= len {
        return len;
    }
    if target == 0 {
        return 0;
    }

    // Already on whitespace
    let (c, _) = source.char_at(target);
    if let Some(c) = c {
        if c.is_whitespace() {
            return target;
        }
    }

    // Bounded backward search: the first whitespace behind the target means
    // the position we walked back from is the start of a word.
    let floor = target.saturating_sub(window);
    let mut pos = target;
    while pos > floor {
        let prev = prev_char_start(source, pos);
        if prev >= pos {
            break;
        }
        if let (Some(prev_c), _) = source.char_at(prev) {
            if prev_c.is_whitespace() {
                return if prev == 0 { 0 } else { pos };
            }
        }
        pos = prev;
    }

    // Bounded forward search for the end of the current word
    let ceil = target.saturating_add(window).min(len);
    let mut pos = target;
    while pos < ceil {
        let (c, next) = source.char_at(pos);
        if let Some(c) = c {
            if c.is_whitespace() {
                return pos;
            }
        }
        pos = bump(pos, next);
    }
    if ceil == len {
        // The current word runs to the end of the text
        return len;
    }

    // Unbounded fallbacks
    let backward = find_word_boundary(source, target, SearchDirection::Backward);
    if backward != target {
        return backward;
    }
    find_word_boundary(source, target, SearchDirection::Forward)
}

/// Byte offset of the first codepoint of the next word at or after `pos`.
///
/// A position already at a word start is returned unchanged; otherwise the
/// rest of the current word and the following whitespace run are skipped.
/// Returns the text length when no further word exists.
pub fn next_word_start<S: CodepointSource + ?Sized>(source: &S, pos: usize) -> usize {
    let len = source.len();
    if pos >= len {
        return len;
    }
    if pos == 0 {
        return 0;
    }

    let (current, _) = source.char_at(pos);
    let current_in_word = matches!(current, Some(c) if !c.is_whitespace());
    if current_in_word {
        let prev = prev_char_start(source, pos);
        if let (Some(prev_c), _) = source.char_at(prev) {
            if prev_c.is_whitespace() {
                return pos;
            }
        }
    }

    // Walk to the end of the current word, then past the whitespace run
    let mut byte_pos = pos;
    let mut in_word = current_in_word;
    while byte_pos < len {
        let (c, next) = source.char_at(byte_pos);
        let Some(c) = c else {
            byte_pos = bump(byte_pos, next);
            continue;
        };
        let ws = c.is_whitespace();
        if in_word && ws {
            byte_pos = bump(byte_pos, next);
            break;
        }
        if !in_word && !ws {
            return byte_pos;
        }
        in_word = !ws;
        byte_pos = bump(byte_pos, next);
    }
    while byte_pos < len {
        let (c, next) = source.char_at(byte_pos);
        match c {
            Some(c) if c.is_whitespace() => byte_pos = bump(byte_pos, next),
            _ => break,
        }
    }
    byte_pos
}

/// Whether `pos` falls strictly inside a word (non-whitespace on both sides).
pub fn is_mid_word<S: CodepointSource + ?Sized>(source: &S, pos: usize) -> bool {
    if pos == 0 || pos >= source.len() {
        return false;
    }
    let (c, _) = source.char_at(pos);
    if !matches!(c, Some(c) if !c.is_whitespace()) {
        return false;
    }
    let prev = prev_char_start(source, pos);
    let (prev_c, _) = source.char_at(prev);
    matches!(prev_c, Some(c) if !c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner(text: &str) -> Utf8Scanner<'_> {
        Utf8Scanner::new(text)
    }

    #[test]
    fn test_prev_char_start_ascii() {
        let s = scanner("abc");
        assert_eq!(prev_char_start(&s, 1), 0);
        assert_eq!(prev_char_start(&s, 3), 2);
        assert_eq!(prev_char_start(&s, 0), 0);
    }

    #[test]
    fn test_prev_char_start_multibyte() {
        let text = "aあ🎉b"; // offsets: a=0, あ=1..4, 🎉=4..8, b=8
        let s = scanner(text);
        assert_eq!(prev_char_start(&s, 4), 1);
        assert_eq!(prev_char_start(&s, 8), 4);
        assert_eq!(prev_char_start(&s, 9), 8);
    }

    #[test]
    fn test_forward_word_boundary() {
        let s = scanner("hello world");
        assert_eq!(
            find_word_boundary(&s, 0, SearchDirection::Forward),
            5,
            "end of the first word"
        );
        assert_eq!(find_word_boundary(&s, 6, SearchDirection::Forward), 11);
    }

    #[test]
    fn test_backward_word_boundary_returns_word_start() {
        let s = scanner("foo, bar");
        // From inside "bar" the backward scan stops at its first codepoint
        assert_eq!(find_word_boundary(&s, 6, SearchDirection::Backward), 5);
        assert_eq!(find_word_boundary(&s, 0, SearchDirection::Backward), 0);
    }

    #[test]
    fn test_locate_split_on_whitespace_returns_target() {
        let s = scanner("hello world");
        assert_eq!(locate_split(&s, 5, 50), 5);
    }

    #[test]
    fn test_locate_split_prefers_backward() {
        let s = scanner("hello world again");
        // Target inside "world": back off to its first codepoint
        assert_eq!(locate_split(&s, 8, 50), 6);
    }

    #[test]
    fn test_locate_split_word_start_of_target_word() {
        let s = scanner("alpha  beta");
        // Target inside "beta" right after the whitespace run
        assert_eq!(locate_split(&s, 8, 50), 7);
    }

    #[test]
    fn test_locate_split_forward_past_punctuation_run() {
        // a=0, commas 1..=3, bcd=4..=6, space=7, efg=8..
        let s = scanner("a,,,bcd efg");
        // No whitespace within the window in either direction; the unbounded
        // backward scan stops at the comma/word transition (== target), so
        // the forward scan supplies the end of the current word
        assert_eq!(locate_split(&s, 4, 2), 7);
    }

    #[test]
    fn test_locate_split_text_initial_word_backs_to_start() {
        let s = scanner("unbreakable word");
        // Window too small to reach whitespace either way; the unbounded
        // backward scan runs to the start of the text
        assert_eq!(locate_split(&s, 5, 3), 0);
    }

    #[test]
    fn test_locate_split_text_boundaries() {
        let s = scanner("word");
        assert_eq!(locate_split(&s, 0, 50), 0);
        assert_eq!(locate_split(&s, 4, 50), 4);
        assert_eq!(locate_split(&s, 99, 50), 4);
    }

    #[test]
    fn test_locate_split_single_long_word_runs_to_end() {
        let text = "x".repeat(40);
        let s = scanner(&text);
        // Forward window reaches the text end: the word ends there
        assert_eq!(locate_split(&s, 20, 50), 40);
    }

    #[test]
    fn test_next_word_start() {
        let s = scanner("one two  three");
        assert_eq!(next_word_start(&s, 4), 4, "already at a word start");
        assert_eq!(next_word_start(&s, 2), 4, "mid-word skips to the next word");
        assert_eq!(next_word_start(&s, 5), 9, "whitespace run is skipped");
        assert_eq!(next_word_start(&s, 10), 14, "tail word runs to text end");
    }

    #[test]
    fn test_next_word_start_unicode() {
        let text = "こんにちは 世界";
        let s = scanner(text);
        // Mid-way through the first run of CJK codepoints
        assert_eq!(next_word_start(&s, 6), 16);
    }

    #[test]
    fn test_is_mid_word() {
        let s = scanner("hello world");
        assert!(is_mid_word(&s, 2));
        assert!(!is_mid_word(&s, 0));
        assert!(!is_mid_word(&s, 5), "whitespace is not inside a word");
        assert!(!is_mid_word(&s, 6), "word start is not mid-word");
        assert!(!is_mid_word(&s, 11));
    }
}
