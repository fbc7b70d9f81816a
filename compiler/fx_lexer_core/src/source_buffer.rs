//! Sentinel-terminated source buffer for zero-bounds-check scanning.
//!
//! The buffer guarantees a `0x00` sentinel byte after the source content,
//! allowing the scanner to detect end-of-input without explicit bounds
//! checks. The total buffer size is rounded up to the next 64-byte boundary,
//! which also provides safe padding for one byte of lookahead past the sentinel.
//!
//! The buffer is kept as a `String`: NUL is valid UTF-8, so the sentinel and
//! padding never break the `&str` invariant and lexeme slices stay safe.

use crate::Cursor;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// Bytes of lookahead the cursor may read past the sentinel.
const LOOKAHEAD: usize = 1;

/// Sentinel-terminated source buffer.
///
/// # Layout
///
/// ```text
/// [source_bytes..., 0x00, padding_zeros...]
///  ^                ^     ^
///  0                |     rounded up to 64-byte boundary
///              source_len (sentinel)
/// ```
///
/// Interior NUL code points in the source are content. The cursor tells them
/// apart from the sentinel by comparing the position against `source_len`.
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    /// Owned buffer: source text, then the sentinel, then zero padding.
    text: String,
    /// Length of the actual source content in bytes.
    source_len: usize,
}

impl SourceBuffer {
    /// Create a new sentinel-terminated buffer from formula text.
    pub fn new(source: &str) -> Self {
        let source_len = source.len();

        // Round up to next 64-byte boundary (minimum: source + sentinel + lookahead).
        let padded_len = (source_len + 1 + LOOKAHEAD + CACHE_LINE - 1) & !(CACHE_LINE - 1);

        let mut text = String::with_capacity(padded_len);
        text.push_str(source);
        text.extend(std::iter::repeat('\0').take(padded_len - source_len));

        Self { text, source_len }
    }

    /// Returns the source text (without sentinel or padding).
    pub fn as_str(&self) -> &str {
        &self.text[..self.source_len]
    }

    /// Create a [`Cursor`] positioned at the start of the source.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.text, self.source_len)
    }

    /// Length of the source content in bytes (excludes sentinel and padding).
    pub fn len(&self) -> usize {
        self.source_len
    }

    /// Returns `true` if the source content is empty.
    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }
}
