//! Position-tracking cursor over a sentinel-terminated buffer.
//!
//! The cursor advances one code point at a time and keeps four counters in
//! step: the byte position (for slicing), the code-point offset (the public
//! `start`/`end` of a token), the 1-based line and the 0-based column.
//! End-of-input is detected when the current byte equals the sentinel
//! (`0x00`) and the position has reached the source length.
//!
//! # Line Breaks
//!
//! `\n` and a lone `\r` each end a line. In `\r\n` the `\r` is an ordinary
//! column and the `\n` ends the line, so the pair counts as one break.
//!
//! # Interior Null Bytes
//!
//! A NUL at `pos < source_len` is an interior null and is scanned like any
//! other code point; a NUL at `pos >= source_len` is the sentinel.

/// Returns the earliest (minimum) of two optional positions.
///
/// Used by the memchr-based scanning methods to combine results from
/// separate memchr calls when more than three needles are needed.
fn earliest_of(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (Some(x), None) | (None, Some(x)) => Some(x),
        (None, None) => None,
    }
}

/// Number of code points in a UTF-8 byte run (non-continuation bytes).
fn char_count(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| (b & 0xC0) != 0x80).count()
}

/// Location of the cursor in code-point terms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    /// 0-based code-point offset from the start of the input.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
    /// 0-based column, counted in code points.
    pub column: usize,
}

impl Position {
    /// Position of the first code point of any input.
    pub const START: Position = Position {
        offset: 0,
        line: 1,
        column: 0,
    };
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

/// Cursor over a sentinel-terminated buffer.
///
/// Created via [`SourceBuffer::cursor()`](crate::SourceBuffer::cursor).
/// The cursor is [`Copy`], enabling cheap state snapshots for backtracking.
///
/// # Invariant
///
/// `text` is sentinel-terminated: `text.as_bytes()[source_len] == 0x00`, and
/// at least one further zero byte follows. This is guaranteed by
/// [`SourceBuffer`](crate::SourceBuffer) construction.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    /// Sentinel-terminated buffer (source + sentinel + padding).
    text: &'a str,
    /// Current read position (byte index into `text`).
    pos: usize,
    /// Length of actual source content (excludes sentinel and padding).
    source_len: usize,
    /// Code-point offset, line and column of `pos`.
    position: Position,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of a sentinel-terminated buffer.
    pub(crate) fn new(text: &'a str, source_len: usize) -> Self {
        debug_assert!(
            source_len < text.len(),
            "sentinel must be within buffer bounds"
        );
        debug_assert!(
            text.as_bytes()[source_len] == 0,
            "sentinel byte must be 0x00"
        );
        Self {
            text,
            pos: 0,
            source_len,
            position: Position::START,
        }
    }

    // ─── Code-point API ────────────────────────────────────────────

    /// Returns the code point at the current position, or `None` at
    /// end-of-input.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        if self.is_eof() {
            return None;
        }
        let b = self.current();
        if b.is_ascii() {
            Some(char::from(b))
        } else {
            self.text[self.pos..].chars().next()
        }
    }

    /// Consume and return the current code point, updating line and column.
    ///
    /// Returns `None` at end-of-input without moving.
    #[inline]
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.bump(c);
        Some(c)
    }

    /// Current code-point offset, line and column.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    fn bump(&mut self, c: char) {
        let breaks_line = match c {
            '\n' => true,
            '\r' => self.peek_byte() != b'\n',
            _ => false,
        };
        if breaks_line {
            self.position.line += 1;
            self.position.column = 0;
        } else {
            self.position.column += 1;
        }
        self.position.offset += 1;
        self.pos += c.len_utf8();
    }

    // ─── Byte API ──────────────────────────────────────────────────

    /// Returns the byte at the current position.
    ///
    /// Returns `0x00` at end-of-input (the sentinel). Interior null bytes
    /// also return `0x00`; use [`is_eof()`](Self::is_eof) to distinguish.
    #[inline]
    pub fn current(&self) -> u8 {
        self.text.as_bytes()[self.pos]
    }

    /// Returns the byte one position ahead of current.
    ///
    /// Safe to call at any position, including the sentinel.
    #[inline]
    pub fn peek_byte(&self) -> u8 {
        self.text.as_bytes()[self.pos + 1]
    }

    /// Returns `true` if the cursor has reached end-of-input.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.current() == 0 && self.pos >= self.source_len
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Length of the source content in bytes.
    #[inline]
    pub fn source_len(&self) -> usize {
        self.source_len
    }

    /// Extract a source substring by byte range.
    ///
    /// # Contract
    ///
    /// `start..end` must fall within the source content and on character
    /// boundaries. Ranges taken from the scanner's token boundaries always
    /// do, because the scanner only ever advances by whole code points.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        debug_assert!(
            end <= self.source_len,
            "slice end {end} exceeds source length {}",
            self.source_len
        );
        debug_assert!(start <= end, "slice start {start} exceeds end {end}");
        &self.text[start..end]
    }

    /// The unscanned remainder of the source (excludes sentinel and padding).
    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..self.source_len]
    }

    /// Advance while `pred` returns `true` for the current byte.
    ///
    /// # Contract
    ///
    /// `pred` must only accept ASCII bytes other than `\n` and `\r`, and
    /// `pred(0)` must return `false`. Each accepted byte is then exactly one
    /// code point on the current line, so the column advances by one.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        loop {
            let b = self.current();
            if !pred(b) {
                break;
            }
            debug_assert!(b.is_ascii() && b != b'\n' && b != b'\r' && b != 0);
            self.pos += 1;
            self.position.offset += 1;
            self.position.column += 1;
        }
    }

    /// Advance `n` bytes of ASCII content on the current line.
    ///
    /// Used for operator lexemes whose length is already known.
    pub fn advance_ascii(&mut self, n: usize) {
        debug_assert!(self.rest().as_bytes()[..n]
            .iter()
            .all(|&b| b.is_ascii() && b != b'\n' && b != b'\r'));
        self.pos += n;
        self.position.offset += n;
        self.position.column += n;
    }

    /// Advance past a run of whitespace: spaces, tabs and line breaks.
    #[inline]
    pub fn eat_whitespace(&mut self) {
        loop {
            match self.current() {
                b' ' | b'\t' => {
                    self.pos += 1;
                    self.position.offset += 1;
                    self.position.column += 1;
                }
                b'\n' => self.bump('\n'),
                b'\r' => self.bump('\r'),
                _ => break,
            }
        }
    }

    /// Advance past ordinary string content to the next interesting byte.
    /// Returns the byte found, or 0 for end-of-input.
    ///
    /// "Interesting" bytes for strings: the closing `quote`, `\`, `\n`, `\r`.
    /// Uses memchr3 for the first three with a secondary check for `\r`.
    /// The skipped run never contains a line break, so only the column and
    /// offset move.
    pub fn skip_to_string_delim(&mut self, quote: u8) -> u8 {
        let remaining = self.rest().as_bytes();
        let primary = memchr::memchr3(quote, b'\\', b'\n', remaining);
        let cr = memchr::memchr(b'\r', remaining);
        let offset = earliest_of(primary, cr).unwrap_or(remaining.len());

        let skipped = char_count(&remaining[..offset]);
        self.pos += offset;
        self.position.offset += skipped;
        self.position.column += skipped;
        self.current()
    }

    /// Advance past bracketed-reference content to `]`, a line break, or
    /// end-of-input. Returns the byte found, or 0 for end-of-input.
    pub fn skip_to_bracket_delim(&mut self) -> u8 {
        let remaining = self.rest().as_bytes();
        let offset = memchr::memchr3(b']', b'\n', b'\r', remaining).unwrap_or(remaining.len());

        let skipped = char_count(&remaining[..offset]);
        self.pos += offset;
        self.position.offset += skipped;
        self.position.column += skipped;
        self.current()
    }
}
