//! Hand-written raw scanner producing `(RawTag, len)` pairs.
//!
//! The scanner operates on a sentinel-terminated [`Cursor`] and produces
//! [`RawToken`] values with zero heap allocation. It does not resolve
//! keywords or build diagnostics; those are deferred to the cooking layer.
//!
//! # Design
//!
//! Dispatch is on the current byte. ASCII bytes go straight to a focused
//! method; a non-ASCII lead byte is decoded and routed by its code point.
//! Each method advances the cursor over exactly one lexeme and returns
//! `RawToken { tag, len }`. The sentinel byte (`0x00`) dispatches to
//! [`eof()`](RawScanner::eof), which separates true end-of-input from an
//! interior NUL.
//!
//! Malformed input never stops the scan: every error is a tag, and every
//! error token has a positive length, so each call makes progress.

use crate::cursor::{Cursor, Position};
use crate::grammar::{EscapeStyle, Grammar};
use crate::tag::{RawTag, RawToken};

/// Single-pass scanner over one formula.
pub struct RawScanner<'a> {
    cursor: Cursor<'a>,
    grammar: &'a Grammar,
}

impl<'a> RawScanner<'a> {
    /// Create a new scanner from a cursor and the grammar tables to apply.
    pub fn new(cursor: Cursor<'a>, grammar: &'a Grammar) -> Self {
        Self { cursor, grammar }
    }

    /// Code-point position of the next unscanned character.
    #[inline]
    pub fn position(&self) -> Position {
        self.cursor.position()
    }

    /// Byte offset of the next unscanned character.
    #[inline]
    pub fn pos(&self) -> usize {
        self.cursor.pos()
    }

    /// The underlying cursor, for slicing lexeme text.
    #[inline]
    pub fn cursor(&self) -> &Cursor<'a> {
        &self.cursor
    }

    /// Produce the next raw token.
    ///
    /// Returns `RawTag::Eof` with `len == 0` when the source is exhausted.
    /// Subsequent calls after EOF continue to return `Eof`.
    pub fn next_token(&mut self) -> RawToken {
        let start = self.cursor.pos();
        match self.cursor.current() {
            0 => self.eof(start),
            b' ' | b'\t' | b'\n' | b'\r' => self.whitespace(start),
            b'0'..=b'9' => self.number(start),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.identifier(start),
            b'[' => self.bracket_ref(start),
            b']' => self.single(start, RawTag::RightBracket),
            b'(' => self.single(start, RawTag::LeftParen),
            b')' => self.single(start, RawTag::RightParen),
            b',' => self.single(start, RawTag::Comma),
            b if self.grammar.is_quote(b) => self.string(start, b),
            b if b.is_ascii() => self.operator(start),
            _ => self.non_ascii(start),
        }
    }

    // ─── EOF ───────────────────────────────────────────────────────

    fn eof(&mut self, start: usize) -> RawToken {
        if self.cursor.is_eof() {
            RawToken {
                tag: RawTag::Eof,
                len: 0,
            }
        } else {
            // Interior null: content, but no lexeme starts with it.
            self.single(start, RawTag::UnknownChar)
        }
    }

    // ─── Whitespace ────────────────────────────────────────────────

    #[inline]
    fn whitespace(&mut self, start: usize) -> RawToken {
        self.cursor.eat_whitespace();
        self.finish(start, RawTag::Whitespace)
    }

    // ─── Punctuation & Operators ───────────────────────────────────

    /// Single code point token: advance once and emit the given tag.
    fn single(&mut self, start: usize, tag: RawTag) -> RawToken {
        self.cursor.advance();
        self.finish(start, tag)
    }

    fn operator(&mut self, start: usize) -> RawToken {
        match self.grammar.operators().longest_match(self.cursor.rest()) {
            Some(len) => {
                self.cursor.advance_ascii(len);
                self.finish(start, RawTag::Operator)
            }
            None => self.single(start, RawTag::UnknownChar),
        }
    }

    // ─── Identifiers ───────────────────────────────────────────────

    fn non_ascii(&mut self, start: usize) -> RawToken {
        match self.cursor.peek() {
            Some(c) if c.is_alphabetic() => self.identifier(start),
            _ => self.single(start, RawTag::UnknownChar),
        }
    }

    fn identifier(&mut self, start: usize) -> RawToken {
        self.cursor.advance(); // first char (already validated)
        self.eat_ident_continue();
        if self.cursor.current() == b'(' {
            self.finish(start, RawTag::FunctionIdent)
        } else {
            self.finish(start, RawTag::Ident)
        }
    }

    fn eat_ident_continue(&mut self) {
        loop {
            self.cursor.eat_while(is_ident_continue);
            if self.cursor.current().is_ascii() || !self.at_unicode_ident_continue() {
                break;
            }
            self.cursor.advance();
        }
    }

    /// Non-ASCII alphanumeric at the cursor.
    fn at_unicode_ident_continue(&self) -> bool {
        self.cursor
            .peek()
            .is_some_and(|c| !c.is_ascii() && c.is_alphanumeric())
    }

    /// Identifier characters glued to the end of a lexeme.
    fn at_ident_continue(&self) -> bool {
        is_ident_continue(self.cursor.current()) || self.at_unicode_ident_continue()
    }

    // ─── Bracketed References ──────────────────────────────────────

    fn bracket_ref(&mut self, start: usize) -> RawToken {
        let snapshot = self.cursor;
        self.cursor.advance(); // consume '['
        if self.cursor.skip_to_bracket_delim() == b']' {
            self.cursor.advance(); // consume ']'
            return self.finish(start, RawTag::BracketRef);
        }
        // No `]` before the line break: back up and emit the bare `[`.
        self.cursor = snapshot;
        self.single(start, RawTag::UnmatchedBracket)
    }

    // ─── Numeric Literals ──────────────────────────────────────────

    fn number(&mut self, start: usize) -> RawToken {
        self.eat_digits();
        let mut is_float = false;

        if self.cursor.current() == b'.' {
            if !self.cursor.peek_byte().is_ascii_digit() {
                return self.malformed_number(start);
            }
            self.cursor.advance(); // consume '.'
            self.eat_digits();
            is_float = true;
        }

        if matches!(self.cursor.current(), b'e' | b'E') {
            self.cursor.advance(); // consume 'e'
            if matches!(self.cursor.current(), b'+' | b'-') {
                self.cursor.advance();
            }
            if !self.cursor.current().is_ascii_digit() {
                return self.malformed_number(start);
            }
            self.eat_digits();
            is_float = true;
        }

        if self.cursor.current() == b'.' || self.at_ident_continue() {
            return self.malformed_number(start);
        }

        self.finish(start, if is_float { RawTag::Float } else { RawTag::Int })
    }

    fn eat_digits(&mut self) {
        self.cursor.eat_while(|b| b.is_ascii_digit());
    }

    /// Consume up to the next delimiter and emit a malformed-number token.
    fn malformed_number(&mut self, start: usize) -> RawToken {
        while !self.grammar.is_delimiter(self.cursor.current()) {
            self.cursor.advance();
        }
        self.finish(start, RawTag::MalformedNumber)
    }

    // ─── String Literals ───────────────────────────────────────────

    fn string(&mut self, start: usize, quote: u8) -> RawToken {
        self.cursor.advance(); // consume opening quote
        loop {
            // memchr-accelerated skip past ordinary string content
            match self.cursor.skip_to_string_delim(quote) {
                b if b == quote => {
                    self.cursor.advance(); // consume closing quote
                    if self.grammar.escape() == EscapeStyle::DoubledQuote
                        && self.cursor.current() == quote
                    {
                        self.cursor.advance(); // `""` is an escaped quote
                        continue;
                    }
                    return self.finish(start, RawTag::String);
                }
                b'\\' => {
                    self.cursor.advance(); // consume '\'
                    if self.grammar.escape() == EscapeStyle::Backslash
                        && !matches!(self.cursor.current(), b'\n' | b'\r')
                    {
                        self.cursor.advance(); // escaped code point
                    }
                }
                b'\n' | b'\r' => return self.finish(start, RawTag::UnterminatedString),
                0 if self.cursor.is_eof() => {
                    return self.finish(start, RawTag::UnterminatedString);
                }
                _ => {
                    self.cursor.advance();
                }
            }
        }
    }

    #[inline]
    fn finish(&self, start: usize, tag: RawTag) -> RawToken {
        RawToken {
            tag,
            len: self.cursor.pos() - start,
        }
    }
}

impl Iterator for RawScanner<'_> {
    type Item = RawToken;

    fn next(&mut self) -> Option<RawToken> {
        let tok = self.next_token();
        if tok.tag == RawTag::Eof {
            None
        } else {
            Some(tok)
        }
    }
}

/// 256-byte lookup table for ASCII identifier continuation bytes.
/// `true` for a-z, A-Z, 0-9, and underscore.
/// The sentinel byte (0x00) maps to `false`, naturally terminating loops.
#[allow(
    clippy::cast_possible_truncation,
    reason = "loop counter i is 0..=255, always fits in u8"
)]
static IS_IDENT_CONTINUE_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    let mut i = 0u16;
    while i < 256 {
        table[i as usize] = matches!(
            i as u8,
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_'
        );
        i += 1;
    }
    table
};

#[inline]
fn is_ident_continue(b: u8) -> bool {
    IS_IDENT_CONTINUE_TABLE[b as usize]
}

/// Convenience function: scan a source string and collect all raw tokens.
///
/// Returns every token except the final `Eof`. For positions alongside the
/// tokens, drive a [`RawScanner`] directly.
pub fn scan(source: &str, grammar: &Grammar) -> Vec<RawToken> {
    let buf = crate::SourceBuffer::new(source);
    RawScanner::new(buf.cursor(), grammar).collect()
}
