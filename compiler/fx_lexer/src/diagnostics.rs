//! Diagnostics collection.
//!
//! Lexical errors never stop the scan. Each one is recorded here, in
//! discovery order, with the location of the token that covers it.

use crate::{LexError, LexErrorKind, Span, Token};

/// A lexical error located in code-point terms.
///
/// `start`/`end`/`line`/`column` are copied from the covering token, so a
/// diagnostic's range always equals the range of exactly one token.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Diagnostic {
    pub message: String,
    /// 1-based line.
    pub line: usize,
    /// 0-based column.
    pub column: usize,
    pub start: usize,
    pub end: usize,
    /// Structured error with byte span, context and suggestions.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub error: LexError,
}

impl Diagnostic {
    #[inline]
    pub fn kind(&self) -> &LexErrorKind {
        &self.error.kind
    }

    /// Byte range of the offending lexeme.
    #[inline]
    pub fn span(&self) -> Span {
        self.error.span
    }
}

/// Append-only, ordered diagnostics sink.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `error` against the token that covers it.
    pub fn report(&mut self, error: LexError, token: &Token) {
        debug_assert_eq!(error.span, token.span, "diagnostic must match its token");
        self.items.push(Diagnostic {
            message: error.message(),
            line: token.line,
            column: token.column,
            start: token.start,
            end: token.end,
            error,
        });
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
