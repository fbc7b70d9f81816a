//! Lexical error types.
//!
//! Errors follow the WHERE+WHAT+WHY+HOW shape:
//! - WHERE: `span` locating the error in source
//! - WHAT: `kind` describing what went wrong
//! - WHY: `context` explaining what the lexer was doing
//! - HOW: `suggestions` providing actionable fixes
//!
//! Every error is recoverable. The lexer emits a covering token, records
//! the error, and keeps scanning.

use crate::Span;

/// A lexical error with full context for diagnostic rendering.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    /// WHERE the error occurred (byte range of the covering token).
    pub span: Span,
    /// WHAT went wrong.
    pub kind: LexErrorKind,
    /// WHY we were checking (lexing context at the point of error).
    pub context: LexErrorContext,
    /// HOW to fix (actionable suggestions).
    pub suggestions: Vec<LexSuggestion>,
}

/// What kind of lexical error occurred.
///
/// The `Display` form is the diagnostic message.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum LexErrorKind {
    /// String literal cut off by a line break or end of input.
    #[error("unterminated string literal")]
    UnterminatedString,
    /// Stray `.`, empty exponent, or letters glued to digits.
    #[error("malformed number literal")]
    MalformedNumber,
    /// `[` with no closing `]` on the same line.
    #[error("unmatched `[`: no closing `]` before end of line")]
    UnmatchedBracket,
    /// A code point no lexeme can start with.
    #[error("unknown character `{}`", .ch.escape_debug())]
    UnknownCharacter { ch: char },
}

/// Lexing context at the point of error: the WHY.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum LexErrorContext {
    /// Between lexemes.
    #[default]
    TopLevel,
    /// Inside a string literal opened by `quote`.
    InsideString { quote: char },
    /// Inside a numeric literal.
    NumberLiteral,
    /// Inside a `[...]` reference.
    BracketReference,
}

/// Suggestion for fixing a lexical error: the HOW.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexSuggestion {
    /// Human-readable message describing the fix.
    pub message: String,
    /// Priority (lower = more likely relevant). 0 = most likely.
    pub priority: u8,
}

impl LexSuggestion {
    /// Create a text-only suggestion.
    pub fn text(message: impl Into<String>, priority: u8) -> Self {
        Self {
            message: message.into(),
            priority,
        }
    }
}

impl LexError {
    /// Create an unterminated string error.
    #[cold]
    pub fn unterminated_string(span: Span, quote: char) -> Self {
        Self {
            span,
            kind: LexErrorKind::UnterminatedString,
            context: LexErrorContext::InsideString { quote },
            suggestions: vec![LexSuggestion::text(
                format!("add a closing `{quote}`"),
                0,
            )],
        }
    }

    /// Create a malformed number error.
    #[cold]
    pub fn malformed_number(span: Span) -> Self {
        Self {
            span,
            kind: LexErrorKind::MalformedNumber,
            context: LexErrorContext::NumberLiteral,
            suggestions: vec![
                LexSuggestion::text("numbers look like `42`, `2.5` or `1.5e-3`", 0),
                LexSuggestion::text("separate a number from a following name with a space or operator", 1),
            ],
        }
    }

    /// Create an unmatched bracket error.
    #[cold]
    pub fn unmatched_bracket(span: Span) -> Self {
        Self {
            span,
            kind: LexErrorKind::UnmatchedBracket,
            context: LexErrorContext::BracketReference,
            suggestions: vec![LexSuggestion::text("add a closing `]`", 0)],
        }
    }

    /// Create an unknown character error.
    #[cold]
    pub fn unknown_character(span: Span, ch: char) -> Self {
        let suggestions = match ch {
            '!' => vec![LexSuggestion::text("for inequality, use `!=` or `<>`", 0)],
            '|' => vec![LexSuggestion::text("for logical or, use `||`", 0)],
            '\0' => vec![LexSuggestion::text("remove the null character", 0)],
            _ => Vec::new(),
        };
        Self {
            span,
            kind: LexErrorKind::UnknownCharacter { ch },
            context: LexErrorContext::TopLevel,
            suggestions,
        }
    }

    /// The diagnostic message.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}
