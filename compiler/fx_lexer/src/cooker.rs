//! Token cooking layer.
//!
//! Maps `(RawTag, text)` pairs from the raw scanner to public
//! [`TokenKind`] values, resolves boolean keywords, and builds the
//! [`LexError`] for every error tag.
//!
//! ```text
//! source → RawScanner → (RawTag, len) → cook → (TokenKind, is_valid, error)
//! ```
//!
//! Error tags keep a best-effort kind: an unterminated string is still a
//! `String`, an unmatched `[` is still a `LeftBracket`. Only lexemes with
//! no usable shape become `Error`.

use fx_lexer_core::RawTag;

use crate::{LexError, Span, TokenKind};

/// The cooked form of one raw token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Cooked {
    pub kind: TokenKind,
    pub is_valid: bool,
    pub error: Option<LexError>,
}

impl Cooked {
    fn valid(kind: TokenKind) -> Self {
        Self {
            kind,
            is_valid: true,
            error: None,
        }
    }

    #[cold]
    fn invalid(kind: TokenKind, error: LexError) -> Self {
        Self {
            kind,
            is_valid: false,
            error: Some(error),
        }
    }
}

/// Returns `true` for `true`/`false` in any letter case.
fn is_boolean_keyword(text: &str) -> bool {
    text.eq_ignore_ascii_case("true") || text.eq_ignore_ascii_case("false")
}

/// Cook one raw token. `text` is the lexeme, `span` its byte range.
pub(crate) fn cook(tag: RawTag, text: &str, span: Span) -> Cooked {
    match tag {
        // Keywords win over function-call position: `TRUE(` is a Boolean.
        RawTag::Ident | RawTag::FunctionIdent if is_boolean_keyword(text) => {
            Cooked::valid(TokenKind::Boolean)
        }
        RawTag::Ident | RawTag::BracketRef => Cooked::valid(TokenKind::ColumnReference),
        RawTag::FunctionIdent => Cooked::valid(TokenKind::Function),
        RawTag::Int => Cooked::valid(TokenKind::Integer),
        RawTag::Float => Cooked::valid(TokenKind::Float),
        RawTag::String => Cooked::valid(TokenKind::String),
        RawTag::Operator => Cooked::valid(TokenKind::Operator),
        RawTag::Comma => Cooked::valid(TokenKind::Comma),
        RawTag::LeftParen => Cooked::valid(TokenKind::LeftParen),
        RawTag::RightParen => Cooked::valid(TokenKind::RightParen),
        RawTag::RightBracket => Cooked::valid(TokenKind::RightBracket),
        RawTag::Whitespace => Cooked::valid(TokenKind::Whitespace),
        RawTag::Eof => Cooked::valid(TokenKind::EndOfInput),

        RawTag::MalformedNumber => {
            Cooked::invalid(TokenKind::Error, LexError::malformed_number(span))
        }
        RawTag::UnterminatedString => {
            let quote = text.chars().next().unwrap_or('"');
            Cooked::invalid(
                TokenKind::String,
                LexError::unterminated_string(span, quote),
            )
        }
        RawTag::UnmatchedBracket => {
            Cooked::invalid(TokenKind::LeftBracket, LexError::unmatched_bracket(span))
        }
        RawTag::UnknownChar => {
            let ch = text.chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
            Cooked::invalid(TokenKind::Error, LexError::unknown_character(span, ch))
        }
    }
}

#[cfg(test)]
mod tests;
