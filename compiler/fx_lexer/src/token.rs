//! Public token model.

use crate::Span;

/// Classification of a lexeme.
///
/// Discriminants are stable: they are the values exchanged across the C
/// boundary.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub enum TokenKind {
    /// Quoted string literal, quotes included.
    String = 0,
    Integer = 1,
    Float = 2,
    /// `true` or `false` in any letter case.
    Boolean = 3,
    /// Bare identifier or `[bracketed reference]`.
    ColumnReference = 4,
    /// Identifier immediately followed by `(`.
    Function = 5,
    Operator = 6,
    Comma = 7,
    LeftParen = 8,
    RightParen = 9,
    LeftBracket = 10,
    RightBracket = 11,
    Whitespace = 12,
    /// Malformed number or unknown character.
    Error = 13,
    /// Zero-width sentinel closing every token sequence.
    #[cfg_attr(feature = "serde", serde(rename = "eof"))]
    EndOfInput = 14,
}

impl TokenKind {
    /// Every kind, in discriminant order.
    pub const ALL: [TokenKind; 15] = [
        TokenKind::String,
        TokenKind::Integer,
        TokenKind::Float,
        TokenKind::Boolean,
        TokenKind::ColumnReference,
        TokenKind::Function,
        TokenKind::Operator,
        TokenKind::Comma,
        TokenKind::LeftParen,
        TokenKind::RightParen,
        TokenKind::LeftBracket,
        TokenKind::RightBracket,
        TokenKind::Whitespace,
        TokenKind::Error,
        TokenKind::EndOfInput,
    ];

    /// Returns `true` for tokens with no meaning to a parser.
    #[inline]
    pub fn is_trivia(self) -> bool {
        self == TokenKind::Whitespace
    }

    /// Returns `true` for literal values.
    #[inline]
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::String | TokenKind::Integer | TokenKind::Float | TokenKind::Boolean
        )
    }

    /// Returns `true` for punctuation: commas, parentheses and brackets.
    #[inline]
    pub fn is_delimiter(self) -> bool {
        matches!(
            self,
            TokenKind::Comma
                | TokenKind::LeftParen
                | TokenKind::RightParen
                | TokenKind::LeftBracket
                | TokenKind::RightBracket
        )
    }

    /// Stable lowercase name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::String => "string",
            TokenKind::Integer => "integer",
            TokenKind::Float => "float",
            TokenKind::Boolean => "boolean",
            TokenKind::ColumnReference => "columnReference",
            TokenKind::Function => "function",
            TokenKind::Operator => "operator",
            TokenKind::Comma => "comma",
            TokenKind::LeftParen => "leftParen",
            TokenKind::RightParen => "rightParen",
            TokenKind::LeftBracket => "leftBracket",
            TokenKind::RightBracket => "rightBracket",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Error => "error",
            TokenKind::EndOfInput => "eof",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified lexeme with its exact source text and location.
///
/// `start`, `end` and `column` count code points; `span` counts bytes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct Token {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: TokenKind,
    /// Exact source substring covered by the token.
    pub text: String,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub span: Span,
    pub start: usize,
    pub end: usize,
    /// 1-based line of `start`.
    pub line: usize,
    /// 0-based column of `start`.
    pub column: usize,
    /// `false` when the lexeme was malformed but still emitted.
    pub is_valid: bool,
}

impl Token {
    /// Number of code points covered.
    #[inline]
    pub fn char_len(&self) -> usize {
        self.end - self.start
    }
}
