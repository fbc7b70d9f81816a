//! Raw token tags produced by the scanner.
//!
//! Tags are grouped into discriminant ranges so category checks are a
//! single comparison:
//!
//! | Range   | Category                 |
//! |---------|--------------------------|
//! | 0-15    | Identifiers and literals |
//! | 32-36   | Operators and delimiters |
//! | 112     | Trivia                   |
//! | 240-243 | Errors                   |
//! | 255     | End of input             |

/// Lexeme category before cooking.
///
/// The scanner decides the shape of a lexeme; the cooker decides what it
/// means (for example, whether an identifier is a boolean keyword).
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RawTag {
    // === Identifiers & Literals ===
    /// Bare identifier not followed by `(`.
    Ident = 0,
    /// Identifier immediately followed by `(`.
    FunctionIdent = 1,
    Int = 2,
    Float = 3,
    /// Terminated string literal, quotes included.
    String = 4,
    /// `[...]` reference, brackets included.
    BracketRef = 5,

    // === Operators & Delimiters ===
    /// Operator from the grammar's table.
    Operator = 32,
    Comma = 33,
    LeftParen = 34,
    RightParen = 35,
    RightBracket = 36,

    // === Trivia ===
    /// Maximal run of spaces, tabs and line breaks.
    Whitespace = 112,

    // === Errors ===
    /// Number with a stray `.`, an empty exponent or glued letters.
    MalformedNumber = 240,
    /// String cut off by a line break or end of input.
    UnterminatedString = 241,
    /// Bare `[` with no `]` on the same line.
    UnmatchedBracket = 242,
    /// A code point no lexeme can start with.
    UnknownChar = 243,

    // === Control ===
    Eof = 255,
}

impl RawTag {
    /// Returns `true` for tags that carry a lexical error.
    #[inline]
    pub fn is_error(self) -> bool {
        (self as u8) >= 240 && self != RawTag::Eof
    }
}

/// Scanner output: a tag and the lexeme's length in bytes.
///
/// Positions are not stored; the consumer reads them from the cursor
/// before and after each token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawToken {
    pub tag: RawTag,
    pub len: usize,
}
