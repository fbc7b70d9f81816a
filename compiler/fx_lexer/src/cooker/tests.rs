use pretty_assertions::assert_eq;

use super::*;
use crate::LexErrorKind;

fn kind_of(tag: RawTag, text: &str) -> TokenKind {
    cook(tag, text, Span::new(0, 0)).kind
}

#[test]
fn identifiers() {
    assert_eq!(kind_of(RawTag::Ident, "Price"), TokenKind::ColumnReference);
    assert_eq!(kind_of(RawTag::BracketRef, "[Unit Price]"), TokenKind::ColumnReference);
    assert_eq!(kind_of(RawTag::FunctionIdent, "SUM"), TokenKind::Function);
}

#[test]
fn booleans_any_case() {
    for text in ["true", "TRUE", "False", "fAlSe"] {
        assert_eq!(kind_of(RawTag::Ident, text), TokenKind::Boolean, "{text}");
    }
    assert_eq!(kind_of(RawTag::Ident, "truth"), TokenKind::ColumnReference);
    assert_eq!(kind_of(RawTag::BracketRef, "[true]"), TokenKind::ColumnReference);
}

#[test]
fn boolean_wins_over_function() {
    assert_eq!(kind_of(RawTag::FunctionIdent, "TRUE"), TokenKind::Boolean);
}

#[test]
fn direct_mappings() {
    let cases = [
        (RawTag::Int, TokenKind::Integer),
        (RawTag::Float, TokenKind::Float),
        (RawTag::String, TokenKind::String),
        (RawTag::Operator, TokenKind::Operator),
        (RawTag::Comma, TokenKind::Comma),
        (RawTag::LeftParen, TokenKind::LeftParen),
        (RawTag::RightParen, TokenKind::RightParen),
        (RawTag::RightBracket, TokenKind::RightBracket),
        (RawTag::Whitespace, TokenKind::Whitespace),
        (RawTag::Eof, TokenKind::EndOfInput),
    ];
    for (tag, kind) in cases {
        let cooked = cook(tag, "x", Span::new(0, 1));
        assert_eq!(cooked.kind, kind, "{tag:?}");
        assert!(cooked.is_valid);
        assert_eq!(cooked.error, None);
    }
}

#[test]
fn error_tags_keep_best_effort_kind() {
    let span = Span::new(3, 7);
    let cases = [
        (RawTag::MalformedNumber, "12ab", TokenKind::Error, LexErrorKind::MalformedNumber),
        (RawTag::UnterminatedString, "\"abc", TokenKind::String, LexErrorKind::UnterminatedString),
        (RawTag::UnmatchedBracket, "[", TokenKind::LeftBracket, LexErrorKind::UnmatchedBracket),
        (RawTag::UnknownChar, "$", TokenKind::Error, LexErrorKind::UnknownCharacter { ch: '$' }),
    ];
    for (tag, text, kind, error_kind) in cases {
        let cooked = cook(tag, text, span);
        assert_eq!(cooked.kind, kind, "{tag:?}");
        assert!(!cooked.is_valid);
        let Some(error) = cooked.error else {
            panic!("{tag:?} produced no error");
        };
        assert_eq!(error.kind, error_kind);
        assert_eq!(error.span, span);
    }
}

#[test]
fn unterminated_string_records_quote() {
    let cooked = cook(RawTag::UnterminatedString, "'abc", Span::new(0, 4));
    let Some(error) = cooked.error else {
        panic!("no error");
    };
    assert_eq!(error.suggestions[0].message, "add a closing `'`");
}
