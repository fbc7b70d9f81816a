use pretty_assertions::assert_eq;

use super::*;
use crate::TokenKind;

fn run(source: &str) -> TokenizeResult {
    assemble(source, &Grammar::default())
}

#[test]
fn empty_input_is_just_eof() {
    let result = run("");
    assert_eq!(result.tokens().len(), 1);
    let eof = &result.tokens()[0];
    assert_eq!(eof.kind, TokenKind::EndOfInput);
    assert_eq!((eof.start, eof.end, eof.line, eof.column), (0, 0, 1, 0));
    assert_eq!(eof.text, "");
    assert!(result.diagnostics().is_empty());
}

#[test]
fn eof_sits_at_final_position() {
    let result = run("a\nbc");
    let Some(eof) = result.tokens().last() else {
        panic!("no tokens");
    };
    assert_eq!(eof.kind, TokenKind::EndOfInput);
    assert_eq!((eof.start, eof.end), (4, 4));
    assert_eq!((eof.line, eof.column), (2, 2));
    assert_eq!(eof.span, Span::new(4, 4));
}

#[test]
fn offsets_count_code_points() {
    let result = run("\"ü\"+1");
    let toks = result.tokens();
    assert_eq!(toks[0].kind, TokenKind::String);
    assert_eq!((toks[0].start, toks[0].end), (0, 3));
    assert_eq!(toks[0].span, Span::new(0, 4));
    assert_eq!((toks[1].start, toks[1].column), (3, 3));
    assert_eq!(toks[2].start, 4);
}

#[test]
fn lines_and_columns_follow_breaks() {
    let result = run("A\r\n  B");
    let toks = result.tokens();
    assert_eq!((toks[0].line, toks[0].column), (1, 0));
    assert_eq!(toks[1].kind, TokenKind::Whitespace);
    assert_eq!(toks[1].text, "\r\n  ");
    assert_eq!((toks[2].line, toks[2].column), (2, 2));
    assert_eq!(toks[2].start, 5);
}

#[test]
fn diagnostic_matches_covering_token() {
    let result = run("1 + 2x");
    assert_eq!(result.diagnostics().len(), 1);
    let diag = &result.diagnostics()[0];
    let covering: Vec<&Token> = result
        .tokens()
        .iter()
        .filter(|t| t.start == diag.start && t.end == diag.end)
        .collect();
    assert_eq!(covering.len(), 1);
    assert_eq!(covering[0].text, "2x");
    assert_eq!(covering[0].kind, TokenKind::Error);
    assert!(!covering[0].is_valid);
    assert_eq!(diag.span(), covering[0].span);
}

#[test]
fn unmatched_bracket_then_continues() {
    let result = run("[Col");
    let kinds: Vec<TokenKind> = result.tokens().iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::LeftBracket,
            TokenKind::ColumnReference,
            TokenKind::EndOfInput
        ]
    );
    assert!(!result.tokens()[0].is_valid);
    assert!(result.tokens()[1].is_valid);
    assert_eq!((result.diagnostics()[0].start, result.diagnostics()[0].end), (0, 1));
}

#[test]
fn spreadsheet_grammar_is_honoured() {
    let result = assemble("A==B", &Grammar::spreadsheet());
    let texts: Vec<&str> = result.tokens().iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["A", "=", "=", "B", ""]);
}

#[test]
fn long_input_positions_use_full_width_offsets() {
    let source = "[Größe] + 1 ".repeat(20_000);
    let result = run(&source);
    let Some(eof) = result.tokens().last() else {
        panic!("no tokens");
    };
    let chars: usize = source.chars().count();
    assert_eq!((eof.start, eof.end), (chars, chars));
    assert_eq!(eof.span, Span::new(source.len(), source.len()));
    assert!(result.diagnostics().is_empty());
}
