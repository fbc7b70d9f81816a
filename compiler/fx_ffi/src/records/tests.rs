use std::mem::{offset_of, size_of};

use pretty_assertions::assert_eq;

use super::*;
use crate::FxStatus;

// ── Layout ──────────────────────────────────────────────────────────────

#[test]
fn kind_discriminants_match_header() {
    for kind in TokenKind::ALL {
        assert_eq!(FxTokenKind::from(kind) as i32, i32::from(kind as u8), "{kind:?}");
    }
    assert_eq!(size_of::<FxTokenKind>(), 4);
}

#[test]
fn token_layout() {
    assert_eq!(offset_of!(FxToken, kind), 0);
    assert_eq!(offset_of!(FxToken, text), size_of::<*mut c_char>().max(4));
    let ints = offset_of!(FxToken, text) + size_of::<*mut c_char>();
    assert_eq!(offset_of!(FxToken, start), ints);
    assert_eq!(offset_of!(FxToken, end), ints + 4);
    assert_eq!(offset_of!(FxToken, line), ints + 8);
    assert_eq!(offset_of!(FxToken, column), ints + 12);
    assert_eq!(offset_of!(FxToken, is_valid), ints + 16);
}

#[test]
fn diagnostic_layout() {
    let ints = size_of::<*mut c_char>();
    assert_eq!(offset_of!(FxDiagnostic, message), 0);
    assert_eq!(offset_of!(FxDiagnostic, line), ints);
    assert_eq!(offset_of!(FxDiagnostic, column), ints + 4);
    assert_eq!(offset_of!(FxDiagnostic, start), ints + 8);
    assert_eq!(offset_of!(FxDiagnostic, end), ints + 12);
}

#[test]
fn result_layout() {
    let ptr = size_of::<*mut FxToken>();
    assert_eq!(offset_of!(FxTokenizeResult, tokens), 0);
    assert_eq!(offset_of!(FxTokenizeResult, token_count), ptr);
    assert_eq!(offset_of!(FxTokenizeResult, errors) % ptr, 0);
    assert!(offset_of!(FxTokenizeResult, errors) > ptr);
    assert!(offset_of!(FxTokenizeResult, error_count) > offset_of!(FxTokenizeResult, errors));
}

// ── Conversion ──────────────────────────────────────────────────────────

#[test]
fn converts_tokens_and_diagnostics() {
    let result = fx_lexer::tokenize("A $");
    let fx = to_boundary(&result).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(fx.token_count, 4);
    assert_eq!(fx.error_count, 1);

    let tokens = fx.tokens();
    assert_eq!(tokens[0].kind(), FxTokenKind::ColumnReference);
    assert_eq!(tokens[0].text(), Some("A"));
    assert_eq!(tokens[2].kind(), FxTokenKind::Error);
    assert!(!tokens[2].is_valid());
    assert_eq!((tokens[2].start(), tokens[2].end()), (2, 3));
    assert_eq!(tokens[3].kind(), FxTokenKind::EndOfInput);
    assert_eq!(tokens[3].text(), Some(""));

    let errors = fx.errors();
    assert_eq!(errors[0].message(), Some("unknown character `$`"));
    assert_eq!((errors[0].line(), errors[0].column()), (1, 2));
}

#[test]
fn clean_input_has_null_error_array() {
    let result = fx_lexer::tokenize("1 + 2");
    let fx = to_boundary(&result).unwrap_or_else(|e| panic!("{e}"));
    assert!(fx.errors.is_null());
    assert_eq!(fx.error_count, 0);
    assert!(fx.errors().is_empty());
    assert!(!fx.tokens.is_null());
}

#[test]
fn interior_null_becomes_replacement_character() {
    let result = fx_lexer::tokenize("a\0b");
    let fx = to_boundary(&result).unwrap_or_else(|e| panic!("{e}"));
    let texts: Vec<Option<&str>> = fx.tokens().iter().map(FxToken::text).collect();
    assert_eq!(texts, vec![Some("a"), Some("\u{FFFD}"), Some("b"), Some("")]);
    assert_eq!(fx.errors()[0].message(), Some("unknown character `\\0`"));
}

#[test]
fn c_string_round_trip() {
    let s = c_string("SUM(1)");
    assert_eq!(unsafe { borrow_c_str(s) }, Some("SUM(1)"));
    unsafe {
        free_c_string(s);
        free_c_string(ptr::null_mut());
    }
}

// ── Limits ──────────────────────────────────────────────────────────────

#[test]
fn offsets_beyond_i32_are_too_large() {
    let Err(err) = to_i32(i32::MAX as usize + 1) else {
        panic!("expected overflow");
    };
    assert!(matches!(err, FfiError::InputTooLarge { len } if len == i32::MAX as usize + 1));
    assert_eq!(err.status(), FxStatus::InputTooLarge);
    assert_eq!(to_i32(i32::MAX as usize).ok(), Some(i32::MAX));
}
