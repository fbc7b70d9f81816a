use std::ffi::{c_char, CStr};
use std::ptr;

use pretty_assertions::assert_eq;

use super::*;

fn tokenize_bytes(input: &[u8]) -> (*mut FxTokenizeResult, FxStatus) {
    let mut status = FxStatus::Panicked;
    let len = i32::try_from(input.len()).unwrap_or(i32::MAX);
    let result = unsafe { fx_tokenize(input.as_ptr().cast::<c_char>(), len, &mut status) };
    (result, status)
}

fn take(raw: *mut FxTokenizeResult) -> TokenizeHandle {
    let Some(handle) = (unsafe { TokenizeHandle::from_raw(raw) }) else {
        panic!("null result");
    };
    handle
}

fn kinds(result: &FxTokenizeResult) -> Vec<FxTokenKind> {
    result.tokens().iter().map(FxToken::kind).collect()
}

// ── fx_tokenize ─────────────────────────────────────────────────────────

#[test]
fn tokenize_reports_ok_and_records() {
    let (raw, status) = tokenize_bytes(b"SUM([Price], 2)");
    assert_eq!(status, FxStatus::Ok);
    let handle = take(raw);
    assert_eq!(
        kinds(handle.result()),
        vec![
            FxTokenKind::Function,
            FxTokenKind::LeftParen,
            FxTokenKind::ColumnReference,
            FxTokenKind::Comma,
            FxTokenKind::Whitespace,
            FxTokenKind::Integer,
            FxTokenKind::RightParen,
            FxTokenKind::EndOfInput,
        ]
    );
    assert_eq!(handle.tokens()[2].text(), Some("[Price]"));
    assert!(handle.errors().is_empty());
}

#[test]
fn records_are_read_through_accessors() {
    let handle = TokenizeHandle::tokenize("x\n  @").unwrap_or_else(|e| panic!("{e}"));
    let bad = &handle.tokens()[2];
    assert_eq!(bad.kind(), FxTokenKind::Error);
    assert_eq!(bad.text(), Some("@"));
    assert_eq!((bad.start(), bad.end()), (4, 5));
    assert_eq!((bad.line(), bad.column()), (2, 2));
    assert!(!bad.is_valid());

    let diag = &handle.errors()[0];
    assert_eq!(diag.message(), Some("unknown character `@`"));
    assert_eq!((diag.start(), diag.end()), (4, 5));
    assert_eq!((diag.line(), diag.column()), (2, 2));
}

#[test]
fn lexical_errors_are_not_boundary_failures() {
    let (raw, status) = tokenize_bytes(b"\"open");
    assert_eq!(status, FxStatus::Ok);
    let handle = take(raw);
    assert_eq!(handle.errors().len(), 1);
    assert_eq!(handle.errors()[0].message(), Some("unterminated string literal"));
    assert!(!handle.tokens()[0].is_valid());
}

#[test]
fn length_bounds_the_input() {
    let input = b"1+2 trailing";
    let mut status = FxStatus::Panicked;
    let raw = unsafe { fx_tokenize(input.as_ptr().cast::<c_char>(), 3, &mut status) };
    assert_eq!(status, FxStatus::Ok);
    let handle = take(raw);
    let texts: Vec<_> = handle.tokens().iter().filter_map(FxToken::text).collect();
    assert_eq!(texts, vec!["1", "+", "2", ""]);
}

#[test]
fn empty_input_yields_only_eof() {
    let (raw, status) = tokenize_bytes(b"");
    assert_eq!(status, FxStatus::Ok);
    let handle = take(raw);
    assert_eq!(kinds(handle.result()), vec![FxTokenKind::EndOfInput]);
    assert!(handle.result().errors.is_null());
}

#[test]
fn null_input_is_rejected() {
    let mut status = FxStatus::Ok;
    let raw = unsafe { fx_tokenize(ptr::null(), 4, &mut status) };
    assert!(raw.is_null());
    assert_eq!(status, FxStatus::NullInput);
}

#[test]
fn negative_length_is_rejected() {
    let mut status = FxStatus::Ok;
    let raw = unsafe { fx_tokenize(b"1".as_ptr().cast::<c_char>(), -1, &mut status) };
    assert!(raw.is_null());
    assert_eq!(status, FxStatus::InvalidLength);
}

#[test]
fn invalid_utf8_is_rejected() {
    let (raw, status) = tokenize_bytes(&[b'1', 0xFF, b'2']);
    assert!(raw.is_null());
    assert_eq!(status, FxStatus::InvalidUtf8);
}

#[test]
fn null_status_is_allowed() {
    let raw = unsafe { fx_tokenize(ptr::null(), 0, ptr::null_mut()) };
    assert!(raw.is_null());
    let raw = unsafe { fx_tokenize(b"1".as_ptr().cast::<c_char>(), 1, ptr::null_mut()) };
    assert!(!raw.is_null());
    unsafe { fx_free_tokenize_result(raw) };
}

// ── fx_tokenize_cstr ────────────────────────────────────────────────────

#[test]
fn tokenize_cstr_matches_length_variant() {
    let mut status = FxStatus::Panicked;
    let raw = unsafe { fx_tokenize_cstr(c"A1 >= 10".as_ptr(), &mut status) };
    assert_eq!(status, FxStatus::Ok);
    let by_cstr = take(raw);
    let (raw, _) = tokenize_bytes(b"A1 >= 10");
    let by_len = take(raw);
    assert_eq!(kinds(by_cstr.result()), kinds(by_len.result()));
    assert_eq!(by_cstr.tokens()[2].text(), Some(">="));
}

#[test]
fn tokenize_cstr_null_is_rejected() {
    let mut status = FxStatus::Ok;
    assert!(unsafe { fx_tokenize_cstr(ptr::null(), &mut status) }.is_null());
    assert_eq!(status, FxStatus::NullInput);
}

// ── Release ─────────────────────────────────────────────────────────────

#[test]
fn free_accepts_null() {
    unsafe {
        fx_free_tokenize_result(ptr::null_mut());
        fx_release_tokenize_result(ptr::null_mut());
    }
}

#[test]
fn release_nulls_the_callers_pointer() {
    let (mut raw, status) = tokenize_bytes(b"TRUE");
    assert_eq!(status, FxStatus::Ok);
    assert!(!raw.is_null());
    unsafe { fx_release_tokenize_result(&mut raw) };
    assert!(raw.is_null());
    // Second release through the same pointer is a no-op.
    unsafe { fx_release_tokenize_result(&mut raw) };
    assert!(raw.is_null());
}

#[test]
fn handle_round_trips_through_raw() {
    let handle = TokenizeHandle::tokenize("1.5").unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(handle.tokens()[0].kind(), FxTokenKind::Float);
    let raw = handle.into_raw();
    let handle = take(raw);
    assert_eq!(handle.as_ptr(), raw.cast_const());
    assert_eq!(handle.tokens()[0].text(), Some("1.5"));
}

#[test]
fn handle_from_null_is_none() {
    assert!(unsafe { TokenizeHandle::from_raw(ptr::null_mut()) }.is_none());
}

// ── Validation ──────────────────────────────────────────────────────────

#[test]
fn validate_entry_points() {
    let ok = b"IF([Qty] > 0, TRUE, FALSE)";
    unsafe {
        assert_eq!(fx_validate(ok.as_ptr().cast::<c_char>(), 26), 1);
        assert_eq!(fx_validate_cstr(c"1 + 2".as_ptr()), 1);
        assert_eq!(fx_validate_cstr(c"1 $ 2".as_ptr()), 0);
        assert_eq!(fx_validate_cstr(c"   ".as_ptr()), 0);
        assert_eq!(fx_validate_cstr(c"".as_ptr()), 0);
    }
}

#[test]
fn validate_rejects_bad_pointers() {
    unsafe {
        assert_eq!(fx_validate(ptr::null(), 3), 0);
        assert_eq!(fx_validate(b"1".as_ptr().cast::<c_char>(), -5), 0);
        assert_eq!(fx_validate_cstr(ptr::null()), 0);
    }
}

// ── JSON ────────────────────────────────────────────────────────────────

fn take_json(raw: *mut c_char) -> serde_json::Value {
    assert!(!raw.is_null());
    let text = unsafe { CStr::from_ptr(raw) }
        .to_str()
        .map(str::to_owned)
        .unwrap_or_else(|e| panic!("{e}"));
    unsafe { fx_free_string(raw) };
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("{e}: {text}"))
}

#[test]
fn json_has_tokens_and_errors() {
    let input = b"1 @";
    let mut status = FxStatus::Panicked;
    let raw = unsafe { fx_tokenize_json(input.as_ptr().cast::<c_char>(), 3, &mut status) };
    assert_eq!(status, FxStatus::Ok);
    let json = take_json(raw);

    let tokens = json["tokens"].as_array().cloned().unwrap_or_default();
    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[0]["type"], "integer");
    assert_eq!(tokens[0]["text"], "1");
    assert_eq!(tokens[0]["isValid"], true);
    assert_eq!(tokens[2]["type"], "error");
    assert_eq!(tokens[2]["start"], 2);
    assert_eq!(tokens[2]["end"], 3);
    assert_eq!(tokens[3]["type"], "eof");

    let errors = json["errors"].as_array().cloned().unwrap_or_default();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["message"], "unknown character `@`");
    assert_eq!(errors[0]["line"], 1);
    assert_eq!(errors[0]["column"], 2);
}

#[test]
fn json_escapes_interior_nul() {
    let raw = unsafe { fx_tokenize_json(b"a\0".as_ptr().cast::<c_char>(), 2, ptr::null_mut()) };
    let json = take_json(raw);
    assert_eq!(json["tokens"][1]["text"], "\u{0}");
}

#[test]
fn json_failure_returns_null() {
    let mut status = FxStatus::Ok;
    assert!(unsafe { fx_tokenize_json(ptr::null(), 0, &mut status) }.is_null());
    assert_eq!(status, FxStatus::NullInput);
    unsafe { fx_free_string(ptr::null_mut()) };
}
