//! Flat `#[repr(C)]` records and the conversion into them.
//!
//! The records mirror `include/fx_lexer.h` field for field. Everything a
//! record points to is owned by it: dropping an [`FxTokenizeResult`] frees
//! both arrays and every string. [`to_boundary`] is the only place the
//! internal token model is translated into this layout.

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use fx_lexer::{Diagnostic, Token, TokenKind, TokenizeResult};

use crate::FfiError;

/// Token kind as exchanged with C (`enum FxTokenKind`).
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FxTokenKind {
    String = 0,
    Integer = 1,
    Float = 2,
    Boolean = 3,
    ColumnReference = 4,
    Function = 5,
    Operator = 6,
    Comma = 7,
    LeftParen = 8,
    RightParen = 9,
    LeftBracket = 10,
    RightBracket = 11,
    Whitespace = 12,
    Error = 13,
    EndOfInput = 14,
}

impl From<TokenKind> for FxTokenKind {
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::String => FxTokenKind::String,
            TokenKind::Integer => FxTokenKind::Integer,
            TokenKind::Float => FxTokenKind::Float,
            TokenKind::Boolean => FxTokenKind::Boolean,
            TokenKind::ColumnReference => FxTokenKind::ColumnReference,
            TokenKind::Function => FxTokenKind::Function,
            TokenKind::Operator => FxTokenKind::Operator,
            TokenKind::Comma => FxTokenKind::Comma,
            TokenKind::LeftParen => FxTokenKind::LeftParen,
            TokenKind::RightParen => FxTokenKind::RightParen,
            TokenKind::LeftBracket => FxTokenKind::LeftBracket,
            TokenKind::RightBracket => FxTokenKind::RightBracket,
            TokenKind::Whitespace => FxTokenKind::Whitespace,
            TokenKind::Error => FxTokenKind::Error,
            TokenKind::EndOfInput => FxTokenKind::EndOfInput,
        }
    }
}

/// One token (`struct FxToken`). Owns `text`.
///
/// Fields are crate-private: records are only ever built by this library,
/// so the pointers a record frees on drop are always its own.
#[repr(C)]
#[derive(Debug)]
pub struct FxToken {
    pub(crate) kind: FxTokenKind,
    /// NUL-terminated UTF-8 lexeme.
    pub(crate) text: *mut c_char,
    pub(crate) start: i32,
    pub(crate) end: i32,
    pub(crate) line: i32,
    pub(crate) column: i32,
    /// 1 for a well-formed lexeme, 0 otherwise.
    pub(crate) is_valid: i32,
}

/// One diagnostic (`struct FxDiagnostic`). Owns `message`.
#[repr(C)]
#[derive(Debug)]
pub struct FxDiagnostic {
    pub(crate) message: *mut c_char,
    pub(crate) line: i32,
    pub(crate) column: i32,
    pub(crate) start: i32,
    pub(crate) end: i32,
}

/// A full tokenize result (`struct FxTokenizeResult`).
///
/// An empty array is a null pointer with a zero count.
#[repr(C)]
#[derive(Debug)]
pub struct FxTokenizeResult {
    pub(crate) tokens: *mut FxToken,
    pub(crate) token_count: i32,
    pub(crate) errors: *mut FxDiagnostic,
    pub(crate) error_count: i32,
}

impl FxToken {
    #[inline]
    pub fn kind(&self) -> FxTokenKind {
        self.kind
    }

    /// The lexeme, if `text` is non-null UTF-8.
    pub fn text(&self) -> Option<&str> {
        // SAFETY: `text` is owned by `self` and NUL-terminated.
        unsafe { borrow_c_str(self.text) }
    }

    #[inline]
    pub fn start(&self) -> i32 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> i32 {
        self.end
    }

    #[inline]
    pub fn line(&self) -> i32 {
        self.line
    }

    #[inline]
    pub fn column(&self) -> i32 {
        self.column
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.is_valid != 0
    }
}

impl FxDiagnostic {
    pub fn message(&self) -> Option<&str> {
        // SAFETY: `message` is owned by `self` and NUL-terminated.
        unsafe { borrow_c_str(self.message) }
    }

    #[inline]
    pub fn line(&self) -> i32 {
        self.line
    }

    #[inline]
    pub fn column(&self) -> i32 {
        self.column
    }

    #[inline]
    pub fn start(&self) -> i32 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> i32 {
        self.end
    }
}

impl FxTokenizeResult {
    pub fn tokens(&self) -> &[FxToken] {
        // SAFETY: `tokens`/`token_count` come from `leak_array`.
        unsafe { borrow_array(self.tokens, self.token_count) }
    }

    pub fn errors(&self) -> &[FxDiagnostic] {
        // SAFETY: `errors`/`error_count` come from `leak_array`.
        unsafe { borrow_array(self.errors, self.error_count) }
    }
}

impl Drop for FxToken {
    fn drop(&mut self) {
        // SAFETY: `text` was set by `c_string` in `token_record`.
        unsafe { free_c_string(self.text) };
    }
}

impl Drop for FxDiagnostic {
    fn drop(&mut self) {
        // SAFETY: `message` was set by `c_string` in `diagnostic_record`.
        unsafe { free_c_string(self.message) };
    }
}

impl Drop for FxTokenizeResult {
    fn drop(&mut self) {
        // SAFETY: both arrays were produced by `leak_array` with these counts
        // and are reclaimed exactly once, here.
        unsafe {
            reclaim_array(self.tokens, self.token_count);
            reclaim_array(self.errors, self.error_count);
        }
        self.tokens = ptr::null_mut();
        self.errors = ptr::null_mut();
        self.token_count = 0;
        self.error_count = 0;
    }
}

/// Translate a tokenize result into boundary records.
///
/// Fails with `InputTooLarge` if any offset overflows `i32` and with
/// `AllocationFailed` if an array cannot be reserved. Records built before
/// a failure are dropped, so nothing leaks.
pub(crate) fn to_boundary(result: &TokenizeResult) -> Result<FxTokenizeResult, FfiError> {
    let tokens = result.tokens();
    let diagnostics = result.diagnostics();

    let token_count = to_i32(tokens.len())?;
    let error_count = to_i32(diagnostics.len())?;
    if let Some(last) = tokens.last() {
        to_i32(last.end)?;
        to_i32(last.line)?;
    }

    let mut fx_tokens: Vec<FxToken> = Vec::new();
    fx_tokens.try_reserve_exact(tokens.len())?;
    let mut fx_errors: Vec<FxDiagnostic> = Vec::new();
    fx_errors.try_reserve_exact(diagnostics.len())?;

    for token in tokens {
        fx_tokens.push(token_record(token)?);
    }
    for diagnostic in diagnostics {
        fx_errors.push(diagnostic_record(diagnostic)?);
    }

    Ok(FxTokenizeResult {
        tokens: leak_array(fx_tokens),
        token_count,
        errors: leak_array(fx_errors),
        error_count,
    })
}

fn token_record(token: &Token) -> Result<FxToken, FfiError> {
    Ok(FxToken {
        kind: token.kind.into(),
        text: c_string(&token.text),
        start: to_i32(token.start)?,
        end: to_i32(token.end)?,
        line: to_i32(token.line)?,
        column: to_i32(token.column)?,
        is_valid: i32::from(token.is_valid),
    })
}

fn diagnostic_record(diagnostic: &Diagnostic) -> Result<FxDiagnostic, FfiError> {
    Ok(FxDiagnostic {
        message: c_string(&diagnostic.message),
        line: to_i32(diagnostic.line)?,
        column: to_i32(diagnostic.column)?,
        start: to_i32(diagnostic.start)?,
        end: to_i32(diagnostic.end)?,
    })
}

fn to_i32(value: usize) -> Result<i32, FfiError> {
    i32::try_from(value).map_err(|_| FfiError::InputTooLarge { len: value })
}

/// Allocate a NUL-terminated copy of `text`.
///
/// Interior NULs cannot cross a C string boundary; they become U+FFFD.
pub(crate) fn c_string(text: &str) -> *mut c_char {
    let owned = if text.contains('\0') {
        text.replace('\0', "\u{FFFD}")
    } else {
        text.to_owned()
    };
    CString::new(owned).unwrap_or_default().into_raw()
}

/// Free a string produced by [`c_string`]. Null is a no-op.
///
/// # Safety
///
/// `s` must be null or come from [`c_string`], and must not be freed again.
pub(crate) unsafe fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

/// # Safety
///
/// `s` must be null or NUL-terminated, and must outlive `'a`.
unsafe fn borrow_c_str<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(s) }.to_str().ok()
}

/// Hand a vector to C as a thin pointer. Empty vectors become null.
fn leak_array<T>(items: Vec<T>) -> *mut T {
    if items.is_empty() {
        return ptr::null_mut();
    }
    Box::into_raw(items.into_boxed_slice()).cast::<T>()
}

/// # Safety
///
/// `ptr`/`count` must be null/any or come from [`leak_array`] with the
/// same length, and must not be reclaimed twice.
unsafe fn reclaim_array<T>(ptr: *mut T, count: i32) {
    if ptr.is_null() {
        return;
    }
    let len = usize::try_from(count).unwrap_or(0);
    drop(unsafe { Box::from_raw(ptr::slice_from_raw_parts_mut(ptr, len)) });
}

/// # Safety
///
/// Same provenance requirements as [`reclaim_array`]; the slice must not
/// outlive the owning record.
unsafe fn borrow_array<'a, T>(ptr: *const T, count: i32) -> &'a [T] {
    if ptr.is_null() {
        return &[];
    }
    let len = usize::try_from(count).unwrap_or(0);
    unsafe { std::slice::from_raw_parts(ptr, len) }
}

#[cfg(test)]
mod tests;
