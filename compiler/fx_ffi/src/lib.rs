//! C ABI for the formula tokenizer.
//!
//! Every entry point is `extern "C"`, checks its pointers, and runs the
//! tokenizer under `catch_unwind` so no panic crosses the boundary.
//! Boundary failures are reported through an optional `*mut FxStatus`
//! out-parameter and a null return; lexical problems are never failures,
//! they arrive as diagnostics inside a successful result.
//!
//! # Ownership
//!
//! The library allocates every result, array and string. The caller
//! releases each returned pointer exactly once, with the matching free
//! function. `fx_release_tokenize_result` also nulls the caller's pointer,
//! which turns a repeated release into a no-op.
//!
//! Every entry point that reads through a caller pointer is `unsafe`.
//! Rust callers should use [`TokenizeHandle`], which owns a result and
//! releases it exactly once.

use std::ffi::{c_char, CStr};
use std::panic::{self, AssertUnwindSafe};
use std::ptr;

use tracing::warn;

mod error;
mod handle;
mod records;

pub use error::{FfiError, FxStatus};
pub use handle::TokenizeHandle;
pub use records::{FxDiagnostic, FxToken, FxTokenKind, FxTokenizeResult};

// ── Internals ───────────────────────────────────────────────────────────

/// Tokenize and convert into a heap-allocated boundary result.
pub(crate) fn tokenize_to_raw(source: &str) -> Result<*mut FxTokenizeResult, FfiError> {
    check_size(source)?;
    let result = fx_lexer::tokenize(source);
    let records = records::to_boundary(&result)?;
    Ok(Box::into_raw(Box::new(records)))
}

fn check_size(source: &str) -> Result<(), FfiError> {
    if i32::try_from(source.len()).is_err() {
        return Err(FfiError::InputTooLarge { len: source.len() });
    }
    Ok(())
}

/// Borrow a length-delimited UTF-8 input.
///
/// # Safety
///
/// A non-null `input` must point to `len` readable bytes that outlive `'a`.
unsafe fn input_with_len<'a>(input: *const c_char, len: i32) -> Result<&'a str, FfiError> {
    if input.is_null() {
        return Err(FfiError::NullInput);
    }
    let len = usize::try_from(len).map_err(|_| FfiError::InvalidLength(len))?;
    let bytes = unsafe { std::slice::from_raw_parts(input.cast::<u8>(), len) };
    Ok(std::str::from_utf8(bytes)?)
}

/// Borrow a NUL-terminated UTF-8 input.
///
/// # Safety
///
/// A non-null `input` must be NUL-terminated and outlive `'a`.
unsafe fn input_cstr<'a>(input: *const c_char) -> Result<&'a str, FfiError> {
    if input.is_null() {
        return Err(FfiError::NullInput);
    }
    let s = unsafe { CStr::from_ptr(input) };
    Ok(s.to_str()?)
}

/// # Safety
///
/// `status` must be null or point to writable storage for an `FxStatus`.
unsafe fn write_status(status: *mut FxStatus, value: FxStatus) {
    if !status.is_null() {
        unsafe { status.write(value) };
    }
}

/// Run `f` behind `catch_unwind`, reporting the outcome through `status`.
///
/// # Safety
///
/// Same contract for `status` as [`write_status`].
unsafe fn guarded<T>(
    entry: &'static str,
    status: *mut FxStatus,
    fallback: T,
    f: impl FnOnce() -> Result<T, FfiError>,
) -> T {
    let outcome = panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or(Err(FfiError::Panicked));
    match outcome {
        Ok(value) => {
            unsafe { write_status(status, FxStatus::Ok) };
            value
        }
        Err(err) => {
            warn!(entry, status = ?err.status(), error = %err, "boundary call failed");
            unsafe { write_status(status, err.status()) };
            fallback
        }
    }
}

// ── Extern C API ────────────────────────────────────────────────────────

/// Tokenize `len` bytes of UTF-8 at `input`.
///
/// Returns null on failure; `status` (may be null) receives the reason.
/// Release the result with `fx_free_tokenize_result` or
/// `fx_release_tokenize_result`.
///
/// # Safety
///
/// A non-null `input` must point to `len` readable bytes. A non-null
/// `status` must point to writable storage for an `FxStatus`.
#[no_mangle]
pub unsafe extern "C" fn fx_tokenize(
    input: *const c_char,
    len: i32,
    status: *mut FxStatus,
) -> *mut FxTokenizeResult {
    unsafe {
        guarded("fx_tokenize", status, ptr::null_mut(), || {
            tokenize_to_raw(input_with_len(input, len)?)
        })
    }
}

/// Tokenize a NUL-terminated UTF-8 string.
///
/// # Safety
///
/// A non-null `input` must be NUL-terminated. `status` as for
/// [`fx_tokenize`].
#[no_mangle]
pub unsafe extern "C" fn fx_tokenize_cstr(
    input: *const c_char,
    status: *mut FxStatus,
) -> *mut FxTokenizeResult {
    unsafe {
        guarded("fx_tokenize_cstr", status, ptr::null_mut(), || {
            tokenize_to_raw(input_cstr(input)?)
        })
    }
}

/// Release a result and everything it owns. Null is a no-op.
///
/// # Safety
///
/// `result` must be null or a pointer returned by `fx_tokenize*` that has
/// not been released yet. It is dangling afterwards.
#[no_mangle]
pub unsafe extern "C" fn fx_free_tokenize_result(result: *mut FxTokenizeResult) {
    if result.is_null() {
        return;
    }
    drop(unsafe { Box::from_raw(result) });
}

/// Release `*result` and set it to null. A null `result` or `*result` is
/// a no-op, so releasing twice through the same pointer is harmless.
///
/// # Safety
///
/// A non-null `result` must point to a writable pointer variable holding
/// null or an unreleased result from `fx_tokenize*`.
#[no_mangle]
pub unsafe extern "C" fn fx_release_tokenize_result(result: *mut *mut FxTokenizeResult) {
    if result.is_null() {
        return;
    }
    let inner = unsafe { result.replace(ptr::null_mut()) };
    unsafe { fx_free_tokenize_result(inner) };
}

/// 1 if the `len` bytes at `input` are non-blank and lexically clean,
/// else 0. A null input, negative length or invalid UTF-8 yields 0.
///
/// # Safety
///
/// A non-null `input` must point to `len` readable bytes.
#[no_mangle]
pub unsafe extern "C" fn fx_validate(input: *const c_char, len: i32) -> i32 {
    unsafe {
        guarded("fx_validate", ptr::null_mut(), 0, || {
            Ok(i32::from(fx_lexer::validate(input_with_len(input, len)?)))
        })
    }
}

/// NUL-terminated variant of [`fx_validate`].
///
/// # Safety
///
/// A non-null `input` must be NUL-terminated.
#[no_mangle]
pub unsafe extern "C" fn fx_validate_cstr(input: *const c_char) -> i32 {
    unsafe {
        guarded("fx_validate_cstr", ptr::null_mut(), 0, || {
            Ok(i32::from(fx_lexer::validate(input_cstr(input)?)))
        })
    }
}

/// Tokenize and render the result as a JSON string:
/// `{"tokens":[{"type","text","start","end","line","column","isValid"}],
/// "errors":[{"message","line","column","start","end"}]}`.
///
/// Release the string with `fx_free_string`.
///
/// # Safety
///
/// Same contract as [`fx_tokenize`].
#[no_mangle]
pub unsafe extern "C" fn fx_tokenize_json(
    input: *const c_char,
    len: i32,
    status: *mut FxStatus,
) -> *mut c_char {
    unsafe {
        guarded("fx_tokenize_json", status, ptr::null_mut(), || {
            let source = input_with_len(input, len)?;
            check_size(source)?;
            let json = to_json(&fx_lexer::tokenize(source));
            Ok(records::c_string(&json))
        })
    }
}

/// Release a string returned by this library. Null is a no-op.
///
/// # Safety
///
/// `s` must be null or a string returned by `fx_tokenize_json` that has
/// not been released yet.
#[no_mangle]
pub unsafe extern "C" fn fx_free_string(s: *mut c_char) {
    unsafe { records::free_c_string(s) };
}

/// JSON rendering shared by `fx_tokenize_json` and Rust callers.
///
/// `serde_json` escapes control characters, so the output never contains
/// an interior NUL.
pub fn to_json(result: &fx_lexer::TokenizeResult) -> String {
    // Serializing plain structs of strings and integers cannot fail.
    serde_json::to_string(result).unwrap_or_default()
}

#[cfg(test)]
mod tests;
