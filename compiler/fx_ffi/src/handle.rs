//! Owning Rust handle over a boundary result.

use std::ptr::NonNull;

use crate::records::{FxDiagnostic, FxToken, FxTokenizeResult};
use crate::{fx_free_tokenize_result, FfiError};

/// Owns one [`FxTokenizeResult`] and releases it on drop.
///
/// This is the safe way to hold a result from Rust. Release happens exactly
/// once, and the records are only reachable through shared borrows, so
/// double-free and use-after-free cannot be written in safe Rust.
/// [`into_raw`](Self::into_raw) hands ownership to a C caller, who must
/// then call `fx_free_tokenize_result`.
#[derive(Debug)]
pub struct TokenizeHandle {
    raw: NonNull<FxTokenizeResult>,
}

impl TokenizeHandle {
    /// Tokenize `source` with the default grammar into boundary records.
    pub fn tokenize(source: &str) -> Result<Self, FfiError> {
        let raw = crate::tokenize_to_raw(source)?;
        // `Box::into_raw` never returns null.
        NonNull::new(raw)
            .map(|raw| Self { raw })
            .ok_or(FfiError::Panicked)
    }

    /// Take ownership of a pointer returned by `fx_tokenize*`.
    ///
    /// Returns `None` for null.
    ///
    /// # Safety
    ///
    /// `raw` must come from this library and must not be released by
    /// anyone else afterwards.
    pub unsafe fn from_raw(raw: *mut FxTokenizeResult) -> Option<Self> {
        NonNull::new(raw).map(|raw| Self { raw })
    }

    /// Give up ownership without releasing.
    pub fn into_raw(self) -> *mut FxTokenizeResult {
        let raw = self.raw.as_ptr();
        std::mem::forget(self);
        raw
    }

    pub fn as_ptr(&self) -> *const FxTokenizeResult {
        self.raw.as_ptr()
    }

    pub fn result(&self) -> &FxTokenizeResult {
        // SAFETY: the handle owns a live result until drop.
        unsafe { self.raw.as_ref() }
    }

    pub fn tokens(&self) -> &[FxToken] {
        self.result().tokens()
    }

    pub fn errors(&self) -> &[FxDiagnostic] {
        self.result().errors()
    }
}

impl Drop for TokenizeHandle {
    fn drop(&mut self) {
        // SAFETY: the handle is the sole owner of `raw` and drops once.
        unsafe { fx_free_tokenize_result(self.raw.as_ptr()) };
    }
}
