//! Boundary failures and their status codes.
//!
//! These never mix with lexical diagnostics: a lexically broken formula
//! still tokenizes with `FxStatus::Ok`.

use std::collections::TryReserveError;
use std::str::Utf8Error;

/// Status reported through the optional `status` out-parameter.
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FxStatus {
    Ok = 0,
    /// The input pointer was null.
    NullInput = 1,
    /// The input length was negative.
    InvalidLength = 2,
    /// The input bytes are not UTF-8.
    InvalidUtf8 = 3,
    /// Offsets would not fit in `i32`.
    InputTooLarge = 4,
    /// The token or diagnostic array could not be reserved. Other
    /// allocations abort on exhaustion.
    AllocationFailed = 5,
    /// A panic was caught at the boundary.
    Panicked = 6,
}

/// Why a boundary call produced no result.
#[derive(Debug, thiserror::Error)]
pub enum FfiError {
    #[error("input pointer is null")]
    NullInput,
    #[error("input length {0} is negative")]
    InvalidLength(i32),
    #[error("input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] Utf8Error),
    #[error("input of {len} bytes is too large for 32-bit offsets")]
    InputTooLarge { len: usize },
    #[error("could not allocate output: {0}")]
    AllocationFailed(#[from] TryReserveError),
    #[error("internal panic while tokenizing")]
    Panicked,
}

impl FfiError {
    pub fn status(&self) -> FxStatus {
        match self {
            FfiError::NullInput => FxStatus::NullInput,
            FfiError::InvalidLength(_) => FxStatus::InvalidLength,
            FfiError::InvalidUtf8(_) => FxStatus::InvalidUtf8,
            FfiError::InputTooLarge { .. } => FxStatus::InputTooLarge,
            FfiError::AllocationFailed(_) => FxStatus::AllocationFailed,
            FfiError::Panicked => FxStatus::Panicked,
        }
    }
}
