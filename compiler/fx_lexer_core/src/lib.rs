//! Low-level scanner for formula expressions.
//!
//! This crate turns formula text into raw `(tag, length)` pairs. It does not
//! build owned tokens, resolve boolean keywords, or produce diagnostics; those
//! belong to `fx_lexer`, which cooks the raw stream into the public model.
//!
//! # Layers
//!
//! - [`SourceBuffer`]: sentinel-terminated copy of the input.
//! - [`Cursor`]: byte position plus code-point offset, line and column.
//! - [`Grammar`]: quote set, escape style and operator table.
//! - [`RawScanner`]: dispatches on the current byte and scans one lexeme.

mod cursor;
mod grammar;
mod raw_scanner;
mod source_buffer;
mod tag;

pub use cursor::{Cursor, Position};
pub use grammar::{EscapeStyle, Grammar, GrammarError, OperatorTable};
pub use raw_scanner::{scan, RawScanner};
pub use source_buffer::SourceBuffer;
pub use tag::{RawTag, RawToken};
