//! Formula tokenizer.
//!
//! Turns formula text (spreadsheet-style literals, column references,
//! function calls, operators and punctuation) into a position-exact token
//! stream plus a parallel stream of diagnostics.
//!
//! # Architecture
//!
//! ```text
//! source → SourceBuffer → RawScanner → (RawTag, len) → cooker → Token
//!                                                         └──→ Diagnostics
//! ```
//!
//! Scanning lives in `fx_lexer_core`; this crate cooks raw tokens into
//! [`Token`]s, collects [`Diagnostic`]s and assembles the [`TokenizeResult`].
//!
//! # Guarantees
//!
//! Tokenizing never fails. For every input:
//! - concatenating token texts reproduces the input exactly,
//! - `tokens[i].end == tokens[i + 1].start`,
//! - the last token is [`TokenKind::EndOfInput`] at the input's length,
//! - every diagnostic has the range of exactly one token.

mod assembler;
mod cooker;
mod diagnostics;
mod lex_error;
mod result;
mod span;
mod token;

pub use diagnostics::{Diagnostic, Diagnostics};
pub use fx_lexer_core::{EscapeStyle, Grammar, GrammarError, OperatorTable};
pub use lex_error::{LexError, LexErrorContext, LexErrorKind, LexSuggestion};
pub use result::TokenizeResult;
pub use span::Span;
pub use token::{Token, TokenKind};

/// Tokenize with the default grammar.
pub fn tokenize(source: &str) -> TokenizeResult {
    tokenize_with(source, &Grammar::default())
}

/// Tokenize with an explicit grammar.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn tokenize_with(source: &str, grammar: &Grammar) -> TokenizeResult {
    assembler::assemble(source, grammar)
}

/// Returns `true` if `source` is non-blank and lexically clean under the
/// default grammar.
pub fn validate(source: &str) -> bool {
    validate_with(source, &Grammar::default())
}

/// Returns `true` if `source` is non-blank and lexically clean.
pub fn validate_with(source: &str, grammar: &Grammar) -> bool {
    !source.trim().is_empty() && tokenize_with(source, grammar).is_valid()
}
