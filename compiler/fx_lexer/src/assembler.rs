//! Stream assembly: the tokenize driver loop.
//!
//! Each iteration reads the cursor position, asks the scanner for exactly
//! one raw token, reads the position again, and turns the pair into a
//! [`Token`]. Because positions come straight from the cursor, consecutive
//! tokens share their boundary and the stream is gap-free by construction.
//! The loop ends after pushing the zero-width end-of-input token.

use fx_lexer_core::{Grammar, RawScanner, RawTag, SourceBuffer};
use tracing::{debug, trace};

use crate::cooker::cook;
use crate::{Diagnostics, Span, Token, TokenizeResult};

/// Tokenize `source` completely under `grammar`.
pub(crate) fn assemble(source: &str, grammar: &Grammar) -> TokenizeResult {
    let buf = SourceBuffer::new(source);
    let mut scanner = RawScanner::new(buf.cursor(), grammar);
    // Formulas average a few bytes per token, whitespace included.
    let mut tokens = Vec::with_capacity(source.len() / 2 + 1);
    let mut diagnostics = Diagnostics::new();

    loop {
        let before = scanner.position();
        let start = scanner.pos();
        let raw = scanner.next_token();
        let after = scanner.position();
        let end = scanner.pos();
        debug_assert_eq!(end - start, raw.len);

        let text = scanner.cursor().slice(start, end);
        let span = Span::new(start, end);
        let cooked = cook(raw.tag, text, span);
        debug_assert_eq!(cooked.error.is_some(), raw.tag.is_error());
        let token = Token {
            kind: cooked.kind,
            text: text.to_owned(),
            span,
            start: before.offset,
            end: after.offset,
            line: before.line,
            column: before.column,
            is_valid: cooked.is_valid,
        };

        if let Some(error) = cooked.error {
            trace!(
                kind = ?error.kind,
                start = token.start,
                end = token.end,
                line = token.line,
                column = token.column,
                "recovered from lexical error"
            );
            diagnostics.report(error, &token);
        }

        tokens.push(token);
        if raw.tag == RawTag::Eof {
            break;
        }
    }

    debug!(
        tokens = tokens.len(),
        diagnostics = diagnostics.len(),
        "tokenized"
    );
    TokenizeResult::new(tokens, diagnostics.into_vec())
}

#[cfg(test)]
mod tests;
