//! Tokenize output.

use crate::{Diagnostic, Token, TokenKind};

/// Complete output of one tokenize call.
///
/// `tokens` always ends with exactly one [`TokenKind::EndOfInput`] token;
/// `diagnostics` may be empty.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TokenizeResult {
    tokens: Vec<Token>,
    #[cfg_attr(feature = "serde", serde(rename = "errors"))]
    diagnostics: Vec<Diagnostic>,
}

impl TokenizeResult {
    pub(crate) fn new(tokens: Vec<Token>, diagnostics: Vec<Diagnostic>) -> Self {
        debug_assert!(
            tokens.last().map(|t| t.kind) == Some(TokenKind::EndOfInput),
            "token stream must end with EndOfInput"
        );
        Self {
            tokens,
            diagnostics,
        }
    }

    #[inline]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Diagnostics in discovery order.
    #[inline]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns `true` when no lexical errors were found.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Tokens other than whitespace and the end-of-input sentinel.
    pub fn significant_tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens
            .iter()
            .filter(|t| !t.kind.is_trivia() && t.kind != TokenKind::EndOfInput)
    }

    pub fn into_parts(self) -> (Vec<Token>, Vec<Diagnostic>) {
        (self.tokens, self.diagnostics)
    }
}
