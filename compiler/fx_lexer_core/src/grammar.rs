//! Configurable lexical tables: quote set, escape style and operators.
//!
//! The scanner consults a [`Grammar`] for the three things formula dialects
//! disagree on. Everything else (numbers, identifiers, bracketed references,
//! punctuation, whitespace) is fixed.
//!
//! Quote and operator characters are restricted to ASCII so byte-level
//! dispatch stays exact. Characters with a fixed role (letters, digits,
//! `_`, whitespace, `,()[]`, control bytes) cannot be reassigned.

use std::fmt;

/// How a backslash or repeated quote behaves inside a string literal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EscapeStyle {
    /// `\` escapes the following code point, unless it is a line break.
    #[default]
    Backslash,
    /// A doubled quote (`""`) stands for one quote; `\` is ordinary text.
    DoubledQuote,
}

/// Invalid grammar configuration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("operator table contains an empty operator")]
    EmptyOperator,
    #[error("operator `{0}` contains non-ASCII characters")]
    NonAsciiOperator(String),
    #[error("`{ch}` has a fixed lexical role and cannot be a quote or operator character")]
    ReservedCharacter { ch: char },
    #[error("quote character `{ch}` also starts an operator")]
    QuoteConflict { ch: char },
}

/// Returns `true` for bytes whose lexical role is fixed.
///
/// `.` belongs to the number grammar (`2.5`, `1.`), so it cannot open a
/// string or an operator either.
fn is_reserved(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || b.is_ascii_control()
        || matches!(b, b'_' | b' ' | b'.' | b',' | b'(' | b')' | b'[' | b']')
        || !b.is_ascii()
}

/// 128-entry membership set over ASCII bytes.
#[derive(Clone, Copy, PartialEq, Eq)]
struct AsciiSet([bool; 128]);

impl AsciiSet {
    const EMPTY: AsciiSet = AsciiSet([false; 128]);

    fn insert(&mut self, b: u8) {
        self.0[usize::from(b & 0x7F)] = true;
    }

    #[inline]
    fn contains(&self, b: u8) -> bool {
        b.is_ascii() && self.0[usize::from(b)]
    }

    fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0u8..128).filter(|&b| self.0[usize::from(b)])
    }
}

impl fmt::Debug for AsciiSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(char::from)).finish()
    }
}

/// Operator lexemes, matched longest-first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperatorTable {
    /// Sorted by descending length so the first hit is the longest match.
    entries: Vec<Box<str>>,
    first_bytes: AsciiSet,
}

impl OperatorTable {
    /// Build a table from operator lexemes. Duplicates are ignored.
    ///
    /// Operators must be non-empty ASCII and must not contain characters
    /// with a fixed lexical role.
    pub fn new<I, S>(operators: I) -> Result<Self, GrammarError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut checked: Vec<&str> = Vec::new();
        let owned: Vec<S> = operators.into_iter().collect();
        for op in &owned {
            let op = op.as_ref();
            if op.is_empty() {
                return Err(GrammarError::EmptyOperator);
            }
            if !op.is_ascii() {
                return Err(GrammarError::NonAsciiOperator(op.to_owned()));
            }
            if let Some(&b) = op.as_bytes().iter().find(|&&b| is_reserved(b)) {
                return Err(GrammarError::ReservedCharacter { ch: char::from(b) });
            }
            checked.push(op);
        }
        Ok(Self::from_checked(&checked))
    }

    /// Build from operators already known to be valid.
    fn from_checked(operators: &[&str]) -> Self {
        let mut entries: Vec<Box<str>> = Vec::with_capacity(operators.len());
        let mut first_bytes = AsciiSet::EMPTY;
        for &op in operators {
            if entries.iter().any(|e| &**e == op) {
                continue;
            }
            first_bytes.insert(op.as_bytes()[0]);
            entries.push(op.into());
        }
        entries.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        Self {
            entries,
            first_bytes,
        }
    }

    /// Byte length of the longest operator that prefixes `rest`.
    pub fn longest_match(&self, rest: &str) -> Option<usize> {
        let first = *rest.as_bytes().first()?;
        if !self.first_bytes.contains(first) {
            return None;
        }
        self.entries
            .iter()
            .find(|op| rest.starts_with(&***op))
            .map(|op| op.len())
    }

    /// Returns `true` if some operator begins with `b`.
    #[inline]
    pub fn starts_with_byte(&self, b: u8) -> bool {
        self.first_bytes.contains(b)
    }

    /// Operators in match order (longest first).
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| &**e)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const DEFAULT_OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "^", "%", "&", "=", "==", "!=", "<>", "<", "<=", ">", ">=", "&&", "||",
];

const SPREADSHEET_OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "^", "%", "&", "=", "<>", "<", "<=", ">", ">=",
];

/// Lexer configuration.
///
/// [`Grammar::default()`] accepts `"` and `'` strings with backslash escapes
/// and the operators `+ - * / ^ % & = == != <> < <= > >= && ||`.
/// [`Grammar::spreadsheet()`] is the stricter spreadsheet dialect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grammar {
    quotes: AsciiSet,
    escape: EscapeStyle,
    operators: OperatorTable,
}

impl Grammar {
    /// Build a grammar from explicit tables.
    pub fn new(
        quotes: &[u8],
        escape: EscapeStyle,
        operators: OperatorTable,
    ) -> Result<Self, GrammarError> {
        let mut set = AsciiSet::EMPTY;
        for &q in quotes {
            if is_reserved(q) {
                return Err(GrammarError::ReservedCharacter { ch: char::from(q) });
            }
            if operators.starts_with_byte(q) {
                return Err(GrammarError::QuoteConflict { ch: char::from(q) });
            }
            set.insert(q);
        }
        Ok(Self {
            quotes: set,
            escape,
            operators,
        })
    }

    /// Double quote only, `""` escapes, spreadsheet operators (no `==`,
    /// `!=`, `&&` or `||`).
    pub fn spreadsheet() -> Self {
        Self::from_builtin(b"\"", EscapeStyle::DoubledQuote, SPREADSHEET_OPERATORS)
    }

    /// Same tables with a different escape style.
    #[must_use]
    pub fn with_escape(mut self, escape: EscapeStyle) -> Self {
        self.escape = escape;
        self
    }

    fn from_builtin(quotes: &[u8], escape: EscapeStyle, operators: &[&str]) -> Self {
        let mut quote_set = AsciiSet::EMPTY;
        for &q in quotes {
            quote_set.insert(q);
        }
        Self {
            quotes: quote_set,
            escape,
            operators: OperatorTable::from_checked(operators),
        }
    }

    #[inline]
    pub fn is_quote(&self, b: u8) -> bool {
        self.quotes.contains(b)
    }

    /// Quote characters in byte order.
    pub fn quotes(&self) -> impl Iterator<Item = char> + '_ {
        self.quotes.iter().map(char::from)
    }

    #[inline]
    pub fn escape(&self) -> EscapeStyle {
        self.escape
    }

    #[inline]
    pub fn operators(&self) -> &OperatorTable {
        &self.operators
    }

    /// Returns `true` if `b` ends a malformed-number run: whitespace,
    /// punctuation, a quote, an operator start, or the sentinel.
    #[inline]
    pub fn is_delimiter(&self, b: u8) -> bool {
        matches!(
            b,
            0 | b' ' | b'\t' | b'\n' | b'\r' | b',' | b'(' | b')' | b'[' | b']'
        ) || self.is_quote(b)
            || self.operators.starts_with_byte(b)
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::from_builtin(b"\"'", EscapeStyle::Backslash, DEFAULT_OPERATORS)
    }
}
