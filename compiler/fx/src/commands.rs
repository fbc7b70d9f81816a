//! `lex` and `check`.
//!
//! Commands render into a [`Outcome`] instead of printing, so the binary
//! decides where output goes and tests can inspect it.

use std::fmt::Write as _;
use std::io::Read as _;

use fx_lexer::{Diagnostic, TokenizeResult};
use tracing::debug;

use crate::args::{Command, Input, Options};
use crate::CliError;

/// Rendered output and the process exit code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub output: String,
    pub exit_code: i32,
}

pub fn run(options: &Options) -> Result<Outcome, CliError> {
    let (origin, source) = read_source(&options.input)?;
    let grammar = options.grammar.grammar();
    let result = fx_lexer::tokenize_with(&source, &grammar);
    debug!(
        origin = %origin,
        tokens = result.tokens().len(),
        diagnostics = result.diagnostics().len(),
        "tokenized input"
    );

    match options.command {
        Command::Lex => lex(&origin, &result, options.json),
        Command::Check => check(&origin, &source, &result, options.json),
    }
}

/// Formula text plus a label used in diagnostics.
fn read_source(input: &Input) -> Result<(String, String), CliError> {
    match input {
        Input::Expr(expr) => Ok(("<expr>".to_owned(), expr.clone())),
        Input::File(path) if path.as_os_str() == "-" => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .map_err(|e| CliError::read("<stdin>", e))?;
            Ok(("<stdin>".to_owned(), source))
        }
        Input::File(path) => {
            let display = path.display().to_string();
            let source = std::fs::read_to_string(path).map_err(|e| CliError::read(&display, e))?;
            Ok((display, source))
        }
    }
}

fn lex(origin: &str, result: &TokenizeResult, json: bool) -> Result<Outcome, CliError> {
    let output = if json {
        let mut out = serde_json::to_string_pretty(result)?;
        out.push('\n');
        out
    } else {
        let mut out = render_tokens(result);
        out.push_str(&render_diagnostics(origin, result.diagnostics()));
        out
    };
    Ok(Outcome {
        output,
        exit_code: 0,
    })
}

fn check(
    origin: &str,
    source: &str,
    result: &TokenizeResult,
    json: bool,
) -> Result<Outcome, CliError> {
    let blank = source.trim().is_empty();
    let valid = !blank && result.is_valid();

    let output = if json {
        let value = serde_json::json!({
            "valid": valid,
            "errors": result.diagnostics(),
        });
        let mut out = serde_json::to_string_pretty(&value)?;
        out.push('\n');
        out
    } else if blank {
        format!("{origin}: error: formula is empty\n")
    } else if valid {
        format!("{origin}: ok\n")
    } else {
        render_diagnostics(origin, result.diagnostics())
    };

    Ok(Outcome {
        output,
        exit_code: i32::from(!valid),
    })
}

/// One row per token: kind, validity, code-point range, line:column, text.
pub fn render_tokens(result: &TokenizeResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<16} {:>9}  {:<8} TEXT", "KIND", "RANGE", "POS");
    for token in result.tokens() {
        let kind = if token.is_valid {
            token.kind.name().to_owned()
        } else {
            format!("{}!", token.kind.name())
        };
        let range = format!("{}..{}", token.start, token.end);
        let pos = format!("{}:{}", token.line, token.column);
        let _ = writeln!(out, "{kind:<16} {range:>9}  {pos:<8} {:?}", token.text);
    }
    out
}

/// `origin:line:column: error: message`, one line per diagnostic.
pub fn render_diagnostics(origin: &str, diagnostics: &[Diagnostic]) -> String {
    let mut out = String::new();
    for diagnostic in diagnostics {
        let _ = writeln!(
            out,
            "{origin}:{}:{}: error: {}",
            diagnostic.line, diagnostic.column, diagnostic.message
        );
        for suggestion in &diagnostic.error.suggestions {
            let _ = writeln!(out, "  help: {}", suggestion.message);
        }
    }
    out
}
