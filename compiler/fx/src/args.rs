//! Hand-rolled argument parsing: `fx <command> [options] (<file> | -e <expr>)`.

use std::path::PathBuf;

use fx_lexer::Grammar;

use crate::CliError;

pub const USAGE: &str = "\
Usage: fx <command> [options] (<file> | -e <formula>)

Commands:
  lex      Print the token stream and any diagnostics
  check    Report diagnostics; exit 1 if the formula is blank or invalid

Options:
  -e <formula>         Read the formula from the argument instead of a file
  --json               Emit JSON instead of text
  --grammar=<name>     Lexer grammar: default, spreadsheet

Environment:
  FX_LOG / RUST_LOG    Tracing filter, e.g. FX_LOG=fx_lexer=trace
  FX_LOG_TREE          Render spans as an indented tree
";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Lex,
    Check,
}

/// Where the formula comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Expr(String),
    File(PathBuf),
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum GrammarChoice {
    #[default]
    Default,
    Spreadsheet,
}

impl GrammarChoice {
    fn parse(name: &str) -> Result<Self, CliError> {
        match name {
            "default" => Ok(GrammarChoice::Default),
            "spreadsheet" => Ok(GrammarChoice::Spreadsheet),
            other => Err(CliError::UnknownGrammar(other.to_owned())),
        }
    }

    pub fn grammar(self) -> Grammar {
        match self {
            GrammarChoice::Default => Grammar::default(),
            GrammarChoice::Spreadsheet => Grammar::spreadsheet(),
        }
    }
}

/// Parsed command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    pub command: Command,
    pub input: Input,
    pub json: bool,
    pub grammar: GrammarChoice,
}

/// Parse arguments, excluding the program name.
pub fn parse_args(args: &[String]) -> Result<Options, CliError> {
    let Some((command, rest)) = args.split_first() else {
        return Err(CliError::Usage("missing command".to_owned()));
    };
    let command = match command.as_str() {
        "lex" => Command::Lex,
        "check" => Command::Check,
        other => return Err(CliError::Usage(format!("unknown command '{other}'"))),
    };

    let mut json = false;
    let mut grammar = GrammarChoice::default();
    let mut input: Option<Input> = None;

    // `-e` takes the next argument verbatim, even if it starts with `-`.
    let mut i = 0;
    while i < rest.len() {
        let arg = rest[i].as_str();
        if arg == "-e" {
            let Some(expr) = rest.get(i + 1) else {
                return Err(CliError::Usage("-e requires a formula".to_owned()));
            };
            set_input(&mut input, Input::Expr(expr.clone()))?;
            i += 2;
            continue;
        }

        if arg == "--json" {
            json = true;
        } else if let Some(name) = arg.strip_prefix("--grammar=") {
            grammar = GrammarChoice::parse(name)?;
        } else if arg.starts_with('-') && arg != "-" {
            return Err(CliError::Usage(format!("unknown option '{arg}'")));
        } else {
            set_input(&mut input, Input::File(PathBuf::from(arg)))?;
        }
        i += 1;
    }

    let Some(input) = input else {
        return Err(CliError::Usage(
            "missing input: pass a file or -e <formula>".to_owned(),
        ));
    };

    Ok(Options {
        command,
        input,
        json,
        grammar,
    })
}

fn set_input(slot: &mut Option<Input>, input: Input) -> Result<(), CliError> {
    if slot.is_some() {
        return Err(CliError::Usage("only one input may be given".to_owned()));
    }
    *slot = Some(input);
    Ok(())
}
