//! CLI failures. Lexical problems in the formula are not errors here; they
//! are reported as diagnostics and reflected in the exit code.

/// Why a command could not run.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("unknown grammar '{0}' (expected 'default' or 'spreadsheet')")]
    UnknownGrammar(String),
    #[error("cannot find file '{path}'")]
    NotFound { path: String },
    #[error("error reading '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub(crate) fn read(path: &str, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            CliError::NotFound {
                path: path.to_owned(),
            }
        } else {
            CliError::Read {
                path: path.to_owned(),
                source,
            }
        }
    }
}
