use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Every way a single `mime-run` invocation can fail.
///
/// All variants are fatal: the binary reports them on standard error and
/// exits with status 1.
#[derive(Debug, Error)]
pub enum Error {
    /// The command line was malformed (usually: no file given).
    #[error("{0}")]
    Usage(String),

    /// The rule file could not be opened or read completely.
    #[error("cannot read config file '{}'", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rule file was read but its contents are not UTF-8 text.
    #[error("config file '{}' is not valid UTF-8 (first bad byte at offset {valid_up_to})", path.display())]
    ConfigEncoding { path: PathBuf, valid_up_to: usize },

    /// A word in the rule file was followed by something other than
    /// whitespace, a newline or the end of input.
    #[error("unexpected char in config '{found}' at line {line}, column {column}")]
    ConfigSyntax {
        found: char,
        line: usize,
        column: usize,
    },

    /// The classifier could not produce a media type.
    #[error("could not determine mime type")]
    Classification(#[from] ClassificationError),

    /// No rule in the table names the classified media type.
    #[error("no appropriate mime rule found for '{media_type}'")]
    NoMatchingRule { media_type: String },

    /// The handler program could not be found or started.
    #[error("failed to execute command '{program}'")]
    Execution {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Reasons the classifier collaborator is considered to have failed.
#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("cannot run classifier '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read classifier output")]
    Read(#[source] std::io::Error),

    #[error("classifier exited with {0}")]
    Status(ExitStatus),

    #[error("classifier output exceeds {limit} bytes")]
    Overflow { limit: usize },

    #[error("classifier produced no output")]
    Empty,

    #[error("classifier output is not valid UTF-8")]
    NotUtf8,

    #[error("classifier output '{0}' is not of the form type/subtype")]
    Malformed(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
