use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

/// Result alias used across the generator.
pub type GenResult<T> = Result<T, GenError>;

/// Errors that abort a generation run. No partial output accompanies them.
#[derive(Debug, Error)]
pub enum GenError {
    /// A field's type has a decorator or primitive with no C mapping.
    #[error("cannot convert Puffs type \"{type_text}\" to C (field '{field}' of struct '{structure}')")]
    UnconvertibleType {
        structure: String,
        field: String,
        type_text: String,
    },

    /// The external formatter could not produce output.
    #[error("formatter failed: {0}")]
    Formatter(#[from] FormatError),
}

/// Failures of the formatter collaborator.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error while talking to '{program}': {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with {status}: {stderr}")]
    Exit {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("'{program}' did not finish within {after:?}")]
    Timeout { program: String, after: Duration },

    #[error("'{program}' produced invalid UTF-8: {source}")]
    InvalidUtf8 {
        program: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}
