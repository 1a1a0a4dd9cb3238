//! CLI-level errors (wraps session and settings errors)

use thiserror::Error;

use crate::config::SettingsError;
use crate::session::SessionError;
use crate::sexpr::ParseError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Session(#[from] SessionError),

    #[error("{0}")]
    Settings(#[from] SettingsError),

    #[error("invalid node path: {0}")]
    InvalidNodePath(String),

    #[error("invalid label pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidNodePath(_) | CliError::Pattern(_) => crate::exitcode::USAGE,
            CliError::Settings(_) => crate::exitcode::CONFIG,
            CliError::Session(e) => match e {
                SessionError::Parse(ParseError::FileRead { .. }) => crate::exitcode::NOINPUT,
                SessionError::Parse(_) => crate::exitcode::DATAERR,
                SessionError::Outline(_) => crate::exitcode::DATAERR,
                SessionError::NoSuchNode { .. } => crate::exitcode::USAGE,
                SessionError::NoDocument | SessionError::UnknownNode => crate::exitcode::SOFTWARE,
            },
        }
    }
}
