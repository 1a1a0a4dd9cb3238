//! Parse-level errors (text to expression graph)

use std::path::PathBuf;
use thiserror::Error;

/// Parse errors report the first offense with 1-based line/column positions.
/// They are independent of projection concerns: a file that parses cleanly
/// can still be rejected later by the outline layer.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("no expression found in input")]
    Empty,

    #[error("input ended with {open} unclosed list(s)")]
    UnexpectedEof { open: usize },

    #[error("unmatched ')' at line {line}, column {column}")]
    UnbalancedClose { line: usize, column: usize },

    #[error("trailing content after the top-level expression at line {line}, column {column}")]
    TrailingContent { line: usize, column: usize },

    #[error("unterminated string starting at line {line}")]
    UnterminatedString { line: usize },

    #[error("lists nested deeper than {limit} levels at line {line}")]
    NestingTooDeep { line: usize, limit: usize },

    #[error("cannot read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type ParseResult<T> = Result<T, ParseError>;
