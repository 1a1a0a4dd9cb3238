//! Projection-level errors (no I/O, no rendering concerns)

use thiserror::Error;

/// Violations of the projection contract. Either one aborts the whole
/// projection; callers never observe a partially built tree.
#[derive(Error, Debug)]
pub enum OutlineError {
    #[error("root expression must be a list, found {found}")]
    InvalidRoot { found: &'static str },

    #[error("nesting depth exceeds the configured limit of {limit}")]
    DepthExceeded { limit: usize },
}

pub type OutlineResult<T> = Result<T, OutlineError>;
