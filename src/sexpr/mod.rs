//! Parsing collaborator: text to expression graph and back.
//!
//! The outline layer consumes [`Sexpr`] through its accessor surface and the
//! canonical `Display` form only; the grammar is owned entirely by this
//! module.

pub mod ast;
pub mod error;
pub mod parser;

pub use ast::Sexpr;
pub use error::{ParseError, ParseResult};
pub use parser::{parse_file, parse_str, MAX_NESTING_DEPTH};
