//! Core library for sxv: parse s-expression documents and project them into
//! a navigable display tree with breadcrumb paths.
//!
//! The `sexpr` module owns the text grammar, the `outline` module owns
//! projection and path resolution, and the `session` module ties both to a
//! single live document. Rendering stays out of the library; the CLI layer
//! prints what the read queries return.

pub mod cli;
pub mod config;
pub mod exitcode;
pub mod outline;
pub mod session;
pub mod sexpr;
pub mod util;

pub use config::Settings;
pub use outline::{resolve_path, NodeId, OutlineError, OutlineTree, Projector, PATH_SEPARATOR};
pub use session::{Document, SessionError, ViewerSession};
pub use sexpr::{parse_file, parse_str, ParseError, Sexpr};
