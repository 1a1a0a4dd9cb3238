//! Outline domain: projection of parsed s-expressions into a display tree
//! plus breadcrumb path resolution. No I/O and no rendering live here.

pub mod error;
pub mod path;
pub mod project;
pub mod tree;

pub use error::{OutlineError, OutlineResult};
pub use path::{resolve_path, PATH_SEPARATOR};
pub use project::{Projector, DEFAULT_MAX_DEPTH};
pub use tree::{NodeData, NodeId, OutlineNode, OutlineTree};
