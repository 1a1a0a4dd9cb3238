//! Breadcrumb path resolution over the display tree.

use itertools::Itertools;

use crate::outline::tree::{NodeId, OutlineTree};

/// Separator between path segments, root first.
pub const PATH_SEPARATOR: &str = " >> ";

/// Labels from the root down to the given node, joined by [`PATH_SEPARATOR`].
///
/// The root's path is just its own label, and empty labels still occupy a
/// segment. Returns None only when the id is not part of this tree (for
/// example an id kept across a document reload); resolution is total for
/// every live node.
pub fn resolve_path(tree: &OutlineTree, node: NodeId) -> Option<String> {
    let mut labels: Vec<&str> = Vec::new();
    let mut current = Some(node);
    while let Some(id) = current {
        let node = tree.get_node(id)?;
        labels.push(&node.data.label);
        current = node.parent;
    }
    labels.reverse();
    Some(labels.iter().join(PATH_SEPARATOR))
}
