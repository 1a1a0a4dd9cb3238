//! Projection of a parsed expression into the display tree.

use tracing::{debug, instrument};

use crate::outline::error::{OutlineError, OutlineResult};
use crate::outline::tree::{NodeData, NodeId, OutlineTree};
use crate::sexpr::Sexpr;

/// Depth limit applied when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Builds display trees from parsed expressions.
///
/// Projection never mutates its input and either yields a complete tree or
/// no tree at all.
#[derive(Debug, Clone)]
pub struct Projector {
    max_depth: usize,
}

impl Default for Projector {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl Projector {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Project the expression into a display tree.
    ///
    /// One display node per list-variant sub-expression, in depth-first
    /// preorder; non-list children shape labels and payloads but never
    /// become nodes. The root must itself be a list.
    #[instrument(level = "debug", skip(self, root))]
    pub fn project(&self, root: &Sexpr) -> OutlineResult<OutlineTree> {
        if !root.is_list() {
            return Err(OutlineError::InvalidRoot { found: root.kind() });
        }

        let mut tree = OutlineTree::new();
        // Explicit work stack instead of recursion; the level of the root is 1.
        let mut stack: Vec<(&Sexpr, Option<NodeId>, usize)> = vec![(root, None, 1)];

        while let Some((expr, parent, level)) = stack.pop() {
            if level > self.max_depth {
                return Err(OutlineError::DepthExceeded {
                    limit: self.max_depth,
                });
            }

            let children = expr.children().unwrap_or_default();
            let data = NodeData {
                label: head_label(children),
                payload: expr.to_string(),
            };
            let node_id = tree.insert_node(data, parent);

            // Reverse push keeps sibling order: the leftmost list child is
            // popped, and therefore emitted, first.
            for child in children.iter().rev() {
                if child.is_list() {
                    stack.push((child, Some(node_id), level + 1));
                }
            }
        }

        debug!(
            nodes = tree.node_count(),
            depth = tree.depth(),
            "projected display tree"
        );
        Ok(tree)
    }
}

/// Label rule: the head symbol's name, an integer head's decimal text,
/// otherwise empty. Empty lists have no head and get an empty label.
fn head_label(children: &[Sexpr]) -> String {
    match children.first() {
        Some(Sexpr::Symbol(name)) => name.clone(),
        Some(Sexpr::Integer(value)) => value.to_string(),
        _ => String::new(),
    }
}
