use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use generational_arena::{Arena, Index};
use tracing::instrument;

// Arena indexes repeat across freshly built trees; the epoch stamp makes
// every id unambiguous process-wide.
static NEXT_EPOCH: AtomicU64 = AtomicU64::new(0);

/// Stable identity of a display node.
///
/// An id carries the epoch of the tree that minted it, so a lookup in any
/// other tree misses even when that tree has a node in the same arena slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    epoch: u64,
    index: Index,
}

/// Data payload of a display node.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// Human-readable name taken from the head of the source list
    pub label: String,
    /// Canonical serialization of the entire source list
    pub payload: String,
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Display node in the arena-backed hierarchy.
#[derive(Debug)]
pub struct OutlineNode {
    /// Label and payload for this node
    pub data: NodeData,
    /// Id of the parent node, None for the root
    pub parent: Option<NodeId>,
    /// Ids of child nodes, in source order
    pub children: Vec<NodeId>,
}

/// Arena-based display tree.
///
/// Node storage lives in a generational arena and every id is stamped with
/// the owning tree's epoch: an id from a discarded tree resolves to None
/// instead of aliasing a node of the replacement tree. The structure is
/// frozen once projection finishes; only this crate can insert nodes.
#[derive(Debug)]
pub struct OutlineTree {
    /// Arena storage for all display nodes
    arena: Arena<OutlineNode>,
    /// Id of the root node, None while the tree is under construction
    root: Option<NodeId>,
    /// Stamp minted at construction and embedded in every id
    epoch: u64,
}

impl Default for OutlineTree {
    fn default() -> Self {
        Self::new()
    }
}

impl OutlineTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            epoch: NEXT_EPOCH.fetch_add(1, Ordering::Relaxed),
        }
    }

    #[instrument(level = "trace", skip(self, data))]
    pub(crate) fn insert_node(&mut self, data: NodeData, parent: Option<NodeId>) -> NodeId {
        let node = OutlineNode {
            data,
            parent,
            children: Vec::new(),
        };
        let node_id = NodeId {
            epoch: self.epoch,
            index: self.arena.insert(node),
        };

        if let Some(parent_id) = parent {
            if let Some(parent) = self.arena.get_mut(parent_id.index) {
                parent.children.push(node_id);
            }
        } else {
            self.root = Some(node_id);
        }

        node_id
    }

    pub fn get_node(&self, id: NodeId) -> Option<&OutlineNode> {
        if id.epoch != self.epoch {
            return None;
        }
        self.arena.get(id.index)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Navigate from the root along child indexes.
    ///
    /// An empty path addresses the root itself.
    #[instrument(level = "trace", skip(self))]
    pub fn node_at(&self, child_path: &[usize]) -> Option<NodeId> {
        let mut current = self.root?;
        for &pos in child_path {
            let node = self.get_node(current)?;
            current = *node.children.get(pos)?;
        }
        Some(current)
    }

    /// Maximum nesting level, counting the root as 1.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = Vec::new();
        if let Some(root) = self.root {
            stack.push((root, 1));
        }
        while let Some((node_id, level)) = stack.pop() {
            max_depth = max_depth.max(level);
            if let Some(node) = self.get_node(node_id) {
                for &child in &node.children {
                    stack.push((child, level + 1));
                }
            }
        }
        max_depth
    }

    pub fn iter(&self) -> TreeIterator {
        TreeIterator::new(self)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator {
        PostOrderIterator::new(self)
    }
}

/// Depth-first preorder walk: node before descendants, siblings
/// left-to-right. Matches the order nodes were emitted during projection.
pub struct TreeIterator<'a> {
    tree: &'a OutlineTree,
    stack: Vec<NodeId>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a OutlineTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push(root);
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (NodeId, &'a OutlineNode);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current_id) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_id) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_id, node));
            }
        }
        None
    }
}

/// Children before parents; used where subtrees must be assembled bottom-up.
pub struct PostOrderIterator<'a> {
    tree: &'a OutlineTree,
    stack: Vec<(NodeId, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a OutlineTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push((root, false));
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (NodeId, &'a OutlineNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_id, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_id) {
                if !visited {
                    self.stack.push((current_id, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_id, node));
                }
            }
        }
        None
    }
}
