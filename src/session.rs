//! Single-document viewing session: load/reload lifecycle and selection.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, instrument};

use crate::outline::{resolve_path, NodeId, OutlineError, OutlineTree, Projector};
use crate::sexpr::{self, ParseError};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Outline(#[from] OutlineError),

    #[error("no document loaded")]
    NoDocument,

    #[error("node is not part of the current document")]
    UnknownNode,

    #[error("no node at child path {path:?}")]
    NoSuchNode { path: Vec<usize> },
}

pub type SessionResult<T> = Result<T, SessionError>;

/// A successfully loaded document: source path plus its display tree.
#[derive(Debug)]
pub struct Document {
    path: PathBuf,
    tree: OutlineTree,
}

impl Document {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tree(&self) -> &OutlineTree {
        &self.tree
    }
}

/// Owns at most one live display tree and the selection within it.
///
/// Loading replaces the document wholesale: the new tree is fully built
/// before it is installed, and on any error the previous document and
/// selection stay untouched. Ids taken from a replaced tree resolve to
/// nothing afterwards; they are never remapped onto the new generation.
#[derive(Debug)]
pub struct ViewerSession {
    projector: Projector,
    document: Option<Document>,
    selected: Option<NodeId>,
}

impl Default for ViewerSession {
    fn default() -> Self {
        Self::with_projector(Projector::default())
    }
}

impl ViewerSession {
    pub fn new(max_depth: usize) -> Self {
        Self::with_projector(Projector::new(max_depth))
    }

    pub fn with_projector(projector: Projector) -> Self {
        Self {
            projector,
            document: None,
            selected: None,
        }
    }

    /// Parse and project the file, then swap the result in.
    ///
    /// On success the selection moves to the new root.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&mut self, path: &Path) -> SessionResult<()> {
        let expr = sexpr::parse_file(path)?;
        let tree = self.projector.project(&expr)?;
        debug!(nodes = tree.node_count(), "installing new display tree");

        // Swap only now that the replacement is complete; the old tree and
        // its ids die together.
        let root = tree.root();
        self.document = Some(Document {
            path: path.to_path_buf(),
            tree,
        });
        self.selected = root;
        Ok(())
    }

    /// Load the current document's file again, picking up external edits.
    #[instrument(level = "debug", skip(self))]
    pub fn reload(&mut self) -> SessionResult<()> {
        let path = self
            .document
            .as_ref()
            .map(|doc| doc.path.clone())
            .ok_or(SessionError::NoDocument)?;
        self.load(&path)
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn tree(&self) -> Option<&OutlineTree> {
        self.document.as_ref().map(Document::tree)
    }

    /// Move the selection to a node of the current tree.
    pub fn select(&mut self, node: NodeId) -> SessionResult<()> {
        let tree = self.tree().ok_or(SessionError::NoDocument)?;
        if tree.get_node(node).is_none() {
            return Err(SessionError::UnknownNode);
        }
        self.selected = Some(node);
        Ok(())
    }

    /// Move the selection along child indexes from the root.
    pub fn select_at(&mut self, child_path: &[usize]) -> SessionResult<NodeId> {
        let tree = self.tree().ok_or(SessionError::NoDocument)?;
        let node = tree.node_at(child_path).ok_or_else(|| SessionError::NoSuchNode {
            path: child_path.to_vec(),
        })?;
        self.selected = Some(node);
        Ok(node)
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// Breadcrumb path of the selected node.
    pub fn selected_path(&self) -> Option<String> {
        resolve_path(self.tree()?, self.selected?)
    }

    /// Canonical serialization of the selected node's source list.
    pub fn selected_payload(&self) -> Option<&str> {
        let node = self.tree()?.get_node(self.selected?)?;
        Some(&node.data.payload)
    }
}
