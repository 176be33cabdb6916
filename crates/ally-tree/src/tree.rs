//! The node tree repository
//!
//! [`NodeTree`] is the seam between the annotation engine and whatever
//! actually stores the document. [`DocumentTree`] is the in-memory
//! implementation and the single source of truth for a session: encoders
//! write into it, the reconstruction walker reads state back out of it.
//!
//! Lookups return `Option` rather than failing: the user can delete nodes
//! out-of-band between any two operations, so a missing id is an expected,
//! recoverable case for every consumer.

use crate::geometry::Rect;
use crate::node::{AutoLayout, Node, NodeId, NodeKind};
use std::collections::HashMap;

/// Errors for tree mutations
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// The referenced node no longer exists
    #[error("unknown node id: {0}")]
    UnknownId(NodeId),

    /// Attaching here would create a cycle
    #[error("cannot attach {child} under {parent}: would create a cycle")]
    WouldCycle {
        /// Node being attached
        child: NodeId,
        /// Prospective parent
        parent: NodeId,
    },

    /// Target node cannot hold children
    #[error("node {0} is not a container")]
    NotAContainer(NodeId),

    /// The document root cannot be detached or removed
    #[error("the document root cannot be moved or removed")]
    RootImmutable,
}

/// Repository interface over a document node tree
///
/// The engine is written against this trait so reconstruction and encoding
/// logic can be exercised on an in-memory tree without a live host document.
pub trait NodeTree {
    /// Document root id
    fn root(&self) -> &NodeId;

    /// Look up a node by id
    fn get(&self, id: &NodeId) -> Option<&Node>;

    /// Direct children of a node, in paint order
    fn children(&self, id: &NodeId) -> Vec<NodeId>;

    /// First direct child satisfying the predicate
    fn find_child(&self, parent: &NodeId, pred: &dyn Fn(&Node) -> bool) -> Option<NodeId>;

    /// Create a detached node; attach it with [`NodeTree::append_child`]
    fn create(&mut self, kind: NodeKind, name: &str, rect: Rect) -> NodeId;

    /// Attach a detached or reparented node as the last child
    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), TreeError>;

    /// Attach a node at a specific child index (clamped to the child count)
    fn insert_child_at(
        &mut self,
        parent: &NodeId,
        child: &NodeId,
        index: usize,
    ) -> Result<(), TreeError>;

    /// Move a node (and its subtree) under a new parent, appended last
    fn reparent(&mut self, child: &NodeId, new_parent: &NodeId) -> Result<(), TreeError>;

    /// Remove a node and its entire subtree
    fn remove_subtree(&mut self, id: &NodeId) -> Result<(), TreeError>;

    /// Rename a node
    fn rename(&mut self, id: &NodeId, name: &str) -> Result<(), TreeError>;

    /// Set node bounds
    fn set_rect(&mut self, id: &NodeId, rect: Rect) -> Result<(), TreeError>;

    /// Collapse or expand the node in the layer panel
    fn set_expanded(&mut self, id: &NodeId, expanded: bool) -> Result<(), TreeError>;

    /// Show or hide the node on canvas
    fn set_visible(&mut self, id: &NodeId, visible: bool) -> Result<(), TreeError>;

    /// Apply or clear auto-layout on a frame
    fn set_auto_layout(&mut self, id: &NodeId, layout: Option<AutoLayout>)
        -> Result<(), TreeError>;

    /// Set the corner radius of a frame or rectangle
    fn set_corner_radius(&mut self, id: &NodeId, radius: f64) -> Result<(), TreeError>;

    /// Set text content of a text node
    fn set_characters(&mut self, id: &NodeId, characters: &str) -> Result<(), TreeError>;

    /// Replace a container's child order
    ///
    /// `order` must be a permutation of a subset of the current children;
    /// children not listed keep their relative order after the listed ones.
    fn reorder_children(&mut self, parent: &NodeId, order: &[NodeId]) -> Result<(), TreeError>;
}

/// In-memory document tree
///
/// Mints ids in the host convention `<session>:<counter>`.
#[derive(Debug)]
pub struct DocumentTree {
    nodes: HashMap<NodeId, Node>,
    root: NodeId,
    session: u32,
    counter: u64,
}

impl DocumentTree {
    /// Create an empty document with a fresh root
    #[must_use]
    pub fn new() -> Self {
        let root = NodeId::new("0:0");
        let mut nodes = HashMap::new();
        nodes.insert(
            root.clone(),
            Node::new(root.clone(), NodeKind::Document, "Document", Rect::default()),
        );
        Self {
            nodes,
            root,
            session: 1,
            counter: 0,
        }
    }

    fn mint_id(&mut self) -> NodeId {
        self.counter += 1;
        NodeId::new(format!("{}:{}", self.session, self.counter))
    }

    /// Create a canvas page under the document root
    ///
    /// # Errors
    /// Never fails in practice; kept fallible to match the write surface.
    pub fn create_canvas(&mut self, name: &str) -> Result<NodeId, TreeError> {
        let id = self.create(NodeKind::Canvas, name, Rect::default());
        let root = self.root.clone();
        self.append_child(&root, &id)?;
        Ok(id)
    }

    /// Total number of live nodes, root included
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether only the root remains
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    fn is_ancestor(&self, candidate: &NodeId, of: &NodeId) -> bool {
        let mut cursor = self.nodes.get(of).and_then(|n| n.parent.clone());
        while let Some(id) = cursor {
            if id == *candidate {
                return true;
            }
            cursor = self.nodes.get(&id).and_then(|n| n.parent.clone());
        }
        false
    }

    fn detach(&mut self, child: &NodeId) {
        let parent = self.nodes.get(child).and_then(|n| n.parent.clone());
        if let Some(parent_id) = parent {
            if let Some(parent_node) = self.nodes.get_mut(&parent_id) {
                parent_node.children.retain(|c| c != child);
            }
        }
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = None;
        }
    }

    fn attach_at(
        &mut self,
        parent: &NodeId,
        child: &NodeId,
        index: Option<usize>,
    ) -> Result<(), TreeError> {
        if child == &self.root {
            return Err(TreeError::RootImmutable);
        }
        let parent_node = self
            .nodes
            .get(parent)
            .ok_or_else(|| TreeError::UnknownId(parent.clone()))?;
        if !parent_node.kind.is_container() {
            return Err(TreeError::NotAContainer(parent.clone()));
        }
        if !self.nodes.contains_key(child) {
            return Err(TreeError::UnknownId(child.clone()));
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(TreeError::WouldCycle {
                child: child.clone(),
                parent: parent.clone(),
            });
        }
        self.detach(child);
        let parent_node = self
            .nodes
            .get_mut(parent)
            .ok_or_else(|| TreeError::UnknownId(parent.clone()))?;
        match index {
            Some(i) => {
                let i = i.min(parent_node.children.len());
                parent_node.children.insert(i, child.clone());
            }
            None => parent_node.children.push(child.clone()),
        }
        if let Some(child_node) = self.nodes.get_mut(child) {
            child_node.parent = Some(parent.clone());
        }
        Ok(())
    }

    fn with_node<F>(&mut self, id: &NodeId, apply: F) -> Result<(), TreeError>
    where
        F: FnOnce(&mut Node),
    {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| TreeError::UnknownId(id.clone()))?;
        apply(node);
        Ok(())
    }
}

impl Default for DocumentTree {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeTree for DocumentTree {
    fn root(&self) -> &NodeId {
        &self.root
    }

    fn get(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    fn children(&self, id: &NodeId) -> Vec<NodeId> {
        self.nodes
            .get(id)
            .map(|n| n.children.to_vec())
            .unwrap_or_default()
    }

    fn find_child(&self, parent: &NodeId, pred: &dyn Fn(&Node) -> bool) -> Option<NodeId> {
        let parent_node = self.nodes.get(parent)?;
        parent_node
            .children
            .iter()
            .filter_map(|id| self.nodes.get(id))
            .find(|node| pred(node))
            .map(|node| node.id.clone())
    }

    fn create(&mut self, kind: NodeKind, name: &str, rect: Rect) -> NodeId {
        let id = self.mint_id();
        let node = Node::new(id.clone(), kind, name, rect);
        self.nodes.insert(id.clone(), node);
        id
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), TreeError> {
        self.attach_at(parent, child, None)
    }

    fn insert_child_at(
        &mut self,
        parent: &NodeId,
        child: &NodeId,
        index: usize,
    ) -> Result<(), TreeError> {
        self.attach_at(parent, child, Some(index))
    }

    fn reparent(&mut self, child: &NodeId, new_parent: &NodeId) -> Result<(), TreeError> {
        self.attach_at(new_parent, child, None)
    }

    fn remove_subtree(&mut self, id: &NodeId) -> Result<(), TreeError> {
        if id == &self.root {
            return Err(TreeError::RootImmutable);
        }
        if !self.nodes.contains_key(id) {
            return Err(TreeError::UnknownId(id.clone()));
        }
        self.detach(id);
        let mut queue = vec![id.clone()];
        while let Some(current) = queue.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                queue.extend(node.children.iter().cloned());
            }
        }
        Ok(())
    }

    fn rename(&mut self, id: &NodeId, name: &str) -> Result<(), TreeError> {
        self.with_node(id, |n| n.name = name.to_string())
    }

    fn set_rect(&mut self, id: &NodeId, rect: Rect) -> Result<(), TreeError> {
        self.with_node(id, |n| n.rect = rect)
    }

    fn set_expanded(&mut self, id: &NodeId, expanded: bool) -> Result<(), TreeError> {
        self.with_node(id, |n| n.expanded = expanded)
    }

    fn set_visible(&mut self, id: &NodeId, visible: bool) -> Result<(), TreeError> {
        self.with_node(id, |n| n.visible = visible)
    }

    fn set_auto_layout(
        &mut self,
        id: &NodeId,
        layout: Option<AutoLayout>,
    ) -> Result<(), TreeError> {
        self.with_node(id, |n| n.auto_layout = layout)
    }

    fn set_corner_radius(&mut self, id: &NodeId, radius: f64) -> Result<(), TreeError> {
        self.with_node(id, |n| n.corner_radius = radius)
    }

    fn set_characters(&mut self, id: &NodeId, characters: &str) -> Result<(), TreeError> {
        self.with_node(id, |n| n.characters = Some(characters.to_string()))
    }

    fn reorder_children(&mut self, parent: &NodeId, order: &[NodeId]) -> Result<(), TreeError> {
        let parent_node = self
            .nodes
            .get_mut(parent)
            .ok_or_else(|| TreeError::UnknownId(parent.clone()))?;
        let current = std::mem::take(&mut parent_node.children);
        let mut next = smallvec::SmallVec::new();
        for id in order {
            if current.contains(id) {
                next.push(id.clone());
            }
        }
        for id in current {
            if !next.contains(&id) {
                next.push(id);
            }
        }
        parent_node.children = next;
        Ok(())
    }
}
