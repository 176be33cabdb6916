//! Node types for the document tree
//!
//! A document is a tree of named nodes. The name string is the only
//! metadata channel the host guarantees to persist, which is why the
//! annotation engine encodes its records into names (see `ally-codec`).

use crate::geometry::{Padding, Rect};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Stable node identifier minted by the document
///
/// Ids follow the host convention `<session>:<counter>` and are opaque to
/// everything except the tree itself.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(String);

impl NodeId {
    /// Wrap a raw id string
    #[inline]
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Raw id string
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

/// What a node is on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Document root; exactly one per tree
    Document,
    /// A designer-facing canvas page containing top-level frames
    Canvas,
    /// Container frame; may carry auto-layout
    Frame,
    /// Loose grouping of children
    Group,
    /// Text content node
    Text,
    /// Vector shape (arrows, checkmarks, exemplar art)
    Vector,
    /// Ellipse shape
    Ellipse,
    /// Rectangle shape
    Rectangle,
}

impl NodeKind {
    /// Whether children may be attached to nodes of this kind
    #[inline]
    #[must_use]
    pub fn is_container(self) -> bool {
        matches!(
            self,
            Self::Document | Self::Canvas | Self::Frame | Self::Group
        )
    }
}

/// Stacking direction for auto-laid-out frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutDirection {
    /// Children stack top to bottom
    Vertical,
    /// Children stack left to right
    Horizontal,
}

/// Auto-layout attributes of a container frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutoLayout {
    /// Stacking direction
    pub direction: LayoutDirection,
    /// Gap between consecutive children
    pub item_spacing: f64,
    /// Insets around the child stack
    pub padding: Padding,
}

impl AutoLayout {
    /// Vertical stack with the given spacing and uniform padding
    #[inline]
    #[must_use]
    pub fn vertical(item_spacing: f64, padding: Padding) -> Self {
        Self {
            direction: LayoutDirection::Vertical,
            item_spacing,
            padding,
        }
    }
}

/// One node of the document tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Stable id, minted by the tree at creation
    pub id: NodeId,
    /// Display name; carries the encoded annotation record
    pub name: String,
    /// Node kind
    pub kind: NodeKind,
    /// Bounds in document coordinates
    pub rect: Rect,
    /// Whether the node renders on canvas
    pub visible: bool,
    /// Whether the node's child list is expanded in the layer panel
    pub expanded: bool,
    /// Corner radius for frames and rectangles
    pub corner_radius: f64,
    /// Auto-layout attributes, if the frame stacks its children
    pub auto_layout: Option<AutoLayout>,
    /// Text content for [`NodeKind::Text`] nodes
    pub characters: Option<String>,
    /// Owning container, `None` only for the document root
    pub parent: Option<NodeId>,
    /// Direct children in paint order
    pub children: SmallVec<[NodeId; 8]>,
}

impl Node {
    pub(crate) fn new(id: NodeId, kind: NodeKind, name: impl Into<String>, rect: Rect) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            rect,
            visible: true,
            expanded: true,
            corner_radius: 0.0,
            auto_layout: None,
            characters: None,
            parent: None,
            children: SmallVec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_display_round_trips() {
        let id = NodeId::new("7:42");
        assert_eq!(id.to_string(), "7:42");
        assert_eq!(NodeId::from("7:42"), id);
    }

    #[test]
    fn only_containers_take_children() {
        assert!(NodeKind::Frame.is_container());
        assert!(NodeKind::Canvas.is_container());
        assert!(!NodeKind::Text.is_container());
        assert!(!NodeKind::Vector.is_container());
    }
}
