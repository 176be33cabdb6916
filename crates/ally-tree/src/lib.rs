//! Ally Document Tree
//!
//! The mutable node tree that doubles as the persistent store for all
//! annotation data. There is no external database: annotation state lives
//! entirely in named, nested nodes of the shared design document.
//!
//! # Core Concepts
//!
//! - [`Node`]: one named tree node with geometry and layout attributes
//! - [`NodeId`]: stable host-style id (`<session>:<counter>`)
//! - [`NodeTree`]: repository trait the engine is written against
//! - [`DocumentTree`]: the in-memory implementation
//!
//! # Example
//!
//! ```rust
//! use ally_tree::{DocumentTree, NodeKind, NodeTree, Rect};
//!
//! let mut tree = DocumentTree::new();
//! let canvas = tree.create_canvas("Page 1").unwrap();
//! let frame = tree.create(NodeKind::Frame, "Home", Rect::new(0.0, 0.0, 375.0, 812.0));
//! tree.append_child(&canvas, &frame).unwrap();
//! assert_eq!(tree.children(&canvas).len(), 1);
//! ```

mod geometry;
mod node;
mod tree;

pub use geometry::{Padding, Rect};
pub use node::{AutoLayout, LayoutDirection, Node, NodeId, NodeKind};
pub use tree::{DocumentTree, NodeTree, TreeError};
