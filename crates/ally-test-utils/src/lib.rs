//! Testing utilities for the ally workspace
//!
//! Shared fixture builders: seeded document trees, annotated roots, and
//! v1-shaped panels for migration tests.

#![allow(missing_docs)]

use ally_model::{FlowKind, StepKind};
use ally_tree::{DocumentTree, NodeId, NodeKind, NodeTree, Rect};

/// Canvas with one page frame named `page_name`.
pub fn tree_with_page(page_name: &str) -> (DocumentTree, NodeId, NodeId) {
    let mut tree = DocumentTree::new();
    let canvas = tree.create_canvas("Page 1").expect("fresh canvas");
    let page = tree.create(
        NodeKind::Frame,
        page_name,
        Rect::new(0.0, 0.0, 1440.0, 900.0),
    );
    tree.append_child(&canvas, &page).expect("attach page");
    (tree, canvas, page)
}

/// Attach an Accessibility Root for `page_name` next to the page.
pub fn attach_root(
    tree: &mut DocumentTree,
    canvas: &NodeId,
    page_name: &str,
    flow: FlowKind,
) -> NodeId {
    let root = tree.create(
        NodeKind::Frame,
        &ally_codec::root_name(page_name, flow),
        Rect::new(1540.0, 0.0, 1440.0, 900.0),
    );
    tree.append_child(canvas, &root).expect("attach root");
    root
}

/// Attach a step subtree with pre-encoded block names.
pub fn attach_layer(
    tree: &mut DocumentTree,
    root: &NodeId,
    step: StepKind,
    blocks: &[&str],
) -> NodeId {
    let layer = tree.create(
        NodeKind::Frame,
        &format!("{} | 0:0", step.layer_name()),
        Rect::default(),
    );
    tree.append_child(root, &layer).expect("attach layer");
    for name in blocks {
        let block = tree.create(NodeKind::Frame, name, Rect::default());
        tree.append_child(&layer, &block).expect("attach block");
    }
    layer
}

/// Attach a child text node carrying characters, as the heading target
/// and reading-order number sub-nodes do.
pub fn attach_text_child(
    tree: &mut DocumentTree,
    parent: &NodeId,
    name: &str,
    characters: &str,
) -> NodeId {
    let text = tree.create(NodeKind::Text, name, Rect::default());
    tree.set_characters(&text, characters).expect("set characters");
    tree.append_child(parent, &text).expect("attach text");
    text
}

/// Attach a v1-era `Annotations` panel with the legacy containers the
/// migration engine knows how to port.
pub fn attach_v1_panel(tree: &mut DocumentTree, root: &NodeId) -> NodeId {
    let panel = tree.create(
        NodeKind::Frame,
        "Annotations",
        Rect::new(1540.0, 950.0, 360.0, 480.0),
    );
    tree.append_child(root, &panel).expect("attach panel");

    let alt = tree.create(NodeKind::Frame, "Alt text annotations", Rect::default());
    tree.append_child(&panel, &alt).expect("attach alt container");
    let alt_block = tree.create(
        NodeKind::Frame,
        "Alt text: informative:Hero image | 1:90",
        Rect::default(),
    );
    tree.append_child(&alt, &alt_block).expect("attach alt block");

    let checks = tree.create(NodeKind::Frame, "Designer checks", Rect::default());
    tree.append_child(&panel, &checks).expect("attach checks");

    panel
}
