//! Full-tree reconstruction walker
//!
//! The decoder side of the system: given a page's Accessibility Root,
//! rebuild the ledger entry for that page by decoding every known step
//! subtree. The walker never mutates the tree; anything it cannot
//! decode is logged and skipped, because a partially reconstructed
//! ledger is always better than none.

use crate::decode::decode_step;
use ally_codec::{decode_root, sanitize_page_name};
use ally_model::{FlowKind, PageLedger, PageLedgerEntry, StepData, StepKind, StepRecords};
use ally_tree::{NodeId, NodeKind, NodeTree};
use tracing::{info, warn};

use crate::migration::{OVERLAY_NAME, PANEL_CURRENT, PANEL_LEGACY};

/// Containers owned by the panel/migration machinery, not step data
fn is_structural(name: &str) -> bool {
    name == PANEL_CURRENT || name == PANEL_LEGACY || name == OVERLAY_NAME
}

/// Ids of every Accessibility Root in the document
#[must_use]
pub fn find_roots<T: NodeTree>(tree: &T) -> Vec<NodeId> {
    let mut roots = Vec::new();
    for canvas in tree.children(tree.root()) {
        for child in tree.children(&canvas) {
            if let Some(node) = tree.get(&child) {
                if decode_root(&node.name).is_some() {
                    roots.push(child);
                }
            }
        }
    }
    roots
}

/// Rebuild one page's ledger entry from its Accessibility Root
///
/// Returns `None` when the root is gone, its name no longer decodes, or
/// the page it claims to annotate no longer exists. The orphaned root
/// is flagged for manual cleanup, never deleted.
#[must_use]
pub fn scan_page<T: NodeTree>(tree: &T, root_id: &NodeId) -> Option<PageLedgerEntry> {
    let root = tree.get(root_id)?;
    let Some(root_name) = decode_root(&root.name) else {
        warn!(root = %root_id, name = root.name, "not an accessibility root name; skipping");
        return None;
    };
    let container = root.parent.clone()?;
    let Some(page) = tree
        .children(&container)
        .into_iter()
        .filter(|id| id != root_id)
        .filter_map(|id| tree.get(&id))
        .find(|node| {
            node.kind == NodeKind::Frame && sanitize_page_name(&node.name) == root_name.page_name
        })
        .cloned()
    else {
        warn!(
            root = %root_id,
            page = root_name.page_name,
            "annotated page no longer exists; flag root for manual cleanup"
        );
        return None;
    };
    // Legacy roots predate the flow suffix; web was the only flow then.
    let flow = root_name.flow.unwrap_or(FlowKind::Web);

    let mut entry = PageLedgerEntry::new(page.id.clone(), page.name.clone(), flow);
    for child_id in tree.children(root_id) {
        let Some(child) = tree.get(&child_id) else {
            continue;
        };
        match StepKind::from_layer_name(&child.name) {
            Some(step) => {
                let records = decode_step(tree, step, &child_id);
                if records.is_empty() && records != StepRecords::Confirmed {
                    warn!(
                        root = %root_id,
                        step = %step,
                        "step subtree has no decodable records"
                    );
                }
                entry.insert_data(
                    step,
                    StepData {
                        id: child_id.clone(),
                        existing_data: records,
                        visible: child.visible,
                    },
                );
                // Detailed steps complete their coarser pairing too;
                // register_step keeps repeated dispatch from duplicating it.
                if let Some(implied) = step.implies() {
                    entry.register_step(implied);
                }
            }
            None if is_structural(&child.name) => {}
            None => {
                warn!(
                    root = %root_id,
                    name = child.name,
                    "unrecognized child under accessibility root; skipping"
                );
            }
        }
    }
    Some(entry)
}

/// Scan every page in the document into a fresh ledger
///
/// Pages are isolated from each other: one undecodable root never
/// aborts the rest.
#[must_use]
pub fn scan_document<T: NodeTree>(tree: &T) -> PageLedger {
    let roots = find_roots(tree);
    let total = roots.len();
    let mut ledger = PageLedger::new();
    for root in roots {
        if let Some(entry) = scan_page(tree, &root) {
            ledger.upsert(entry);
        } else {
            warn!(root = %root, "root skipped during scan; flag for manual cleanup");
        }
    }
    info!(roots = total, scanned = ledger.len(), "document scan complete");
    ledger
}

#[cfg(test)]
mod tests {
    use super::*;
    use ally_tree::{DocumentTree, Rect};

    fn fixture() -> (DocumentTree, NodeId, NodeId) {
        let mut tree = DocumentTree::new();
        let canvas = tree.create_canvas("Page 1").unwrap();
        let page = tree.create(NodeKind::Frame, "Home", Rect::new(0.0, 0.0, 1200.0, 800.0));
        tree.append_child(&canvas, &page).unwrap();
        let root = tree.create(
            NodeKind::Frame,
            "Home Accessibility | Web",
            Rect::new(1300.0, 0.0, 1200.0, 800.0),
        );
        tree.append_child(&canvas, &root).unwrap();
        (tree, page, root)
    }

    fn layer_with_blocks(
        tree: &mut DocumentTree,
        root: &NodeId,
        layer_name: &str,
        blocks: &[&str],
    ) -> NodeId {
        let layer = tree.create(NodeKind::Frame, layer_name, Rect::default());
        tree.append_child(root, &layer).unwrap();
        for name in blocks {
            let block = tree.create(NodeKind::Frame, name, Rect::default());
            tree.append_child(&layer, &block).unwrap();
        }
        layer
    }

    #[test]
    fn scan_rebuilds_completed_steps_and_data() {
        let (mut tree, page, root) = fixture();
        layer_with_blocks(
            &mut tree,
            &root,
            "Landmarks Layer | 4:1",
            &["Landmark: header | 4:2", "Landmark: nav | 4:3"],
        );

        let entry = scan_page(&tree, &root).unwrap();
        assert_eq!(entry.page_id, page);
        assert_eq!(entry.steps_completed, vec![StepKind::Landmarks]);
        let data = &entry.steps_data[&StepKind::Landmarks];
        assert_eq!(data.existing_data.len(), 2);
        assert!(data.visible);
    }

    #[test]
    fn missing_page_aborts_without_deleting() {
        let (mut tree, page, root) = fixture();
        tree.remove_subtree(&page).unwrap();
        assert!(scan_page(&tree, &root).is_none());
        assert!(tree.get(&root).is_some());
    }

    #[test]
    fn unrecognized_children_do_not_fail_the_scan() {
        let (mut tree, _page, root) = fixture();
        layer_with_blocks(
            &mut tree,
            &root,
            "Headings Layer | 4:1",
            &[],
        );
        let note = tree.create(NodeKind::Text, "Leftover sticky", Rect::default());
        tree.append_child(&root, &note).unwrap();

        let entry = scan_page(&tree, &root).unwrap();
        assert_eq!(entry.steps_completed, vec![StepKind::Headings]);
    }

    #[test]
    fn dual_purpose_steps_register_their_pairing_once() {
        let (mut tree, _page, root) = fixture();
        layer_with_blocks(
            &mut tree,
            &root,
            "Focus Grouping Layer | 4:1",
            &["Focus group:Card actions | 4:2"],
        );
        layer_with_blocks(
            &mut tree,
            &root,
            "Reading Order Layer | 4:3",
            &[],
        );

        let entry = scan_page(&tree, &root).unwrap();
        let reading_order = entry
            .steps_completed
            .iter()
            .filter(|s| **s == StepKind::ReadingOrder)
            .count();
        assert_eq!(reading_order, 1);
    }

    #[test]
    fn legacy_root_without_flow_defaults_to_web() {
        let mut tree = DocumentTree::new();
        let canvas = tree.create_canvas("Page 1").unwrap();
        let page = tree.create(NodeKind::Frame, "Home", Rect::default());
        tree.append_child(&canvas, &page).unwrap();
        let root = tree.create(NodeKind::Frame, "Home Accessibility", Rect::default());
        tree.append_child(&canvas, &root).unwrap();

        let entry = scan_page(&tree, &root).unwrap();
        assert_eq!(entry.flow, FlowKind::Web);
    }

    #[test]
    fn scan_document_isolates_broken_roots() {
        let (mut tree, _page, root) = fixture();
        layer_with_blocks(
            &mut tree,
            &root,
            "Contrast Layer | 4:1",
            &["Contrast: AA:4.61 | 4:2"],
        );

        // Second canvas whose annotated page is gone.
        let canvas2 = tree.create_canvas("Page 2").unwrap();
        let orphan = tree.create(NodeKind::Frame, "Pricing Accessibility | Web", Rect::default());
        tree.append_child(&canvas2, &orphan).unwrap();

        let ledger = scan_document(&tree);
        assert_eq!(ledger.len(), 1);
    }
}
