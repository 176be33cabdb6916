//! Reading-order step encoder
//!
//! Markers are numbered on canvas; the number lives in a `Number` text
//! sub-node and the walker re-sorts decoded entries by it, so tree
//! insertion order never matters.

use super::{PageContext, StepPatch};
use crate::decode::NUMBER_CHILD;
use crate::error::EngineError;
use ally_model::StepKind;
use ally_tree::{NodeId, NodeKind, NodeTree};

/// Confirm there is nothing to order on this page
///
/// # Errors
/// `no-focus-order::mainPageNodeNotFound` when the page node is gone.
pub fn add_no_records<T: NodeTree>(
    tree: &mut T,
    ctx: &PageContext,
) -> Result<StepPatch, EngineError> {
    super::add_none_marker(tree, ctx, StepKind::ReadingOrder, "no-focus-order")
}

/// Add one reading-order marker
///
/// # Errors
/// `add-focus-order::mainPageNodeNotFound` when the page node is gone.
pub fn add_record<T: NodeTree>(
    tree: &mut T,
    ctx: &PageContext,
    sequence: u32,
    label: &str,
) -> Result<StepPatch, EngineError> {
    let resolved = super::resolve_layer(tree, ctx, StepKind::ReadingOrder, "add-focus-order")?;
    let block = super::new_block(
        tree,
        &resolved.layer,
        StepKind::ReadingOrder,
        None,
        Some(label),
    )?;
    let rect = tree.get(&block).map(|n| n.rect).unwrap_or_default();
    let number = tree.create(NodeKind::Text, NUMBER_CHILD, rect);
    tree.set_characters(&number, &sequence.to_string())?;
    tree.append_child(&block, &number)?;
    Ok(super::build_patch(tree, ctx, StepKind::ReadingOrder, resolved.layer))
}

/// Remove one marker
///
/// # Errors
/// `remove-focus-order::annotationNodeNotFound` when the block is gone.
pub fn remove_record<T: NodeTree>(tree: &mut T, id: &NodeId) -> Result<(), EngineError> {
    super::remove_annotation(tree, id, "remove-focus-order")
}

/// Mark the reading-order step reviewed
///
/// # Errors
/// `confirm-focus-order::mainPageNodeNotFound` when the page node is gone.
pub fn confirm_step<T: NodeTree>(
    tree: &mut T,
    ctx: &PageContext,
) -> Result<StepPatch, EngineError> {
    super::confirm(tree, ctx, StepKind::ReadingOrder, "confirm-focus-order")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ally_model::{FlowKind, StepRecords};
    use ally_tree::{DocumentTree, Rect};

    #[test]
    fn decoded_order_follows_sequence_not_insertion() {
        let mut tree = DocumentTree::new();
        let canvas = tree.create_canvas("Page 1").unwrap();
        let page = tree.create(NodeKind::Frame, "Home", Rect::new(0.0, 0.0, 800.0, 600.0));
        tree.append_child(&canvas, &page).unwrap();
        let ctx = PageContext::new(page, FlowKind::Web);

        add_record(&mut tree, &ctx, 2, "Search field").unwrap();
        add_record(&mut tree, &ctx, 3, "Submit").unwrap();
        let patch = add_record(&mut tree, &ctx, 1, "Logo").unwrap();

        let StepRecords::ReadingOrder(records) = patch.existing_data else {
            panic!("expected reading-order records");
        };
        let sequences: Vec<u32> = records.iter().map(|r| r.sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3]);
        assert_eq!(records[0].label, "Logo");
    }
}
