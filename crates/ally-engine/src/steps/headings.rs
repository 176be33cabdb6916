//! Heading step encoder
//!
//! Blocks are named `"Heading: <level>:<text> | <id>"` and carry a
//! `Target` text sub-node holding the id of the design node the heading
//! refers to. The walker drops entries whose target has been deleted.

use super::{PageContext, StepPatch};
use crate::decode::TARGET_CHILD;
use crate::error::EngineError;
use ally_model::StepKind;
use ally_tree::{NodeId, NodeKind, NodeTree};

/// Confirm the page has no headings to annotate
///
/// # Errors
/// `no-heading::mainPageNodeNotFound` when the page node is gone.
pub fn add_no_records<T: NodeTree>(
    tree: &mut T,
    ctx: &PageContext,
) -> Result<StepPatch, EngineError> {
    super::add_none_marker(tree, ctx, StepKind::Headings, "no-heading")
}

/// Add one heading annotation pointing at a design node
///
/// The level is clamped to the 1..=6 outline range.
///
/// # Errors
/// `add-heading::mainPageNodeNotFound` when the page node is gone;
/// `add-heading::annotationNodeNotFound` when the target already is.
pub fn add_record<T: NodeTree>(
    tree: &mut T,
    ctx: &PageContext,
    level: u8,
    text: &str,
    target: &NodeId,
) -> Result<StepPatch, EngineError> {
    if tree.get(target).is_none() {
        return Err(EngineError::ReferenceGone { op: "add-heading" });
    }
    let resolved = super::resolve_layer(tree, ctx, StepKind::Headings, "add-heading")?;
    let level = level.clamp(1, 6);
    let block = super::new_block(
        tree,
        &resolved.layer,
        StepKind::Headings,
        Some(&level.to_string()),
        Some(text),
    )?;
    let rect = tree.get(&block).map(|n| n.rect).unwrap_or_default();
    let target_node = tree.create(NodeKind::Text, TARGET_CHILD, rect);
    tree.set_characters(&target_node, target.as_str())?;
    tree.set_visible(&target_node, false)?;
    tree.append_child(&block, &target_node)?;
    Ok(super::build_patch(tree, ctx, StepKind::Headings, resolved.layer))
}

/// Remove one heading annotation
///
/// # Errors
/// `remove-heading::annotationNodeNotFound` when the block is gone.
pub fn remove_record<T: NodeTree>(tree: &mut T, id: &NodeId) -> Result<(), EngineError> {
    super::remove_annotation(tree, id, "remove-heading")
}

/// Mark the headings step reviewed
///
/// # Errors
/// `confirm-headings::mainPageNodeNotFound` when the page node is gone.
pub fn confirm_step<T: NodeTree>(
    tree: &mut T,
    ctx: &PageContext,
) -> Result<StepPatch, EngineError> {
    super::confirm(tree, ctx, StepKind::Headings, "confirm-headings")
}
