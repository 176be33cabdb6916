//! Text-zoom step encoder

use super::{PageContext, StepPatch};
use crate::error::EngineError;
use ally_model::StepKind;
use ally_tree::{NodeId, NodeTree};

/// Confirm the page needs no zoom captures
///
/// # Errors
/// `no-text-zoom::mainPageNodeNotFound` when the page node is gone.
pub fn add_no_records<T: NodeTree>(
    tree: &mut T,
    ctx: &PageContext,
) -> Result<StepPatch, EngineError> {
    super::add_none_marker(tree, ctx, StepKind::TextZoom, "no-text-zoom")
}

/// Capture the layout at one zoom percentage
///
/// # Errors
/// `add-text-zoom::mainPageNodeNotFound` when the page node is gone.
pub fn add_record<T: NodeTree>(
    tree: &mut T,
    ctx: &PageContext,
    percent: u16,
) -> Result<StepPatch, EngineError> {
    let resolved = super::resolve_layer(tree, ctx, StepKind::TextZoom, "add-text-zoom")?;
    super::new_block(
        tree,
        &resolved.layer,
        StepKind::TextZoom,
        Some(&percent.to_string()),
        None,
    )?;
    Ok(super::build_patch(tree, ctx, StepKind::TextZoom, resolved.layer))
}

/// Remove one zoom capture
///
/// # Errors
/// `remove-text-zoom::annotationNodeNotFound` when the block is gone.
pub fn remove_record<T: NodeTree>(tree: &mut T, id: &NodeId) -> Result<(), EngineError> {
    super::remove_annotation(tree, id, "remove-text-zoom")
}

/// Mark the text-zoom step reviewed
///
/// # Errors
/// `confirm-text-zoom::mainPageNodeNotFound` when the page node is gone.
pub fn confirm_step<T: NodeTree>(
    tree: &mut T,
    ctx: &PageContext,
) -> Result<StepPatch, EngineError> {
    super::confirm(tree, ctx, StepKind::TextZoom, "confirm-text-zoom")
}
