//! Touch-target step encoder
//!
//! The block's own rect carries the measured target size; there is no
//! name payload beyond the kind and id.

use super::{PageContext, StepPatch};
use crate::error::EngineError;
use ally_model::StepKind;
use ally_tree::{NodeId, NodeTree, Rect};

/// Confirm the page has no undersized targets to flag
///
/// # Errors
/// `no-touch-target::mainPageNodeNotFound` when the page node is gone.
pub fn add_no_records<T: NodeTree>(
    tree: &mut T,
    ctx: &PageContext,
) -> Result<StepPatch, EngineError> {
    super::add_none_marker(tree, ctx, StepKind::TouchTargets, "no-touch-target")
}

/// Record one measured target
///
/// # Errors
/// `add-touch-target::mainPageNodeNotFound` when the page node is gone.
pub fn add_record<T: NodeTree>(
    tree: &mut T,
    ctx: &PageContext,
    width: f64,
    height: f64,
) -> Result<StepPatch, EngineError> {
    let resolved = super::resolve_layer(tree, ctx, StepKind::TouchTargets, "add-touch-target")?;
    let block = super::new_block(tree, &resolved.layer, StepKind::TouchTargets, None, None)?;
    let position = tree.get(&block).map(|n| n.rect).unwrap_or_default();
    tree.set_rect(&block, Rect::new(position.x, position.y, width, height))?;
    Ok(super::build_patch(tree, ctx, StepKind::TouchTargets, resolved.layer))
}

/// Remove one touch-target record
///
/// # Errors
/// `remove-touch-target::annotationNodeNotFound` when the block is gone.
pub fn remove_record<T: NodeTree>(tree: &mut T, id: &NodeId) -> Result<(), EngineError> {
    super::remove_annotation(tree, id, "remove-touch-target")
}

/// Mark the touch-target step reviewed
///
/// # Errors
/// `confirm-touch-targets::mainPageNodeNotFound` when the page node is gone.
pub fn confirm_step<T: NodeTree>(
    tree: &mut T,
    ctx: &PageContext,
) -> Result<StepPatch, EngineError> {
    super::confirm(tree, ctx, StepKind::TouchTargets, "confirm-touch-targets")
}
