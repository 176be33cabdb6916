//! Gesture step encoder
//!
//! Native-flow only: documents the single-pointer alternative for each
//! complex gesture.

use super::{PageContext, StepPatch};
use crate::error::EngineError;
use ally_model::{GestureKind, StepKind};
use ally_tree::{NodeId, NodeTree};

/// Confirm the page uses no complex gestures
///
/// # Errors
/// `no-gesture::mainPageNodeNotFound` when the page node is gone.
pub fn add_no_records<T: NodeTree>(
    tree: &mut T,
    ctx: &PageContext,
) -> Result<StepPatch, EngineError> {
    super::add_none_marker(tree, ctx, StepKind::Gestures, "no-gesture")
}

/// Add one gesture annotation
///
/// # Errors
/// `add-gesture::mainPageNodeNotFound` when the page node is gone.
pub fn add_record<T: NodeTree>(
    tree: &mut T,
    ctx: &PageContext,
    kind: GestureKind,
    alternative: Option<&str>,
) -> Result<StepPatch, EngineError> {
    let resolved = super::resolve_layer(tree, ctx, StepKind::Gestures, "add-gesture")?;
    super::new_block(
        tree,
        &resolved.layer,
        StepKind::Gestures,
        Some(kind.as_str()),
        alternative,
    )?;
    Ok(super::build_patch(tree, ctx, StepKind::Gestures, resolved.layer))
}

/// Remove one gesture annotation
///
/// # Errors
/// `remove-gesture::annotationNodeNotFound` when the block is gone.
pub fn remove_record<T: NodeTree>(tree: &mut T, id: &NodeId) -> Result<(), EngineError> {
    super::remove_annotation(tree, id, "remove-gesture")
}

/// Mark the gestures step reviewed
///
/// # Errors
/// `confirm-gestures::mainPageNodeNotFound` when the page node is gone.
pub fn confirm_step<T: NodeTree>(
    tree: &mut T,
    ctx: &PageContext,
) -> Result<StepPatch, EngineError> {
    super::confirm(tree, ctx, StepKind::Gestures, "confirm-gestures")
}
