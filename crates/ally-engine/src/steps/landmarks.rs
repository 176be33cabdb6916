//! Landmark step encoder
//!
//! Landmarks mark page regions (header, nav, main, ...). Each record is
//! one block named `"Landmark: <type>[:<label>] | <id>"`; the optional
//! label distinguishes repeated region types.

use super::{PageContext, StepPatch};
use crate::error::EngineError;
use ally_model::{LandmarkKind, StepKind};
use ally_tree::{NodeId, NodeTree};

/// Confirm the page has no landmarks to mark
///
/// # Errors
/// `no-landmark::mainPageNodeNotFound` when the page node is gone.
pub fn add_no_records<T: NodeTree>(
    tree: &mut T,
    ctx: &PageContext,
) -> Result<StepPatch, EngineError> {
    super::add_none_marker(tree, ctx, StepKind::Landmarks, "no-landmark")
}

/// Add one landmark annotation
///
/// # Errors
/// `add-landmark::mainPageNodeNotFound` when the page node is gone.
pub fn add_record<T: NodeTree>(
    tree: &mut T,
    ctx: &PageContext,
    kind: LandmarkKind,
    label: Option<&str>,
) -> Result<StepPatch, EngineError> {
    let resolved = super::resolve_layer(tree, ctx, StepKind::Landmarks, "add-landmark")?;
    super::new_block(
        tree,
        &resolved.layer,
        StepKind::Landmarks,
        Some(kind.as_str()),
        label,
    )?;
    Ok(super::build_patch(tree, ctx, StepKind::Landmarks, resolved.layer))
}

/// Remove one landmark annotation, pruning emptied containers
///
/// # Errors
/// `remove-landmark::annotationNodeNotFound` when the block is gone.
pub fn remove_record<T: NodeTree>(tree: &mut T, id: &NodeId) -> Result<(), EngineError> {
    super::remove_annotation(tree, id, "remove-landmark")
}

/// Mark the landmarks step reviewed
///
/// # Errors
/// `confirm-landmarks::mainPageNodeNotFound` when the page node is gone.
pub fn confirm_step<T: NodeTree>(
    tree: &mut T,
    ctx: &PageContext,
) -> Result<StepPatch, EngineError> {
    super::confirm(tree, ctx, StepKind::Landmarks, "confirm-landmarks")
}
