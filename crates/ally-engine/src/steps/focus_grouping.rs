//! Focus-grouping step encoder
//!
//! Grouping related controls into focus stops is the detailed form of
//! reading-order review; its presence also completes that coarser step
//! (the walker handles the pairing).

use super::{PageContext, StepPatch};
use crate::error::EngineError;
use ally_model::StepKind;
use ally_tree::{NodeId, NodeTree};

/// Confirm the page needs no focus grouping
///
/// # Errors
/// `no-focus-group::mainPageNodeNotFound` when the page node is gone.
pub fn add_no_records<T: NodeTree>(
    tree: &mut T,
    ctx: &PageContext,
) -> Result<StepPatch, EngineError> {
    super::add_none_marker(tree, ctx, StepKind::FocusGrouping, "no-focus-group")
}

/// Add one focus group
///
/// # Errors
/// `add-focus-group::mainPageNodeNotFound` when the page node is gone.
pub fn add_record<T: NodeTree>(
    tree: &mut T,
    ctx: &PageContext,
    label: &str,
) -> Result<StepPatch, EngineError> {
    let resolved = super::resolve_layer(tree, ctx, StepKind::FocusGrouping, "add-focus-group")?;
    super::new_block(
        tree,
        &resolved.layer,
        StepKind::FocusGrouping,
        None,
        Some(label),
    )?;
    Ok(super::build_patch(tree, ctx, StepKind::FocusGrouping, resolved.layer))
}

/// Remove one focus group
///
/// # Errors
/// `remove-focus-group::annotationNodeNotFound` when the block is gone.
pub fn remove_record<T: NodeTree>(tree: &mut T, id: &NodeId) -> Result<(), EngineError> {
    super::remove_annotation(tree, id, "remove-focus-group")
}

/// Mark the focus-grouping step reviewed
///
/// # Errors
/// `confirm-focus-grouping::mainPageNodeNotFound` when the page node is gone.
pub fn confirm_step<T: NodeTree>(
    tree: &mut T,
    ctx: &PageContext,
) -> Result<StepPatch, EngineError> {
    super::confirm(tree, ctx, StepKind::FocusGrouping, "confirm-focus-grouping")
}
