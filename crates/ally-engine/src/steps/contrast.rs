//! Contrast step encoder
//!
//! The ratio itself comes from the WCAG math collaborator; this module
//! only persists the result as `"Contrast: <grade>:<ratio> | <id>"`.

use super::{PageContext, StepPatch};
use crate::error::EngineError;
use ally_model::{ContrastGrade, StepKind};
use ally_tree::{NodeId, NodeTree};

/// Confirm the page has no contrast findings to record
///
/// # Errors
/// `no-contrast::mainPageNodeNotFound` when the page node is gone.
pub fn add_no_records<T: NodeTree>(
    tree: &mut T,
    ctx: &PageContext,
) -> Result<StepPatch, EngineError> {
    super::add_none_marker(tree, ctx, StepKind::Contrast, "no-contrast")
}

/// Record one measured ratio
///
/// # Errors
/// `add-contrast::mainPageNodeNotFound` when the page node is gone.
pub fn add_record<T: NodeTree>(
    tree: &mut T,
    ctx: &PageContext,
    ratio: f64,
    grade: ContrastGrade,
) -> Result<StepPatch, EngineError> {
    let resolved = super::resolve_layer(tree, ctx, StepKind::Contrast, "add-contrast")?;
    let label = format!("{ratio:.2}");
    super::new_block(
        tree,
        &resolved.layer,
        StepKind::Contrast,
        Some(grade.as_str()),
        Some(&label),
    )?;
    Ok(super::build_patch(tree, ctx, StepKind::Contrast, resolved.layer))
}

/// Remove one contrast record
///
/// # Errors
/// `remove-contrast::annotationNodeNotFound` when the block is gone.
pub fn remove_record<T: NodeTree>(tree: &mut T, id: &NodeId) -> Result<(), EngineError> {
    super::remove_annotation(tree, id, "remove-contrast")
}

/// Mark the contrast step reviewed
///
/// # Errors
/// `confirm-contrast::mainPageNodeNotFound` when the page node is gone.
pub fn confirm_step<T: NodeTree>(
    tree: &mut T,
    ctx: &PageContext,
) -> Result<StepPatch, EngineError> {
    super::confirm(tree, ctx, StepKind::Contrast, "confirm-contrast")
}
