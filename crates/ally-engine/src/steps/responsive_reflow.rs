//! Responsive-reflow step encoder
//!
//! Web-flow only. Each record captures one breakpoint; its presence also
//! completes the coarser text-zoom step (the walker handles the
//! pairing). Breakpoint definitions come from user preferences or the
//! built-in defaults.

use super::{PageContext, StepPatch};
use crate::error::EngineError;
use ally_model::{BreakpointDef, StepKind};
use ally_tree::{NodeId, NodeTree};

/// Built-in breakpoints used when the user has not defined any
#[must_use]
pub fn default_breakpoints() -> Vec<BreakpointDef> {
    vec![
        BreakpointDef {
            width: 320,
            label: "Mobile".to_string(),
        },
        BreakpointDef {
            width: 768,
            label: "Tablet".to_string(),
        },
        BreakpointDef {
            width: 1280,
            label: "Desktop".to_string(),
        },
    ]
}

/// Confirm the page needs no reflow captures
///
/// # Errors
/// `no-breakpoint::mainPageNodeNotFound` when the page node is gone.
pub fn add_no_records<T: NodeTree>(
    tree: &mut T,
    ctx: &PageContext,
) -> Result<StepPatch, EngineError> {
    super::add_none_marker(tree, ctx, StepKind::ResponsiveReflow, "no-breakpoint")
}

/// Capture one breakpoint
///
/// # Errors
/// `add-breakpoint::mainPageNodeNotFound` when the page node is gone.
pub fn add_record<T: NodeTree>(
    tree: &mut T,
    ctx: &PageContext,
    breakpoint: &BreakpointDef,
) -> Result<StepPatch, EngineError> {
    let resolved =
        super::resolve_layer(tree, ctx, StepKind::ResponsiveReflow, "add-breakpoint")?;
    super::new_block(
        tree,
        &resolved.layer,
        StepKind::ResponsiveReflow,
        Some(&breakpoint.width.to_string()),
        Some(&breakpoint.label),
    )?;
    Ok(super::build_patch(tree, ctx, StepKind::ResponsiveReflow, resolved.layer))
}

/// Remove one breakpoint capture
///
/// # Errors
/// `remove-breakpoint::annotationNodeNotFound` when the block is gone.
pub fn remove_record<T: NodeTree>(tree: &mut T, id: &NodeId) -> Result<(), EngineError> {
    super::remove_annotation(tree, id, "remove-breakpoint")
}

/// Mark the responsive-reflow step reviewed
///
/// # Errors
/// `confirm-responsive-reflow::mainPageNodeNotFound` when the page node is gone.
pub fn confirm_step<T: NodeTree>(
    tree: &mut T,
    ctx: &PageContext,
) -> Result<StepPatch, EngineError> {
    super::confirm(tree, ctx, StepKind::ResponsiveReflow, "confirm-responsive-reflow")
}
