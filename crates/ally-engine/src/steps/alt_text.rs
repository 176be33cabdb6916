//! Alt-text step encoder

use super::{PageContext, StepPatch};
use crate::error::EngineError;
use ally_model::{AltTextKind, StepKind};
use ally_tree::{NodeId, NodeTree};

/// Confirm the page has no imagery needing alt text
///
/// # Errors
/// `no-alt-text::mainPageNodeNotFound` when the page node is gone.
pub fn add_no_records<T: NodeTree>(
    tree: &mut T,
    ctx: &PageContext,
) -> Result<StepPatch, EngineError> {
    super::add_none_marker(tree, ctx, StepKind::AltText, "no-alt-text")
}

/// Add one alt-text entry; `alt` is ignored for decorative imagery
///
/// # Errors
/// `add-alt-text::mainPageNodeNotFound` when the page node is gone.
pub fn add_record<T: NodeTree>(
    tree: &mut T,
    ctx: &PageContext,
    kind: AltTextKind,
    alt: &str,
) -> Result<StepPatch, EngineError> {
    let resolved = super::resolve_layer(tree, ctx, StepKind::AltText, "add-alt-text")?;
    let label = match kind {
        AltTextKind::Informative => Some(alt),
        AltTextKind::Decorative => None,
    };
    super::new_block(
        tree,
        &resolved.layer,
        StepKind::AltText,
        Some(kind.as_str()),
        label,
    )?;
    Ok(super::build_patch(tree, ctx, StepKind::AltText, resolved.layer))
}

/// Remove one alt-text entry
///
/// # Errors
/// `remove-alt-text::annotationNodeNotFound` when the block is gone.
pub fn remove_record<T: NodeTree>(tree: &mut T, id: &NodeId) -> Result<(), EngineError> {
    super::remove_annotation(tree, id, "remove-alt-text")
}

/// Mark the alt-text step reviewed
///
/// # Errors
/// `confirm-alt-text::mainPageNodeNotFound` when the page node is gone.
pub fn confirm_step<T: NodeTree>(
    tree: &mut T,
    ctx: &PageContext,
) -> Result<StepPatch, EngineError> {
    super::confirm(tree, ctx, StepKind::AltText, "confirm-alt-text")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ally_model::{FlowKind, StepRecords};
    use ally_tree::{DocumentTree, NodeKind, Rect};

    #[test]
    fn decorative_entries_carry_no_text() {
        let mut tree = DocumentTree::new();
        let canvas = tree.create_canvas("Page 1").unwrap();
        let page = tree.create(NodeKind::Frame, "Home", Rect::default());
        tree.append_child(&canvas, &page).unwrap();
        let ctx = PageContext::new(page, FlowKind::Web);

        add_record(&mut tree, &ctx, AltTextKind::Informative, "Team photo").unwrap();
        let patch = add_record(&mut tree, &ctx, AltTextKind::Decorative, "ignored").unwrap();

        let StepRecords::AltText(records) = patch.existing_data else {
            panic!("expected alt-text records");
        };
        assert_eq!(records[0].alt, "Team photo");
        assert_eq!(records[1].kind, AltTextKind::Decorative);
        assert_eq!(records[1].alt, "");
    }
}
