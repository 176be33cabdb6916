//! Step encoders
//!
//! One module per annotation step, all implementing the same surface:
//! `add_no_records`, `add_record`, `remove_record`, `confirm_step`.
//! Every encoder resolves the page's Accessibility Root and its own Step
//! Subtree through the idempotent upsert, encodes records through the
//! codec, and stacks new blocks under the previous sibling so creation
//! order is preserved visually without an index field.

pub mod alt_text;
pub mod contrast;
pub mod focus_grouping;
pub mod gestures;
pub mod headings;
pub mod landmarks;
pub mod reading_order;
pub mod responsive_reflow;
pub mod text_zoom;
pub mod touch_targets;

use crate::context::PageContext;
use crate::decode;
use crate::error::EngineError;
use crate::upsert::get_or_create;
use ally_model::{StepKind, StepRecords};
use ally_tree::{NodeId, NodeKind, NodeTree, Rect};

/// Horizontal gap between a page frame and its Accessibility Root
const ROOT_GAP: f64 = 100.0;
/// Default annotation block width
const BLOCK_WIDTH: f64 = 320.0;
/// Default annotation block height
const BLOCK_HEIGHT: f64 = 40.0;

/// Subtype marking an explicit "nothing to annotate here" confirmation
pub(crate) const NONE_SUBTYPE: &str = "none";

/// Incremental ledger update reported after every encoder mutation
///
/// Carries everything the UI needs to patch one step of one page
/// without a full re-walk.
#[derive(Debug, Clone, PartialEq)]
pub struct StepPatch {
    /// Page the patch applies to
    pub page_id: NodeId,
    /// Step that changed
    pub step: StepKind,
    /// Step Subtree node id
    pub layer_id: NodeId,
    /// Freshly decoded records for the step
    pub existing_data: StepRecords,
    /// Visibility mirrored from the tree
    pub visible: bool,
}

pub(crate) struct ResolvedStep {
    #[allow(dead_code)]
    pub(crate) root: NodeId,
    pub(crate) layer: NodeId,
}

/// Resolve (or lazily create) the page's Accessibility Root.
pub(crate) fn resolve_root<T: NodeTree>(
    tree: &mut T,
    ctx: &PageContext,
    op: &'static str,
) -> Result<NodeId, EngineError> {
    let page = tree
        .get(&ctx.page_id)
        .ok_or(EngineError::PageNodeGone { op })?;
    let container = page
        .parent
        .clone()
        .ok_or(EngineError::PageNodeGone { op })?;
    let name = ally_codec::root_name(&page.name, ctx.flow);
    let rect = Rect::new(
        page.rect.right() + ROOT_GAP,
        page.rect.y,
        page.rect.width,
        page.rect.height,
    );
    let out = get_or_create(tree, &container, &name, rect)?;
    Ok(out.id)
}

/// Resolve the Step Subtree under the root, baking the generated id
/// suffix into its name exactly once.
pub(crate) fn resolve_layer<T: NodeTree>(
    tree: &mut T,
    ctx: &PageContext,
    step: StepKind,
    op: &'static str,
) -> Result<ResolvedStep, EngineError> {
    let root = resolve_root(tree, ctx, op)?;
    let root_rect = tree.get(&root).map(|n| n.rect).unwrap_or_default();
    let out = get_or_create(tree, &root, step.layer_name(), root_rect)?;
    let current = tree
        .get(&out.id)
        .ok_or(EngineError::ReferenceGone { op })?;
    if current.name == step.layer_name() {
        let baked = ally_codec::layer_name(step, &out.id);
        tree.rename(&out.id, &baked)?;
    }
    Ok(ResolvedStep {
        root,
        layer: out.id,
    })
}

/// Position for the next block: directly below the last sibling, or at
/// the layer origin when the layer is empty.
pub(crate) fn next_block_rect<T: NodeTree>(tree: &T, layer: &NodeId, height: f64) -> Rect {
    let last = tree
        .children(layer)
        .into_iter()
        .rev()
        .find_map(|id| tree.get(&id).map(|n| n.rect));
    match last {
        Some(rect) => rect.stacked_below(height),
        None => {
            let origin = tree.get(layer).map(|n| n.rect).unwrap_or_default();
            Rect::new(origin.x, origin.y, BLOCK_WIDTH, height)
        }
    }
}

/// Create one Annotation Block under the layer, named through the codec
/// with the block's own minted id baked in.
pub(crate) fn new_block<T: NodeTree>(
    tree: &mut T,
    layer: &NodeId,
    step: StepKind,
    subtype: Option<&str>,
    label: Option<&str>,
) -> Result<NodeId, EngineError> {
    let rect = next_block_rect(tree, layer, BLOCK_HEIGHT);
    let id = tree.create(NodeKind::Frame, step.block_kind(), rect);
    let name = ally_codec::encode_block(step.block_kind(), subtype, label, &id);
    tree.rename(&id, &name)?;
    tree.append_child(layer, &id)?;
    tree.set_expanded(&id, false)?;
    Ok(id)
}

/// Decode the layer's current records into a reportable patch.
pub(crate) fn build_patch<T: NodeTree>(
    tree: &T,
    ctx: &PageContext,
    step: StepKind,
    layer: NodeId,
) -> StepPatch {
    let existing_data = decode::decode_step(tree, step, &layer);
    let visible = tree.get(&layer).map_or(true, |n| n.visible);
    StepPatch {
        page_id: ctx.page_id.clone(),
        step,
        layer_id: layer,
        existing_data,
        visible,
    }
}

/// Shared `add_no_records`: writes one `none` marker block, at most once.
pub(crate) fn add_none_marker<T: NodeTree>(
    tree: &mut T,
    ctx: &PageContext,
    step: StepKind,
    op: &'static str,
) -> Result<StepPatch, EngineError> {
    let resolved = resolve_layer(tree, ctx, step, op)?;
    let already_marked = tree
        .children(&resolved.layer)
        .into_iter()
        .filter_map(|id| tree.get(&id).map(|n| n.name.clone()))
        .any(|name| ally_codec::decode_block(&name).subtype.as_deref() == Some(NONE_SUBTYPE));
    if !already_marked {
        new_block(tree, &resolved.layer, step, Some(NONE_SUBTYPE), None)?;
    }
    Ok(build_patch(tree, ctx, step, resolved.layer))
}

/// Shared `confirm_step`: ensures the subtree exists so the walker
/// registers the step on the next scan.
pub(crate) fn confirm<T: NodeTree>(
    tree: &mut T,
    ctx: &PageContext,
    step: StepKind,
    op: &'static str,
) -> Result<StepPatch, EngineError> {
    let resolved = resolve_layer(tree, ctx, step, op)?;
    tree.set_visible(&resolved.layer, true)?;
    Ok(build_patch(tree, ctx, step, resolved.layer))
}

/// Remove a batch of annotation nodes
///
/// Sibling removals carry no ordering guarantee, so the outcome is
/// recombined by id: the returned list holds exactly the ids that were
/// removed. Already-gone nodes are logged and skipped; deletion
/// out-of-band is an expected case, not a failure.
pub fn remove_many<T: NodeTree>(tree: &mut T, ids: &[NodeId]) -> Vec<NodeId> {
    let mut removed = Vec::new();
    for id in ids {
        match remove_annotation(tree, id, "remove-nodes") {
            Ok(()) => removed.push(id.clone()),
            Err(err) => {
                tracing::warn!(node = %id, tag = err.tag(), "batch removal skipped a node");
            }
        }
    }
    removed
}

/// Shared `remove_record`: deletes the block and prunes now-empty
/// annotation containers above it, stopping at the first container that
/// is not annotation-owned.
pub(crate) fn remove_annotation<T: NodeTree>(
    tree: &mut T,
    id: &NodeId,
    op: &'static str,
) -> Result<(), EngineError> {
    let node = tree.get(id).ok_or(EngineError::ReferenceGone { op })?;
    let mut parent = node.parent.clone();
    tree.remove_subtree(id)?;

    while let Some(parent_id) = parent {
        let Some(parent_node) = tree.get(&parent_id) else {
            break;
        };
        if !parent_node.children.is_empty() {
            break;
        }
        let prunable = StepKind::from_layer_name(&parent_node.name).is_some()
            || ally_codec::decode_root(&parent_node.name).is_some();
        if !prunable {
            break;
        }
        parent = parent_node.parent.clone();
        tree.remove_subtree(&parent_id)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ally_model::FlowKind;
    use ally_tree::DocumentTree;

    fn page_fixture() -> (DocumentTree, PageContext) {
        let mut tree = DocumentTree::new();
        let canvas = tree.create_canvas("Page 1").unwrap();
        let page = tree.create(
            NodeKind::Frame,
            "Home",
            Rect::new(0.0, 0.0, 1440.0, 1024.0),
        );
        tree.append_child(&canvas, &page).unwrap();
        let ctx = PageContext::new(page, FlowKind::Web);
        (tree, ctx)
    }

    #[test]
    fn resolve_root_creates_then_reuses() {
        let (mut tree, ctx) = page_fixture();
        let first = resolve_root(&mut tree, &ctx, "add-landmark").unwrap();
        let second = resolve_root(&mut tree, &ctx, "add-landmark").unwrap();
        assert_eq!(first, second);

        let root = tree.get(&first).unwrap();
        assert_eq!(root.name, "Home Accessibility | Web");
        assert!(root.rect.x > 1440.0);
    }

    #[test]
    fn resolve_root_fails_with_op_tag_when_page_gone() {
        let (mut tree, ctx) = page_fixture();
        tree.remove_subtree(&ctx.page_id).unwrap();
        let err = resolve_root(&mut tree, &ctx, "no-landmark").unwrap_err();
        assert_eq!(err.tag(), "no-landmark::mainPageNodeNotFound");
    }

    #[test]
    fn layer_id_suffix_is_baked_exactly_once() {
        let (mut tree, ctx) = page_fixture();
        let first = resolve_layer(&mut tree, &ctx, StepKind::Landmarks, "add-landmark").unwrap();
        let baked = tree.get(&first.layer).unwrap().name.clone();
        assert_eq!(baked, format!("Landmarks Layer | {}", first.layer));

        let second = resolve_layer(&mut tree, &ctx, StepKind::Landmarks, "add-landmark").unwrap();
        assert_eq!(second.layer, first.layer);
        assert_eq!(tree.get(&second.layer).unwrap().name, baked);
    }

    #[test]
    fn blocks_stack_in_strictly_increasing_y() {
        let (mut tree, ctx) = page_fixture();
        let resolved = resolve_layer(&mut tree, &ctx, StepKind::Landmarks, "add-landmark").unwrap();
        let a = new_block(&mut tree, &resolved.layer, StepKind::Landmarks, Some("header"), None)
            .unwrap();
        let b = new_block(&mut tree, &resolved.layer, StepKind::Landmarks, Some("nav"), None)
            .unwrap();
        let ra = tree.get(&a).unwrap().rect;
        let rb = tree.get(&b).unwrap().rect;
        assert!(rb.y > ra.y);
        assert!(!ra.overlaps_vertically(&rb));
        assert_eq!(ra.x, rb.x);
    }

    #[test]
    fn none_marker_is_written_once() {
        let (mut tree, ctx) = page_fixture();
        add_none_marker(&mut tree, &ctx, StepKind::Landmarks, "no-landmark").unwrap();
        let patch = add_none_marker(&mut tree, &ctx, StepKind::Landmarks, "no-landmark").unwrap();
        assert_eq!(tree.children(&patch.layer_id).len(), 1);
        assert_eq!(patch.existing_data, StepRecords::Confirmed);
    }

    #[test]
    fn remove_last_record_prunes_layer_and_root() {
        let (mut tree, ctx) = page_fixture();
        let resolved = resolve_layer(&mut tree, &ctx, StepKind::Landmarks, "add-landmark").unwrap();
        let block = new_block(&mut tree, &resolved.layer, StepKind::Landmarks, Some("nav"), None)
            .unwrap();
        remove_annotation(&mut tree, &block, "remove-landmark").unwrap();
        assert!(tree.get(&resolved.layer).is_none());
        assert!(tree.get(&resolved.root).is_none());
    }

    #[test]
    fn remove_keeps_nonempty_layer() {
        let (mut tree, ctx) = page_fixture();
        let resolved = resolve_layer(&mut tree, &ctx, StepKind::Landmarks, "add-landmark").unwrap();
        let a = new_block(&mut tree, &resolved.layer, StepKind::Landmarks, Some("nav"), None)
            .unwrap();
        let _b = new_block(&mut tree, &resolved.layer, StepKind::Landmarks, Some("main"), None)
            .unwrap();
        remove_annotation(&mut tree, &a, "remove-landmark").unwrap();
        assert!(tree.get(&resolved.layer).is_some());
        assert_eq!(tree.children(&resolved.layer).len(), 1);
    }
}
