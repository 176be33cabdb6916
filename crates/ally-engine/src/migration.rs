//! v1 → v2 annotations-panel migration
//!
//! Old documents carry a flat `"Annotations"` container per
//! Accessibility Root. The current layout is a single auto-laid-out
//! `"Annotations panel"` with a header, one checkmark line per step and
//! a footer, plus an absolutely-positioned exemplar overlay. The
//! discriminator is the container's own name, so the transition fires
//! once per root and is a no-op on every later run.
//!
//! Migration is best-effort per root: one root failing never aborts the
//! rest, and captured user work is moved, never deleted.

use crate::error::EngineError;
use crate::locator::find_child_by_name_prefix;
use crate::walker::find_roots;
use ally_model::{FlowKind, StepKind};
use ally_tree::{AutoLayout, LayoutDirection, NodeId, NodeKind, NodeTree, Padding, Rect};
use tracing::{debug, warn};

/// v1 annotations container name
pub(crate) const PANEL_LEGACY: &str = "Annotations";
/// v2 annotations container name; doubles as the idempotence check
pub(crate) const PANEL_CURRENT: &str = "Annotations panel";
/// Exemplar overlay container name
pub(crate) const OVERLAY_NAME: &str = "Annotation examples";

const HEADER_NAME: &str = "Annotations header";
const FOOTER_NAME: &str = "Annotations footer";
const LEGACY_ALT_CONTAINER: &str = "Alt text annotations";
const LEGACY_GESTURE_CONTAINER: &str = "Gesture annotations";
const LEGACY_CHECKS_CONTAINER: &str = "Designer checks";
const LEGACY_BLOCK_TITLE: &str = "Annotation title";

const HEADER_COPY: &str = "Review each step below and check it off once this page passes.";
const FOOTER_COPY: &str =
    "Annotations live in this document. Removing a line removes it for everyone.";

const PANEL_PADDING: f64 = 16.0;
const PANEL_CORNER_RADIUS: f64 = 8.0;
const LINE_SPACING: f64 = 8.0;
const LINE_WIDTH: f64 = 320.0;
const LINE_HEIGHT: f64 = 40.0;
const HEADER_HEIGHT: f64 = 56.0;
const OVERLAY_GAP: f64 = 24.0;
const EXEMPLAR_WIDTH: f64 = 96.0;
const EXEMPLAR_HEIGHT: f64 = 24.0;

/// Outcome of a whole-document migration pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MigrationSummary {
    /// Accessibility Roots inspected
    pub roots: usize,
    /// Roots rewritten on this pass
    pub migrated: usize,
    /// Roots whose migration failed partway
    pub failed: usize,
}

/// Migrate every Accessibility Root in the document
///
/// Roots are processed independently; failures are logged, counted and
/// skipped.
pub fn migrate_document<T: NodeTree>(tree: &mut T) -> MigrationSummary {
    let roots = find_roots(tree);
    let mut summary = MigrationSummary {
        roots: roots.len(),
        ..MigrationSummary::default()
    };
    for root in roots {
        match migrate_root(tree, &root) {
            Ok(true) => summary.migrated += 1,
            Ok(false) => {}
            Err(err) => {
                warn!(root = %root, error = %err, "migration failed for this root; continuing");
                summary.failed += 1;
            }
        }
    }
    summary
}

/// Migrate one Accessibility Root, if it still carries the v1 layout
///
/// Returns `Ok(false)` when there is nothing to do: either the root is
/// already on v2 or it has no annotations container at all.
///
/// # Errors
/// Tree mutations on this root can fail; the caller isolates the root.
pub fn migrate_root<T: NodeTree>(tree: &mut T, root_id: &NodeId) -> Result<bool, EngineError> {
    let root = tree
        .get(root_id)
        .ok_or(EngineError::ReferenceGone { op: "migrate" })?;
    let flow = ally_codec::decode_root(&root.name)
        .and_then(|r| r.flow)
        .unwrap_or(FlowKind::Web);

    if tree
        .find_child(root_id, &|n| n.name == PANEL_CURRENT)
        .is_some()
    {
        return Ok(false);
    }
    let Some(panel) = tree.find_child(root_id, &|n| n.name == PANEL_LEGACY) else {
        return Ok(false);
    };
    debug!(root = %root_id, "migrating v1 annotations container");

    restyle_panel(tree, &panel)?;
    let panel_rect = tree.get(&panel).map(|n| n.rect).unwrap_or_default();

    // Header first, footer last; lines go in between.
    let header = text_block(tree, HEADER_NAME, HEADER_COPY, panel_rect)?;
    tree.insert_child_at(&panel, &header, 0)?;
    let footer = text_block(tree, FOOTER_NAME, FOOTER_COPY, panel_rect)?;
    tree.append_child(&panel, &footer)?;

    // Reverse iteration plus insert-at-1 yields canonical top-to-bottom
    // reading order.
    for step in StepKind::ALL.iter().rev().copied() {
        if !step.applies_to(flow) {
            continue;
        }
        if tree
            .find_child(&panel, &|n| n.name == step.line_name())
            .is_some()
        {
            continue;
        }
        let completed =
            find_child_by_name_prefix(tree, root_id, step.layer_name(), true).is_some();
        let line = build_line(tree, step, completed)?;
        tree.insert_child_at(&panel, &line, 1)?;
    }

    port_legacy_children(tree, &panel)?;
    reorder_canonical(tree, root_id, &panel, flow)?;
    apply_panel_layout(tree, &panel)?;
    build_overlay(tree, root_id, &panel, flow)?;
    Ok(true)
}

fn restyle_panel<T: NodeTree>(tree: &mut T, panel: &NodeId) -> Result<(), EngineError> {
    tree.rename(panel, PANEL_CURRENT)?;
    tree.set_auto_layout(
        panel,
        Some(AutoLayout::vertical(
            LINE_SPACING,
            Padding::uniform(PANEL_PADDING),
        )),
    )?;
    tree.set_corner_radius(panel, PANEL_CORNER_RADIUS)?;
    Ok(())
}

fn text_block<T: NodeTree>(
    tree: &mut T,
    name: &str,
    copy: &str,
    panel_rect: Rect,
) -> Result<NodeId, EngineError> {
    let rect = Rect::new(panel_rect.x, panel_rect.y, LINE_WIDTH, HEADER_HEIGHT);
    let block = tree.create(NodeKind::Frame, name, rect);
    let text = tree.create(NodeKind::Text, "Copy", rect);
    tree.set_characters(&text, copy)?;
    tree.append_child(&block, &text)?;
    Ok(block)
}

fn build_line<T: NodeTree>(
    tree: &mut T,
    step: StepKind,
    completed: bool,
) -> Result<NodeId, EngineError> {
    let rect = Rect::new(0.0, 0.0, LINE_WIDTH, LINE_HEIGHT);
    let line = tree.create(NodeKind::Frame, &step.line_name(), rect);
    tree.set_auto_layout(
        &line,
        Some(AutoLayout {
            direction: LayoutDirection::Horizontal,
            item_spacing: LINE_SPACING,
            padding: Padding::default(),
        }),
    )?;

    let checkmark = tree.create(
        NodeKind::Vector,
        "Checkmark",
        Rect::new(0.0, 0.0, 16.0, 16.0),
    );
    tree.set_visible(&checkmark, completed)?;
    tree.append_child(&line, &checkmark)?;

    let title = tree.create(NodeKind::Text, "Title", rect);
    tree.set_characters(&title, step.title())?;
    tree.append_child(&line, &title)?;

    if !completed {
        let caption = tree.create(NodeKind::Text, "Caption", rect);
        tree.set_characters(&caption, step.empty_state_caption())?;
        tree.append_child(&line, &caption)?;
    }
    Ok(line)
}

/// Strip obsolete per-block title sub-nodes, move alt-text and gesture
/// content into the matching lines, and drop the redundant designer
/// checks list.
fn port_legacy_children<T: NodeTree>(tree: &mut T, panel: &NodeId) -> Result<(), EngineError> {
    for child_id in tree.children(panel) {
        let Some(child) = tree.get(&child_id) else {
            continue;
        };
        let name = child.name.clone();
        if let Some(title) = tree.find_child(&child_id, &|n| n.name == LEGACY_BLOCK_TITLE) {
            tree.remove_subtree(&title)?;
        }
        match name.as_str() {
            LEGACY_ALT_CONTAINER => {
                port_container(tree, panel, &child_id, StepKind::AltText)?;
            }
            LEGACY_GESTURE_CONTAINER => {
                port_container(tree, panel, &child_id, StepKind::Gestures)?;
            }
            LEGACY_CHECKS_CONTAINER => {
                // Its content is redundant with the per-line checkmarks.
                tree.remove_subtree(&child_id)?;
            }
            _ => {}
        }
    }
    Ok(())
}

/// Reparent a legacy container's content blocks into the line whose
/// name carries the step title, then delete the emptied container.
fn port_container<T: NodeTree>(
    tree: &mut T,
    panel: &NodeId,
    container: &NodeId,
    step: StepKind,
) -> Result<(), EngineError> {
    let Some(line) = tree.find_child(panel, &|n| n.name.contains(step.title())) else {
        warn!(step = %step, "no line container to port legacy content into; leaving in place");
        return Ok(());
    };
    for block in tree.children(container) {
        if let Some(title) = tree.find_child(&block, &|n| n.name == LEGACY_BLOCK_TITLE) {
            tree.remove_subtree(&title)?;
        }
        tree.reparent(&block, &line)?;
    }
    if tree.children(container).is_empty() {
        tree.remove_subtree(container)?;
    }
    Ok(())
}

/// Rebuild the panel child order as header, step lines, footer.
///
/// Children whose names are not in the canonical list are detached to
/// the root so stray nodes cannot break the panel layout, without
/// discarding whatever they hold.
fn reorder_canonical<T: NodeTree>(
    tree: &mut T,
    root_id: &NodeId,
    panel: &NodeId,
    flow: FlowKind,
) -> Result<(), EngineError> {
    let mut canonical: Vec<String> = vec![HEADER_NAME.to_string()];
    canonical.extend(
        StepKind::ALL
            .iter()
            .filter(|step| step.applies_to(flow))
            .map(|step| step.line_name()),
    );
    canonical.push(FOOTER_NAME.to_string());

    let mut ordered = Vec::new();
    for name in &canonical {
        if let Some(id) = tree.find_child(panel, &|n| &n.name == name) {
            ordered.push(id);
        }
    }
    for child in tree.children(panel) {
        if !ordered.contains(&child) {
            debug!(node = %child, "stray panel child; detaching to root");
            tree.reparent(&child, root_id)?;
        }
    }
    tree.reorder_children(panel, &ordered)?;
    Ok(())
}

/// Assign stacked positions to the panel children.
///
/// The host recomputes auto-layout on its own; this keeps the in-memory
/// rects consistent so the exemplar overlay has real offsets to anchor
/// to.
fn apply_panel_layout<T: NodeTree>(tree: &mut T, panel: &NodeId) -> Result<(), EngineError> {
    let panel_rect = tree.get(panel).map(|n| n.rect).unwrap_or_default();
    let mut y = panel_rect.y + PANEL_PADDING;
    for child_id in tree.children(panel) {
        let Some(child) = tree.get(&child_id) else {
            continue;
        };
        let height = child.rect.height;
        let width = child.rect.width;
        tree.set_rect(
            &child_id,
            Rect::new(panel_rect.x + PANEL_PADDING, y, width, height),
        )?;
        y += height + LINE_SPACING;
    }
    Ok(())
}

/// Build the absolutely-positioned exemplar overlay next to the panel.
fn build_overlay<T: NodeTree>(
    tree: &mut T,
    root_id: &NodeId,
    panel: &NodeId,
    flow: FlowKind,
) -> Result<(), EngineError> {
    if tree
        .find_child(root_id, &|n| n.name == OVERLAY_NAME)
        .is_some()
    {
        return Ok(());
    }
    let panel_rect = tree.get(panel).map(|n| n.rect).unwrap_or_default();
    let overlay = tree.create(
        NodeKind::Frame,
        OVERLAY_NAME,
        Rect::new(
            panel_rect.right() + OVERLAY_GAP,
            panel_rect.y,
            EXEMPLAR_WIDTH + 2.0 * LINE_SPACING,
            panel_rect.height,
        ),
    );
    tree.append_child(root_id, &overlay)?;

    let overlay_rect = tree.get(&overlay).map(|n| n.rect).unwrap_or_default();
    for step in StepKind::ALL {
        if !step.applies_to(flow) {
            continue;
        }
        let Some(offset) = step.exemplar_offset() else {
            continue;
        };
        let Some(line) = tree.find_child(panel, &|n| n.name == step.line_name()) else {
            continue;
        };
        let line_y = tree.get(&line).map(|n| n.rect.y).unwrap_or_default();
        let exemplar = tree.create(
            NodeKind::Frame,
            &format!("{} example", step.title()),
            Rect::new(
                overlay_rect.x + LINE_SPACING,
                line_y + offset,
                EXEMPLAR_WIDTH,
                EXEMPLAR_HEIGHT,
            ),
        );
        tree.append_child(&overlay, &exemplar)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ally_tree::DocumentTree;

    /// Minimal v1 root: legacy panel with alt-text content, a designer
    /// checks list and a stray reviewer note.
    fn v1_fixture() -> (DocumentTree, NodeId) {
        let mut tree = DocumentTree::new();
        let canvas = tree.create_canvas("Page 1").unwrap();
        let page = tree.create(NodeKind::Frame, "Home", Rect::new(0.0, 0.0, 1200.0, 800.0));
        tree.append_child(&canvas, &page).unwrap();

        let root = tree.create(
            NodeKind::Frame,
            "Home Accessibility | Web",
            Rect::new(1300.0, 0.0, 1200.0, 800.0),
        );
        tree.append_child(&canvas, &root).unwrap();

        let panel = tree.create(NodeKind::Frame, PANEL_LEGACY, Rect::new(1300.0, 0.0, 360.0, 500.0));
        tree.append_child(&root, &panel).unwrap();

        let alt = tree.create(NodeKind::Frame, LEGACY_ALT_CONTAINER, Rect::default());
        tree.append_child(&panel, &alt).unwrap();
        let alt_block = tree.create(
            NodeKind::Frame,
            "Alt text: informative:Team photo | 1:50",
            Rect::default(),
        );
        tree.append_child(&alt, &alt_block).unwrap();
        let obsolete_title = tree.create(NodeKind::Text, LEGACY_BLOCK_TITLE, Rect::default());
        tree.append_child(&alt_block, &obsolete_title).unwrap();

        let checks = tree.create(NodeKind::Frame, LEGACY_CHECKS_CONTAINER, Rect::default());
        tree.append_child(&panel, &checks).unwrap();

        let stray = tree.create(NodeKind::Text, "Reviewer note", Rect::default());
        tree.append_child(&panel, &stray).unwrap();

        (tree, root)
    }

    fn panel_child_names(tree: &DocumentTree, root: &NodeId) -> Vec<String> {
        let panel = tree
            .find_child(root, &|n| n.name == PANEL_CURRENT)
            .expect("migrated panel");
        tree.children(&panel)
            .iter()
            .filter_map(|id| tree.get(id).map(|n| n.name.clone()))
            .collect()
    }

    #[test]
    fn migrates_legacy_panel_to_canonical_order() {
        let (mut tree, root) = v1_fixture();
        assert!(migrate_root(&mut tree, &root).unwrap());

        let names = panel_child_names(&tree, &root);
        assert_eq!(names.first().map(String::as_str), Some(HEADER_NAME));
        assert_eq!(names.last().map(String::as_str), Some(FOOTER_NAME));

        // Web flow: gestures line excluded, landmarks line present.
        assert!(names.contains(&StepKind::Landmarks.line_name()));
        assert!(!names.contains(&StepKind::Gestures.line_name()));

        // Lines read top-to-bottom in canonical step order.
        let landmark_pos = names
            .iter()
            .position(|n| *n == StepKind::Landmarks.line_name())
            .unwrap();
        let zoom_pos = names
            .iter()
            .position(|n| *n == StepKind::TextZoom.line_name())
            .unwrap();
        assert!(landmark_pos < zoom_pos);
    }

    #[test]
    fn second_run_changes_nothing() {
        let (mut tree, root) = v1_fixture();
        assert!(migrate_root(&mut tree, &root).unwrap());
        let first = panel_child_names(&tree, &root);
        let count = tree.len();

        assert!(!migrate_root(&mut tree, &root).unwrap());
        assert_eq!(panel_child_names(&tree, &root), first);
        assert_eq!(tree.len(), count);
    }

    #[test]
    fn alt_content_is_ported_not_copied() {
        let (mut tree, root) = v1_fixture();
        migrate_root(&mut tree, &root).unwrap();

        let panel = tree.find_child(&root, &|n| n.name == PANEL_CURRENT).unwrap();
        let alt_line = tree
            .find_child(&panel, &|n| n.name == StepKind::AltText.line_name())
            .unwrap();
        let ported = tree
            .children(&alt_line)
            .iter()
            .filter_map(|id| tree.get(id))
            .filter(|n| n.name.starts_with("Alt text: informative"))
            .count();
        assert_eq!(ported, 1);

        // Emptied legacy container and obsolete title are gone.
        assert!(tree
            .find_child(&panel, &|n| n.name == LEGACY_ALT_CONTAINER)
            .is_none());
    }

    #[test]
    fn designer_checks_are_deleted_strays_are_kept() {
        let (mut tree, root) = v1_fixture();
        migrate_root(&mut tree, &root).unwrap();

        let panel = tree.find_child(&root, &|n| n.name == PANEL_CURRENT).unwrap();
        assert!(tree
            .find_child(&panel, &|n| n.name == LEGACY_CHECKS_CONTAINER)
            .is_none());

        // The reviewer note left the panel but survived on the root.
        assert!(tree
            .find_child(&panel, &|n| n.name == "Reviewer note")
            .is_none());
        assert!(tree
            .find_child(&root, &|n| n.name == "Reviewer note")
            .is_some());
    }

    #[test]
    fn overlay_anchors_exemplars_to_line_offsets() {
        let (mut tree, root) = v1_fixture();
        migrate_root(&mut tree, &root).unwrap();

        let panel = tree.find_child(&root, &|n| n.name == PANEL_CURRENT).unwrap();
        let overlay = tree.find_child(&root, &|n| n.name == OVERLAY_NAME).unwrap();
        let heading_line = tree
            .find_child(&panel, &|n| n.name == StepKind::Headings.line_name())
            .unwrap();
        let exemplar = tree
            .find_child(&overlay, &|n| n.name == "Headings example")
            .unwrap();

        let line_y = tree.get(&heading_line).unwrap().rect.y;
        let exemplar_y = tree.get(&exemplar).unwrap().rect.y;
        assert!(
            (exemplar_y - line_y - StepKind::Headings.exemplar_offset().unwrap()).abs()
                < f64::EPSILON
        );
    }

    #[test]
    fn root_without_annotations_is_untouched() {
        let mut tree = DocumentTree::new();
        let canvas = tree.create_canvas("Page 1").unwrap();
        let root = tree.create(NodeKind::Frame, "Home Accessibility | Web", Rect::default());
        tree.append_child(&canvas, &root).unwrap();
        assert!(!migrate_root(&mut tree, &root).unwrap());
    }
}
