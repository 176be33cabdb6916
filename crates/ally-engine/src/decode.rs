//! Per-step record decoders
//!
//! The decoding half of the codec pairing: given a Step Subtree, rebuild
//! the typed records its Annotation Blocks encode. Dispatch is a single
//! match over [`StepKind`]; anything that fails to decode is logged and
//! skipped so partial reconstruction always beats total failure.

use crate::steps::NONE_SUBTYPE;
use ally_codec::{decode_block, DecodedName};
use ally_model::{
    AltTextEntry, AltTextKind, BreakpointRecord, ContrastGrade, ContrastResult, FocusGroup,
    Gesture, GestureKind, Heading, Landmark, LandmarkKind, ReadingOrderEntry, StepKind,
    StepRecords, TextZoomSetting, TouchTarget,
};
use ally_tree::{Node, NodeId, NodeKind, NodeTree};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Pre-rename landmark type names still found on old trees
static LEGACY_LANDMARK_REMAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("banner", "header"),
        ("navigation", "nav"),
        ("complementary", "aside"),
        ("contentinfo", "footer"),
    ])
});

/// Child text node carrying a heading's referenced design node id
pub(crate) const TARGET_CHILD: &str = "Target";
/// Child text node carrying a reading-order marker's sequence number
pub(crate) const NUMBER_CHILD: &str = "Number";

struct Block {
    node: Node,
    decoded: DecodedName,
}

/// Decode all records of one step from its subtree
///
/// Returns [`StepRecords::Confirmed`] when the subtree holds only the
/// explicit `none` marker.
pub fn decode_step<T: NodeTree>(tree: &T, step: StepKind, layer: &NodeId) -> StepRecords {
    let mut none_marker = false;
    let mut blocks = Vec::new();

    for child_id in tree.children(layer) {
        let Some(node) = tree.get(&child_id) else {
            continue;
        };
        let decoded = decode_block(&node.name);
        let Some(kind) = decoded.kind.as_deref() else {
            warn!(node = %child_id, name = node.name, "undecodable block name; skipping");
            continue;
        };
        if kind != step.block_kind() {
            warn!(
                node = %child_id,
                expected = step.block_kind(),
                found = kind,
                "block kind does not match its step subtree; skipping"
            );
            continue;
        }
        if decoded.subtype.as_deref() == Some(NONE_SUBTYPE) {
            none_marker = true;
            continue;
        }
        blocks.push(Block {
            node: node.clone(),
            decoded,
        });
    }

    let records = match step {
        StepKind::Landmarks => StepRecords::Landmarks(decode_landmarks(&blocks)),
        StepKind::Headings => StepRecords::Headings(decode_headings(tree, &blocks)),
        StepKind::ReadingOrder => StepRecords::ReadingOrder(decode_reading_order(tree, &blocks)),
        StepKind::AltText => StepRecords::AltText(decode_alt_text(&blocks)),
        StepKind::Contrast => StepRecords::Contrast(decode_contrast(&blocks)),
        StepKind::Gestures => StepRecords::Gestures(decode_gestures(&blocks)),
        StepKind::TouchTargets => StepRecords::TouchTargets(decode_touch_targets(&blocks)),
        StepKind::FocusGrouping => StepRecords::FocusGrouping(decode_focus_groups(&blocks)),
        StepKind::ResponsiveReflow => StepRecords::ResponsiveReflow(decode_breakpoints(&blocks)),
        StepKind::TextZoom => StepRecords::TextZoom(decode_text_zoom(&blocks)),
    };

    if records.is_empty() && none_marker {
        return StepRecords::Confirmed;
    }
    records
}

fn decode_landmarks(blocks: &[Block]) -> Vec<Landmark> {
    blocks
        .iter()
        .filter_map(|block| {
            let raw = block.decoded.subtype.as_deref()?;
            let current = LEGACY_LANDMARK_REMAP.get(raw).copied().unwrap_or(raw);
            let Some(kind) = LandmarkKind::parse(current) else {
                warn!(node = %block.node.id, subtype = raw, "unknown landmark type; skipping");
                return None;
            };
            Some(Landmark {
                id: block.node.id.clone(),
                kind,
                label: block.decoded.label.clone(),
                name: block.node.name.clone(),
            })
        })
        .collect()
}

fn decode_headings<T: NodeTree>(tree: &T, blocks: &[Block]) -> Vec<Heading> {
    blocks
        .iter()
        .filter_map(|block| {
            let level: u8 = block.decoded.subtype.as_deref()?.parse().ok()?;
            if !(1..=6).contains(&level) {
                warn!(node = %block.node.id, level, "heading level out of range; skipping");
                return None;
            }
            let target = child_text(tree, &block.node.id, TARGET_CHILD).map(NodeId::new)?;
            // Dropping entries whose design node is gone keeps stale
            // references from leaking back into the ledger.
            if tree.get(&target).is_none() {
                debug!(node = %block.node.id, target = %target, "heading target gone; skipping");
                return None;
            }
            Some(Heading {
                id: block.node.id.clone(),
                level,
                text: block.decoded.label.clone().unwrap_or_default(),
                target,
            })
        })
        .collect()
}

fn decode_reading_order<T: NodeTree>(tree: &T, blocks: &[Block]) -> Vec<ReadingOrderEntry> {
    let mut entries: Vec<ReadingOrderEntry> = blocks
        .iter()
        .filter_map(|block| {
            let raw = child_text(tree, &block.node.id, NUMBER_CHILD)?;
            let Ok(sequence) = raw.trim().parse::<u32>() else {
                warn!(node = %block.node.id, raw, "unparseable sequence number; skipping");
                return None;
            };
            Some(ReadingOrderEntry {
                id: block.node.id.clone(),
                sequence,
                label: block.decoded.label.clone().unwrap_or_default(),
            })
        })
        .collect();
    // Decoded order follows the embedded sequence, not tree insertion order.
    entries.sort_by_key(|entry| entry.sequence);
    entries
}

fn decode_alt_text(blocks: &[Block]) -> Vec<AltTextEntry> {
    blocks
        .iter()
        .filter_map(|block| {
            let kind = AltTextKind::parse(block.decoded.subtype.as_deref()?)?;
            Some(AltTextEntry {
                id: block.node.id.clone(),
                kind,
                alt: block.decoded.label.clone().unwrap_or_default(),
            })
        })
        .collect()
}

fn decode_contrast(blocks: &[Block]) -> Vec<ContrastResult> {
    blocks
        .iter()
        .filter_map(|block| {
            let grade = ContrastGrade::parse(block.decoded.subtype.as_deref()?)?;
            let ratio: f64 = block.decoded.label.as_deref()?.parse().ok()?;
            Some(ContrastResult {
                id: block.node.id.clone(),
                ratio,
                grade,
            })
        })
        .collect()
}

fn decode_gestures(blocks: &[Block]) -> Vec<Gesture> {
    blocks
        .iter()
        .filter_map(|block| {
            let kind = GestureKind::parse(block.decoded.subtype.as_deref()?)?;
            Some(Gesture {
                id: block.node.id.clone(),
                kind,
                alternative: block.decoded.label.clone(),
            })
        })
        .collect()
}

fn decode_touch_targets(blocks: &[Block]) -> Vec<TouchTarget> {
    blocks
        .iter()
        .map(|block| TouchTarget {
            id: block.node.id.clone(),
            width: block.node.rect.width,
            height: block.node.rect.height,
        })
        .collect()
}

fn decode_focus_groups(blocks: &[Block]) -> Vec<FocusGroup> {
    blocks
        .iter()
        .map(|block| FocusGroup {
            id: block.node.id.clone(),
            label: block.decoded.label.clone().unwrap_or_default(),
        })
        .collect()
}

fn decode_breakpoints(blocks: &[Block]) -> Vec<BreakpointRecord> {
    blocks
        .iter()
        .filter_map(|block| {
            let width: u32 = block.decoded.subtype.as_deref()?.parse().ok()?;
            Some(BreakpointRecord {
                id: block.node.id.clone(),
                width,
                label: block.decoded.label.clone().unwrap_or_default(),
            })
        })
        .collect()
}

fn decode_text_zoom(blocks: &[Block]) -> Vec<TextZoomSetting> {
    blocks
        .iter()
        .filter_map(|block| {
            let percent: u16 = block.decoded.subtype.as_deref()?.parse().ok()?;
            Some(TextZoomSetting {
                id: block.node.id.clone(),
                percent,
            })
        })
        .collect()
}

/// Characters of a direct child text node with the given name
fn child_text<T: NodeTree>(tree: &T, parent: &NodeId, name: &str) -> Option<String> {
    let child = tree.find_child(parent, &|n| n.kind == NodeKind::Text && n.name == name)?;
    tree.get(&child).and_then(|n| n.characters.clone())
}
