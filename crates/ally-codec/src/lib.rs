//! Ally Naming Codec
//!
//! The document tree persists annotation records inside node *names*,
//! because the name string is the only metadata channel the host
//! guarantees to keep. This crate owns that grammar:
//!
//! - block names: `"<Kind>[: <Subtype>][:<Label>] | <NodeId>"`
//! - step subtrees: `"<Step Layer Name> | <generatedId>"`
//! - accessibility roots: `"<SanitizedPageName> Accessibility | <Flow>"`
//!
//! Decoding is an explicit fallback chain (current shape first in
//! [`v2`], then the legacy shape without an id suffix in [`v1`]) and
//! never fails hard: unknown shapes come back with `None` fields and the
//! caller skips the node.

mod sanitize;
pub mod v1;
pub mod v2;

pub use sanitize::{sanitize_label, sanitize_page_name};

use ally_model::{FlowKind, StepKind};
use ally_tree::NodeId;

/// Name suffix that marks a page's Accessibility Root
pub const ROOT_SUFFIX: &str = "Accessibility";

/// Decoded fields of a node name
///
/// Any field can be `None`; a fully-`None` result means the name matched
/// no known shape.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodedName {
    /// Record kind, e.g. `Landmark`
    pub kind: Option<String>,
    /// Record sub-type, e.g. `nav`
    pub subtype: Option<String>,
    /// Free-text label
    pub label: Option<String>,
    /// Owning node id baked into the name (current shape only)
    pub id: Option<NodeId>,
}

/// Decoded fields of an Accessibility Root name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootName {
    /// Sanitized page name the root claims to annotate
    pub page_name: String,
    /// Flow kind suffix; `None` on the legacy shape
    pub flow: Option<FlowKind>,
}

/// Encode an Annotation Block name
///
/// Sanitizes the subtype and label; empty segments are dropped rather
/// than encoded as empty strings.
#[must_use]
pub fn encode_block(
    kind: &str,
    subtype: Option<&str>,
    label: Option<&str>,
    id: &NodeId,
) -> String {
    let subtype = subtype.map(sanitize_label).filter(|s| !s.is_empty());
    let label = label.map(sanitize_label).filter(|s| !s.is_empty());
    v2::encode(kind, subtype.as_deref(), label.as_deref(), id)
}

/// Decode a node name against the fallback chain (v2, then v1)
#[must_use]
pub fn decode_block(name: &str) -> DecodedName {
    v2::decode(name).unwrap_or_else(|| v1::decode(name))
}

/// Step Subtree name with its generated id suffix baked in
#[must_use]
pub fn layer_name(step: StepKind, id: &NodeId) -> String {
    format!("{} | {}", step.layer_name(), id.as_str())
}

/// Accessibility Root name for a page
#[must_use]
pub fn root_name(page_name: &str, flow: FlowKind) -> String {
    format!(
        "{} {ROOT_SUFFIX} | {}",
        sanitize_page_name(page_name),
        flow.capitalized()
    )
}

/// Root name without the flow suffix; the locator's search prefix
#[must_use]
pub fn root_name_prefix(page_name: &str) -> String {
    format!("{} {ROOT_SUFFIX}", sanitize_page_name(page_name))
}

/// Decode an Accessibility Root name, tolerating the legacy shape
/// without a flow suffix
#[must_use]
pub fn decode_root(name: &str) -> Option<RootName> {
    let (prefix, flow) = match name.rsplit_once(" | ") {
        Some((prefix, flow_str)) => (prefix, FlowKind::from_capitalized(flow_str.trim())),
        None => (name, None),
    };
    let page_name = prefix.trim().strip_suffix(ROOT_SUFFIX)?.trim_end();
    if page_name.is_empty() {
        return None;
    }
    Some(RootName {
        page_name: page_name.to_string(),
        flow,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn block_round_trip() {
        let id = NodeId::new("5:31");
        let name = encode_block("Gesture", Some("swipe"), Some("Dismiss card"), &id);
        let decoded = decode_block(&name);
        assert_eq!(decoded.kind.as_deref(), Some("Gesture"));
        assert_eq!(decoded.subtype.as_deref(), Some("swipe"));
        assert_eq!(decoded.label.as_deref(), Some("Dismiss card"));
        assert_eq!(decoded.id, Some(id));
    }

    #[test]
    fn block_round_trip_sanitizes_delimiters() {
        let id = NodeId::new("5:32");
        let name = encode_block("Alt text", Some("informative"), Some("logo | home: page"), &id);
        let decoded = decode_block(&name);
        assert_eq!(decoded.label.as_deref(), Some("logo home page"));
    }

    #[test]
    fn legacy_block_decodes_without_id() {
        let decoded = decode_block("Landmark: nav:Primary");
        assert_eq!(decoded.kind.as_deref(), Some("Landmark"));
        assert_eq!(decoded.id, None);
    }

    #[test]
    fn garbage_never_panics() {
        for name in ["", "|", " | ", ":::", "a | b | c", "\u{1F600}"] {
            let _ = decode_block(name);
        }
    }

    #[test]
    fn layer_name_shape() {
        let id = NodeId::new("8:2");
        assert_eq!(
            layer_name(StepKind::ReadingOrder, &id),
            "Reading Order Layer | 8:2"
        );
    }

    #[test]
    fn root_name_round_trip() {
        let name = root_name("Checkout  flow", FlowKind::Web);
        assert_eq!(name, "Checkout flow Accessibility | Web");
        let decoded = decode_root(&name).unwrap();
        assert_eq!(decoded.page_name, "Checkout flow");
        assert_eq!(decoded.flow, Some(FlowKind::Web));
    }

    #[test]
    fn legacy_root_without_flow_suffix() {
        let decoded = decode_root("Home Accessibility").unwrap();
        assert_eq!(decoded.page_name, "Home");
        assert_eq!(decoded.flow, None);
    }

    #[test]
    fn unrelated_names_are_not_roots() {
        assert_eq!(decode_root("Hero image"), None);
        assert_eq!(decode_root("Accessibility"), None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const KINDS: &[&str] = &[
        "Landmark",
        "Heading",
        "Focus order",
        "Alt text",
        "Contrast",
        "Gesture",
        "Touch target",
        "Focus group",
        "Breakpoint",
        "Text zoom",
    ];

    proptest! {
        #[test]
        fn round_trip_holds_for_sanitized_labels(
            kind_idx in 0..KINDS.len(),
            subtype in proptest::option::of("[a-z][a-z-]{0,10}"),
            label in proptest::option::of("[ -~]{0,30}"),
            id_tail in 1u32..10_000,
        ) {
            let kind = KINDS[kind_idx];
            let id = NodeId::new(format!("1:{id_tail}"));
            let name = encode_block(kind, subtype.as_deref(), label.as_deref(), &id);
            let decoded = decode_block(&name);

            prop_assert_eq!(decoded.kind.as_deref(), Some(kind));
            prop_assert_eq!(decoded.id, Some(id));

            let expected_subtype = subtype
                .as_deref()
                .map(sanitize_label)
                .filter(|s| !s.is_empty());
            let expected_label = label
                .as_deref()
                .map(sanitize_label)
                .filter(|s| !s.is_empty());
            // Without a subtype the grammar cannot tell "subtype" from
            // "label" apart for colon-free heads, so compare the pair.
            match (expected_subtype, expected_label) {
                (None, Some(l)) => prop_assert_eq!(decoded.label.as_deref(), Some(l.as_str())),
                (s, l) => {
                    prop_assert_eq!(decoded.subtype, s);
                    prop_assert_eq!(decoded.label, l);
                }
            }
        }

        #[test]
        fn decode_never_panics(name in "\\PC{0,60}") {
            let _ = decode_block(&name);
            let _ = decode_root(&name);
        }
    }
}
