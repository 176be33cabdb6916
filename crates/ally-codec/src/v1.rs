//! Legacy (v1) name shape
//!
//! Early annotation blocks carried no id suffix: the whole name is the
//! head segment, `"<Kind>[: <Subtype>][:<Label>]"`. This parser stays
//! indefinitely, since old documents are never force-upgraded.

use crate::DecodedName;

/// Split a head segment into kind, subtype and label
///
/// A label containing a bare `:` is indistinguishable from a subtype
/// boundary, which is why encoders strip `:` from labels on write.
pub(crate) fn parse_head(head: &str) -> (Option<String>, Option<String>, Option<String>) {
    let head = head.trim();
    if head.is_empty() {
        return (None, None, None);
    }
    if let Some((kind, rest)) = head.split_once(": ") {
        let (subtype, label) = match rest.split_once(':') {
            Some((subtype, label)) => (some_nonempty(subtype), some_nonempty(label)),
            None => (some_nonempty(rest), None),
        };
        (some_nonempty(kind), subtype, label)
    } else if let Some((kind, label)) = head.split_once(':') {
        (some_nonempty(kind), None, some_nonempty(label))
    } else {
        (Some(head.to_string()), None, None)
    }
}

fn some_nonempty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Decode a legacy block name (no id suffix)
#[must_use]
pub fn decode(name: &str) -> DecodedName {
    let (kind, subtype, label) = parse_head(name);
    DecodedName {
        kind,
        subtype,
        label,
        id: None,
    }
}
