//! Current (v2) name shape
//!
//! `"<Kind>[: <Subtype>][:<Label>] | <NodeId>"`: the head segment from
//! v1 plus a ` | <id>` suffix carrying the block node's own id. The id
//! split uses the *last* ` | ` occurrence because ids themselves contain
//! `:` and sanitized labels can never contain `|`.

use crate::v1;
use crate::DecodedName;
use ally_tree::NodeId;

/// Encode a block name from pre-sanitized parts
#[must_use]
pub fn encode(kind: &str, subtype: Option<&str>, label: Option<&str>, id: &NodeId) -> String {
    let mut name = String::from(kind);
    if let Some(subtype) = subtype {
        name.push_str(": ");
        name.push_str(subtype);
    }
    if let Some(label) = label {
        name.push(':');
        name.push_str(label);
    }
    name.push_str(" | ");
    name.push_str(id.as_str());
    name
}

/// Decode a current-shape block name
///
/// Returns `None` when the id suffix is missing so the caller can fall
/// back to the legacy parser.
#[must_use]
pub fn decode(name: &str) -> Option<DecodedName> {
    let (head, id) = name.rsplit_once(" | ")?;
    let id = id.trim();
    if id.is_empty() {
        return None;
    }
    let (kind, subtype, label) = v1::parse_head(head);
    Some(DecodedName {
        kind,
        subtype,
        label,
        id: Some(NodeId::new(id)),
    })
}
