//! Idempotent find-or-create
//!
//! [`get_or_create`] is the system's only write primitive for
//! container-level nodes. N identical calls produce exactly one node;
//! calls 2..N return the existing node, forcing only its collapsed
//! state.

use crate::error::EngineError;
use crate::locator::find_child_by_name_prefix;
use ally_tree::{NodeId, NodeKind, NodeTree, Rect};

/// Result of an upsert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertOutcome {
    /// The located or created node
    pub id: NodeId,
    /// Whether this call created the node
    pub created: bool,
}

/// Find a child by name prefix, creating a collapsed container frame
/// with the given geometry on a miss
///
/// # Errors
/// Fails only if `parent` itself is gone or cannot hold children.
pub fn get_or_create<T: NodeTree>(
    tree: &mut T,
    parent: &NodeId,
    name: &str,
    rect: Rect,
) -> Result<UpsertOutcome, EngineError> {
    if let Some(existing) = find_child_by_name_prefix(tree, parent, name, true) {
        tree.set_expanded(&existing, false)?;
        return Ok(UpsertOutcome {
            id: existing,
            created: false,
        });
    }
    let id = tree.create(NodeKind::Frame, name, rect);
    tree.append_child(parent, &id)?;
    tree.set_expanded(&id, false)?;
    Ok(UpsertOutcome { id, created: true })
}
