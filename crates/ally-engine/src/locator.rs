//! Name-prefix child lookup
//!
//! Finds a child of a tree node by its decoded name prefix, tolerating
//! the legacy name variants that predate the id and flow-kind suffixes.
//! This is the read half of the find-or-create primitive; it never
//! mutates anything.

use ally_model::FlowKind;
use ally_tree::{NodeId, NodeTree};
use tracing::warn;

/// Target name with a trailing flow qualifier (` | Web` / ` | Native`)
/// stripped, if one is present.
fn strip_flow_qualifier(target: &str) -> Option<&str> {
    let (prefix, qualifier) = target.rsplit_once(" | ")?;
    FlowKind::from_capitalized(qualifier)?;
    Some(prefix)
}

fn name_matches(name: &str, target: &str, with_separator: bool) -> bool {
    if name == target {
        return true;
    }
    if with_separator {
        name.len() > target.len()
            && name.starts_with(target)
            && name[target.len()..].starts_with(" |")
    } else {
        name.starts_with(target)
    }
}

/// Find a direct child whose name matches `target` up to the suffix
///
/// A child matches when its name equals `target`, continues with ` |`
/// (the id/flow suffix boundary, when `with_separator` is set), or
/// matches after stripping a legacy flow qualifier from `target`.
///
/// First match wins in child order. Additional matches are a latent
/// inconsistency (typically a host-side copy/paste); they are logged and
/// left alone.
pub fn find_child_by_name_prefix<T: NodeTree>(
    tree: &T,
    parent: &NodeId,
    target: &str,
    with_separator: bool,
) -> Option<NodeId> {
    let stripped = strip_flow_qualifier(target);
    let mut matches = tree
        .children(parent)
        .into_iter()
        .filter_map(|id| tree.get(&id))
        .filter(|node| {
            name_matches(&node.name, target, with_separator)
                || stripped.is_some_and(|s| name_matches(&node.name, s, with_separator))
        })
        .map(|node| node.id.clone());

    let first = matches.next()?;
    if let Some(duplicate) = matches.next() {
        warn!(
            target_name = target,
            first = %first,
            duplicate = %duplicate,
            "duplicate name-prefix match under one parent; keeping first"
        );
    }
    Some(first)
}
