//! Per-page operation context

use ally_model::FlowKind;
use ally_tree::NodeId;

/// Identifies the page an encoder operation targets
///
/// Only the id is held; the page name and geometry are read live from
/// the tree so out-of-band renames and moves are picked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    /// Page node id
    pub page_id: NodeId,
    /// Flow kind the page is designed for
    pub flow: FlowKind,
}

impl PageContext {
    /// Context for a page node
    #[inline]
    #[must_use]
    pub fn new(page_id: NodeId, flow: FlowKind) -> Self {
        Self { page_id, flow }
    }
}
