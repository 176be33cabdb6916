//! The UI-side page ledger
//!
//! One entry per scanned page, summarizing which steps are complete and
//! holding the decoded payload per step. Rebuilt in full by the walker on
//! load, then patched incrementally by encoder reports so the UI never
//! needs a full re-walk after a single edit.

use crate::records::StepRecords;
use crate::step::{FlowKind, StepKind};
use ally_tree::NodeId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Decoded state of one step on one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepData {
    /// Step Subtree node id
    pub id: NodeId,
    /// Decoded records
    pub existing_data: StepRecords,
    /// Visibility flag mirrored from the tree
    pub visible: bool,
}

/// Ledger entry for one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLedgerEntry {
    /// Page node id
    pub page_id: NodeId,
    /// Page display name
    pub page_name: String,
    /// Page flow kind
    pub flow: FlowKind,
    /// Completed steps, in the order they were recognized
    pub steps_completed: Vec<StepKind>,
    /// Per-step decoded payloads, keyed in recognition order
    pub steps_data: IndexMap<StepKind, StepData>,
}

impl PageLedgerEntry {
    /// Fresh entry with no completed steps
    #[must_use]
    pub fn new(page_id: NodeId, page_name: impl Into<String>, flow: FlowKind) -> Self {
        Self {
            page_id,
            page_name: page_name.into(),
            flow,
            steps_completed: Vec::new(),
            steps_data: IndexMap::new(),
        }
    }

    /// Register a step as completed
    ///
    /// Idempotent: registering the same step twice keeps a single entry,
    /// which is what keeps dual-purpose implied steps from duplicating.
    pub fn register_step(&mut self, step: StepKind) {
        if !self.steps_completed.contains(&step) {
            self.steps_completed.push(step);
        }
    }

    /// Attach decoded data for a step, registering it as completed
    pub fn insert_data(&mut self, step: StepKind, data: StepData) {
        self.register_step(step);
        self.steps_data.insert(step, data);
    }

    /// Whether the step is registered as completed
    #[inline]
    #[must_use]
    pub fn is_completed(&self, step: StepKind) -> bool {
        self.steps_completed.contains(&step)
    }
}

/// All ledger entries for the open document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLedger {
    entries: Vec<PageLedgerEntry>,
}

impl PageLedger {
    /// Empty ledger
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace or insert the entry for a page
    pub fn upsert(&mut self, entry: PageLedgerEntry) {
        match self
            .entries
            .iter_mut()
            .find(|e| e.page_id == entry.page_id)
        {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Entry for a page, if scanned
    #[must_use]
    pub fn get(&self, page_id: &NodeId) -> Option<&PageLedgerEntry> {
        self.entries.iter().find(|e| &e.page_id == page_id)
    }

    /// Mutable entry for a page, if scanned
    pub fn get_mut(&mut self, page_id: &NodeId) -> Option<&mut PageLedgerEntry> {
        self.entries.iter_mut().find(|e| &e.page_id == page_id)
    }

    /// All entries in scan order
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[PageLedgerEntry] {
        &self.entries
    }

    /// Number of scanned pages
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no pages have been scanned
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
