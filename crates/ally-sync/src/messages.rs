//! Protocol messages between the UI and the document backend
//!
//! The two runtime contexts share no memory; every interaction is one
//! fire-and-forget message shaped `{type: string, ...payload}`.
//! Correlation is by type matching on the receiving side; there are no
//! request ids. Unknown incoming types decode to [`UiMessage::Unknown`]
//! / [`BackendMessage::Unknown`], get logged, and are ignored.

use crate::notify::Notification;
use ally_engine::StepPatch;
use ally_model::{
    AltTextKind, BreakpointDef, ContrastGrade, FlowKind, GestureKind, LandmarkKind,
    PageLedgerEntry, Preferences, StepKind, StepRecords,
};
use ally_tree::NodeId;
use serde::{Deserialize, Serialize};

/// Serializable form of an encoder's incremental ledger patch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepPatchPayload {
    /// Page the patch applies to
    pub page_id: NodeId,
    /// Step that changed
    pub step: StepKind,
    /// Step Subtree node id
    pub id: NodeId,
    /// Freshly decoded records
    pub existing_data: StepRecords,
    /// Visibility mirrored from the tree
    pub visible: bool,
}

impl From<StepPatch> for StepPatchPayload {
    fn from(patch: StepPatch) -> Self {
        Self {
            page_id: patch.page_id,
            step: patch.step,
            id: patch.layer_id,
            existing_data: patch.existing_data,
            visible: patch.visible,
        }
    }
}

/// User-intent commands originating in the UI context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum UiMessage {
    /// Re-scan every page into a fresh ledger
    ScanPages,
    /// Add one landmark annotation
    AddLandmark {
        /// Target page
        page_id: NodeId,
        /// Page flow kind
        flow: FlowKind,
        /// Landmark region type
        kind: LandmarkKind,
        /// Optional distinguishing label
        label: Option<String>,
    },
    /// Confirm the page has no landmarks
    NoLandmarks {
        /// Target page
        page_id: NodeId,
        /// Page flow kind
        flow: FlowKind,
    },
    /// Begin listening for the user to select a heading target node
    StartHeadingSelection,
    /// Stop listening for a heading target selection
    CancelHeadingSelection,
    /// Add one heading annotation
    AddHeading {
        /// Target page
        page_id: NodeId,
        /// Page flow kind
        flow: FlowKind,
        /// Outline level 1..=6
        level: u8,
        /// Heading text
        text: String,
        /// Referenced design node
        target: NodeId,
    },
    /// Add one reading-order marker
    AddFocusOrder {
        /// Target page
        page_id: NodeId,
        /// Page flow kind
        flow: FlowKind,
        /// Position in the reading sequence
        sequence: u32,
        /// Marker label
        label: String,
    },
    /// Add one alt-text entry
    AddAltText {
        /// Target page
        page_id: NodeId,
        /// Page flow kind
        flow: FlowKind,
        /// Informative or decorative
        kind: AltTextKind,
        /// Description, ignored for decorative imagery
        alt: String,
    },
    /// Record one contrast measurement
    AddContrast {
        /// Target page
        page_id: NodeId,
        /// Page flow kind
        flow: FlowKind,
        /// Measured ratio
        ratio: f64,
        /// Outcome band
        grade: ContrastGrade,
    },
    /// Add one gesture annotation
    AddGesture {
        /// Target page
        page_id: NodeId,
        /// Page flow kind
        flow: FlowKind,
        /// Gesture type
        kind: GestureKind,
        /// Single-pointer alternative
        alternative: Option<String>,
    },
    /// Record one touch-target measurement
    AddTouchTarget {
        /// Target page
        page_id: NodeId,
        /// Page flow kind
        flow: FlowKind,
        /// Target width in pixels
        width: f64,
        /// Target height in pixels
        height: f64,
    },
    /// Add one focus group
    AddFocusGroup {
        /// Target page
        page_id: NodeId,
        /// Page flow kind
        flow: FlowKind,
        /// Group label
        label: String,
    },
    /// Capture one responsive breakpoint
    AddBreakpoint {
        /// Target page
        page_id: NodeId,
        /// Page flow kind
        flow: FlowKind,
        /// Breakpoint to capture
        breakpoint: BreakpointDef,
    },
    /// Capture the layout at a zoom percentage
    AddTextZoom {
        /// Target page
        page_id: NodeId,
        /// Page flow kind
        flow: FlowKind,
        /// Zoom percentage
        percent: u16,
    },
    /// Mark a step reviewed without adding records
    ConfirmStep {
        /// Target page
        page_id: NodeId,
        /// Page flow kind
        flow: FlowKind,
        /// Step being confirmed
        step: StepKind,
    },
    /// Remove a batch of annotation nodes
    RemoveNodes {
        /// Nodes to remove
        ids: Vec<NodeId>,
    },
    /// Scroll the host viewport to a node
    ZoomTo {
        /// Node to reveal
        id: NodeId,
    },
    /// Resize the plugin window
    ResizePlugin {
        /// New width in pixels
        width: u32,
        /// New height in pixels
        height: u32,
    },
    /// Persist the tip-panel expansion preference
    SetTipPreference {
        /// Whether the tip panel is expanded
        expanded: bool,
    },
    /// Persist the condensed-UI preference
    SetCondensedUi {
        /// Whether the condensed layout is on
        condensed: bool,
    },
    /// Replace the user's custom breakpoints
    SetBreakpoints {
        /// New breakpoint set
        breakpoints: Vec<BreakpointDef>,
    },
    /// Record that a feature intro was seen
    MarkIntroSeen {
        /// Intro key
        key: String,
    },
    /// Run the v1 → v2 annotations migration over the document
    MigrateAnnotations,
    /// Any message type this build does not know
    #[serde(other)]
    Unknown,
}

/// Events originating in the document backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum BackendMessage {
    /// Initial scan finished; replaces all UI page state
    LoadingComplete {
        /// One entry per scanned page
        pages: Vec<PageLedgerEntry>,
    },
    /// Persisted preferences, sent on startup and after each change
    LoadUserPreferences {
        /// Current preferences
        preferences: Preferences,
    },
    /// Replaces the ledger entries for the listed pages
    UpdatePagesData {
        /// Re-scanned entries
        entries: Vec<PageLedgerEntry>,
    },
    /// A landmark mutation went through
    LandmarkConfirmed {
        /// Incremental patch
        patch: StepPatchPayload,
    },
    /// A reading-order mutation went through
    FocusOrderAdded {
        /// Incremental patch
        patch: StepPatchPayload,
    },
    /// Any other step mutation went through
    StepUpdated {
        /// Incremental patch
        patch: StepPatchPayload,
    },
    /// A batch removal finished; ids recombined by id, not order
    NodesRemoved {
        /// Ids actually removed
        ids: Vec<NodeId>,
    },
    /// The migration pass finished
    MigrationFinished {
        /// Roots inspected
        roots: usize,
        /// Roots rewritten
        migrated: usize,
        /// Roots that failed partway
        failed: usize,
    },
    /// Transient, timed user notification
    Notify(Notification),
    /// Any message type this build does not know
    #[serde(other)]
    Unknown,
}

impl BackendMessage {
    /// Route a step patch to its type-specific event
    ///
    /// Landmark and reading-order mutations keep their dedicated types
    /// for compatibility; everything else shares `step-updated`.
    #[must_use]
    pub fn for_patch(patch: StepPatch) -> Self {
        let payload = StepPatchPayload::from(patch);
        match payload.step {
            StepKind::Landmarks => Self::LandmarkConfirmed { patch: payload },
            StepKind::ReadingOrder => Self::FocusOrderAdded { patch: payload },
            _ => Self::StepUpdated { patch: payload },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ui_message_wire_shape() {
        let msg = UiMessage::AddLandmark {
            page_id: NodeId::new("2:1"),
            flow: FlowKind::Web,
            kind: LandmarkKind::Nav,
            label: None,
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "add-landmark");
        assert_eq!(json["kind"], "nav");
    }

    #[test]
    fn unknown_types_decode_to_unknown_not_error() {
        let msg: UiMessage =
            serde_json::from_str(r#"{"type":"telepathy","payload":42}"#).unwrap();
        assert_eq!(msg, UiMessage::Unknown);

        let msg: BackendMessage = serde_json::from_str(r#"{"type":"confetti"}"#).unwrap();
        assert_eq!(msg, BackendMessage::Unknown);
    }

    #[test]
    fn backend_round_trip() {
        let msg = BackendMessage::MigrationFinished {
            roots: 3,
            migrated: 2,
            failed: 1,
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"migration-finished\""));
        let back: BackendMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }
}
