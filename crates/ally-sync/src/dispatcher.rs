//! Backend message dispatcher
//!
//! Owns the document tree, the ledger, the explicit session state and
//! the preference store, and turns UI commands into engine calls. Every
//! recoverable failure becomes a timed notification; invalid input is
//! rejected here, before any tree mutation. Expensive scans are
//! deferred briefly so the UI can paint its loading indicator first.

use crate::messages::{BackendMessage, UiMessage};
use crate::notify::Notification;
use crate::prefs::{load_preferences, save_preferences, PreferenceStore};
use crate::session::SessionState;
use ally_engine::{
    migrate_document, remove_many, scan_document, steps, EngineError, PageContext, StepPatch,
};
use ally_model::{BreakpointDef, FlowKind, PageLedger, PageLedgerEntry, Preferences, StepData,
    StepKind};
use ally_tree::{DocumentTree, NodeTree};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

/// Delay before a full-document walk, so the loading indicator renders
const SCAN_DEFER: Duration = Duration::from_millis(150);

/// Outbound port for backend events
///
/// Fire-and-forget: there is no delivery confirmation and no
/// correlation beyond the message type.
#[async_trait]
pub trait MessageSink: Send {
    /// Ship one event to the UI context
    async fn send(&mut self, message: BackendMessage);
}

#[async_trait]
impl MessageSink for tokio::sync::mpsc::Sender<BackendMessage> {
    async fn send(&mut self, message: BackendMessage) {
        if tokio::sync::mpsc::Sender::send(self, message).await.is_err() {
            warn!("ui channel closed; dropping backend message");
        }
    }
}

/// The backend half of the sync protocol
pub struct Dispatcher<S: MessageSink> {
    tree: DocumentTree,
    ledger: PageLedger,
    session: SessionState,
    preferences: Preferences,
    store: Box<dyn PreferenceStore>,
    sink: S,
}

impl<S: MessageSink> Dispatcher<S> {
    /// Build a dispatcher over a document, bumping the session counter
    pub fn new(tree: DocumentTree, store: Box<dyn PreferenceStore>, sink: S) -> Self {
        let mut preferences = load_preferences(store.as_ref());
        let session_number = preferences.next_session();
        if let Err(err) = save_preferences(store.as_ref(), &preferences) {
            warn!(error = %err, "could not persist session counter");
        }
        Self {
            tree,
            ledger: PageLedger::new(),
            session: SessionState::new(session_number),
            preferences,
            store,
            sink,
        }
    }

    /// The document tree (primarily for tests and embedding hosts)
    #[inline]
    #[must_use]
    pub fn tree(&self) -> &DocumentTree {
        &self.tree
    }

    /// Mutable access to the document tree
    pub fn tree_mut(&mut self) -> &mut DocumentTree {
        &mut self.tree
    }

    /// Current ledger
    #[inline]
    #[must_use]
    pub fn ledger(&self) -> &PageLedger {
        &self.ledger
    }

    /// Current session state
    #[inline]
    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Startup sequence: push preferences, then run the initial scan
    pub async fn start(&mut self) {
        self.sink
            .send(BackendMessage::LoadUserPreferences {
                preferences: self.preferences.clone(),
            })
            .await;
        self.rescan().await;
    }

    async fn rescan(&mut self) {
        self.session.begin_scan();
        tokio::time::sleep(SCAN_DEFER).await;
        self.ledger = scan_document(&self.tree);
        self.session.finish_scan();
        self.sink
            .send(BackendMessage::LoadingComplete {
                pages: self.ledger.entries().to_vec(),
            })
            .await;
    }

    /// Handle one UI command
    #[allow(clippy::too_many_lines)]
    pub async fn handle(&mut self, message: UiMessage) {
        match message {
            UiMessage::ScanPages => self.rescan().await,

            UiMessage::AddLandmark {
                page_id,
                flow,
                kind,
                label,
            } => {
                let ctx = PageContext::new(page_id, flow);
                let result =
                    steps::landmarks::add_record(&mut self.tree, &ctx, kind, label.as_deref());
                self.report(flow, result).await;
            }
            UiMessage::NoLandmarks { page_id, flow } => {
                let ctx = PageContext::new(page_id, flow);
                let result = steps::landmarks::add_no_records(&mut self.tree, &ctx);
                self.report(flow, result).await;
            }

            UiMessage::StartHeadingSelection => {
                self.session.begin_heading_selection();
                debug!("listening for heading target selection");
            }
            UiMessage::CancelHeadingSelection => {
                self.session.end_heading_selection();
            }
            UiMessage::AddHeading {
                page_id,
                flow,
                level,
                text,
                target,
            } => {
                self.session.end_heading_selection();
                let ctx = PageContext::new(page_id, flow);
                let result =
                    steps::headings::add_record(&mut self.tree, &ctx, level, &text, &target);
                self.report(flow, result).await;
            }

            UiMessage::AddFocusOrder {
                page_id,
                flow,
                sequence,
                label,
            } => {
                if sequence == 0 {
                    self.reject("add-focus-order", "Sequence numbers start at 1.").await;
                    return;
                }
                let ctx = PageContext::new(page_id, flow);
                let result =
                    steps::reading_order::add_record(&mut self.tree, &ctx, sequence, &label);
                self.report(flow, result).await;
            }

            UiMessage::AddAltText {
                page_id,
                flow,
                kind,
                alt,
            } => {
                let ctx = PageContext::new(page_id, flow);
                let result = steps::alt_text::add_record(&mut self.tree, &ctx, kind, &alt);
                self.report(flow, result).await;
            }

            UiMessage::AddContrast {
                page_id,
                flow,
                ratio,
                grade,
            } => {
                if !ratio.is_finite() || ratio < 1.0 {
                    self.reject("add-contrast", "Contrast ratios start at 1.0.").await;
                    return;
                }
                let ctx = PageContext::new(page_id, flow);
                let result = steps::contrast::add_record(&mut self.tree, &ctx, ratio, grade);
                self.report(flow, result).await;
            }

            UiMessage::AddGesture {
                page_id,
                flow,
                kind,
                alternative,
            } => {
                let ctx = PageContext::new(page_id, flow);
                let result = steps::gestures::add_record(
                    &mut self.tree,
                    &ctx,
                    kind,
                    alternative.as_deref(),
                );
                self.report(flow, result).await;
            }

            UiMessage::AddTouchTarget {
                page_id,
                flow,
                width,
                height,
            } => {
                if width <= 0.0 || height <= 0.0 {
                    self.reject("add-touch-target", "Target sizes must be positive.").await;
                    return;
                }
                let ctx = PageContext::new(page_id, flow);
                let result =
                    steps::touch_targets::add_record(&mut self.tree, &ctx, width, height);
                self.report(flow, result).await;
            }

            UiMessage::AddFocusGroup {
                page_id,
                flow,
                label,
            } => {
                let ctx = PageContext::new(page_id, flow);
                let result = steps::focus_grouping::add_record(&mut self.tree, &ctx, &label);
                self.report(flow, result).await;
            }

            UiMessage::AddBreakpoint {
                page_id,
                flow,
                breakpoint,
            } => {
                if !breakpoint_is_valid(&breakpoint) {
                    self.reject("add-breakpoint", "Breakpoints need a width and a label.").await;
                    return;
                }
                let ctx = PageContext::new(page_id, flow);
                let result =
                    steps::responsive_reflow::add_record(&mut self.tree, &ctx, &breakpoint);
                self.report(flow, result).await;
            }

            UiMessage::AddTextZoom {
                page_id,
                flow,
                percent,
            } => {
                if percent < 100 {
                    self.reject("add-text-zoom", "Zoom captures start at 100%.").await;
                    return;
                }
                let ctx = PageContext::new(page_id, flow);
                let result = steps::text_zoom::add_record(&mut self.tree, &ctx, percent);
                self.report(flow, result).await;
            }

            UiMessage::ConfirmStep {
                page_id,
                flow,
                step,
            } => {
                let ctx = PageContext::new(page_id, flow);
                let result = confirm_step(&mut self.tree, &ctx, step);
                self.report(flow, result).await;
            }

            UiMessage::RemoveNodes { ids } => {
                let removed = remove_many(&mut self.tree, &ids);
                // Removal can prune whole layers and roots, so the
                // affected entries are rebuilt rather than patched.
                self.ledger = scan_document(&self.tree);
                self.sink
                    .send(BackendMessage::NodesRemoved { ids: removed })
                    .await;
                self.sink
                    .send(BackendMessage::UpdatePagesData {
                        entries: self.ledger.entries().to_vec(),
                    })
                    .await;
            }

            UiMessage::ZoomTo { id } => {
                // Viewport control is the host's job; the node being gone
                // is an expected case, not an error.
                if self.tree.get(&id).is_none() {
                    debug!(node = %id, "zoom target no longer exists");
                }
            }

            UiMessage::ResizePlugin { width, height } => {
                if width == 0 || height == 0 {
                    self.reject("resize-plugin", "Window sizes must be positive.").await;
                } else {
                    debug!(width, height, "plugin window resized");
                }
            }

            UiMessage::SetTipPreference { expanded } => {
                self.preferences.tip_expanded = expanded;
                self.persist_preferences().await;
            }
            UiMessage::SetCondensedUi { condensed } => {
                self.preferences.condensed_ui = condensed;
                self.persist_preferences().await;
            }
            UiMessage::SetBreakpoints { breakpoints } => {
                if !breakpoints.iter().all(breakpoint_is_valid) {
                    self.reject("set-breakpoints", "Every breakpoint needs a width and a label.")
                        .await;
                    return;
                }
                self.preferences.custom_breakpoints = breakpoints;
                self.persist_preferences().await;
            }
            UiMessage::MarkIntroSeen { key } => {
                if self.preferences.mark_intro_seen(key) {
                    self.persist_preferences().await;
                }
            }

            UiMessage::MigrateAnnotations => {
                let summary = migrate_document(&mut self.tree);
                self.sink
                    .send(BackendMessage::MigrationFinished {
                        roots: summary.roots,
                        migrated: summary.migrated,
                        failed: summary.failed,
                    })
                    .await;
            }

            UiMessage::Unknown => {
                warn!("unknown ui message type; ignoring");
            }
        }
    }

    async fn report(&mut self, flow: FlowKind, result: Result<StepPatch, EngineError>) {
        match result {
            Ok(patch) => {
                self.apply_patch(flow, &patch);
                self.sink.send(BackendMessage::for_patch(patch)).await;
            }
            Err(err) => {
                warn!(tag = err.tag(), "encoder operation failed");
                self.sink
                    .send(BackendMessage::Notify(Notification::new(
                        err.tag(),
                        message_for(&err),
                    )))
                    .await;
            }
        }
    }

    /// Keep the ledger consistent with the tree without a full re-walk.
    fn apply_patch(&mut self, flow: FlowKind, patch: &StepPatch) {
        let data = StepData {
            id: patch.layer_id.clone(),
            existing_data: patch.existing_data.clone(),
            visible: patch.visible,
        };
        if self.ledger.get(&patch.page_id).is_none() {
            let name = self
                .tree
                .get(&patch.page_id)
                .map(|n| n.name.clone())
                .unwrap_or_default();
            self.ledger
                .upsert(PageLedgerEntry::new(patch.page_id.clone(), name, flow));
        }
        if let Some(entry) = self.ledger.get_mut(&patch.page_id) {
            entry.insert_data(patch.step, data);
            if let Some(implied) = patch.step.implies() {
                entry.register_step(implied);
            }
        }
    }

    async fn reject(&mut self, op: &str, message: &str) {
        self.sink
            .send(BackendMessage::Notify(Notification::new(
                format!("{op}::invalidInput"),
                message,
            )))
            .await;
    }

    async fn persist_preferences(&mut self) {
        if let Err(err) = save_preferences(self.store.as_ref(), &self.preferences) {
            warn!(error = %err, "could not persist preferences");
        }
        self.sink
            .send(BackendMessage::LoadUserPreferences {
                preferences: self.preferences.clone(),
            })
            .await;
    }
}

fn breakpoint_is_valid(breakpoint: &BreakpointDef) -> bool {
    breakpoint.width > 0 && !breakpoint.label.trim().is_empty()
}

fn message_for(err: &EngineError) -> &'static str {
    match err {
        EngineError::PageNodeGone { .. } => "The annotated page can no longer be found.",
        EngineError::ReferenceGone { .. } => "That annotation can no longer be found.",
        EngineError::Tree(_) => "The document changed while updating annotations.",
    }
}

fn confirm_step(
    tree: &mut DocumentTree,
    ctx: &PageContext,
    step: StepKind,
) -> Result<StepPatch, EngineError> {
    match step {
        StepKind::Landmarks => steps::landmarks::confirm_step(tree, ctx),
        StepKind::Headings => steps::headings::confirm_step(tree, ctx),
        StepKind::ReadingOrder => steps::reading_order::confirm_step(tree, ctx),
        StepKind::AltText => steps::alt_text::confirm_step(tree, ctx),
        StepKind::Contrast => steps::contrast::confirm_step(tree, ctx),
        StepKind::Gestures => steps::gestures::confirm_step(tree, ctx),
        StepKind::TouchTargets => steps::touch_targets::confirm_step(tree, ctx),
        StepKind::FocusGrouping => steps::focus_grouping::confirm_step(tree, ctx),
        StepKind::ResponsiveReflow => steps::responsive_reflow::confirm_step(tree, ctx),
        StepKind::TextZoom => steps::text_zoom::confirm_step(tree, ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryStore;
    use ally_model::{LandmarkKind, StepRecords};
    use ally_tree::{NodeId, NodeKind, Rect};
    use tokio::sync::mpsc;

    fn document_with_page() -> (DocumentTree, NodeId) {
        let mut tree = DocumentTree::new();
        let canvas = tree.create_canvas("Page 1").unwrap();
        let page = tree.create(NodeKind::Frame, "Home", Rect::new(0.0, 0.0, 1440.0, 900.0));
        tree.append_child(&canvas, &page).unwrap();
        (tree, page)
    }

    fn dispatcher(
        tree: DocumentTree,
    ) -> (
        Dispatcher<mpsc::Sender<BackendMessage>>,
        mpsc::Receiver<BackendMessage>,
    ) {
        let (tx, rx) = mpsc::channel(32);
        (Dispatcher::new(tree, Box::new(MemoryStore::new()), tx), rx)
    }

    #[tokio::test]
    async fn startup_pushes_preferences_then_scan_results() {
        let (tree, _page) = document_with_page();
        let (mut dispatcher, mut rx) = dispatcher(tree);
        dispatcher.start().await;

        assert!(matches!(
            rx.recv().await,
            Some(BackendMessage::LoadUserPreferences { .. })
        ));
        assert!(matches!(
            rx.recv().await,
            Some(BackendMessage::LoadingComplete { .. })
        ));
    }

    #[tokio::test]
    async fn add_landmark_patches_ledger_and_reports() {
        let (tree, page) = document_with_page();
        let (mut dispatcher, mut rx) = dispatcher(tree);

        dispatcher
            .handle(UiMessage::AddLandmark {
                page_id: page.clone(),
                flow: FlowKind::Web,
                kind: LandmarkKind::Header,
                label: None,
            })
            .await;

        let Some(BackendMessage::LandmarkConfirmed { patch }) = rx.recv().await else {
            panic!("expected landmark-confirmed");
        };
        assert_eq!(patch.page_id, page);
        assert_eq!(patch.existing_data.len(), 1);

        let entry = dispatcher.ledger().get(&page).unwrap();
        assert!(entry.is_completed(StepKind::Landmarks));
    }

    #[tokio::test]
    async fn deleted_page_surfaces_a_tagged_notification() {
        let (mut tree, page) = document_with_page();
        tree.remove_subtree(&page).unwrap();
        let (mut dispatcher, mut rx) = dispatcher(tree);

        dispatcher
            .handle(UiMessage::NoLandmarks {
                page_id: page,
                flow: FlowKind::Web,
            })
            .await;

        let Some(BackendMessage::Notify(notification)) = rx.recv().await else {
            panic!("expected a notification");
        };
        assert_eq!(notification.tag, "no-landmark::mainPageNodeNotFound");
    }

    #[tokio::test]
    async fn invalid_breakpoints_never_touch_the_tree() {
        let (tree, page) = document_with_page();
        let node_count = tree.len();
        let (mut dispatcher, mut rx) = dispatcher(tree);

        dispatcher
            .handle(UiMessage::AddBreakpoint {
                page_id: page,
                flow: FlowKind::Web,
                breakpoint: BreakpointDef {
                    width: 0,
                    label: String::new(),
                },
            })
            .await;

        let Some(BackendMessage::Notify(notification)) = rx.recv().await else {
            panic!("expected a notification");
        };
        assert_eq!(notification.tag, "add-breakpoint::invalidInput");
        assert_eq!(dispatcher.tree().len(), node_count);
    }

    #[tokio::test]
    async fn batch_removal_rescans_the_affected_pages() {
        let (tree, page) = document_with_page();
        let (mut dispatcher, mut rx) = dispatcher(tree);

        dispatcher
            .handle(UiMessage::AddLandmark {
                page_id: page.clone(),
                flow: FlowKind::Web,
                kind: LandmarkKind::Header,
                label: None,
            })
            .await;
        let Some(BackendMessage::LandmarkConfirmed { patch }) = rx.recv().await else {
            panic!("expected landmark-confirmed");
        };
        let StepRecords::Landmarks(records) = patch.existing_data else {
            panic!("expected landmark records");
        };

        dispatcher
            .handle(UiMessage::RemoveNodes {
                ids: vec![records[0].id.clone()],
            })
            .await;

        let Some(BackendMessage::NodesRemoved { ids }) = rx.recv().await else {
            panic!("expected nodes-removed");
        };
        assert_eq!(ids.len(), 1);

        // Removing the only record pruned the layer and root, so the
        // rebuilt entries show nothing completed.
        let Some(BackendMessage::UpdatePagesData { entries }) = rx.recv().await else {
            panic!("expected update-pages-data");
        };
        assert!(entries.iter().all(|e| e.steps_completed.is_empty()));
    }

    #[tokio::test]
    async fn unknown_messages_are_ignored() {
        let (tree, _page) = document_with_page();
        let (mut dispatcher, mut rx) = dispatcher(tree);
        dispatcher.handle(UiMessage::Unknown).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn heading_selection_flags_move_only_through_transitions() {
        let (tree, _page) = document_with_page();
        let (mut dispatcher, _rx) = dispatcher(tree);

        dispatcher.handle(UiMessage::StartHeadingSelection).await;
        assert!(dispatcher.session().is_listening_for_heading_selection());
        dispatcher.handle(UiMessage::CancelHeadingSelection).await;
        assert!(!dispatcher.session().is_listening_for_heading_selection());
    }

    #[tokio::test]
    async fn preference_changes_echo_back() {
        let (tree, _page) = document_with_page();
        let (mut dispatcher, mut rx) = dispatcher(tree);

        dispatcher
            .handle(UiMessage::SetTipPreference { expanded: false })
            .await;
        let Some(BackendMessage::LoadUserPreferences { preferences }) = rx.recv().await else {
            panic!("expected preference echo");
        };
        assert!(!preferences.tip_expanded);
    }

    #[tokio::test]
    async fn session_counter_increments_per_dispatcher() {
        let store = std::sync::Arc::new(MemoryStore::new());

        // Two sessions over the same store.
        struct Shared(std::sync::Arc<MemoryStore>);
        impl PreferenceStore for Shared {
            fn get(&self, key: &str) -> Option<String> {
                self.0.get(key)
            }
            fn set(&self, key: &str, value: &str) -> Result<(), crate::prefs::PrefsError> {
                self.0.set(key, value)
            }
        }

        let (tx, _rx) = mpsc::channel(8);
        let first = Dispatcher::new(DocumentTree::new(), Box::new(Shared(store.clone())), tx);
        assert_eq!(first.session().session_number(), 1);

        let (tx, _rx) = mpsc::channel(8);
        let second = Dispatcher::new(DocumentTree::new(), Box::new(Shared(store)), tx);
        assert_eq!(second.session().session_number(), 2);
    }
}
