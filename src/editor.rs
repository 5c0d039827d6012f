//! Editor session: the reactive store plus everything that writes to it
//!
//! All state the renderer observes lives in one `Store<EditorState>`. Tree
//! operations run against the committed document, and their patches are
//! applied inside a single store update together with the focus request they
//! raise, so subscribers see each edit exactly once.

use serde::{Deserialize, Serialize};

use crate::bullet::{serve_bullet, BulletBoard, BulletKey, BulletRequest};
use crate::config::EditorConfig;
use crate::convert::{ConversionApplied, ConversionGuard, ConversionState, ConversionTicket};
use crate::layout::LayoutMeasurer;
use crate::models::{DocumentSnapshot, Node, NodeAttr, NodeId, OpResult, Segment};
use crate::navigation::child_events::to_tree_op;
use crate::navigation::{
    cross_segment_focus, handle_unfocus, resolve_focus, ChildEvent, ChildEventBoard,
    FocusDirective, FocusExtra, FocusIntent, FocusTracker, NavType, NavigationBoard,
    PageGeometry, UnfocusOutcome, UnfocusRequest,
};
use crate::selection::{selected_range, SelectionRange};
use crate::store::{CounterGate, DocRead, Document, Patch, Store, StoreError, SubscriptionId};
use crate::tree::{EditError, EditOutcome, IdSource, TreeOp, UuidIds};
use crate::undo::{EditKind, PatchBatch, UndoError, UndoStack};

/// Everything observers can read
#[derive(Debug, Default)]
pub struct EditorState {
    pub document: Document,
    pub navigation: NavigationBoard,
    pub child_events: ChildEventBoard,
    pub bullets: BulletBoard,
    pub focus: FocusTracker,
    pub conversions: ConversionGuard,
    navigation_gate: CounterGate<NodeId>,
    child_event_gate: CounterGate<NodeId>,
    bullet_gate: CounterGate<BulletKey>,
}

impl EditorState {
    fn with_document(document: Document) -> Self {
        Self {
            document,
            ..Default::default()
        }
    }
}

/// One node ready to render, or the reason it cannot be
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "status", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum NodeView {
    Ready { node: Node, segments: Vec<Segment> },
    Broken { node_id: NodeId, message: String },
}

pub struct Editor {
    store: Store<EditorState>,
    ids: Box<dyn IdSource>,
    config: EditorConfig,
    undo: UndoStack,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_ids(config, Box::new(UuidIds))
    }

    pub fn with_ids(config: EditorConfig, ids: Box<dyn IdSource>) -> Self {
        Self {
            store: Store::new(EditorState::default()),
            ids,
            undo: UndoStack::new(config.undo_limit),
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn state(&self) -> &EditorState {
        self.store.get()
    }

    pub fn document(&self) -> &Document {
        &self.store.get().document
    }

    pub fn version(&self) -> u64 {
        self.store.version()
    }

    /// Replace the document with parser output; history and signals start over
    pub fn load(&mut self, snapshot: DocumentSnapshot) -> Result<(), StoreError> {
        let document = Document::from_snapshot(snapshot)?;
        log::info!(
            "loaded document: {} nodes, {} segments",
            document.nodes().len(),
            document.segments().len()
        );
        self.undo.clear();
        self.store.set(EditorState::with_document(document));
        Ok(())
    }

    pub fn snapshot(&self) -> DocumentSnapshot {
        self.document().snapshot()
    }

    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.document().node(id)
    }

    pub fn get_segment(&self, id: &str) -> Option<&Segment> {
        self.document().segment(id)
    }

    /// Render data for one node; a broken node never affects its siblings
    pub fn node_view(&self, id: &str) -> NodeView {
        let doc = self.document();
        let broken = |message: String| NodeView::Broken {
            node_id: id.to_string(),
            message,
        };
        let Some(node) = doc.node(id) else {
            return broken(format!("node not found: {}", id));
        };
        let mut segments = Vec::with_capacity(node.segments.len());
        for seg_id in &node.segments {
            match doc.segment(seg_id) {
                Some(seg) if seg.parent_node_id == node.id => segments.push(seg.clone()),
                Some(seg) => {
                    return broken(format!(
                        "segment {} belongs to {}",
                        seg_id, seg.parent_node_id
                    ))
                }
                None => return broken(format!("segment not found: {}", seg_id)),
            }
        }
        NodeView::Ready {
            node: node.clone(),
            segments,
        }
    }

    /// Display-only attribute change on one node
    pub fn update_node(&mut self, id: &str, attr: NodeAttr) -> Result<EditOutcome, EditError> {
        self.apply_op(&TreeOp::UpdateNodeAttr {
            node_id: id.to_string(),
            attr,
        })
    }

    /// Run a tree operation and commit its patches
    pub fn apply_op(&mut self, op: &TreeOp) -> Result<EditOutcome, EditError> {
        let mut outcome = op.run(&self.store.get().document, self.ids.as_mut())?;
        let kind = match op {
            TreeOp::UpdateSegmentText { segment_id, text } => EditKind::Text {
                segment_id: segment_id.clone(),
                new_text: text.clone(),
            },
            _ => EditKind::Structural,
        };
        outcome.focus = outcome.focus.map(|intent| self.keep_cursor(intent));
        self.commit(&outcome.patches, kind, outcome.focus.as_ref());
        Ok(outcome)
    }

    /// Fill in the caret for intents that keep the cursor where it was
    fn keep_cursor(&self, mut intent: FocusIntent) -> FocusIntent {
        let keeps = matches!(
            intent.nav_type,
            NavType::Editing | NavType::Indented | NavType::Outdented
        );
        let focus = &self.state().focus;
        if keeps && intent.extra.segment_id.is_none() && focus.focused_node() == Some(&intent.node_id) {
            intent.extra.segment_id = focus.focused_segment().map(str::to_string);
            intent.extra.cursor_offset = focus.caret_offset();
        }
        intent
    }

    fn commit(&mut self, patches: &[Patch], kind: EditKind, focus: Option<&FocusIntent>) {
        if patches.is_empty() && focus.is_none() {
            return;
        }
        let inverse = self.document().inverse_of(patches);
        self.store.update(|state| {
            state.document.apply(patches);
            for patch in patches {
                if let Patch::RemoveNode { id } = patch {
                    state.bullets.remove_node(id);
                }
            }
            state.focus.forget_missing(&state.document);
            if let Some(intent) = focus {
                state
                    .navigation
                    .trigger(&intent.node_id, intent.nav_type, intent.extra.clone());
            }
        });
        self.undo.push(PatchBatch::new(patches.to_vec(), inverse), kind);
    }

    /// Publish a navigation request for `node_id`
    pub fn trigger_focus(&mut self, node_id: &str, nav_type: NavType, extra: FocusExtra) -> u64 {
        self.store
            .update(|state| state.navigation.trigger(node_id, nav_type, extra))
    }

    /// Resolve every request the gate has not handled yet, oldest first
    pub fn poll_focus(&mut self, geometry: &dyn PageGeometry) -> Vec<FocusDirective> {
        let state = self.store.get();
        if state.navigation.pending(&state.navigation_gate).is_empty() {
            return Vec::new();
        }
        let weight = self.config.row_distance_weight;
        self.store.update(|state| {
            let mut landed = Vec::new();
            for (node_id, request) in state.navigation.pending(&state.navigation_gate) {
                if !state.navigation_gate.admit(&node_id, request.counter) {
                    continue;
                }
                match resolve_focus(&state.document, geometry, &node_id, &request, weight) {
                    Some(directive) => {
                        state.focus.focus(&directive);
                        landed.push(directive);
                    }
                    None => log::warn!("focus request for missing node {}", node_id),
                }
            }
            landed
        })
    }

    /// Renderer reports the caret offset inside the focused segment
    pub fn report_caret(&mut self, offset: usize) {
        self.store.update(|state| state.focus.set_caret(offset));
    }

    pub fn blur(&mut self, node_id: &str) {
        self.store.update(|state| state.focus.blur(node_id));
    }

    /// The cursor left a unit; forward focus to wherever it goes next
    pub fn trigger_unfocus(
        &mut self,
        request: &UnfocusRequest,
        geometry: &dyn PageGeometry,
    ) -> UnfocusOutcome {
        let outcome = handle_unfocus(self.document(), geometry, request);
        if let Some(intent) = outcome.intent() {
            self.trigger_focus(&intent.node_id, intent.nav_type, intent.extra.clone());
        }
        outcome
    }

    /// A segment posts an edit request to its node
    pub fn post_child_event(&mut self, node_id: &str, event: ChildEvent) -> u64 {
        self.store
            .update(|state| state.child_events.post(node_id, event))
    }

    /// Dispatch the node's latest child event if it is new
    pub fn process_child_event(&mut self, node_id: &str) -> Option<Result<EditOutcome, EditError>> {
        let state = self.store.get();
        let pending = state
            .child_events
            .get(node_id)
            .map_or(false, |e| state.child_event_gate.is_pending(&node_id.to_string(), e.counter));
        if !pending {
            return None;
        }
        let event = self.store.update(|state| {
            state
                .child_events
                .admit(node_id, &mut state.child_event_gate)
        })?;
        let result = match to_tree_op(self.document(), node_id, &event) {
            Ok(op) => self.apply_op(&op),
            Err(err) => Err(err),
        };
        if let Err(err) = &result {
            log::warn!("child event {:?} on {} rejected: {}", event.event_type, node_id, err);
        }
        Some(result)
    }

    pub fn request_bullet(&mut self, key: &BulletKey) -> u64 {
        self.store.update(|state| state.bullets.request(key))
    }

    pub fn bullet(&self, key: &BulletKey) -> Option<&BulletRequest> {
        self.state().bullets.get(key)
    }

    /// Serve every outstanding bullet request
    pub fn serve_bullets(&mut self, measurer: &dyn LayoutMeasurer) -> Vec<(BulletKey, OpResult<f64>)> {
        let state = self.store.get();
        let mut keys = state.bullets.pending(&state.bullet_gate);
        if keys.is_empty() {
            return Vec::new();
        }
        keys.sort();
        let ratio = self.config.bullet_anchor_ratio;
        self.store.update(|state| {
            let EditorState {
                document,
                bullets,
                bullet_gate,
                ..
            } = state;
            keys.into_iter()
                .filter_map(|key| {
                    serve_bullet(bullets, bullet_gate, &*document, measurer, &key, ratio)
                        .map(|result| (key, result))
                })
                .collect()
        })
    }

    pub fn selection(&self, anchor: &str, focus: &str) -> Option<SelectionRange> {
        selected_range(self.document(), anchor, focus)
    }

    /// Pointer selection across segments: focus the end segment, keep the native selection
    pub fn select_across(
        &mut self,
        anchor_segment: Option<&str>,
        focus_segment: Option<&str>,
    ) -> Option<FocusDirective> {
        let directive = cross_segment_focus(self.document(), anchor_segment, focus_segment)?;
        self.store.update(|state| state.focus.focus(&directive));
        Some(directive)
    }

    pub fn begin_conversion(&mut self, segment_id: &str) -> Result<ConversionTicket, EditError> {
        let source = self
            .get_segment(segment_id)
            .ok_or_else(|| EditError::SegmentNotFound(segment_id.to_string()))?
            .text_raw
            .clone();
        Ok(self
            .store
            .update(|state| state.conversions.begin(segment_id, &source)))
    }

    pub fn complete_conversion(
        &mut self,
        ticket: &ConversionTicket,
        markup: Option<String>,
    ) -> ConversionApplied {
        if !self.state().conversions.is_current(ticket) {
            log::debug!(
                "dropping stale conversion for {} (v{})",
                ticket.segment_id,
                ticket.version
            );
            return ConversionApplied::Stale;
        }
        self.store
            .update(|state| state.conversions.complete(ticket, markup))
    }

    pub fn conversion_state(&self, segment_id: &str) -> Option<&ConversionState> {
        self.state().conversions.state(segment_id)
    }

    pub fn undo(&mut self) -> Result<(), UndoError> {
        let undo = &mut self.undo;
        self.store.update(|state| {
            let result = undo.undo(&mut state.document);
            state.focus.forget_missing(&state.document);
            result
        })
    }

    pub fn redo(&mut self) -> Result<(), UndoError> {
        let undo = &mut self.undo;
        self.store.update(|state| {
            let result = undo.redo(&mut state.document);
            state.focus.forget_missing(&state.document);
            result
        })
    }

    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo.can_redo()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&EditorState, u64) + 'static,
    {
        self.store.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.store.subscriber_count()
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
