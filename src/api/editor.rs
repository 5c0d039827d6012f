//! `OutlineEditor`: the JavaScript handle on one editor session
//!
//! Every method takes and returns plain JS values. Tree operations answer with
//! the `{code, message, data}` envelope; malformed input is thrown as a string.
//! Caret offsets cross this boundary in UTF-16 code units and are converted to
//! char offsets before they reach the core.

use wasm_bindgen::prelude::*;

use super::helpers::{
    caret_from_dom, deserialize, deserialize_or_default, directive_for_dom, serialize,
    validation_error,
};
use super::types::{edit_response, BulletServed};
use crate::bullet::BulletKey;
use crate::config::EditorConfig;
use crate::convert::ConversionTicket;
use crate::editor::Editor;
use crate::layout::DomLayout;
use crate::models::{DocumentSnapshot, NodeAttr, OpResult};
use crate::navigation::{ChildEvent, FocusIntent, NoGeometry, PageGeometry, UnfocusRequest};
use crate::selection::{native_selection_segments, WebDom};
use crate::tree::TreeOp;

#[wasm_bindgen]
pub struct OutlineEditor {
    inner: Editor,
}

impl OutlineEditor {
    fn dom_layout(&self) -> Option<DomLayout> {
        let config = self.inner.config();
        DomLayout::from_window(&config.segment_attribute, &config.node_attribute)
    }
}

#[wasm_bindgen]
impl OutlineEditor {
    /// Create an editor; `config` may be omitted or partial
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<OutlineEditor, JsValue> {
        let config: EditorConfig = deserialize_or_default(config, "Config deserialization error")?;
        log::info!("OutlineEditor created (undo limit {})", config.undo_limit);
        Ok(OutlineEditor {
            inner: Editor::new(config),
        })
    }

    // ------------------------------------------------------------------------
    // Document
    // ------------------------------------------------------------------------

    /// Replace the document with a parser snapshot
    #[wasm_bindgen(js_name = load)]
    pub fn load(&mut self, snapshot: JsValue) -> Result<(), JsValue> {
        let snapshot: DocumentSnapshot = deserialize(snapshot, "Snapshot deserialization error")?;
        self.inner
            .load(snapshot)
            .map_err(|e| validation_error(format!("Invalid document: {}", e)))
    }

    #[wasm_bindgen(js_name = snapshot)]
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        serialize(&self.inner.snapshot(), "Snapshot serialization error")
    }

    /// Check the tree invariants of the current document
    #[wasm_bindgen(js_name = validate)]
    pub fn validate(&self) -> Result<(), JsValue> {
        self.inner
            .document()
            .validate()
            .map_err(|e| validation_error(format!("Invalid document: {}", e)))
    }

    /// Store version; bumps once per committed write
    #[wasm_bindgen(js_name = version)]
    pub fn version(&self) -> f64 {
        self.inner.version() as f64
    }

    #[wasm_bindgen(js_name = getNode)]
    pub fn get_node(&self, node_id: &str) -> Result<JsValue, JsValue> {
        serialize(&self.inner.get_node(node_id), "Node serialization error")
    }

    #[wasm_bindgen(js_name = getSegment)]
    pub fn get_segment(&self, segment_id: &str) -> Result<JsValue, JsValue> {
        serialize(&self.inner.get_segment(segment_id), "Segment serialization error")
    }

    /// Node plus its segments, or a per-node error placeholder
    #[wasm_bindgen(js_name = nodeView)]
    pub fn node_view(&self, node_id: &str) -> Result<JsValue, JsValue> {
        serialize(&self.inner.node_view(node_id), "Node view serialization error")
    }

    // ------------------------------------------------------------------------
    // Edits
    // ------------------------------------------------------------------------

    /// Run a tree operation, e.g. `{op: "split", nodeId, position}`
    #[wasm_bindgen(js_name = applyOp)]
    pub fn apply_op(&mut self, op: JsValue) -> Result<JsValue, JsValue> {
        let op: TreeOp = deserialize(op, "Operation deserialization error")?;
        log::debug!("applyOp: {}", op.name());
        let response = edit_response(self.inner.apply_op(&op));
        serialize(&response, "Edit result serialization error")
    }

    #[wasm_bindgen(js_name = updateNode)]
    pub fn update_node(&mut self, node_id: &str, attr: JsValue) -> Result<JsValue, JsValue> {
        let attr: NodeAttr = deserialize(attr, "Attribute deserialization error")?;
        let response = edit_response(self.inner.update_node(node_id, attr));
        serialize(&response, "Edit result serialization error")
    }

    /// Replace a segment's text; `text` is the whole new source
    #[wasm_bindgen(js_name = updateSegmentText)]
    pub fn update_segment_text(&mut self, segment_id: &str, text: String) -> Result<JsValue, JsValue> {
        let op = TreeOp::UpdateSegmentText {
            segment_id: segment_id.to_string(),
            text,
        };
        let response = edit_response(self.inner.apply_op(&op));
        serialize(&response, "Edit result serialization error")
    }

    #[wasm_bindgen(js_name = undo)]
    pub fn undo(&mut self) -> Result<JsValue, JsValue> {
        serialize(&OpResult::from_result(self.inner.undo()), "Undo result serialization error")
    }

    #[wasm_bindgen(js_name = redo)]
    pub fn redo(&mut self) -> Result<JsValue, JsValue> {
        serialize(&OpResult::from_result(self.inner.redo()), "Redo result serialization error")
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    /// Raise a navigation request, e.g. `{nodeId, type: "fromLeft"}`
    #[wasm_bindgen(js_name = triggerFocus)]
    pub fn trigger_focus(&mut self, intent: JsValue) -> Result<f64, JsValue> {
        let mut intent: FocusIntent = deserialize(intent, "Focus intent deserialization error")?;
        if let (Some(segment_id), Some(offset)) =
            (intent.extra.segment_id.as_deref(), intent.extra.cursor_offset)
        {
            intent.extra.cursor_offset = Some(caret_from_dom(&self.inner, segment_id, offset));
        }
        let counter = self
            .inner
            .trigger_focus(&intent.node_id, intent.nav_type, intent.extra);
        Ok(counter as f64)
    }

    /// Resolve outstanding navigation requests against the live page
    #[wasm_bindgen(js_name = pollFocus)]
    pub fn poll_focus(&mut self) -> Result<JsValue, JsValue> {
        let layout = self.dom_layout();
        let geometry: &dyn PageGeometry = match &layout {
            Some(layout) => layout,
            None => &NoGeometry,
        };
        let directives: Vec<_> = self
            .inner
            .poll_focus(geometry)
            .into_iter()
            .map(|directive| directive_for_dom(&self.inner, directive))
            .collect();
        serialize(&directives, "Focus serialization error")
    }

    /// Caret moved inside the focused segment (UTF-16 offset)
    #[wasm_bindgen(js_name = reportCaret)]
    pub fn report_caret(&mut self, utf16_offset: usize) {
        let offset = match self.inner.state().focus.focused_segment() {
            Some(segment_id) => caret_from_dom(&self.inner, segment_id, utf16_offset),
            None => utf16_offset,
        };
        self.inner.report_caret(offset);
    }

    #[wasm_bindgen(js_name = blur)]
    pub fn blur(&mut self, node_id: &str) {
        self.inner.blur(node_id);
    }

    /// The cursor left a segment, e.g. `{nodeId, segmentId, type: "down", cursorPageX}`
    #[wasm_bindgen(js_name = triggerUnfocus)]
    pub fn trigger_unfocus(&mut self, request: JsValue) -> Result<JsValue, JsValue> {
        let request: UnfocusRequest = deserialize(request, "Unfocus deserialization error")?;
        let layout = self.dom_layout();
        let geometry: &dyn PageGeometry = match &layout {
            Some(layout) => layout,
            None => &NoGeometry,
        };
        let outcome = self.inner.trigger_unfocus(&request, geometry);
        serialize(&outcome, "Unfocus serialization error")
    }

    /// Post an edit request from a segment to its node (`cursorLoc` in UTF-16)
    #[wasm_bindgen(js_name = postChildEvent)]
    pub fn post_child_event(&mut self, node_id: &str, event: JsValue) -> Result<f64, JsValue> {
        let mut event: ChildEvent = deserialize(event, "Child event deserialization error")?;
        event.cursor_loc = event
            .cursor_loc
            .map(|loc| caret_from_dom(&self.inner, &event.from, loc));
        Ok(self.inner.post_child_event(node_id, event) as f64)
    }

    /// Dispatch the node's newest child event; `null` if already handled
    #[wasm_bindgen(js_name = processChildEvent)]
    pub fn process_child_event(&mut self, node_id: &str) -> Result<JsValue, JsValue> {
        match self.inner.process_child_event(node_id) {
            Some(result) => serialize(&edit_response(result), "Edit result serialization error"),
            None => Ok(JsValue::NULL),
        }
    }

    // ------------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------------

    /// Segments and owning nodes between two segment ids, in document order
    #[wasm_bindgen(js_name = selection)]
    pub fn selection(&self, anchor_segment: &str, focus_segment: &str) -> Result<JsValue, JsValue> {
        serialize(
            &self.inner.selection(anchor_segment, focus_segment),
            "Selection serialization error",
        )
    }

    /// Read the native selection and, if it spans segments, move focus to its end
    #[wasm_bindgen(js_name = syncNativeSelection)]
    pub fn sync_native_selection(&mut self) -> Result<JsValue, JsValue> {
        let window = web_sys::window().ok_or_else(|| validation_error("No window available"))?;
        let dom = WebDom::new(&self.inner.config().segment_attribute);
        let Some((anchor, focus)) = native_selection_segments(&window, &dom) else {
            return Ok(JsValue::NULL);
        };
        let directive = self
            .inner
            .select_across(anchor.as_deref(), focus.as_deref());
        serialize(&directive, "Focus serialization error")
    }

    // ------------------------------------------------------------------------
    // Bullets
    // ------------------------------------------------------------------------

    #[wasm_bindgen(js_name = requestBullet)]
    pub fn request_bullet(&mut self, node_id: &str, container_class: &str) -> f64 {
        self.inner
            .request_bullet(&BulletKey::new(node_id, container_class)) as f64
    }

    /// Measure every outstanding bullet request against the live page
    #[wasm_bindgen(js_name = serveBullets)]
    pub fn serve_bullets(&mut self) -> Result<JsValue, JsValue> {
        let layout = self
            .dom_layout()
            .ok_or_else(|| validation_error("No document available for measurement"))?;
        let served: Vec<BulletServed> = self
            .inner
            .serve_bullets(&layout)
            .into_iter()
            .map(|(key, result)| BulletServed { key, result })
            .collect();
        serialize(&served, "Bullet serialization error")
    }

    #[wasm_bindgen(js_name = bullet)]
    pub fn bullet(&self, node_id: &str, container_class: &str) -> Result<JsValue, JsValue> {
        let key = BulletKey::new(node_id, container_class);
        serialize(&self.inner.bullet(&key), "Bullet serialization error")
    }

    // ------------------------------------------------------------------------
    // Conversion
    // ------------------------------------------------------------------------

    #[wasm_bindgen(js_name = beginConversion)]
    pub fn begin_conversion(&mut self, segment_id: &str) -> Result<JsValue, JsValue> {
        let ticket = self
            .inner
            .begin_conversion(segment_id)
            .map_err(|e| validation_error(e.to_string()))?;
        serialize(&ticket, "Ticket serialization error")
    }

    /// Deliver converter output; pass `null`/`undefined` when conversion failed
    #[wasm_bindgen(js_name = completeConversion)]
    pub fn complete_conversion(
        &mut self,
        ticket: JsValue,
        markup: Option<String>,
    ) -> Result<JsValue, JsValue> {
        let ticket: ConversionTicket = deserialize(ticket, "Ticket deserialization error")?;
        let applied = self.inner.complete_conversion(&ticket, markup);
        serialize(&applied, "Conversion serialization error")
    }

    #[wasm_bindgen(js_name = conversionState)]
    pub fn conversion_state(&self, segment_id: &str) -> Result<JsValue, JsValue> {
        serialize(
            &self.inner.conversion_state(segment_id),
            "Conversion serialization error",
        )
    }

    // ------------------------------------------------------------------------
    // Subscriptions
    // ------------------------------------------------------------------------

    /// Call `callback(version)` after every committed write
    ///
    /// Callbacks run as microtasks, after the writing method has returned, so
    /// they may read from this editor.
    #[wasm_bindgen(js_name = subscribe)]
    pub fn subscribe(&mut self, callback: js_sys::Function) -> f64 {
        let id = self.inner.subscribe(move |_state, version| {
            let bound = callback.bind1(&JsValue::NULL, &JsValue::from_f64(version as f64));
            match web_sys::window() {
                Some(window) => window.queue_microtask(wasm_bindgen::JsCast::unchecked_ref(&bound)),
                None => {
                    if let Err(e) = bound.call0(&JsValue::NULL) {
                        log::error!("subscriber failed: {:?}", e);
                    }
                }
            }
        });
        u64::from(id) as f64
    }

    #[wasm_bindgen(js_name = unsubscribe)]
    pub fn unsubscribe(&mut self, id: f64) -> bool {
        self.inner.unsubscribe((id as u64).into())
    }
}
