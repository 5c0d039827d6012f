//! `DomAccess` over the browser DOM and the live native selection

use wasm_bindgen::JsCast;
use web_sys::{Element, Node, Window};

use super::boundary::{resolve_boundary, DomAccess};
use crate::models::SegmentId;

pub struct WebDom {
    segment_attribute: String,
}

impl WebDom {
    pub fn new(segment_attribute: &str) -> Self {
        Self {
            segment_attribute: segment_attribute.to_string(),
        }
    }
}

impl DomAccess for WebDom {
    type Handle = Node;

    fn parent(&self, node: &Node) -> Option<Node> {
        node.parent_node()
    }

    fn children(&self, node: &Node) -> Vec<Node> {
        let list = node.child_nodes();
        (0..list.length()).filter_map(|i| list.item(i)).collect()
    }

    fn segment_id(&self, node: &Node) -> Option<SegmentId> {
        node.dyn_ref::<Element>()?
            .get_attribute(&self.segment_attribute)
    }
}

/// Segment ids under the anchor and focus of the window's selection
///
/// Offsets are DOM offsets (child indexes for element containers), so no
/// UTF-16 conversion is involved here.
pub fn native_selection_segments(
    window: &Window,
    dom: &WebDom,
) -> Option<(Option<SegmentId>, Option<SegmentId>)> {
    let selection = window.get_selection().ok().flatten()?;
    let anchor = selection
        .anchor_node()
        .and_then(|node| resolve_boundary(dom, &node, selection.anchor_offset() as usize));
    let focus = selection
        .focus_node()
        .and_then(|node| resolve_boundary(dom, &node, selection.focus_offset() as usize));
    Some((anchor, focus))
}
