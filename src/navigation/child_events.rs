//! Child events: edit requests bubbling from a segment to its node
//!
//! A segment cannot restructure the tree; it posts an event to its node and
//! the node turns it into a tree operation. Events share the counter rule of
//! navigation requests, so a replayed event is never dispatched twice.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{NodeId, SegmentId};
use crate::store::{CounterGate, DocRead};
use crate::tree::{EditError, TreeOp};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ChildEventType {
    Split,
    Delete,
    Create,
    Indent,
    Outdent,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChildEvent {
    #[serde(default)]
    pub counter: u64,

    #[serde(rename = "type")]
    pub event_type: ChildEventType,

    /// Segment that raised the event
    pub from: SegmentId,

    /// Caret offset inside `from`, in chars
    #[serde(default)]
    pub cursor_loc: Option<usize>,

    /// Caret page x at the time of the event
    #[serde(default)]
    pub cursor_pos: Option<f64>,
}

/// Latest event per node
#[derive(Clone, Debug, Default)]
pub struct ChildEventBoard {
    events: HashMap<NodeId, ChildEvent>,
}

impl ChildEventBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Post an event to `node_id`, stamping it with the slot's next counter
    pub fn post(&mut self, node_id: &str, mut event: ChildEvent) -> u64 {
        let counter = self.events.get(node_id).map_or(0, |e| e.counter) + 1;
        event.counter = counter;
        self.events.insert(node_id.to_string(), event);
        counter
    }

    pub fn get(&self, node_id: &str) -> Option<&ChildEvent> {
        self.events.get(node_id)
    }

    /// Take the event for `node_id` if the gate has not seen it yet
    pub fn admit(&self, node_id: &str, gate: &mut CounterGate<NodeId>) -> Option<ChildEvent> {
        let event = self.events.get(node_id)?;
        if gate.admit(&node_id.to_string(), event.counter) {
            Some(event.clone())
        } else {
            None
        }
    }
}

/// Map a child event to the tree operation it stands for
///
/// `delete` (backspace at the start of a node) merges into a previous text
/// sibling; without one, an empty childless node is deleted; anything else is
/// refused.
pub fn to_tree_op<D: DocRead + ?Sized>(
    doc: &D,
    node_id: &str,
    event: &ChildEvent,
) -> Result<TreeOp, EditError> {
    let node = doc
        .node(node_id)
        .ok_or_else(|| EditError::NodeNotFound(node_id.to_string()))?;
    if node.segment_index(&event.from).is_none() {
        return Err(EditError::ForeignSegment {
            segment: event.from.clone(),
            node: node_id.to_string(),
        });
    }
    let node_id = node_id.to_string();
    let op = match event.event_type {
        ChildEventType::Split => {
            let start = doc.segment_start_offset(&node_id, &event.from).unwrap_or(0);
            TreeOp::Split {
                position: start + event.cursor_loc.unwrap_or(0),
                node_id,
            }
        }
        ChildEventType::Delete => {
            let prev_is_text = doc
                .previous_sibling(&node_id)
                .map_or(false, |prev| prev.kind.is_text());
            if prev_is_text && node.kind.is_text() {
                TreeOp::Merge { node_id }
            } else if !node.children.is_empty() {
                return Err(EditError::HasChildren(node_id));
            } else if doc.node_char_len(&node_id) > 0 {
                return Err(EditError::NotEmpty(node_id));
            } else {
                TreeOp::Delete { node_id }
            }
        }
        ChildEventType::Create => TreeOp::CreateNodeAfter { node_id },
        ChildEventType::Indent => TreeOp::Indent { node_id },
        ChildEventType::Outdent => TreeOp::Outdent { node_id },
    };
    Ok(op)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Node, NodeType, Segment};
    use crate::store::Document;
    use crate::tree::Draft;

    /// root ── d (divider) ── e (empty text)
    ///      └─ t (text "ab" + "cd")
    fn doc() -> Document {
        let mut doc = Document::new("root");
        let mut draft = Draft::new(&doc);
        let mut e = Node::new("e", NodeType::Text, Some("root".to_string()));
        e.segments = vec!["se".into()];
        let mut t = Node::new("t", NodeType::Text, Some("root".to_string()));
        t.segments = vec!["t1".into(), "t2".into()];
        draft.put_segment(Segment::text("se", "e", ""));
        draft.put_segment(Segment::text("t1", "t", "ab"));
        draft.put_segment(Segment::text("t2", "t", "cd"));
        draft.put_node(Node::new("d", NodeType::Divider, Some("root".to_string())));
        draft.put_node(e);
        draft.put_node(t);
        draft
            .modify_node("root", |r| {
                r.children = vec!["d".into(), "e".into(), "t".into()]
            })
            .unwrap();
        let patches = draft.into_patches();
        doc.apply(&patches);
        doc
    }

    fn event(event_type: ChildEventType, from: &str, loc: Option<usize>) -> ChildEvent {
        ChildEvent {
            counter: 0,
            event_type,
            from: from.to_string(),
            cursor_loc: loc,
            cursor_pos: None,
        }
    }

    #[test]
    fn test_split_offset_is_node_level() {
        let doc = doc();
        let op = to_tree_op(&doc, "t", &event(ChildEventType::Split, "t2", Some(1))).unwrap();
        assert_eq!(
            op,
            TreeOp::Split {
                node_id: "t".to_string(),
                position: 3
            }
        );
    }

    #[test]
    fn test_delete_dispatch() {
        let doc = doc();
        // previous sibling is text: merge
        let op = to_tree_op(&doc, "t", &event(ChildEventType::Delete, "t1", Some(0))).unwrap();
        assert_eq!(op, TreeOp::Merge { node_id: "t".to_string() });

        // previous sibling is a divider, node is empty: delete
        let op = to_tree_op(&doc, "e", &event(ChildEventType::Delete, "se", Some(0))).unwrap();
        assert_eq!(op, TreeOp::Delete { node_id: "e".to_string() });
    }

    #[test]
    fn test_foreign_segment_rejected() {
        let doc = doc();
        let err = to_tree_op(&doc, "e", &event(ChildEventType::Create, "t1", None)).unwrap_err();
        assert!(matches!(err, EditError::ForeignSegment { .. }));
    }

    #[test]
    fn test_board_deduplicates() {
        let mut board = ChildEventBoard::new();
        let mut gate = CounterGate::new();
        assert_eq!(board.post("t", event(ChildEventType::Create, "t1", None)), 1);
        assert!(board.admit("t", &mut gate).is_some());
        assert!(board.admit("t", &mut gate).is_none());
        assert_eq!(board.post("t", event(ChildEventType::Indent, "t1", None)), 2);
        let admitted = board.admit("t", &mut gate).unwrap();
        assert_eq!(admitted.event_type, ChildEventType::Indent);
    }
}
