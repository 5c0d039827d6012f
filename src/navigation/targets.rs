//! Neighbour lookup for cursor hand-off between nodes
//!
//! Units with nothing to put a cursor on are skipped, so the walk continues
//! through anonymous wrappers and a segment-less root.

use crate::models::NodeId;
use crate::store::DocRead;

/// Previous focusable node in pre-order
pub fn up_target<D: DocRead + ?Sized>(doc: &D, node_id: &str) -> Option<NodeId> {
    let mut current = doc.preorder_prev(node_id);
    while let Some(node) = current {
        if doc.is_focusable(&node.id) {
            return Some(node.id.clone());
        }
        current = doc.preorder_prev(&node.id);
    }
    None
}

/// Next focusable node in pre-order
pub fn down_target<D: DocRead + ?Sized>(doc: &D, node_id: &str) -> Option<NodeId> {
    let mut current = doc.preorder_next(node_id);
    while let Some(node) = current {
        if doc.is_focusable(&node.id) {
            return Some(node.id.clone());
        }
        current = doc.preorder_next(&node.id);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Node, NodeType, Segment};
    use crate::store::Document;
    use crate::tree::Draft;

    /// root ── a ── a1
    ///      ├─ wrap (anonymous) ── w1
    ///      └─ b
    fn doc() -> Document {
        let mut doc = Document::new("root");
        let mut draft = Draft::new(&doc);
        let rows: &[(&str, &str, NodeType, &[&str])] = &[
            ("a", "root", NodeType::Text, &["a1"]),
            ("a1", "a", NodeType::Text, &[]),
            ("wrap", "root", NodeType::Anonymous, &["w1"]),
            ("w1", "wrap", NodeType::Text, &[]),
            ("b", "root", NodeType::Text, &[]),
        ];
        for (id, parent, kind, children) in rows {
            let mut node = Node::new(*id, kind.clone(), Some(parent.to_string()));
            node.children = children.iter().map(|c| c.to_string()).collect();
            if kind.is_text() {
                let seg = format!("s-{}", id);
                node.segments = vec![seg.clone()];
                draft.put_segment(Segment::text(seg, *id, *id));
            }
            draft.put_node(node);
        }
        draft
            .modify_node("root", |r| {
                r.children = vec!["a".into(), "wrap".into(), "b".into()]
            })
            .unwrap();
        let patches = draft.into_patches();
        doc.apply(&patches);
        doc.validate().unwrap();
        doc
    }

    #[test]
    fn test_up_target() {
        let doc = doc();
        assert_eq!(up_target(&doc, "b").as_deref(), Some("w1"));
        assert_eq!(up_target(&doc, "w1").as_deref(), Some("a1"));
        assert_eq!(up_target(&doc, "a1").as_deref(), Some("a"));
        // the root has no segments and is never a target
        assert_eq!(up_target(&doc, "a"), None);
    }

    #[test]
    fn test_down_target() {
        let doc = doc();
        assert_eq!(down_target(&doc, "a").as_deref(), Some("a1"));
        assert_eq!(down_target(&doc, "a1").as_deref(), Some("w1"));
        assert_eq!(down_target(&doc, "w1").as_deref(), Some("b"));
        assert_eq!(down_target(&doc, "b"), None);
    }
}
