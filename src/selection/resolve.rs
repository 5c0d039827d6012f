//! Selected node list from two boundary segments

use serde::{Deserialize, Serialize};

use crate::models::{NodeId, SegmentId};
use crate::store::DocRead;

/// All segment ids in document order: each node, then its own segments, then its children
pub fn segment_order<D: DocRead + ?Sized>(doc: &D) -> Vec<SegmentId> {
    doc.preorder_ids()
        .iter()
        .filter_map(|id| doc.node(id))
        .flat_map(|node| node.segments.iter().cloned())
        .collect()
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SelectionRange {
    pub from: SegmentId,
    pub to: SegmentId,
    /// Owners of every segment in `[from, to]`, first-seen order
    pub nodes: Vec<NodeId>,
}

/// Resolve the nodes covered by a selection between two segments
///
/// The endpoints may come in either order. Unknown segment ids yield `None`.
pub fn selected_range<D: DocRead + ?Sized>(
    doc: &D,
    anchor: &str,
    focus: &str,
) -> Option<SelectionRange> {
    let order = segment_order(doc);
    let a = order.iter().position(|s| s == anchor)?;
    let b = order.iter().position(|s| s == focus)?;
    let (from, to) = (a.min(b), a.max(b));

    let mut nodes: Vec<NodeId> = Vec::new();
    for seg_id in &order[from..=to] {
        let Some(owner) = doc.segment(seg_id).map(|s| &s.parent_node_id) else {
            continue;
        };
        if nodes.last() != Some(owner) {
            nodes.push(owner.clone());
        }
    }
    Some(SelectionRange {
        from: order[from].clone(),
        to: order[to].clone(),
        nodes,
    })
}

pub fn selected_nodes<D: DocRead + ?Sized>(doc: &D, anchor: &str, focus: &str) -> Vec<NodeId> {
    selected_range(doc, anchor, focus).map_or_else(Vec::new, |range| range.nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Node, NodeType, Segment};
    use crate::store::Document;
    use crate::tree::Draft;

    /// root ── a (a1, a2) ── b (b1)
    ///      └─ c (c1)
    fn doc() -> Document {
        let mut doc = Document::new("root");
        let mut draft = Draft::new(&doc);
        let rows: &[(&str, &str, &[&str], &[&str])] = &[
            ("a", "root", &["a1", "a2"], &["b"]),
            ("b", "a", &["b1"], &[]),
            ("c", "root", &["c1"], &[]),
        ];
        for (id, parent, segs, children) in rows {
            let mut node = Node::new(*id, NodeType::Text, Some(parent.to_string()));
            node.segments = segs.iter().map(|s| s.to_string()).collect();
            node.children = children.iter().map(|c| c.to_string()).collect();
            for seg in *segs {
                draft.put_segment(Segment::text(*seg, *id, *seg));
            }
            draft.put_node(node);
        }
        draft
            .modify_node("root", |r| r.children = vec!["a".into(), "c".into()])
            .unwrap();
        let patches = draft.into_patches();
        doc.apply(&patches);
        doc
    }

    #[test]
    fn test_segment_order_is_preorder() {
        assert_eq!(segment_order(&doc()), vec!["a1", "a2", "b1", "c1"]);
    }

    #[test]
    fn test_selection_is_order_independent() {
        let doc = doc();
        let forward = selected_range(&doc, "a2", "c1").unwrap();
        let backward = selected_range(&doc, "c1", "a2").unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward.from, "a2");
        assert_eq!(forward.nodes, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_consecutive_owners_collapse() {
        let doc = doc();
        assert_eq!(selected_nodes(&doc, "a1", "a2"), vec!["a"]);
        assert!(selected_nodes(&doc, "a1", "missing").is_empty());
    }
}
