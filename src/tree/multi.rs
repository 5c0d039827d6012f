//! Multi-node indent and outdent over a selection
//!
//! Preconditions are checked before any patch is computed; afterwards the
//! single-node operation is folded over one draft, so a failing step fails
//! the whole operation.

use super::draft::Draft;
use super::errors::EditError;
use super::outcome::{EditOutcome, OpData};
use super::structure::{attached, indent_in, outdent_in};
use crate::models::NodeId;
use crate::navigation::{FocusIntent, NavType};
use crate::store::Document;

/// Indent `ids` (document order), folding left to right
pub fn indent_nodes(doc: &Document, ids: &[NodeId]) -> Result<EditOutcome, EditError> {
    let first = ids.first().ok_or(EditError::EmptySelection)?;
    let mut draft = Draft::new(doc);
    let (_, index) = attached(&draft, first, "indent")?;
    if index == 0 {
        return Err(EditError::NoPreviousSibling(first.clone()));
    }
    for id in ids {
        indent_in(&mut draft, id)?;
    }
    Ok(EditOutcome {
        patches: draft.into_patches(),
        focus: Some(FocusIntent::new(first.clone(), NavType::Indented)),
        data: OpData::default(),
    })
}

/// Outdent `ids` (document order), folding right to left
pub fn outdent_nodes(doc: &Document, ids: &[NodeId]) -> Result<EditOutcome, EditError> {
    let first = ids.first().ok_or(EditError::EmptySelection)?;
    let mut draft = Draft::new(doc);
    if let Some(last) = ids.last() {
        if !draft.require_node(last)?.children.is_empty() {
            return Err(EditError::HasChildren(last.clone()));
        }
    }
    for id in ids.iter().rev() {
        outdent_in(&mut draft, id)?;
    }
    Ok(EditOutcome {
        patches: draft.into_patches(),
        focus: Some(FocusIntent::new(first.clone(), NavType::Outdented)),
        data: OpData::default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Node, NodeType, Segment};
    use crate::store::DocRead;

    /// root ── p ── [a, b, c]
    fn doc() -> Document {
        let mut doc = Document::new("root");
        let mut draft = Draft::new(&doc);
        let mut p = Node::new("p", NodeType::Text, Some("root".to_string()));
        p.children = vec!["a".into(), "b".into(), "c".into()];
        p.segments = vec!["sp".into()];
        draft.put_segment(Segment::text("sp", "p", "P"));
        for id in ["a", "b", "c"] {
            let mut node = Node::new(id, NodeType::Text, Some("p".to_string()));
            let seg = format!("s{}", id);
            node.segments = vec![seg.clone()];
            draft.put_segment(Segment::text(seg, id, id));
            draft.put_node(node);
        }
        draft.put_node(p);
        draft
            .modify_node("root", |r| r.children = vec!["p".into()])
            .unwrap();
        let patches = draft.into_patches();
        doc.apply(&patches);
        doc.validate().unwrap();
        doc
    }

    fn ids(list: &[&str]) -> Vec<NodeId> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_indent_nodes_become_siblings_under_previous() {
        let mut doc = doc();
        let out = indent_nodes(&doc, &ids(&["b", "c"])).unwrap();
        doc.apply(&out.patches);
        doc.validate().unwrap();
        assert_eq!(doc.node("p").unwrap().children, vec!["a"]);
        assert_eq!(doc.node("a").unwrap().children, vec!["b", "c"]);
        assert_eq!(out.focus.unwrap().node_id, "b");
    }

    #[test]
    fn test_indent_nodes_first_without_previous_fails() {
        let doc = doc();
        assert_eq!(
            indent_nodes(&doc, &ids(&["a", "b"])).unwrap_err(),
            EditError::NoPreviousSibling("a".to_string())
        );
    }

    #[test]
    fn test_outdent_nodes_keeps_order() {
        let mut doc = doc();
        let out = outdent_nodes(&doc, &ids(&["b", "c"])).unwrap();
        doc.apply(&out.patches);
        doc.validate().unwrap();
        assert_eq!(doc.node("root").unwrap().children, vec!["p", "b", "c"]);
        assert_eq!(doc.node("p").unwrap().children, vec!["a"]);
    }

    #[test]
    fn test_outdent_nodes_last_with_children_fails() {
        let mut doc = doc();
        let out = indent_nodes(&doc, &ids(&["c"])).unwrap();
        doc.apply(&out.patches);
        assert_eq!(
            outdent_nodes(&doc, &ids(&["a", "b"])).unwrap_err(),
            EditError::HasChildren("b".to_string())
        );
    }

    #[test]
    fn test_empty_selection() {
        let doc = doc();
        assert_eq!(indent_nodes(&doc, &[]).unwrap_err(), EditError::EmptySelection);
        assert_eq!(outdent_nodes(&doc, &[]).unwrap_err(), EditError::EmptySelection);
    }
}
