//! Native selection boundaries to selected segment and node ranges

mod common;

use common::OutlineBuilder;
use outline_wasm::models::{SegmentId, SegmentType};
use outline_wasm::selection::{resolve_boundary, segment_order, selected_nodes, DomAccess};

/// Flat arena standing in for a rendered tree
#[derive(Default)]
struct Arena {
    parents: Vec<Option<usize>>,
    segments: Vec<Option<String>>,
}

impl Arena {
    fn add(&mut self, parent: Option<usize>, segment: Option<&str>) -> usize {
        self.parents.push(parent);
        self.segments.push(segment.map(str::to_string));
        self.parents.len() - 1
    }
}

impl DomAccess for Arena {
    type Handle = usize;

    fn parent(&self, node: &usize) -> Option<usize> {
        self.parents[*node]
    }

    fn children(&self, node: &usize) -> Vec<usize> {
        (0..self.parents.len())
            .filter(|i| self.parents[*i] == Some(*node))
            .collect()
    }

    fn segment_id(&self, node: &usize) -> Option<SegmentId> {
        self.segments[*node].clone()
    }
}

/// root ── a (a1, a2) ── b (b1)
///      └─ c (c1)
fn outline() -> OutlineBuilder {
    OutlineBuilder::new()
        .node("root", "a", outline_wasm::models::NodeType::Text)
        .segment("a", "a1", SegmentType::Text, "one ")
        .segment("a", "a2", SegmentType::LatexInline, "x")
        .node("a", "b", outline_wasm::models::NodeType::Text)
        .segment("b", "b1", SegmentType::Text, "two")
        .text("root", "c", "three")
}

#[test]
fn test_document_order_is_node_then_segments_then_children() {
    let doc = outline().build();
    assert_eq!(segment_order(&doc), vec!["a1", "a2", "b1", "c.s"]);
}

#[test]
fn test_selection_is_direction_independent() {
    let mut editor = outline_wasm::Editor::default();
    editor.load(outline().snapshot()).unwrap();

    let forward = editor.selection("a2", "c.s").unwrap();
    let backward = editor.selection("c.s", "a2").unwrap();

    assert_eq!(forward, backward);
    assert_eq!(forward.from, "a2");
    assert_eq!(forward.to, "c.s");
    assert_eq!(forward.nodes, vec!["a", "b", "c"]);
}

#[test]
fn test_selection_inside_one_node() {
    let doc = outline().build();
    assert_eq!(selected_nodes(&doc, "a1", "a2"), vec!["a"]);
    assert!(selected_nodes(&doc, "a1", "missing").is_empty());
}

#[test]
fn test_boundary_inside_segment_text() {
    let mut dom = Arena::default();
    let body = dom.add(None, None);
    let seg = dom.add(Some(body), Some("a1"));
    let text = dom.add(Some(seg), None);

    assert_eq!(resolve_boundary(&dom, &text, 3).as_deref(), Some("a1"));
}

#[test]
fn test_boundary_between_segments_scans_outward() {
    let mut dom = Arena::default();
    let row = dom.add(None, None);
    let _bullet = dom.add(Some(row), None);
    let wrapper = dom.add(Some(row), None);
    let _seg = dom.add(Some(wrapper), Some("b1"));
    let _trailer = dom.add(Some(row), None);

    // at the bullet: forward scan finds the segment inside the wrapper
    assert_eq!(resolve_boundary(&dom, &row, 0).as_deref(), Some("b1"));
    // past the trailer: nothing after, so the scan goes backward
    assert_eq!(resolve_boundary(&dom, &row, 3).as_deref(), Some("b1"));
}

#[test]
fn test_boundary_outside_any_segment() {
    let mut dom = Arena::default();
    let row = dom.add(None, None);
    let _empty = dom.add(Some(row), None);

    assert_eq!(resolve_boundary(&dom, &row, 0), None);
}
