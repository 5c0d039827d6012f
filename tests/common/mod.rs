//! Shared outline fixtures for integration tests

#![allow(dead_code)]

use std::collections::HashMap;

use outline_wasm::models::{DocumentSnapshot, Node, NodeType, Segment, SegmentType};
use outline_wasm::store::Document;

/// Builds a snapshot node by node; parents must be added before children
pub struct OutlineBuilder {
    root_id: String,
    nodes: HashMap<String, Node>,
    segments: HashMap<String, Segment>,
}

impl OutlineBuilder {
    /// An anonymous root called `root`
    pub fn new() -> Self {
        let root = Node::new("root", NodeType::Anonymous, None);
        let mut nodes = HashMap::new();
        nodes.insert("root".to_string(), root);
        Self {
            root_id: "root".to_string(),
            nodes,
            segments: HashMap::new(),
        }
    }

    /// Append a node of `kind` under `parent`
    pub fn node(mut self, parent: &str, id: &str, kind: NodeType) -> Self {
        let node = Node::new(id, kind, Some(parent.to_string()));
        self.nodes
            .get_mut(parent)
            .expect("parent added first")
            .children
            .push(id.to_string());
        self.nodes.insert(id.to_string(), node);
        self
    }

    /// Append a segment to `node`
    pub fn segment(mut self, node: &str, id: &str, kind: SegmentType, text: &str) -> Self {
        self.segments
            .insert(id.to_string(), Segment::new(id, node, kind, text));
        self.nodes
            .get_mut(node)
            .expect("node added first")
            .segments
            .push(id.to_string());
        self
    }

    /// A text node `id` with a single text segment `{id}.s`
    pub fn text(self, parent: &str, id: &str, text: &str) -> Self {
        let seg = format!("{}.s", id);
        self.node(parent, id, NodeType::Text)
            .segment(id, &seg, SegmentType::Text, text)
    }

    pub fn snapshot(self) -> DocumentSnapshot {
        DocumentSnapshot {
            nodes: self.nodes,
            root_id: self.root_id,
            segments: self.segments,
            ..Default::default()
        }
    }

    pub fn build(self) -> Document {
        Document::from_snapshot(self.snapshot()).expect("fixture is a valid tree")
    }
}

pub fn children(doc: &Document, id: &str) -> Vec<String> {
    use outline_wasm::store::DocRead;
    doc.node(id).expect("node exists").children.clone()
}
