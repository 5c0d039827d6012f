//! Copy-on-write overlay over a committed document
//!
//! Operations read and write through a draft. Reads fall through to the base
//! document for untouched records; writes stay in the overlay. `into_patches`
//! turns the overlay into a patch list with one entry per touched record, in
//! first-touch order, skipping records that end up unchanged.

use std::collections::HashMap;

use super::errors::EditError;
use crate::models::{Node, NodeId, Segment, SegmentId};
use crate::store::{DocRead, Document, Patch, PatchKey};

pub struct Draft<'a> {
    base: &'a Document,
    nodes: HashMap<NodeId, Option<Node>>,
    segments: HashMap<SegmentId, Option<Segment>>,
    order: Vec<PatchKey>,
}

impl<'a> Draft<'a> {
    pub fn new(base: &'a Document) -> Self {
        Self {
            base,
            nodes: HashMap::new(),
            segments: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn require_node(&self, id: &str) -> Result<&Node, EditError> {
        self.node(id)
            .ok_or_else(|| EditError::NodeNotFound(id.to_string()))
    }

    pub fn require_segment(&self, id: &str) -> Result<&Segment, EditError> {
        self.segment(id)
            .ok_or_else(|| EditError::SegmentNotFound(id.to_string()))
    }

    pub fn put_node(&mut self, node: Node) {
        self.touch(PatchKey::Node(node.id.clone()));
        self.nodes.insert(node.id.clone(), Some(node));
    }

    pub fn remove_node(&mut self, id: &str) {
        self.touch(PatchKey::Node(id.to_string()));
        self.nodes.insert(id.to_string(), None);
    }

    pub fn put_segment(&mut self, segment: Segment) {
        self.touch(PatchKey::Segment(segment.id.clone()));
        self.segments.insert(segment.id.clone(), Some(segment));
    }

    pub fn remove_segment(&mut self, id: &str) {
        self.touch(PatchKey::Segment(id.to_string()));
        self.segments.insert(id.to_string(), None);
    }

    /// Clone-modify-write one node record
    pub fn modify_node<F>(&mut self, id: &str, f: F) -> Result<(), EditError>
    where
        F: FnOnce(&mut Node),
    {
        let mut node = self.require_node(id)?.clone();
        f(&mut node);
        self.put_node(node);
        Ok(())
    }

    pub fn modify_segment<F>(&mut self, id: &str, f: F) -> Result<(), EditError>
    where
        F: FnOnce(&mut Segment),
    {
        let mut segment = self.require_segment(id)?.clone();
        f(&mut segment);
        self.put_segment(segment);
        Ok(())
    }

    /// Remove a node, its whole subtree and every segment they own
    ///
    /// Returns the removed node ids in pre-order.
    pub fn remove_subtree(&mut self, id: &str) -> Vec<NodeId> {
        let mut removed = Vec::new();
        let mut stack = vec![id.to_string()];
        while let Some(current) = stack.pop() {
            let Some(node) = self.node(&current).cloned() else {
                continue;
            };
            for seg_id in &node.segments {
                self.remove_segment(seg_id);
            }
            stack.extend(node.children.iter().rev().cloned());
            self.remove_node(&current);
            removed.push(current);
        }
        removed
    }

    fn touch(&mut self, key: PatchKey) {
        let known = match &key {
            PatchKey::Node(id) => self.nodes.contains_key(id),
            PatchKey::Segment(id) => self.segments.contains_key(id),
        };
        if !known {
            self.order.push(key);
        }
    }

    pub fn into_patches(mut self) -> Vec<Patch> {
        let mut patches = Vec::with_capacity(self.order.len());
        for key in std::mem::take(&mut self.order) {
            match key {
                PatchKey::Node(id) => match self.nodes.remove(&id).flatten() {
                    Some(node) => {
                        if self.base.node(&id) != Some(&node) {
                            patches.push(Patch::PutNode { node });
                        }
                    }
                    None => {
                        if self.base.node(&id).is_some() {
                            patches.push(Patch::RemoveNode { id });
                        }
                    }
                },
                PatchKey::Segment(id) => match self.segments.remove(&id).flatten() {
                    Some(segment) => {
                        if self.base.segment(&id) != Some(&segment) {
                            patches.push(Patch::PutSegment { segment });
                        }
                    }
                    None => {
                        if self.base.segment(&id).is_some() {
                            patches.push(Patch::RemoveSegment { id });
                        }
                    }
                },
            }
        }
        patches
    }
}

impl DocRead for Draft<'_> {
    fn root_id(&self) -> &str {
        self.base.root_id()
    }

    fn node(&self, id: &str) -> Option<&Node> {
        match self.nodes.get(id) {
            Some(entry) => entry.as_ref(),
            None => self.base.node(id),
        }
    }

    fn segment(&self, id: &str) -> Option<&Segment> {
        match self.segments.get(id) {
            Some(entry) => entry.as_ref(),
            None => self.base.segment(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NodeType;

    #[test]
    fn test_reads_fall_through_and_overlay() {
        let doc = Document::new("root");
        let mut draft = Draft::new(&doc);
        assert!(draft.node("root").is_some());

        draft.put_node(Node::new("a", NodeType::Text, Some("root".to_string())));
        draft.remove_node("root");
        assert!(draft.node("a").is_some());
        assert!(draft.node("root").is_none());
        assert!(doc.node("root").is_some());
    }

    #[test]
    fn test_into_patches_skips_noops() {
        let doc = Document::new("root");
        let mut draft = Draft::new(&doc);

        // Rewriting an identical record is not a change
        draft.modify_node("root", |_| {}).unwrap();
        // Created then removed inside the same draft leaves no trace
        draft.put_node(Node::new("tmp", NodeType::Text, None));
        draft.remove_node("tmp");

        assert!(draft.into_patches().is_empty());
    }

    #[test]
    fn test_into_patches_first_touch_order() {
        let doc = Document::new("root");
        let mut draft = Draft::new(&doc);
        draft.put_node(Node::new("a", NodeType::Text, Some("root".to_string())));
        draft
            .modify_node("root", |n| n.children.push("a".to_string()))
            .unwrap();
        draft.modify_node("a", |n| n.attr.bullet = Some("dot".to_string())).unwrap();

        let patches = draft.into_patches();
        let keys: Vec<PatchKey> = patches.iter().map(Patch::key).collect();
        assert_eq!(
            keys,
            vec![
                PatchKey::Node("a".to_string()),
                PatchKey::Node("root".to_string())
            ]
        );
        match &patches[0] {
            Patch::PutNode { node } => assert_eq!(node.attr.bullet.as_deref(), Some("dot")),
            other => panic!("unexpected patch {:?}", other),
        }
    }
}
