//! Document: node store + segment store + the opaque parser tables
//!
//! The document is the committed state the renderer reads. It changes only
//! through `apply`, which writes a whole patch list at once.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::errors::StoreError;
use super::node_store::NodeStore;
use super::patch::Patch;
use super::read::DocRead;
use super::segment_store::SegmentStore;
use crate::models::{DocumentSnapshot, Node, NodeType, Segment};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Document {
    nodes: NodeStore,
    segments: SegmentStore,
    assets: BTreeMap<String, serde_json::Value>,
    refs: BTreeMap<String, serde_json::Value>,
}

impl Document {
    /// Empty document: a single anonymous root
    pub fn new(root_id: &str) -> Self {
        Self {
            nodes: NodeStore::with_root(root_id, NodeType::Anonymous),
            ..Default::default()
        }
    }

    /// Build a document from parser output, checking structural integrity
    pub fn from_snapshot(snapshot: DocumentSnapshot) -> Result<Self, StoreError> {
        let doc = Self {
            nodes: NodeStore::new(snapshot.root_id, snapshot.nodes),
            segments: SegmentStore::new(snapshot.segments),
            assets: snapshot.assets,
            refs: snapshot.refs,
        };
        doc.validate()?;
        Ok(doc)
    }

    /// Serializable copy of the whole document
    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            nodes: self.nodes.as_map().clone(),
            root_id: self.nodes.root_id().to_string(),
            segments: self.segments.as_map().clone(),
            assets: self.assets.clone(),
            refs: self.refs.clone(),
        }
    }

    pub fn nodes(&self) -> &NodeStore {
        &self.nodes
    }

    pub fn segments(&self) -> &SegmentStore {
        &self.segments
    }

    pub fn assets(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.assets
    }

    pub fn refs(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.refs
    }

    /// Point mutation of one node record (display-only edits)
    pub fn update_node<F>(&mut self, id: &str, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Node),
    {
        self.nodes.update(id, f)
    }

    /// Apply a patch list in order
    pub fn apply(&mut self, patches: &[Patch]) {
        for patch in patches {
            match patch {
                Patch::PutNode { node } => {
                    self.nodes.insert(node.clone());
                }
                Patch::RemoveNode { id } => {
                    if self.nodes.remove(id).is_none() {
                        log::warn!("patch removes unknown node {}", id);
                    }
                }
                Patch::PutSegment { segment } => {
                    self.segments.insert(segment.clone());
                }
                Patch::RemoveSegment { id } => {
                    if self.segments.remove(id).is_none() {
                        log::warn!("patch removes unknown segment {}", id);
                    }
                }
            }
        }
    }

    /// Patch list that undoes `patches` when applied after them
    ///
    /// Must be computed against the state *before* `patches` are applied.
    pub fn inverse_of(&self, patches: &[Patch]) -> Vec<Patch> {
        let mut inverse = Vec::with_capacity(patches.len());
        for patch in patches.iter().rev() {
            let undo = match patch {
                Patch::PutNode { node } => match self.nodes.get(&node.id) {
                    Some(old) => Patch::PutNode { node: old.clone() },
                    None => Patch::RemoveNode { id: node.id.clone() },
                },
                Patch::RemoveNode { id } => match self.nodes.get(id) {
                    Some(old) => Patch::PutNode { node: old.clone() },
                    None => continue,
                },
                Patch::PutSegment { segment } => match self.segments.get(&segment.id) {
                    Some(old) => Patch::PutSegment { segment: old.clone() },
                    None => Patch::RemoveSegment {
                        id: segment.id.clone(),
                    },
                },
                Patch::RemoveSegment { id } => match self.segments.get(id) {
                    Some(old) => Patch::PutSegment {
                        segment: old.clone(),
                    },
                    None => continue,
                },
            };
            inverse.push(undo);
        }
        inverse
    }

    /// Check the tree invariant over every node reachable from the root
    ///
    /// - the root exists and has no parent
    /// - every listed child exists and points back at the listing parent
    /// - no node is reachable twice
    /// - every listed segment exists and is owned by the listing node
    pub fn validate(&self) -> Result<(), StoreError> {
        let root_id = self.nodes.root_id();
        let root = self
            .nodes
            .get(root_id)
            .ok_or_else(|| StoreError::MissingRoot(root_id.to_string()))?;
        if root.parent_id.is_some() {
            return Err(StoreError::RootHasParent(root_id.to_string()));
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if !seen.insert(node.id.as_str()) {
                return Err(StoreError::DuplicateReachable(node.id.clone()));
            }
            for seg_id in &node.segments {
                let segment = self
                    .segments
                    .get(seg_id)
                    .ok_or_else(|| StoreError::SegmentNotFound(seg_id.clone()))?;
                if segment.parent_node_id != node.id {
                    return Err(StoreError::SegmentOwnerMismatch {
                        segment: seg_id.clone(),
                        expected: node.id.clone(),
                        found: segment.parent_node_id.clone(),
                    });
                }
            }
            for child_id in &node.children {
                let child = self
                    .nodes
                    .get(child_id)
                    .ok_or_else(|| StoreError::NodeNotFound(child_id.clone()))?;
                if child.parent_id.as_deref() != Some(node.id.as_str()) {
                    return Err(StoreError::ParentMismatch {
                        child: child_id.clone(),
                        expected: node.id.clone(),
                        found: child.parent_id.clone(),
                    });
                }
                stack.push(child);
            }
        }

        let orphans = self.nodes.len().saturating_sub(seen.len());
        if orphans > 0 {
            log::debug!("{} node(s) are not reachable from root {}", orphans, root_id);
        }
        Ok(())
    }
}

impl DocRead for Document {
    fn root_id(&self) -> &str {
        self.nodes.root_id()
    }

    fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    fn segment(&self, id: &str) -> Option<&Segment> {
        self.segments.get(id)
    }
}
