//! Declarative store patches
//!
//! Tree edit operations never mutate the stores directly. They describe the
//! records to write or drop, and the editor applies the whole list in one
//! store update.

use serde::{Deserialize, Serialize};

use crate::models::{Node, NodeId, Segment, SegmentId};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Patch {
    /// Write the full node record (insert or replace)
    PutNode { node: Node },
    RemoveNode { id: NodeId },
    /// Write the full segment record (insert or replace)
    PutSegment { segment: Segment },
    RemoveSegment { id: SegmentId },
}

/// Identity of the record a patch touches
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PatchKey {
    Node(NodeId),
    Segment(SegmentId),
}

impl Patch {
    pub fn key(&self) -> PatchKey {
        match self {
            Patch::PutNode { node } => PatchKey::Node(node.id.clone()),
            Patch::RemoveNode { id } => PatchKey::Node(id.clone()),
            Patch::PutSegment { segment } => PatchKey::Segment(segment.id.clone()),
            Patch::RemoveSegment { id } => PatchKey::Segment(id.clone()),
        }
    }
}
