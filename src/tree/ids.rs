//! Id generation for records created by edits

use uuid::Uuid;

use crate::models::{NodeId, SegmentId};

pub trait IdSource {
    fn next_node_id(&mut self) -> NodeId;

    fn next_segment_id(&mut self) -> SegmentId;
}

/// Random v4 UUIDs (the default in the browser)
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_node_id(&mut self) -> NodeId {
        format!("n-{}", Uuid::new_v4())
    }

    fn next_segment_id(&mut self) -> SegmentId {
        format!("s-{}", Uuid::new_v4())
    }
}

/// Deterministic ids: `node-1`, `node-2`, ... and `seg-1`, `seg-2`, ...
#[derive(Clone, Debug, Default)]
pub struct SequentialIds {
    nodes: u64,
    segments: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for SequentialIds {
    fn next_node_id(&mut self) -> NodeId {
        self.nodes += 1;
        format!("node-{}", self.nodes)
    }

    fn next_segment_id(&mut self) -> SegmentId {
        self.segments += 1;
        format!("seg-{}", self.segments)
    }
}
