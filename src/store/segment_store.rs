//! Segment store: rich-text segment records keyed by id

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{Segment, SegmentId};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SegmentStore {
    segments: HashMap<SegmentId, Segment>,
}

impl SegmentStore {
    pub fn new(segments: HashMap<SegmentId, Segment>) -> Self {
        Self { segments }
    }

    pub fn get(&self, id: &str) -> Option<&Segment> {
        self.segments.get(id)
    }

    pub fn insert(&mut self, segment: Segment) -> Option<Segment> {
        self.segments.insert(segment.id.clone(), segment)
    }

    pub fn remove(&mut self, id: &str) -> Option<Segment> {
        self.segments.remove(id)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn as_map(&self) -> &HashMap<SegmentId, Segment> {
        &self.segments
    }
}
