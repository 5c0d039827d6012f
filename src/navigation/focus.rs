//! Which unit currently owns the cursor

use serde::{Deserialize, Serialize};

use super::resolve::{Caret, FocusDirective};
use crate::models::{NodeId, SegmentId};
use crate::store::DocRead;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(tag = "state", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum FocusState {
    #[default]
    Idle,
    Focused {
        node_id: NodeId,
        segment_id: Option<SegmentId>,
        /// Last caret offset the renderer reported, in chars
        caret_offset: Option<usize>,
    },
}

#[derive(Clone, Debug, Default)]
pub struct FocusTracker {
    state: FocusState,
}

impl FocusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FocusState {
        &self.state
    }

    /// A resolved directive lands; any previously focused unit loses focus
    pub fn focus(&mut self, directive: &FocusDirective) {
        let caret_offset = match directive.caret {
            Caret::Start => Some(0),
            Caret::Offset { offset } => Some(offset),
            // an offset only means something inside the segment it was read from
            Caret::Keep if self.focused_segment() == directive.segment_id.as_deref() => {
                self.caret_offset()
            }
            _ => None,
        };
        self.state = FocusState::Focused {
            node_id: directive.node_id.clone(),
            segment_id: directive.segment_id.clone(),
            caret_offset,
        };
    }

    /// The renderer reports where the caret is now
    pub fn set_caret(&mut self, offset: usize) {
        if let FocusState::Focused { caret_offset, .. } = &mut self.state {
            *caret_offset = Some(offset);
        }
    }

    /// Leave `focused` if `node_id` currently holds it
    pub fn blur(&mut self, node_id: &str) {
        if self.focused_node() == Some(node_id) {
            self.state = FocusState::Idle;
        }
    }

    /// Drop focus held by a node that no longer exists
    pub fn forget_missing<D: DocRead + ?Sized>(&mut self, doc: &D) {
        if let Some(node_id) = self.focused_node() {
            if doc.node(node_id).is_none() {
                log::debug!("focused node {} was removed", node_id);
                self.state = FocusState::Idle;
            }
        }
    }

    pub fn focused_node(&self) -> Option<&str> {
        match &self.state {
            FocusState::Focused { node_id, .. } => Some(node_id),
            FocusState::Idle => None,
        }
    }

    pub fn focused_segment(&self) -> Option<&str> {
        match &self.state {
            FocusState::Focused { segment_id, .. } => segment_id.as_deref(),
            FocusState::Idle => None,
        }
    }

    pub fn caret_offset(&self) -> Option<usize> {
        match &self.state {
            FocusState::Focused { caret_offset, .. } => *caret_offset,
            FocusState::Idle => None,
        }
    }
}

/// Focus to force when a pointer selection spans two segments
///
/// Both native selection endpoints are resolved to segment ids first. When
/// they differ, the end segment takes focus without touching the selection.
pub fn cross_segment_focus<D: DocRead + ?Sized>(
    doc: &D,
    anchor_segment: Option<&str>,
    focus_segment: Option<&str>,
) -> Option<FocusDirective> {
    let (anchor, end) = (anchor_segment?, focus_segment?);
    if anchor == end {
        return None;
    }
    let segment = doc.segment(end)?;
    Some(FocusDirective {
        node_id: segment.parent_node_id.clone(),
        segment_id: Some(segment.id.clone()),
        caret: Caret::Keep,
        preserve_native_selection: true,
    })
}
