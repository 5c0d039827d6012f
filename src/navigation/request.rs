//! Navigation requests: counter-gated "you now own the cursor" signals
//!
//! One request slot exists per node. Triggering bumps the slot's counter;
//! a consumer handles the slot only when the counter is above the last one it
//! processed.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{NodeId, SegmentId};
use crate::store::CounterGate;

/// How the cursor arrives at the target node
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum NavType {
    FromLeft,
    FromRight,
    FromUp,
    FromDown,
    ArrowUp,
    ArrowDown,
    ArrowUpFromFirstChild,
    ArrowDownFromLastChild,
    ParentClick,
    Editing,
    PrevSiblingDeleted,
    SelfCreated,
    Indented,
    Outdented,
    MergedFromNext,
}

impl NavType {
    /// Types that pick the last segment and search backward
    pub fn enters_from_below(self) -> bool {
        matches!(
            self,
            NavType::ArrowUp | NavType::ArrowUpFromFirstChild | NavType::FromDown
        )
    }
}

/// Optional payload carried by a request
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FocusExtra {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor_page_x: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor_page_y: Option<f64>,

    /// Click position in client (viewport) coordinates, for `parentClick`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_x: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_y: Option<f64>,

    /// Segment that should receive the cursor, when the sender knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_id: Option<SegmentId>,

    /// Char offset to restore (inside `segment_id`, or node-level for `mergedFromNext`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor_offset: Option<usize>,
}

impl FocusExtra {
    pub fn at_x(cursor_page_x: Option<f64>) -> Self {
        Self {
            cursor_page_x,
            ..Default::default()
        }
    }

    pub fn in_segment(segment_id: impl Into<SegmentId>, cursor_offset: Option<usize>) -> Self {
        Self {
            segment_id: Some(segment_id.into()),
            cursor_offset,
            ..Default::default()
        }
    }
}

/// A focus request a tree operation wants raised once its patches land
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FocusIntent {
    pub node_id: NodeId,
    #[serde(rename = "type")]
    pub nav_type: NavType,
    #[serde(default)]
    pub extra: FocusExtra,
}

impl FocusIntent {
    pub fn new(node_id: impl Into<NodeId>, nav_type: NavType) -> Self {
        Self {
            node_id: node_id.into(),
            nav_type,
            extra: FocusExtra::default(),
        }
    }

    pub fn with_extra(mut self, extra: FocusExtra) -> Self {
        self.extra = extra;
        self
    }
}

/// The live request in one node's slot
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NavigationRequest {
    pub counter: u64,

    #[serde(rename = "type")]
    pub nav_type: NavType,

    #[serde(flatten)]
    pub extra: FocusExtra,

    /// Board-wide issue order, used to replay pending requests in sequence
    #[serde(skip)]
    pub issued_at: u64,
}

/// Per-node request slots
#[derive(Clone, Debug, Default)]
pub struct NavigationBoard {
    requests: HashMap<NodeId, NavigationRequest>,
    tick: u64,
}

impl NavigationBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a request for `node_id`, returning the slot's new counter
    pub fn trigger(&mut self, node_id: &str, nav_type: NavType, extra: FocusExtra) -> u64 {
        self.tick += 1;
        let tick = self.tick;
        let counter = self.requests.get(node_id).map_or(0, |r| r.counter) + 1;
        self.requests.insert(
            node_id.to_string(),
            NavigationRequest {
                counter,
                nav_type,
                extra,
                issued_at: tick,
            },
        );
        counter
    }

    pub fn get(&self, node_id: &str) -> Option<&NavigationRequest> {
        self.requests.get(node_id)
    }

    /// Requests the gate has not processed yet, oldest first
    pub fn pending(&self, gate: &CounterGate<NodeId>) -> Vec<(NodeId, NavigationRequest)> {
        let mut out: Vec<(NodeId, NavigationRequest)> = self
            .requests
            .iter()
            .filter(|(node_id, req)| gate.is_pending(*node_id, req.counter))
            .map(|(node_id, req)| (node_id.clone(), req.clone()))
            .collect();
        out.sort_by_key(|(_, req)| req.issued_at);
        out
    }
}
