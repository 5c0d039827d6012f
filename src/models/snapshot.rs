//! Serializable whole-document snapshot
//!
//! This is the shape the external parser hands to the core and the shape the
//! core hands back for a whole-document save.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::node::{Node, NodeId, SegmentId};
use super::segment::Segment;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSnapshot {
    pub nodes: HashMap<NodeId, Node>,

    pub root_id: NodeId,

    #[serde(default)]
    pub segments: HashMap<SegmentId, Segment>,

    /// Asset table, carried through untouched
    #[serde(default)]
    pub assets: BTreeMap<String, serde_json::Value>,

    /// Cross-document reference table, carried through untouched
    #[serde(default)]
    pub refs: BTreeMap<String, serde_json::Value>,
}
