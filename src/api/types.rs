//! Shared types for the WASM API
//!
//! Records returned to JavaScript that have no counterpart in the core.

use serde::{Deserialize, Serialize};

use crate::bullet::BulletKey;
use crate::models::{NodeId, OpResult};
use crate::navigation::FocusIntent;
use crate::store::Patch;
use crate::tree::{EditError, EditOutcome, OpData};

/// Result of an edit operation: which nodes to re-read and where focus goes
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EditResult {
    /// Nodes whose record or segments changed, in patch order
    pub dirty_nodes: Vec<NodeId>,
    pub removed_nodes: Vec<NodeId>,
    pub focus: Option<FocusIntent>,
    #[serde(flatten)]
    pub data: OpData,
}

impl EditResult {
    pub fn from_outcome(outcome: EditOutcome) -> Self {
        let mut dirty_nodes: Vec<NodeId> = Vec::new();
        let mut removed_nodes = Vec::new();
        for patch in &outcome.patches {
            let dirty = match patch {
                Patch::PutNode { node } => &node.id,
                Patch::PutSegment { segment } => &segment.parent_node_id,
                Patch::RemoveNode { id } => {
                    removed_nodes.push(id.clone());
                    continue;
                }
                // the owner is always rewritten or removed alongside
                Patch::RemoveSegment { .. } => continue,
            };
            if !dirty_nodes.contains(dirty) {
                dirty_nodes.push(dirty.clone());
            }
        }
        dirty_nodes.retain(|id| !removed_nodes.contains(id));
        Self {
            dirty_nodes,
            removed_nodes,
            focus: outcome.focus,
            data: outcome.data,
        }
    }
}

/// `{code, message, data}` envelope for an engine result
pub fn edit_response(result: Result<EditOutcome, EditError>) -> OpResult<EditResult> {
    OpResult::from_result(result.map(EditResult::from_outcome))
}

/// One served bullet request
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BulletServed {
    pub key: BulletKey,
    pub result: OpResult<f64>,
}
