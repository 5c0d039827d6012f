//! Result of a successful tree operation

use serde::{Deserialize, Serialize};

use crate::models::NodeId;
use crate::navigation::FocusIntent;
use crate::store::Patch;

/// Operation-specific values reported back to the caller
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OpData {
    /// Node created by `split` / `createNodeAfter`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_node_id: Option<NodeId>,

    /// Char offset in the surviving node where the merged text begins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge_offset: Option<usize>,

    /// Previous sibling of a deleted node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_sibling_id: Option<NodeId>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EditOutcome {
    pub patches: Vec<Patch>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<FocusIntent>,

    #[serde(default)]
    pub data: OpData,
}

impl EditOutcome {
    pub fn is_noop(&self) -> bool {
        self.patches.is_empty()
    }
}
