//! Editor configuration, passed from JS as a plain object
//!
//! Every field is optional on the wire; missing fields take the defaults
//! below.

use serde::{Deserialize, Serialize};

use crate::layout::DEFAULT_BULLET_ANCHOR_RATIO;
use crate::navigation::DEFAULT_ROW_DISTANCE_WEIGHT;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Where on the first line a bullet's center sits (fraction of line height)
    pub bullet_anchor_ratio: f64,

    /// Weight of vertical distance when matching a click to a segment
    pub row_distance_weight: f64,

    /// Undo steps kept
    pub undo_limit: usize,

    /// Attribute carrying a segment id on rendered elements
    pub segment_attribute: String,

    /// Attribute carrying a node id on rendered elements
    pub node_attribute: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            bullet_anchor_ratio: DEFAULT_BULLET_ANCHOR_RATIO,
            row_distance_weight: DEFAULT_ROW_DISTANCE_WEIGHT,
            undo_limit: 100,
            segment_attribute: "data-segment-id".to_string(),
            node_attribute: "data-node-id".to_string(),
        }
    }
}
