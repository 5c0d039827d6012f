//! Rich-text segment records
//!
//! A segment is one inline run inside a text-bearing node. Segments are
//! exclusively owned by their parent node.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::node::{NodeId, SegmentId};

/// Kind of inline run
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SegmentType {
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "latex_inline")]
    LatexInline,
    #[serde(rename = "ref-asset")]
    RefAsset,
    #[serde(rename = "ref-bib")]
    RefBib,
}

impl SegmentType {
    /// Only plain text can be cut at an interior offset or joined with a neighbour
    pub fn is_splittable(self) -> bool {
        matches!(self, SegmentType::Text)
    }
}

/// One inline run of rich text
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: SegmentId,

    pub parent_node_id: NodeId,

    #[serde(rename = "type")]
    pub kind: SegmentType,

    /// Raw source text (plain text, LaTeX source, or reference label)
    #[serde(default)]
    pub text_raw: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bib_keys: Vec<String>,

    /// Parser fields this core does not interpret, written back unchanged
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Segment {
    /// Create a plain text segment
    pub fn text(id: impl Into<SegmentId>, parent: impl Into<NodeId>, text: impl Into<String>) -> Self {
        Self::new(id, parent, SegmentType::Text, text)
    }

    pub fn new(
        id: impl Into<SegmentId>,
        parent: impl Into<NodeId>,
        kind: SegmentType,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            parent_node_id: parent.into(),
            kind,
            text_raw: text.into(),
            asset_id: None,
            ref_id: None,
            target_id: None,
            bib_keys: Vec::new(),
            extra: BTreeMap::new(),
        }
    }

    /// Length of `text_raw` in chars (the unit of every core offset)
    pub fn char_len(&self) -> usize {
        self.text_raw.chars().count()
    }

    /// Empty plain-text runs are placeholders that keep a node focusable
    pub fn is_placeholder(&self) -> bool {
        self.kind == SegmentType::Text && self.text_raw.is_empty()
    }
}
