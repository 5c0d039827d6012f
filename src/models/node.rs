//! Outline node records
//!
//! A node is one entry of the outline tree. Nodes reference their children
//! and segments by id; the records themselves live in the node store.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// Opaque node identifier
pub type NodeId = String;

/// Opaque segment identifier
pub type SegmentId = String;

/// Display value written to `childDisplay` when a node first receives children via indent
pub const DEFAULT_CHILD_DISPLAY: &str = "ul";

/// Kind of outline entry
///
/// Serialized as its bare tag. Tags this core does not model load as
/// `Unknown` and keep their original spelling for the next save.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeType {
    Text,
    Panel,
    Divider,
    Key,
    TopRight,
    /// Anonymous pass-through node (serialized as `none`)
    Anonymous,
    Array,
    Container,
    Latex,
    Image,
    Video,
    Timeline,
    /// Any tag this core does not know about
    Unknown(String),
}

impl NodeType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "text" => NodeType::Text,
            "panel" => NodeType::Panel,
            "divider" => NodeType::Divider,
            "key" => NodeType::Key,
            "top-right" => NodeType::TopRight,
            "none" => NodeType::Anonymous,
            "array" => NodeType::Array,
            "container" => NodeType::Container,
            "latex" => NodeType::Latex,
            "image" => NodeType::Image,
            "video" => NodeType::Video,
            "timeline" => NodeType::Timeline,
            other => NodeType::Unknown(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            NodeType::Text => "text",
            NodeType::Panel => "panel",
            NodeType::Divider => "divider",
            NodeType::Key => "key",
            NodeType::TopRight => "top-right",
            NodeType::Anonymous => "none",
            NodeType::Array => "array",
            NodeType::Container => "container",
            NodeType::Latex => "latex",
            NodeType::Image => "image",
            NodeType::Video => "video",
            NodeType::Timeline => "timeline",
            NodeType::Unknown(tag) => tag,
        }
    }

    /// Nodes that hold editable rich text
    pub fn is_text(&self) -> bool {
        matches!(self, NodeType::Text)
    }

    /// Nodes rendered without content of their own, handing display to their children
    pub fn is_pass_through(&self) -> bool {
        matches!(
            self,
            NodeType::Anonymous | NodeType::Array | NodeType::Container
        )
    }

    /// Structural nodes whose bullet aligns with a header control
    pub fn has_header_control(&self) -> bool {
        matches!(
            self,
            NodeType::Panel | NodeType::Divider | NodeType::Key | NodeType::Timeline
        )
    }
}

impl Serialize for NodeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for NodeType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(NodeType::from_tag(&tag))
    }
}

/// Display directives attached to a node
///
/// Known keys are typed; anything else the parser supplies is kept in `extra`
/// and written back unchanged.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeAttr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_display: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_class: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel_default: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_num: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bullet: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl NodeAttr {
    /// Overlay every directive set in `other` onto `self`
    pub fn merge_from(&mut self, other: &NodeAttr) {
        if other.child_display.is_some() {
            self.child_display = other.child_display.clone();
        }
        if other.self_class.is_some() {
            self.self_class = other.self_class.clone();
        }
        if other.panel_default.is_some() {
            self.panel_default = other.panel_default.clone();
        }
        if other.value_num.is_some() {
            self.value_num = other.value_num;
        }
        if other.bullet.is_some() {
            self.bullet = other.bullet.clone();
        }
        for (key, value) in &other.extra {
            self.extra.insert(key.clone(), value.clone());
        }
    }
}

/// One entry of the outline
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,

    #[serde(rename = "type")]
    pub kind: NodeType,

    /// Back-reference to the parent; `None` only for the document root
    #[serde(default)]
    pub parent_id: Option<NodeId>,

    /// Child ids in document order
    #[serde(default)]
    pub children: Vec<NodeId>,

    /// Segment ids in reading order (text-bearing nodes only)
    #[serde(default)]
    pub segments: Vec<SegmentId>,

    #[serde(default)]
    pub attr: NodeAttr,
}

impl Node {
    /// Create a node with no children and no segments
    pub fn new(id: impl Into<NodeId>, kind: NodeType, parent_id: Option<NodeId>) -> Self {
        Self {
            id: id.into(),
            kind,
            parent_id,
            children: Vec::new(),
            segments: Vec::new(),
            attr: NodeAttr::default(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn has_segments(&self) -> bool {
        !self.segments.is_empty()
    }

    /// Position of `child` in this node's children list
    pub fn child_index(&self, child: &str) -> Option<usize> {
        self.children.iter().position(|c| c == child)
    }

    /// Position of `segment` in this node's segment list
    pub fn segment_index(&self, segment: &str) -> Option<usize> {
        self.segments.iter().position(|s| s == segment)
    }
}
