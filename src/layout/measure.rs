//! Layout measurement capability
//!
//! Bullet alignment needs a handful of numbers about a rendered element,
//! all relative to the top of the bullet's container. A backend reports the
//! raw metrics; the anchor rule turns them into one vertical offset.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fraction of the first line's height where a bullet's center sits
pub const DEFAULT_BULLET_ANCHOR_RATIO: f64 = 0.6;

/// Element to measure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeasureTarget<'a> {
    Segment(&'a str),
    Node(&'a str),
}

/// Raw metrics of a rendered element, relative to the container top
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ElementMetrics {
    pub top: f64,
    pub height: f64,

    /// Computed line height; `None` when the style says `normal`
    #[serde(default)]
    pub line_height: Option<f64>,

    /// `(top, height)` of the header control, for structural nodes
    #[serde(default)]
    pub header: Option<(f64, f64)>,
}

/// How a vertical anchor is derived from an element's metrics
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnchorRule {
    /// `top + ratio * line height` of the first line
    FirstLine { ratio: f64 },
    /// Middle of the box
    BoxCenter,
    /// `top + ratio * box height`
    BoxRatio { ratio: f64 },
    /// Middle of the header control
    HeaderCenter,
}

impl AnchorRule {
    pub fn anchor(&self, metrics: &ElementMetrics) -> Option<f64> {
        match *self {
            AnchorRule::FirstLine { ratio } => {
                let line = metrics.line_height.unwrap_or(metrics.height);
                Some(metrics.top + ratio * line)
            }
            AnchorRule::BoxCenter => Some(metrics.top + metrics.height / 2.0),
            AnchorRule::BoxRatio { ratio } => Some(metrics.top + ratio * metrics.height),
            AnchorRule::HeaderCenter => metrics.header.map(|(top, height)| top + height / 2.0),
        }
    }
}

pub trait LayoutMeasurer {
    /// Metrics of `target` relative to the nearest ancestor with class `container_class`
    ///
    /// `None` when the element is not rendered (yet).
    fn measure(&self, target: MeasureTarget<'_>, container_class: &str) -> Option<ElementMetrics>;
}

/// Host-supplied metrics keyed by element id (segment or node), ignoring the container
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct MapMeasurer {
    #[serde(default)]
    pub segments: HashMap<String, ElementMetrics>,
    #[serde(default)]
    pub nodes: HashMap<String, ElementMetrics>,
}

impl MapMeasurer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_segment(mut self, id: &str, metrics: ElementMetrics) -> Self {
        self.segments.insert(id.to_string(), metrics);
        self
    }

    pub fn with_node(mut self, id: &str, metrics: ElementMetrics) -> Self {
        self.nodes.insert(id.to_string(), metrics);
        self
    }
}

impl LayoutMeasurer for MapMeasurer {
    fn measure(&self, target: MeasureTarget<'_>, _container_class: &str) -> Option<ElementMetrics> {
        match target {
            MeasureTarget::Segment(id) => self.segments.get(id).copied(),
            MeasureTarget::Node(id) => self.nodes.get(id).copied(),
        }
    }
}
