//! Unfocus: the cursor leaves a segment across one of its edges
//!
//! The result is another focus request, either for a sibling segment in the
//! same node or forwarded to the neighbouring node. At the document edges
//! nothing is forwarded and the cursor stays put.

use serde::{Deserialize, Serialize};

use super::geometry::{PageGeometry, Rect};
use super::request::{FocusExtra, FocusIntent, NavType};
use super::targets::{down_target, up_target};
use crate::models::{NodeId, SegmentId};
use crate::store::DocRead;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum UnfocusDirection {
    Left,
    Right,
    Up,
    Down,
}

/// A unit reporting that the cursor left it
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UnfocusRequest {
    pub node_id: NodeId,

    /// Segment the cursor left; `None` when the node itself was focused
    #[serde(default)]
    pub segment_id: Option<SegmentId>,

    #[serde(rename = "type")]
    pub direction: UnfocusDirection,

    #[serde(default)]
    pub cursor_page_x: Option<f64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", content = "intent", rename_all = "camelCase")]
pub enum UnfocusOutcome {
    /// Another segment of the same node takes the cursor
    WithinNode(FocusIntent),
    /// The request is handed to a neighbouring node
    Forwarded(FocusIntent),
    /// Document edge; focus stays where it was
    Boundary,
}

impl UnfocusOutcome {
    pub fn intent(&self) -> Option<&FocusIntent> {
        match self {
            UnfocusOutcome::WithinNode(intent) | UnfocusOutcome::Forwarded(intent) => Some(intent),
            UnfocusOutcome::Boundary => None,
        }
    }
}

/// Closest segment of `candidates` on another row, nearest row first then nearest x
fn closest_on_row<'a>(
    geometry: &dyn PageGeometry,
    from: Rect,
    candidates: impl Iterator<Item = &'a str>,
    above: bool,
    x: f64,
) -> Option<&'a str> {
    let mut best: Option<(&str, f64, f64)> = None;
    for seg_id in candidates {
        let Some(rect) = geometry.segment_rect(seg_id) else {
            continue;
        };
        let row_gap = if above {
            from.top - rect.center_y()
        } else {
            rect.center_y() - from.bottom()
        };
        if row_gap <= 0.0 {
            continue;
        }
        let dx = rect.dx(x);
        let better = match best {
            None => true,
            Some((_, gap, bdx)) => row_gap < gap || (row_gap == gap && dx < bdx),
        };
        if better {
            best = Some((seg_id, row_gap, dx));
        }
    }
    best.map(|(id, _, _)| id)
}

pub fn handle_unfocus<D: DocRead + ?Sized>(
    doc: &D,
    geometry: &dyn PageGeometry,
    request: &UnfocusRequest,
) -> UnfocusOutcome {
    let Some(node) = doc.node(&request.node_id) else {
        log::warn!("unfocus from unknown node {}", request.node_id);
        return UnfocusOutcome::Boundary;
    };
    let node_id = node.id.as_str();
    let index = request
        .segment_id
        .as_deref()
        .and_then(|seg| node.segment_index(seg));
    let x = request.cursor_page_x;

    match request.direction {
        UnfocusDirection::Left => {
            if let Some(i) = index.filter(|i| *i > 0) {
                let extra = FocusExtra::in_segment(node.segments[i - 1].clone(), None);
                return UnfocusOutcome::WithinNode(
                    FocusIntent::new(node_id, NavType::FromRight).with_extra(extra),
                );
            }
            forward(up_target(doc, node_id), NavType::FromRight, FocusExtra::default())
        }
        UnfocusDirection::Right => {
            if let Some(i) = index.filter(|i| i + 1 < node.segments.len()) {
                let extra = FocusExtra::in_segment(node.segments[i + 1].clone(), None);
                return UnfocusOutcome::WithinNode(
                    FocusIntent::new(node_id, NavType::FromLeft).with_extra(extra),
                );
            }
            forward(down_target(doc, node_id), NavType::FromLeft, FocusExtra::default())
        }
        UnfocusDirection::Up | UnfocusDirection::Down => {
            let above = request.direction == UnfocusDirection::Up;
            let within = index.zip(x).and_then(|(i, x)| {
                let from = geometry.segment_rect(&node.segments[i])?;
                let others = node
                    .segments
                    .iter()
                    .enumerate()
                    .filter(move |(j, _)| *j != i)
                    .map(|(_, s)| s.as_str());
                closest_on_row(geometry, from, others, above, x)
            });
            let nav = if above {
                NavType::ArrowUp
            } else {
                NavType::ArrowDown
            };
            if let Some(seg) = within {
                let extra = FocusExtra {
                    segment_id: Some(seg.to_string()),
                    cursor_page_x: x,
                    ..Default::default()
                };
                return UnfocusOutcome::WithinNode(FocusIntent::new(node_id, nav).with_extra(extra));
            }

            let extra = FocusExtra::at_x(x);
            if above {
                let target = up_target(doc, node_id);
                let nav = match (&target, &node.parent_id) {
                    (Some(t), Some(parent)) if t == parent => NavType::ArrowUpFromFirstChild,
                    _ => NavType::ArrowUp,
                };
                forward(target, nav, extra)
            } else {
                let target = down_target(doc, node_id);
                let first_child = node.children.first();
                let next_sibling = doc.next_sibling(node_id).map(|n| &n.id);
                let nav = match &target {
                    Some(t) if Some(t) == first_child || Some(t) == next_sibling => {
                        NavType::ArrowDown
                    }
                    _ => NavType::ArrowDownFromLastChild,
                };
                forward(target, nav, extra)
            }
        }
    }
}

fn forward(target: Option<NodeId>, nav: NavType, extra: FocusExtra) -> UnfocusOutcome {
    match target {
        Some(node_id) => UnfocusOutcome::Forwarded(FocusIntent::new(node_id, nav).with_extra(extra)),
        None => {
            log::debug!("unfocus {:?} reached the document edge", nav);
            UnfocusOutcome::Boundary
        }
    }
}
