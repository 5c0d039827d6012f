//! Where the cursor lands when a node accepts a navigation request
//!
//! Resolution only picks a segment and a caret mode. Placing a caret at a
//! pixel position is left to the renderer, which knows its glyph boxes.

use serde::{Deserialize, Serialize};

use super::geometry::PageGeometry;
use super::request::{NavType, NavigationRequest};
use crate::models::{NodeId, SegmentId};
use crate::store::DocRead;

/// Default weight of the vertical distance when scoring a click against segments
pub const DEFAULT_ROW_DISTANCE_WEIGHT: f64 = 100.0;

/// How the caret is placed inside the chosen unit
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(tag = "mode", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Caret {
    Start,
    End,
    /// Char offset inside the segment
    Offset { offset: usize },
    /// Closest caret position to a page point
    AtPoint { page_x: f64, page_y: f64 },
    /// Closest caret position on the entry line to a page x
    NearestX { page_x: f64 },
    /// Leave the caret (and any native selection) where it is
    Keep,
}

/// Resolved focus for one node
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FocusDirective {
    pub node_id: NodeId,

    /// Segment receiving the cursor; `None` focuses the node itself
    pub segment_id: Option<SegmentId>,

    pub caret: Caret,

    #[serde(default)]
    pub preserve_native_selection: bool,
}

impl FocusDirective {
    pub fn segment(node_id: &str, segment_id: &str, caret: Caret) -> Self {
        Self {
            node_id: node_id.to_string(),
            segment_id: Some(segment_id.to_string()),
            caret,
            preserve_native_selection: false,
        }
    }
}

/// Pick the segment whose box is horizontally closest to `x`
///
/// Candidates are visited in the given order and only a strictly smaller
/// distance replaces the current best, so ties go to the first visited.
pub fn closest_by_x<'a, I>(geometry: &dyn PageGeometry, candidates: I, x: f64) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&str, f64)> = None;
    for seg_id in candidates {
        let Some(rect) = geometry.segment_rect(seg_id) else {
            continue;
        };
        let distance = rect.dx(x);
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((seg_id, distance));
        }
    }
    best.map(|(id, _)| id)
}

/// Pick the segment closest to a page point, scoring `weight * dy + dx`
pub fn closest_by_point<'a, I>(
    geometry: &dyn PageGeometry,
    candidates: I,
    x: f64,
    y: f64,
    weight: f64,
) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&str, f64)> = None;
    for seg_id in candidates {
        let Some(rect) = geometry.segment_rect(seg_id) else {
            continue;
        };
        let score = weight * rect.dy(y) + rect.dx(x);
        if best.map_or(true, |(_, s)| score < s) {
            best = Some((seg_id, score));
        }
    }
    best.map(|(id, _)| id)
}

/// Resolve a navigation request addressed to `node_id`
pub fn resolve_focus<D: DocRead + ?Sized>(
    doc: &D,
    geometry: &dyn PageGeometry,
    node_id: &str,
    request: &NavigationRequest,
    row_distance_weight: f64,
) -> Option<FocusDirective> {
    let node = doc.node(node_id)?;
    let nav = request.nav_type;
    let extra = &request.extra;

    if !node.has_segments() {
        let caret = match nav {
            NavType::FromRight | NavType::PrevSiblingDeleted => Caret::End,
            _ if nav.enters_from_below() => Caret::End,
            _ => Caret::Start,
        };
        return Some(FocusDirective {
            node_id: node_id.to_string(),
            segment_id: None,
            caret,
            preserve_native_selection: false,
        });
    }

    let segments: Vec<&str> = node.segments.iter().map(String::as_str).collect();
    let first = segments[0];
    let last = segments[segments.len() - 1];
    let hint = extra
        .segment_id
        .as_deref()
        .filter(|seg| segments.contains(seg));
    let kept_offset = |fallback: Caret| match extra.cursor_offset {
        Some(offset) => Caret::Offset { offset },
        None => fallback,
    };

    let (segment, caret) = match nav {
        NavType::FromLeft | NavType::SelfCreated => (hint.unwrap_or(first), Caret::Start),
        NavType::FromRight | NavType::PrevSiblingDeleted => (hint.unwrap_or(last), Caret::End),
        NavType::ArrowUp | NavType::ArrowUpFromFirstChild | NavType::FromDown => {
            match extra.cursor_page_x {
                Some(x) => {
                    let chosen = hint
                        .or_else(|| closest_by_x(geometry, segments.iter().rev().copied(), x))
                        .unwrap_or(last);
                    (chosen, Caret::NearestX { page_x: x })
                }
                None => (hint.unwrap_or(last), Caret::End),
            }
        }
        NavType::ArrowDown | NavType::ArrowDownFromLastChild | NavType::FromUp => {
            match extra.cursor_page_x {
                Some(x) => {
                    let chosen = hint
                        .or_else(|| closest_by_x(geometry, segments.iter().copied(), x))
                        .unwrap_or(first);
                    (chosen, Caret::NearestX { page_x: x })
                }
                None => (hint.unwrap_or(first), Caret::Start),
            }
        }
        NavType::ParentClick => match (extra.client_x, extra.client_y) {
            (Some(cx), Some(cy)) => {
                let (sx, sy) = geometry.scroll_offset();
                let (px, py) = (cx + sx, cy + sy);
                let chosen = hint
                    .or_else(|| {
                        closest_by_point(geometry, segments.iter().copied(), px, py, row_distance_weight)
                    })
                    .unwrap_or(first);
                (chosen, Caret::AtPoint { page_x: px, page_y: py })
            }
            _ => (hint.unwrap_or(first), Caret::Start),
        },
        NavType::Editing | NavType::Indented | NavType::Outdented => match hint {
            Some(seg) => (seg, kept_offset(Caret::Keep)),
            // an offset without its segment cannot be placed
            None => (first, Caret::Keep),
        },
        NavType::MergedFromNext => match (hint, extra.cursor_offset) {
            (Some(seg), offset) => (seg, offset.map_or(Caret::End, |offset| Caret::Offset { offset })),
            (None, Some(offset)) => {
                return doc.locate_offset(node_id, offset).map(|(seg, offset)| {
                    FocusDirective::segment(node_id, &seg, Caret::Offset { offset })
                });
            }
            (None, None) => (last, Caret::End),
        },
    };

    let caret = match caret {
        Caret::Offset { offset } => Caret::Offset {
            offset: offset.min(doc.segment(segment).map_or(0, |seg| seg.char_len())),
        },
        other => other,
    };
    Some(FocusDirective::segment(node_id, segment, caret))
}
