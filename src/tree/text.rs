//! Text-level operations: split, merge, create, and record updates

use super::draft::Draft;
use super::errors::EditError;
use super::ids::IdSource;
use super::outcome::{EditOutcome, OpData};
use super::structure::attached;
use crate::models::{Node, NodeAttr, NodeId, NodeType, Segment, SegmentId, DEFAULT_CHILD_DISPLAY};
use crate::navigation::{FocusExtra, FocusIntent, NavType};
use crate::store::{DocRead, Document};
use crate::utils::split_at_char;

/// Cut `id` at a node-level char offset; returns the new node id
pub(crate) fn split_in(
    draft: &mut Draft,
    ids: &mut dyn IdSource,
    id: &str,
    position: usize,
) -> Result<NodeId, EditError> {
    let (parent_id, index) = attached(draft, id, "split")?;
    let node = draft.require_node(id)?.clone();
    if !node.kind.is_text() {
        return Err(EditError::NotTextNode(id.to_string()));
    }
    let len = draft.node_char_len(id);
    if position > len {
        return Err(EditError::PositionOutOfRange {
            node: id.to_string(),
            position,
            len,
        });
    }

    let new_id = ids.next_node_id();
    let mut head: Vec<SegmentId> = Vec::new();
    let mut tail: Vec<SegmentId> = Vec::new();
    let mut start = 0;
    for seg_id in &node.segments {
        let segment = draft.require_segment(seg_id)?.clone();
        let seg_len = segment.char_len();
        let end = start + seg_len;
        if end <= position {
            head.push(segment.id);
        } else if start >= position {
            draft.modify_segment(seg_id, |s| s.parent_node_id = new_id.clone())?;
            tail.push(segment.id);
        } else if segment.kind.is_splittable() {
            let (left, right) = split_at_char(&segment.text_raw, position - start);
            let right_id = ids.next_segment_id();
            draft.modify_segment(seg_id, |s| s.text_raw = left)?;
            draft.put_segment(Segment::text(right_id.clone(), new_id.clone(), right));
            head.push(segment.id);
            tail.push(right_id);
        } else {
            // atomic runs are never cut; the whole run stays with the head
            head.push(segment.id);
        }
        start = end;
    }

    if head.is_empty() {
        let placeholder = ids.next_segment_id();
        draft.put_segment(Segment::text(placeholder.clone(), id, ""));
        head.push(placeholder);
    }
    if tail.is_empty() {
        let placeholder = ids.next_segment_id();
        draft.put_segment(Segment::text(placeholder.clone(), new_id.clone(), ""));
        tail.push(placeholder);
    }

    let mut created = Node::new(new_id.clone(), NodeType::Text, Some(parent_id.clone()));
    created.segments = tail;
    created.attr = node.attr.clone();
    draft.put_node(created);
    draft.modify_node(id, |n| n.segments = head)?;
    draft.modify_node(&parent_id, |p| p.children.insert(index + 1, new_id.clone()))?;
    Ok(new_id)
}

/// Fold `id` into its previous sibling; returns `(survivor id, merge offset)`
pub(crate) fn merge_in(draft: &mut Draft, id: &str) -> Result<(NodeId, usize), EditError> {
    let (parent_id, index) = attached(draft, id, "merge")?;
    if index == 0 {
        return Err(EditError::NoPreviousSibling(id.to_string()));
    }
    let prev = draft
        .require_node(&draft.require_node(&parent_id)?.children[index - 1])?
        .clone();
    if !prev.kind.is_text() {
        return Err(EditError::PreviousNotText(prev.id));
    }
    let node = draft.require_node(id)?.clone();
    if !node.kind.is_text() {
        return Err(EditError::NotTextNode(id.to_string()));
    }
    let merge_offset = draft.node_char_len(&prev.id);

    // Drop placeholders unless nothing else would remain
    let keep_fallback = prev
        .segments
        .iter()
        .chain(node.segments.iter())
        .all(|s| is_placeholder(draft, s));
    let mut front: Vec<SegmentId> = Vec::new();
    let mut back: Vec<SegmentId> = Vec::new();
    let mut dropped: Vec<SegmentId> = Vec::new();
    for seg_id in &prev.segments {
        if is_placeholder(draft, seg_id) && !(keep_fallback && front.is_empty()) {
            dropped.push(seg_id.clone());
        } else {
            front.push(seg_id.clone());
        }
    }
    for seg_id in &node.segments {
        let keep = keep_fallback && front.is_empty() && back.is_empty();
        if is_placeholder(draft, seg_id) && !keep {
            dropped.push(seg_id.clone());
        } else {
            back.push(seg_id.clone());
        }
    }

    // Coalesce adjacent text runs at the junction
    if let (Some(left_id), Some(right_id)) = (front.last().cloned(), back.first().cloned()) {
        let left = draft.require_segment(&left_id)?;
        let right = draft.require_segment(&right_id)?;
        if left.kind.is_splittable() && right.kind.is_splittable() {
            let joined = right.text_raw.clone();
            draft.modify_segment(&left_id, |s| s.text_raw.push_str(&joined))?;
            back.remove(0);
            dropped.push(right_id);
        }
    }

    for seg_id in &dropped {
        draft.remove_segment(seg_id);
    }
    for seg_id in &back {
        draft.modify_segment(seg_id, |s| s.parent_node_id = prev.id.clone())?;
    }
    for child in &node.children {
        draft.modify_node(child, |c| c.parent_id = Some(prev.id.clone()))?;
    }
    front.extend(back);
    draft.modify_node(&prev.id, |p| {
        p.segments = front;
        p.children.extend(node.children.iter().cloned());
        if !node.children.is_empty() && p.attr.child_display.is_none() {
            p.attr.child_display = Some(DEFAULT_CHILD_DISPLAY.to_string());
        }
    })?;
    draft.modify_node(&parent_id, |p| {
        p.children.remove(index);
    })?;
    draft.remove_node(id);
    Ok((prev.id, merge_offset))
}

fn is_placeholder(draft: &Draft, seg_id: &str) -> bool {
    draft.segment(seg_id).map_or(true, Segment::is_placeholder)
}

/// Insert an empty text node after `id` (first child when `id` is the root)
pub(crate) fn create_node_after_in(
    draft: &mut Draft,
    ids: &mut dyn IdSource,
    id: &str,
) -> Result<NodeId, EditError> {
    let (parent_id, index) = match attached(draft, id, "create after") {
        Ok((parent_id, index)) => (parent_id, index + 1),
        Err(EditError::RootImmutable { .. }) => (id.to_string(), 0),
        Err(err) => return Err(err),
    };
    let new_id = ids.next_node_id();
    let seg_id = ids.next_segment_id();
    let mut node = Node::new(new_id.clone(), NodeType::Text, Some(parent_id.clone()));
    node.segments = vec![seg_id.clone()];
    draft.put_segment(Segment::text(seg_id, new_id.clone(), ""));
    draft.put_node(node);
    draft.modify_node(&parent_id, |p| p.children.insert(index, new_id.clone()))?;
    Ok(new_id)
}

pub fn split(
    doc: &Document,
    ids: &mut dyn IdSource,
    id: &str,
    position: usize,
) -> Result<EditOutcome, EditError> {
    let mut draft = Draft::new(doc);
    let new_id = split_in(&mut draft, ids, id, position)?;
    Ok(EditOutcome {
        patches: draft.into_patches(),
        focus: Some(FocusIntent::new(new_id.clone(), NavType::SelfCreated)),
        data: OpData {
            created_node_id: Some(new_id),
            ..Default::default()
        },
    })
}

pub fn merge(doc: &Document, id: &str) -> Result<EditOutcome, EditError> {
    let mut draft = Draft::new(doc);
    let (survivor, offset) = merge_in(&mut draft, id)?;
    let extra = FocusExtra {
        cursor_offset: Some(offset),
        ..Default::default()
    };
    Ok(EditOutcome {
        patches: draft.into_patches(),
        focus: Some(FocusIntent::new(survivor, NavType::MergedFromNext).with_extra(extra)),
        data: OpData {
            merge_offset: Some(offset),
            ..Default::default()
        },
    })
}

pub fn create_node_after(
    doc: &Document,
    ids: &mut dyn IdSource,
    id: &str,
) -> Result<EditOutcome, EditError> {
    let mut draft = Draft::new(doc);
    let new_id = create_node_after_in(&mut draft, ids, id)?;
    Ok(EditOutcome {
        patches: draft.into_patches(),
        focus: Some(FocusIntent::new(new_id.clone(), NavType::SelfCreated)),
        data: OpData {
            created_node_id: Some(new_id),
            ..Default::default()
        },
    })
}

pub fn update_segment_text(
    doc: &Document,
    segment_id: &str,
    text: &str,
) -> Result<EditOutcome, EditError> {
    let mut draft = Draft::new(doc);
    draft.modify_segment(segment_id, |s| s.text_raw = text.to_string())?;
    Ok(EditOutcome {
        patches: draft.into_patches(),
        ..Default::default()
    })
}

pub fn update_node_attr(
    doc: &Document,
    node_id: &str,
    attr: &NodeAttr,
) -> Result<EditOutcome, EditError> {
    let mut draft = Draft::new(doc);
    draft.modify_node(node_id, |n| n.attr.merge_from(attr))?;
    Ok(EditOutcome {
        patches: draft.into_patches(),
        ..Default::default()
    })
}
