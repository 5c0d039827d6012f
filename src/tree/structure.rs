//! Structural operations: indent, outdent, move, delete
//!
//! Each operation has a `*_in` form that works on a draft (so multi-node
//! operations can fold them) and a public form that runs it against the
//! committed document and packages the outcome.

use super::draft::Draft;
use super::errors::EditError;
use super::outcome::{EditOutcome, OpData};
use crate::models::{NodeId, DEFAULT_CHILD_DISPLAY};
use crate::navigation::{FocusIntent, NavType};
use crate::store::{DocRead, Document, StoreError};

/// Parent id and sibling index of a non-root node
pub(crate) fn attached(
    draft: &Draft,
    id: &str,
    op: &'static str,
) -> Result<(NodeId, usize), EditError> {
    let node = draft.require_node(id)?;
    let parent_id = node
        .parent_id
        .clone()
        .ok_or(EditError::RootImmutable { op })?;
    let index = draft
        .require_node(&parent_id)?
        .child_index(id)
        .ok_or_else(|| StoreError::NotListed {
            child: id.to_string(),
            parent: parent_id.clone(),
        })?;
    Ok((parent_id, index))
}

pub(crate) fn indent_in(draft: &mut Draft, id: &str) -> Result<(), EditError> {
    let (parent_id, index) = attached(draft, id, "indent")?;
    if index == 0 {
        return Err(EditError::NoPreviousSibling(id.to_string()));
    }
    let prev_id = draft.require_node(&parent_id)?.children[index - 1].clone();
    if !draft.require_node(&prev_id)?.kind.is_text() {
        return Err(EditError::PreviousNotText(prev_id));
    }
    let former_children = draft.require_node(id)?.children.clone();

    draft.modify_node(&parent_id, |parent| {
        parent.children.remove(index);
    })?;
    draft.modify_node(&prev_id, |prev| {
        prev.children.push(id.to_string());
        prev.children.extend(former_children.iter().cloned());
        if prev.attr.child_display.is_none() {
            prev.attr.child_display = Some(DEFAULT_CHILD_DISPLAY.to_string());
        }
    })?;
    draft.modify_node(id, |node| {
        node.parent_id = Some(prev_id.clone());
        node.children.clear();
    })?;
    for child in &former_children {
        draft.modify_node(child, |c| c.parent_id = Some(prev_id.clone()))?;
    }
    Ok(())
}

pub(crate) fn outdent_in(draft: &mut Draft, id: &str) -> Result<(), EditError> {
    let (parent_id, index) = attached(draft, id, "outdent")?;
    let parent = draft.require_node(&parent_id)?;
    let grand_id = parent
        .parent_id
        .clone()
        .ok_or_else(|| EditError::NoGrandparent(id.to_string()))?;
    let trailing: Vec<NodeId> = parent.children[index + 1..].to_vec();
    let parent_pos = draft
        .require_node(&grand_id)?
        .child_index(&parent_id)
        .ok_or_else(|| StoreError::NotListed {
            child: parent_id.clone(),
            parent: grand_id.clone(),
        })?;

    draft.modify_node(&parent_id, |parent| parent.children.truncate(index))?;
    draft.modify_node(&grand_id, |grand| {
        grand.children.insert(parent_pos + 1, id.to_string())
    })?;
    draft.modify_node(id, |node| {
        node.parent_id = Some(grand_id.clone());
        node.children.extend(trailing.iter().cloned());
    })?;
    for sibling in &trailing {
        draft.modify_node(sibling, |s| s.parent_id = Some(id.to_string()))?;
    }
    Ok(())
}

pub(crate) fn move_up_in(draft: &mut Draft, id: &str) -> Result<(), EditError> {
    let (parent_id, index) = attached(draft, id, "move")?;
    if index == 0 {
        return Err(EditError::NoPreviousSibling(id.to_string()));
    }
    draft.modify_node(&parent_id, |parent| parent.children.swap(index - 1, index))
}

pub(crate) fn move_down_in(draft: &mut Draft, id: &str) -> Result<(), EditError> {
    let (parent_id, index) = attached(draft, id, "move")?;
    if index + 1 >= draft.require_node(&parent_id)?.children.len() {
        return Err(EditError::NoNextSibling(id.to_string()));
    }
    draft.modify_node(&parent_id, |parent| parent.children.swap(index, index + 1))
}

/// Detach `id` and drop its whole subtree; returns the previous sibling id
pub(crate) fn delete_in(draft: &mut Draft, id: &str) -> Result<Option<NodeId>, EditError> {
    let (parent_id, index) = attached(draft, id, "delete")?;
    let prev_id = match index {
        0 => None,
        _ => Some(draft.require_node(&parent_id)?.children[index - 1].clone()),
    };
    draft.modify_node(&parent_id, |parent| {
        parent.children.remove(index);
    })?;
    let removed = draft.remove_subtree(id);
    log::debug!("delete {}: removed {} node(s)", id, removed.len());
    Ok(prev_id)
}

/// Where the cursor goes after `deleted` vanished from `parent_id`
///
/// The previous sibling (or, when it cannot hold a cursor, the nearest
/// focusable node before it), else the parent, else the next focusable node.
fn focus_after_delete(
    draft: &Draft,
    parent_id: &str,
    prev_id: Option<&str>,
) -> Option<FocusIntent> {
    if let Some(prev_id) = prev_id {
        if draft.is_focusable(prev_id) {
            return Some(FocusIntent::new(prev_id, NavType::PrevSiblingDeleted));
        }
        let mut current = draft.deepest_last_descendant(prev_id);
        while let Some(node) = current {
            if draft.is_focusable(&node.id) {
                return Some(FocusIntent::new(node.id.clone(), NavType::PrevSiblingDeleted));
            }
            current = draft.preorder_prev(&node.id);
        }
    }
    if draft.is_focusable(parent_id) {
        return Some(FocusIntent::new(parent_id, NavType::PrevSiblingDeleted));
    }
    let mut current = draft.node(parent_id);
    while let Some(node) = current {
        current = draft.preorder_next(&node.id);
        if let Some(next) = current {
            if draft.is_focusable(&next.id) {
                return Some(FocusIntent::new(next.id.clone(), NavType::FromLeft));
            }
        }
    }
    None
}

pub fn indent(doc: &Document, id: &str) -> Result<EditOutcome, EditError> {
    let mut draft = Draft::new(doc);
    indent_in(&mut draft, id)?;
    Ok(EditOutcome {
        patches: draft.into_patches(),
        focus: Some(FocusIntent::new(id, NavType::Indented)),
        data: OpData::default(),
    })
}

pub fn outdent(doc: &Document, id: &str) -> Result<EditOutcome, EditError> {
    let mut draft = Draft::new(doc);
    outdent_in(&mut draft, id)?;
    Ok(EditOutcome {
        patches: draft.into_patches(),
        focus: Some(FocusIntent::new(id, NavType::Outdented)),
        data: OpData::default(),
    })
}

pub fn move_up(doc: &Document, id: &str) -> Result<EditOutcome, EditError> {
    let mut draft = Draft::new(doc);
    move_up_in(&mut draft, id)?;
    Ok(EditOutcome {
        patches: draft.into_patches(),
        focus: Some(FocusIntent::new(id, NavType::Editing)),
        data: OpData::default(),
    })
}

pub fn move_down(doc: &Document, id: &str) -> Result<EditOutcome, EditError> {
    let mut draft = Draft::new(doc);
    move_down_in(&mut draft, id)?;
    Ok(EditOutcome {
        patches: draft.into_patches(),
        focus: Some(FocusIntent::new(id, NavType::Editing)),
        data: OpData::default(),
    })
}

pub fn delete(doc: &Document, id: &str) -> Result<EditOutcome, EditError> {
    let mut draft = Draft::new(doc);
    let (parent_id, _) = attached(&draft, id, "delete")?;
    let prev_id = delete_in(&mut draft, id)?;
    let focus = focus_after_delete(&draft, &parent_id, prev_id.as_deref());
    Ok(EditOutcome {
        patches: draft.into_patches(),
        focus,
        data: OpData {
            previous_sibling_id: prev_id,
            ..Default::default()
        },
    })
}
