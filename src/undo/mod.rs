use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;

use crate::models::SegmentId;
use crate::store::{Document, Patch};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UndoError {
    #[error("No undo history available")]
    NothingToUndo,

    #[error("No redo history available")]
    NothingToRedo,
}

/// A reversible edit: the patches applied and the patches that revert them
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatchBatch {
    pub forward: Vec<Patch>,
    /// Computed against the document before `forward` was applied
    pub inverse: Vec<Patch>,
}

impl PatchBatch {
    pub fn new(forward: Vec<Patch>, inverse: Vec<Patch>) -> Self {
        Self { forward, inverse }
    }

    /// Append `next` so the pair applies (and reverts) as one step
    fn absorb(&mut self, next: PatchBatch) {
        self.forward.extend(next.forward);
        let mut inverse = next.inverse;
        inverse.append(&mut self.inverse);
        self.inverse = inverse;
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

/// What kind of edit produced a batch (drives batching)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditKind {
    /// Text typed into one segment; `new_text` is the segment's text after the edit
    Text {
        segment_id: SegmentId,
        new_text: String,
    },
    /// Anything that changes tree shape or attributes
    Structural,
}

/// Manages undo/redo history with batching of consecutive typing
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UndoStack {
    /// Batches that can be undone
    pub batches: VecDeque<PatchBatch>,
    /// Current position in the stack (for redo support)
    pub current_index: usize,
    /// Maximum number of batches to keep in history
    max_size: usize,
    /// Typing being accumulated (if any)
    #[serde(skip)]
    current_batch: Option<PatchBatch>,
    /// Segment the current typing batch belongs to
    #[serde(skip)]
    last_segment: Option<SegmentId>,
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new(100)
    }
}

impl PartialEq for UndoStack {
    fn eq(&self, other: &Self) -> bool {
        // Only compare serialized fields (skip transient fields)
        self.batches == other.batches
            && self.current_index == other.current_index
            && self.max_size == other.max_size
    }
}

impl UndoStack {
    pub fn new(max_size: usize) -> Self {
        Self {
            batches: VecDeque::new(),
            current_index: 0,
            max_size: max_size.max(1),
            current_batch: None,
            last_segment: None,
        }
    }

    /// Record an applied edit
    ///
    /// Batching breaks on:
    /// - Structural edits (each is its own step)
    /// - Typing into a different segment
    /// - Text ending in whitespace (a finished word)
    pub fn push(&mut self, batch: PatchBatch, kind: EditKind) {
        if batch.is_empty() {
            return;
        }
        match kind {
            EditKind::Structural => {
                self.finalize_batch();
                self.commit(batch);
            }
            EditKind::Text {
                segment_id,
                new_text,
            } => {
                if self.last_segment.as_ref() != Some(&segment_id) {
                    self.finalize_batch();
                }
                match &mut self.current_batch {
                    Some(current) => current.absorb(batch),
                    None => self.current_batch = Some(batch),
                }
                self.last_segment = Some(segment_id);
                if new_text.ends_with(char::is_whitespace) {
                    self.finalize_batch();
                }
            }
        }
    }

    /// Finalize the current typing batch and add it to the undo stack
    pub fn finalize_batch(&mut self) {
        self.last_segment = None;
        if let Some(batch) = self.current_batch.take() {
            self.commit(batch);
        }
    }

    fn commit(&mut self, batch: PatchBatch) {
        // Truncate any redo history when a new batch is added
        self.batches.truncate(self.current_index);
        self.batches.push_back(batch);
        self.current_index = self.batches.len();

        if self.batches.len() > self.max_size {
            self.batches.pop_front();
            self.current_index = self.current_index.saturating_sub(1);
        }
    }

    /// Revert the last batch on `doc`
    pub fn undo(&mut self, doc: &mut Document) -> Result<(), UndoError> {
        self.finalize_batch();
        if !self.can_undo() {
            return Err(UndoError::NothingToUndo);
        }
        self.current_index -= 1;
        doc.apply(&self.batches[self.current_index].inverse);
        Ok(())
    }

    /// Re-apply the last undone batch on `doc`
    pub fn redo(&mut self, doc: &mut Document) -> Result<(), UndoError> {
        if !self.can_redo() {
            return Err(UndoError::NothingToRedo);
        }
        doc.apply(&self.batches[self.current_index].forward);
        self.current_index += 1;
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.current_index > 0 || self.current_batch.is_some()
    }

    pub fn can_redo(&self) -> bool {
        self.current_batch.is_none() && self.current_index < self.batches.len()
    }

    pub fn clear(&mut self) {
        self.batches.clear();
        self.current_index = 0;
        self.current_batch = None;
        self.last_segment = None;
    }

    pub fn redo_count(&self) -> usize {
        self.batches.len() - self.current_index
    }
}
