//! Read-only tree queries shared by the document and engine drafts
//!
//! Everything here is derived from three lookups (`root_id`, `node`,
//! `segment`), so the committed document and an in-flight draft answer tree
//! questions the same way.

use crate::models::{Node, NodeId, Segment, SegmentId};

pub trait DocRead {
    fn root_id(&self) -> &str;

    fn node(&self, id: &str) -> Option<&Node>;

    fn segment(&self, id: &str) -> Option<&Segment>;

    fn parent_of(&self, id: &str) -> Option<&Node> {
        let node = self.node(id)?;
        self.node(node.parent_id.as_deref()?)
    }

    fn previous_sibling(&self, id: &str) -> Option<&Node> {
        let parent = self.parent_of(id)?;
        let index = parent.child_index(id)?;
        if index == 0 {
            return None;
        }
        self.node(&parent.children[index - 1])
    }

    fn next_sibling(&self, id: &str) -> Option<&Node> {
        let parent = self.parent_of(id)?;
        let index = parent.child_index(id)?;
        self.node(parent.children.get(index + 1)?)
    }

    /// Resolved segment records of a node, in reading order (missing ids skipped)
    fn segments_of(&self, id: &str) -> Vec<&Segment> {
        match self.node(id) {
            Some(node) => node
                .segments
                .iter()
                .filter_map(|seg_id| self.segment(seg_id))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Concatenated raw text of a node's segments
    fn node_text(&self, id: &str) -> String {
        self.segments_of(id)
            .iter()
            .map(|seg| seg.text_raw.as_str())
            .collect()
    }

    fn node_char_len(&self, id: &str) -> usize {
        self.segments_of(id).iter().map(|seg| seg.char_len()).sum()
    }

    /// Char offset within the node where `segment_id` starts
    fn segment_start_offset(&self, node_id: &str, segment_id: &str) -> Option<usize> {
        let mut offset = 0;
        for seg in self.segments_of(node_id) {
            if seg.id == segment_id {
                return Some(offset);
            }
            offset += seg.char_len();
        }
        None
    }

    /// Map a node-level char offset to `(segment id, offset inside segment)`
    ///
    /// Offsets on a boundary resolve to the end of the earlier segment; offsets
    /// past the end clamp to the end of the last segment.
    fn locate_offset(&self, node_id: &str, offset: usize) -> Option<(SegmentId, usize)> {
        let segments = self.segments_of(node_id);
        let last = segments.last()?;
        let mut start = 0;
        for seg in &segments {
            let len = seg.char_len();
            if offset <= start + len {
                return Some((seg.id.clone(), offset - start));
            }
            start += len;
        }
        Some((last.id.clone(), last.char_len()))
    }

    /// Whether a node can own the cursor
    ///
    /// Nodes with segments always can. Pass-through nodes and a segment-less
    /// root have nothing to put a cursor on.
    fn is_focusable(&self, id: &str) -> bool {
        match self.node(id) {
            Some(node) if node.has_segments() => true,
            Some(node) => !node.is_root() && !node.kind.is_pass_through(),
            None => false,
        }
    }

    /// Deepest last descendant of `id` (the node itself when childless)
    fn deepest_last_descendant(&self, id: &str) -> Option<&Node> {
        let mut current = self.node(id)?;
        while let Some(last) = current.children.last() {
            match self.node(last) {
                Some(child) => current = child,
                None => break,
            }
        }
        Some(current)
    }

    /// Previous node in pre-order: previous sibling's deepest last descendant, else parent
    fn preorder_prev(&self, id: &str) -> Option<&Node> {
        match self.previous_sibling(id) {
            Some(prev) => self.deepest_last_descendant(&prev.id),
            None => self.parent_of(id),
        }
    }

    /// Next node in pre-order: first child, else next sibling, else nearest ancestor's next sibling
    fn preorder_next(&self, id: &str) -> Option<&Node> {
        let node = self.node(id)?;
        if let Some(first) = node.children.first() {
            if let Some(child) = self.node(first) {
                return Some(child);
            }
        }
        let mut current = node;
        loop {
            if let Some(next) = self.next_sibling(&current.id) {
                return Some(next);
            }
            current = self.parent_of(&current.id)?;
        }
    }

    /// Node ids in pre-order starting at the root
    fn preorder_ids(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root_id().to_string()];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.node(&id) {
                stack.extend(node.children.iter().rev().cloned());
                out.push(id);
            }
        }
        out
    }
}
