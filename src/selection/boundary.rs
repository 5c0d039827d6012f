//! Resolving a native selection boundary to a segment id
//!
//! A boundary is `(container, offset)`. Inside a segment the container (or
//! one of its ancestors) carries the segment id. Between segments the
//! container is some wrapper, and `offset` indexes its children: the nearest
//! segment at or after that child wins, else the nearest one before it.

use crate::models::SegmentId;

/// Minimal read access to a rendered tree
pub trait DomAccess {
    type Handle: Clone;

    fn parent(&self, node: &Self::Handle) -> Option<Self::Handle>;

    fn children(&self, node: &Self::Handle) -> Vec<Self::Handle>;

    /// Segment id carried by this element itself, if any
    fn segment_id(&self, node: &Self::Handle) -> Option<SegmentId>;
}

fn enclosing_segment<A: DomAccess>(dom: &A, node: &A::Handle) -> Option<SegmentId> {
    let mut current = Some(node.clone());
    while let Some(handle) = current {
        if let Some(id) = dom.segment_id(&handle) {
            return Some(id);
        }
        current = dom.parent(&handle);
    }
    None
}

/// First segment in document order at or below `node`
fn first_segment_within<A: DomAccess>(dom: &A, node: &A::Handle) -> Option<SegmentId> {
    if let Some(id) = dom.segment_id(node) {
        return Some(id);
    }
    dom.children(node)
        .iter()
        .find_map(|child| first_segment_within(dom, child))
}

/// Last segment in document order at or below `node`
fn last_segment_within<A: DomAccess>(dom: &A, node: &A::Handle) -> Option<SegmentId> {
    if let Some(id) = dom.segment_id(node) {
        return Some(id);
    }
    dom.children(node)
        .iter()
        .rev()
        .find_map(|child| last_segment_within(dom, child))
}

pub fn resolve_boundary<A: DomAccess>(
    dom: &A,
    container: &A::Handle,
    offset: usize,
) -> Option<SegmentId> {
    if let Some(id) = enclosing_segment(dom, container) {
        return Some(id);
    }
    let children = dom.children(container);
    let split = offset.min(children.len());
    children[split..]
        .iter()
        .find_map(|child| first_segment_within(dom, child))
        .or_else(|| {
            children[..split]
                .iter()
                .rev()
                .find_map(|child| last_segment_within(dom, child))
        })
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;

    /// Arena tree: `(parent, segment id)` per handle, children in insertion order
    #[derive(Default)]
    pub struct FakeDom {
        pub nodes: Vec<(Option<usize>, Option<String>)>,
    }

    impl FakeDom {
        pub fn add(&mut self, parent: Option<usize>, segment: Option<&str>) -> usize {
            self.nodes.push((parent, segment.map(str::to_string)));
            self.nodes.len() - 1
        }
    }

    impl DomAccess for FakeDom {
        type Handle = usize;

        fn parent(&self, node: &usize) -> Option<usize> {
            self.nodes[*node].0
        }

        fn children(&self, node: &usize) -> Vec<usize> {
            (0..self.nodes.len())
                .filter(|i| self.nodes[*i].0 == Some(*node))
                .collect()
        }

        fn segment_id(&self, node: &usize) -> Option<SegmentId> {
            self.nodes[*node].1.clone()
        }
    }
}
