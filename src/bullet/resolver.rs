//! What to measure for a node's bullet
//!
//! The bullet sits next to the first visible line of content. Which element
//! that is depends on the node and its first segment; pass-through nodes
//! have no content of their own and hand the question to their first child.

use crate::layout::{AnchorRule, MeasureTarget};
use crate::models::{NodeId, SegmentId, SegmentType};
use crate::store::DocRead;

#[derive(Clone, Debug, PartialEq)]
pub enum BulletTarget {
    Segment(SegmentId),
    Node(NodeId),
}

impl BulletTarget {
    pub fn as_measure(&self) -> MeasureTarget<'_> {
        match self {
            BulletTarget::Segment(id) => MeasureTarget::Segment(id),
            BulletTarget::Node(id) => MeasureTarget::Node(id),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum BulletPlan {
    Measure { target: BulletTarget, rule: AnchorRule },
    /// Ask the first child, same container
    Forward(NodeId),
    /// Nothing to align to
    Absent,
    Unknown(NodeId),
}

pub fn plan_bullet<D: DocRead + ?Sized>(doc: &D, node_id: &str, ratio: f64) -> BulletPlan {
    let Some(node) = doc.node(node_id) else {
        return BulletPlan::Unknown(node_id.to_string());
    };

    if let Some(first) = node.segments.first().and_then(|id| doc.segment(id)) {
        let rule = match first.kind {
            SegmentType::Text => AnchorRule::FirstLine { ratio },
            SegmentType::LatexInline => AnchorRule::BoxCenter,
            SegmentType::RefAsset | SegmentType::RefBib => AnchorRule::BoxRatio { ratio },
        };
        return BulletPlan::Measure {
            target: BulletTarget::Segment(first.id.clone()),
            rule,
        };
    }

    if node.kind.has_header_control() {
        return BulletPlan::Measure {
            target: BulletTarget::Node(node.id.clone()),
            rule: AnchorRule::HeaderCenter,
        };
    }

    if node.kind.is_pass_through() || node.is_root() {
        return match node.children.first() {
            Some(child) => BulletPlan::Forward(child.clone()),
            None => BulletPlan::Absent,
        };
    }

    // empty text, block media and anything else: the node's own first line
    BulletPlan::Measure {
        target: BulletTarget::Node(node.id.clone()),
        rule: AnchorRule::FirstLine { ratio },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Node, NodeType, Segment};
    use crate::store::Document;
    use crate::tree::Draft;

    fn doc() -> Document {
        let mut doc = Document::new("root");
        let mut draft = Draft::new(&doc);
        let mut math = Node::new("math", NodeType::Text, Some("root".to_string()));
        math.segments = vec!["m1".into(), "m2".into()];
        draft.put_segment(Segment::new("m1", "math", SegmentType::LatexInline, "x"));
        draft.put_segment(Segment::text("m2", "math", " after"));
        let mut wrap = Node::new("wrap", NodeType::Container, Some("root".to_string()));
        wrap.children = vec!["img".into()];
        draft.put_node(math);
        draft.put_node(wrap);
        draft.put_node(Node::new("img", NodeType::Image, Some("wrap".to_string())));
        draft.put_node(Node::new("panel", NodeType::Panel, Some("root".to_string())));
        draft.put_node(Node::new("hollow", NodeType::Array, Some("root".to_string())));
        draft
            .modify_node("root", |r| {
                r.children = vec!["math".into(), "wrap".into(), "panel".into(), "hollow".into()]
            })
            .unwrap();
        let patches = draft.into_patches();
        doc.apply(&patches);
        doc
    }

    #[test]
    fn test_first_segment_decides_rule() {
        let doc = doc();
        assert_eq!(
            plan_bullet(&doc, "math", 0.6),
            BulletPlan::Measure {
                target: BulletTarget::Segment("m1".to_string()),
                rule: AnchorRule::BoxCenter
            }
        );
    }

    #[test]
    fn test_structural_and_media_nodes() {
        let doc = doc();
        assert_eq!(
            plan_bullet(&doc, "panel", 0.6),
            BulletPlan::Measure {
                target: BulletTarget::Node("panel".to_string()),
                rule: AnchorRule::HeaderCenter
            }
        );
        assert_eq!(
            plan_bullet(&doc, "img", 0.5),
            BulletPlan::Measure {
                target: BulletTarget::Node("img".to_string()),
                rule: AnchorRule::FirstLine { ratio: 0.5 }
            }
        );
    }

    #[test]
    fn test_pass_through_forwards_or_is_absent() {
        let doc = doc();
        assert_eq!(plan_bullet(&doc, "wrap", 0.6), BulletPlan::Forward("img".to_string()));
        assert_eq!(plan_bullet(&doc, "hollow", 0.6), BulletPlan::Absent);
        assert_eq!(
            plan_bullet(&doc, "ghost", 0.6),
            BulletPlan::Unknown("ghost".to_string())
        );
    }
}
