//! Tree edit engine
//!
//! Pure operations over a committed [`Document`]: every operation reads the
//! document, works on a [`Draft`] overlay and returns an [`EditOutcome`]
//! holding the patch list plus the focus request to raise once the patches
//! land. Nothing here mutates the document; on failure nothing is produced.
//!
//! ## Modules
//!
//! - `draft`: copy-on-write overlay that coalesces writes into patches
//! - `structure`: indent, outdent, move up/down, delete
//! - `text`: split, merge, create-after, record updates
//! - `multi`: indent/outdent over a selection of nodes
//! - `ids`: id generation for created records

pub mod draft;
pub mod errors;
pub mod ids;
pub mod multi;
pub mod outcome;
pub mod structure;
pub mod text;

use serde::{Deserialize, Serialize};

use crate::models::{NodeAttr, NodeId, SegmentId};
use crate::store::Document;

pub use draft::Draft;
pub use errors::EditError;
pub use ids::{IdSource, SequentialIds, UuidIds};
pub use multi::{indent_nodes, outdent_nodes};
pub use outcome::{EditOutcome, OpData};
pub use structure::{delete, indent, move_down, move_up, outdent};
pub use text::{create_node_after, merge, split, update_node_attr, update_segment_text};

/// A tree operation as it arrives from the host
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum TreeOp {
    Indent { node_id: NodeId },
    Outdent { node_id: NodeId },
    Split { node_id: NodeId, position: usize },
    Merge { node_id: NodeId },
    Delete { node_id: NodeId },
    CreateNodeAfter { node_id: NodeId },
    MoveUp { node_id: NodeId },
    MoveDown { node_id: NodeId },
    IndentNodes { node_ids: Vec<NodeId> },
    OutdentNodes { node_ids: Vec<NodeId> },
    UpdateSegmentText { segment_id: SegmentId, text: String },
    UpdateNodeAttr { node_id: NodeId, attr: NodeAttr },
}

impl TreeOp {
    pub fn name(&self) -> &'static str {
        match self {
            TreeOp::Indent { .. } => "indent",
            TreeOp::Outdent { .. } => "outdent",
            TreeOp::Split { .. } => "split",
            TreeOp::Merge { .. } => "merge",
            TreeOp::Delete { .. } => "delete",
            TreeOp::CreateNodeAfter { .. } => "createNodeAfter",
            TreeOp::MoveUp { .. } => "moveUp",
            TreeOp::MoveDown { .. } => "moveDown",
            TreeOp::IndentNodes { .. } => "indentNodes",
            TreeOp::OutdentNodes { .. } => "outdentNodes",
            TreeOp::UpdateSegmentText { .. } => "updateSegmentText",
            TreeOp::UpdateNodeAttr { .. } => "updateNodeAttr",
        }
    }

    /// Run the operation against `doc`
    pub fn run(&self, doc: &Document, ids: &mut dyn IdSource) -> Result<EditOutcome, EditError> {
        let result = match self {
            TreeOp::Indent { node_id } => indent(doc, node_id),
            TreeOp::Outdent { node_id } => outdent(doc, node_id),
            TreeOp::Split { node_id, position } => split(doc, ids, node_id, *position),
            TreeOp::Merge { node_id } => merge(doc, node_id),
            TreeOp::Delete { node_id } => delete(doc, node_id),
            TreeOp::CreateNodeAfter { node_id } => create_node_after(doc, ids, node_id),
            TreeOp::MoveUp { node_id } => move_up(doc, node_id),
            TreeOp::MoveDown { node_id } => move_down(doc, node_id),
            TreeOp::IndentNodes { node_ids } => indent_nodes(doc, node_ids),
            TreeOp::OutdentNodes { node_ids } => outdent_nodes(doc, node_ids),
            TreeOp::UpdateSegmentText { segment_id, text } => {
                update_segment_text(doc, segment_id, text)
            }
            TreeOp::UpdateNodeAttr { node_id, attr } => update_node_attr(doc, node_id, attr),
        };
        match &result {
            Ok(outcome) if outcome.is_noop() => log::debug!("{}: no change", self.name()),
            Ok(outcome) => log::debug!("{}: {} patch(es)", self.name(), outcome.patches.len()),
            Err(err) => log::warn!("{} rejected: {}", self.name(), err),
        }
        result
    }
}
