//! Bullet-alignment protocol
//!
//! A bullet container asks a node where its first line sits by raising the
//! request counter for `(nodeId, containerClass)`. Serving measures the
//! element chosen by `resolver::plan_bullet` and writes the result back,
//! raising the response counter. Pass-through nodes forward: a request is
//! opened against the first child with the same container class, served in
//! the same call, and its result copied upward.
//!
//! ## Modules
//!
//! - `board`: request slots and counters
//! - `resolver`: effective measurement target and anchor rule per node

pub mod board;
pub mod resolver;

pub use board::{BulletBoard, BulletKey, BulletRequest};
pub use resolver::{plan_bullet, BulletPlan, BulletTarget};

use crate::layout::LayoutMeasurer;
use crate::models::OpResult;
use crate::store::{CounterGate, DocRead};

/// Serve the request in `key`'s slot if the gate has not handled it yet
///
/// Returns the result written, or `None` when there was nothing new to serve.
pub fn serve_bullet<D: DocRead + ?Sized>(
    board: &mut BulletBoard,
    gate: &mut CounterGate<BulletKey>,
    doc: &D,
    measurer: &dyn LayoutMeasurer,
    key: &BulletKey,
    ratio: f64,
) -> Option<OpResult<f64>> {
    let counter = board.get(key)?.request_counter;
    if !gate.admit(key, counter) {
        return None;
    }

    let result = match plan_bullet(doc, &key.node_id, ratio) {
        BulletPlan::Measure { target, rule } => measurer
            .measure(target.as_measure(), &key.container_class)
            .and_then(|metrics| rule.anchor(&metrics))
            .map_or_else(
                || OpResult::error(format!("{:?} is not measurable", target)),
                OpResult::ok,
            ),
        BulletPlan::Forward(child) => {
            log::debug!("bullet {} forwards to {}", key.node_id, child);
            let child_key = key.for_node(&child);
            board.request(&child_key);
            match serve_bullet(board, gate, doc, measurer, &child_key, ratio) {
                Some(result) => result,
                None => OpResult::error(format!("forwarded request to {} was not served", child)),
            }
        }
        BulletPlan::Absent => OpResult::absent(format!("{} has no child to align to", key.node_id)),
        BulletPlan::Unknown(node_id) => OpResult::error(format!("node not found: {}", node_id)),
    };

    board.respond(key, result.clone());
    Some(result)
}
