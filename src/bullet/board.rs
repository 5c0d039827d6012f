//! Bullet request slots keyed by `(node, container class)`

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{NodeId, OpResult};
use crate::store::CounterGate;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub struct BulletKey {
    pub node_id: NodeId,
    pub container_class: String,
}

impl BulletKey {
    pub fn new(node_id: impl Into<NodeId>, container_class: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            container_class: container_class.into(),
        }
    }

    /// Same container, another node
    pub fn for_node(&self, node_id: &str) -> Self {
        Self::new(node_id, self.container_class.clone())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BulletRequest {
    pub request_counter: u64,
    pub response_counter: u64,
    /// Vertical pixel offset of the bullet anchor inside the container
    pub result: OpResult<f64>,
}

impl BulletRequest {
    pub fn is_outstanding(&self) -> bool {
        self.response_counter < self.request_counter
    }
}

#[derive(Clone, Debug, Default)]
pub struct BulletBoard {
    requests: HashMap<BulletKey, BulletRequest>,
}

impl BulletBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the request counter for `key`, opening the slot if needed
    pub fn request(&mut self, key: &BulletKey) -> u64 {
        let slot = self
            .requests
            .entry(key.clone())
            .or_insert_with(|| BulletRequest {
                request_counter: 0,
                response_counter: 0,
                result: OpResult::absent("not measured yet"),
            });
        slot.request_counter += 1;
        slot.request_counter
    }

    /// Store a result and mark the current request answered
    pub fn respond(&mut self, key: &BulletKey, result: OpResult<f64>) {
        if let Some(slot) = self.requests.get_mut(key) {
            slot.response_counter = slot.request_counter;
            slot.result = result;
        }
    }

    pub fn get(&self, key: &BulletKey) -> Option<&BulletRequest> {
        self.requests.get(key)
    }

    /// Keys whose request counter the gate has not handled, in no particular order
    pub fn pending(&self, gate: &CounterGate<BulletKey>) -> Vec<BulletKey> {
        self.requests
            .iter()
            .filter(|(key, req)| gate.is_pending(key, req.request_counter))
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Drop every slot belonging to `node_id`
    pub fn remove_node(&mut self, node_id: &str) {
        self.requests.retain(|key, _| key.node_id != node_id);
    }
}
