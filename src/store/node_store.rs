//! Node store: canonical map of node id to node record plus the root id

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::errors::StoreError;
use crate::models::{Node, NodeId, NodeType};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeStore {
    root_id: NodeId,
    nodes: HashMap<NodeId, Node>,
}

impl NodeStore {
    pub fn new(root_id: impl Into<NodeId>, nodes: HashMap<NodeId, Node>) -> Self {
        Self {
            root_id: root_id.into(),
            nodes,
        }
    }

    /// Store holding a single empty root of the given type
    pub fn with_root(root_id: impl Into<NodeId>, kind: NodeType) -> Self {
        let root_id = root_id.into();
        let mut nodes = HashMap::new();
        nodes.insert(root_id.clone(), Node::new(root_id.clone(), kind, None));
        Self { root_id, nodes }
    }

    pub fn root_id(&self) -> &str {
        &self.root_id
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Insert or replace a record, returning the previous one
    pub fn insert(&mut self, node: Node) -> Option<Node> {
        self.nodes.insert(node.id.clone(), node)
    }

    pub fn remove(&mut self, id: &str) -> Option<Node> {
        self.nodes.remove(id)
    }

    /// Point mutation of one record
    pub fn update<F>(&mut self, id: &str, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Node),
    {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| StoreError::NodeNotFound(id.to_string()))?;
        f(node);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn as_map(&self) -> &HashMap<NodeId, Node> {
        &self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_root() {
        let store = NodeStore::with_root("root", NodeType::Anonymous);
        assert_eq!(store.root_id(), "root");
        assert!(store.get("root").unwrap().is_root());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_missing_node() {
        let mut store = NodeStore::with_root("root", NodeType::Anonymous);
        let result = store.update("ghost", |n| n.children.clear());
        assert_eq!(result, Err(StoreError::NodeNotFound("ghost".to_string())));
    }

    #[test]
    fn test_insert_replaces() {
        let mut store = NodeStore::with_root("root", NodeType::Anonymous);
        let mut replacement = Node::new("root", NodeType::Text, None);
        replacement.children.push("a".to_string());
        let previous = store.insert(replacement);
        assert_eq!(previous.map(|n| n.kind), Some(NodeType::Anonymous));
        assert_eq!(store.get("root").unwrap().children, vec!["a".to_string()]);
    }
}
