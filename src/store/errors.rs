//! Error types for the node and segment stores

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("node not found: {0}")]
    NodeNotFound(String),

    #[error("segment not found: {0}")]
    SegmentNotFound(String),

    #[error("root node {0} is missing from the node map")]
    MissingRoot(String),

    #[error("root node {0} must not have a parent")]
    RootHasParent(String),

    #[error("node {child} is listed under {expected} but its parentId is {found:?}")]
    ParentMismatch {
        child: String,
        expected: String,
        found: Option<String>,
    },

    #[error("node {child} claims parent {parent} but is not among its children")]
    NotListed { child: String, parent: String },

    #[error("node {0} is reachable more than once (cycle or shared child)")]
    DuplicateReachable(String),

    #[error("segment {segment} is listed under {expected} but belongs to {found}")]
    SegmentOwnerMismatch {
        segment: String,
        expected: String,
        found: String,
    },
}
